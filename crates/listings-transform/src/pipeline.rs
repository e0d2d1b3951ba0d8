//! Cleaning pipeline over a selected listings frame.
//!
//! Stages run in this order:
//! 1. **Amenities**: amenity and premium-amenity counts
//! 2. **Price**: strip formatting, drop unparseable rows
//! 3. **Districts**: neighbourhood → district label
//! 4. **Professionalism**: weighted host score
//! 5. **Imputation**: fill missing floor areas
//! 6. **Units**: square feet → square metres plus provenance flag
//!
//! Row filtering happens only in the price stage, so the imputation sees the
//! final set of rows in their final order.

use std::time::Instant;

use listings_model::CleaningOptions;
use listings_model::columns::{AMENITIES, NEIGHBOURHOOD, PRICE};
use polars::prelude::DataFrame;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, info_span};

use crate::error::Result;
use crate::features::{
    AmenitySummary, ProfessionalismSummary, add_amenity_features, add_professionalism,
};
use crate::imputation::{
    HierarchicalImputer, ImputationColumns, ImputationReport, impute_floor_area,
};
use crate::normalization::{
    DistrictNormalization, PriceCleaning, clean_price_column, normalize_district_column,
};
use crate::units::{AreaConversion, AreaSummary};

/// Everything the pipeline measured along the way.
#[derive(Debug, Clone, PartialEq)]
pub struct CleaningReport {
    pub input_rows: usize,
    pub amenities: AmenitySummary,
    pub price: PriceCleaning,
    pub districts: DistrictNormalization,
    pub professionalism: ProfessionalismSummary,
    pub imputation: ImputationReport,
    pub area: AreaSummary,
    pub output_rows: usize,
    /// Null count per output column, in column order.
    pub null_counts: Vec<(String, usize)>,
}

/// Runs every transformation stage with one set of options.
#[derive(Debug, Clone)]
pub struct CleaningPipeline {
    options: CleaningOptions,
    imputer: HierarchicalImputer,
}

impl CleaningPipeline {
    /// Validates `options` up front so no stage starts with bad settings.
    pub fn new(options: CleaningOptions) -> Result<Self> {
        options.validate()?;
        let imputer = HierarchicalImputer::new(options.imputation.clone())?;
        Ok(Self { options, imputer })
    }

    pub fn options(&self) -> &CleaningOptions {
        &self.options
    }

    /// Cleans `df`, returning the output frame (with the provenance column)
    /// and the report.
    ///
    /// The imputation generator is seeded from the options, so the same
    /// input always produces the same output.
    pub fn run(&self, mut df: DataFrame) -> Result<(DataFrame, CleaningReport)> {
        let input_rows = df.height();

        let amenities = stage("amenities", || {
            add_amenity_features(&mut df, AMENITIES, self.options.premium_amenity_ratio)
        })?;
        let price = stage("price", || clean_price_column(&mut df, PRICE))?;
        let districts = stage("districts", || normalize_district_column(&mut df, NEIGHBOURHOOD))?;
        let professionalism = stage("professionalism", || add_professionalism(&mut df))?;

        let mut rng = StdRng::seed_from_u64(self.options.imputation.seed);
        let imputation = stage("imputation", || {
            impute_floor_area(
                &mut df,
                &ImputationColumns::default(),
                &self.imputer,
                &mut rng,
            )
        })?;
        let area = stage("units", || {
            AreaConversion::square_feet_to_meters(self.options.sqft_to_sqm)
                .apply(&mut df, &imputation.mask)
        })?;

        let null_counts = df
            .get_columns()
            .iter()
            .map(|column| (column.name().to_string(), column.null_count()))
            .collect();

        let report = CleaningReport {
            input_rows,
            amenities,
            price,
            districts,
            professionalism,
            imputation,
            area,
            output_rows: df.height(),
            null_counts,
        };
        Ok((df, report))
    }
}

fn stage<T>(name: &'static str, run: impl FnOnce() -> Result<T>) -> Result<T> {
    let span = info_span!("stage", stage = name);
    let _guard = span.enter();
    let start = Instant::now();
    let outcome = run()?;
    info!(duration_ms = start.elapsed().as_millis(), "stage complete");
    Ok(outcome)
}
