//! Amenity counts.
//!
//! The export stores amenities as a brace-wrapped, comma-separated list
//! (`{TV,Wifi,"Air conditioning"}`). Two counts are derived from it and the
//! raw text is dropped.

use std::collections::{BTreeSet, HashMap};

use listings_common::column_string_values;
use listings_model::columns::{AMENITIES_COUNT, AMENITIES_PREMIUM_COUNT};
use polars::prelude::{Column, DataFrame};

use crate::error::{Result, TransformError};

/// Number of maximal runs of characters other than `,` and `{`.
pub fn count_amenities(raw: Option<&str>) -> u32 {
    raw.map_or(0, |text| {
        text.split([',', '{'])
            .filter(|item| !item.is_empty())
            .count() as u32
    })
}

/// Items of one amenities value, split on commas and trimmed.
fn amenity_items(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim)
}

/// Amenities rare enough to count as premium.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PremiumAmenities {
    items: BTreeSet<String>,
}

impl PremiumAmenities {
    /// Items whose frequency is at most `ratio * listing_count`.
    ///
    /// Frequencies count every occurrence across all non-null values.
    pub fn from_listings<'a, I>(values: I, listing_count: usize, ratio: f64) -> Self
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        let mut frequency: HashMap<&'a str, usize> = HashMap::new();
        for text in values.into_iter().flatten() {
            for item in amenity_items(text) {
                *frequency.entry(item).or_default() += 1;
            }
        }
        let threshold = listing_count as f64 * ratio;
        let items = frequency
            .into_iter()
            .filter(|(_, count)| *count as f64 <= threshold)
            .map(|(item, _)| item.to_string())
            .collect();
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, item: &str) -> bool {
        self.items.contains(item)
    }

    /// Premium items in one listing, counting repeats.
    pub fn count_in(&self, raw: Option<&str>) -> u32 {
        raw.map_or(0, |text| {
            amenity_items(text).filter(|item| self.contains(item)).count() as u32
        })
    }
}

/// Summary of the amenity stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AmenitySummary {
    pub listings: usize,
    pub premium_items: usize,
}

/// Adds `amenities_count` and `amenities_premium_count`, then drops `column`.
pub fn add_amenity_features(
    df: &mut DataFrame,
    column: &str,
    premium_ratio: f64,
) -> Result<AmenitySummary> {
    let raw = column_string_values(df, column).map_err(|_| TransformError::ColumnNotFound {
        column: column.to_string(),
    })?;

    let premium =
        PremiumAmenities::from_listings(raw.iter().map(Option::as_deref), raw.len(), premium_ratio);
    let counts: Vec<u32> = raw.iter().map(|v| count_amenities(v.as_deref())).collect();
    let premium_counts: Vec<u32> = raw.iter().map(|v| premium.count_in(v.as_deref())).collect();

    df.with_column(Column::new(AMENITIES_COUNT.into(), counts))?;
    df.with_column(Column::new(AMENITIES_PREMIUM_COUNT.into(), premium_counts))?;
    df.drop_in_place(column)?;

    tracing::debug!(
        listings = raw.len(),
        premium_items = premium.len(),
        "derived amenity counts"
    );
    Ok(AmenitySummary {
        listings: raw.len(),
        premium_items: premium.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{NamedFrom, Series};

    #[test]
    fn test_count_amenities() {
        assert_eq!(count_amenities(Some("{TV,Wifi,Kitchen}")), 3);
        assert_eq!(count_amenities(Some("{}")), 1);
        assert_eq!(count_amenities(Some("{TV,,Wifi}")), 2);
        assert_eq!(count_amenities(Some("")), 0);
        assert_eq!(count_amenities(None), 0);
    }

    #[test]
    fn test_premium_threshold_is_inclusive() {
        let values = [
            Some("{Wifi,TV}"),
            Some("{Wifi,Pool}"),
            Some("{Wifi,TV}"),
            None,
        ];
        // Threshold is 4 * 0.25 = 1.0: only items seen once are premium.
        let premium = PremiumAmenities::from_listings(values, 4, 0.25);

        assert!(premium.contains("Pool}"));
        assert!(!premium.contains("TV}"));
        assert_eq!(premium.count_in(Some("{Wifi,Pool}")), 1);
        assert_eq!(premium.count_in(None), 0);
    }

    #[test]
    fn test_add_features_drops_raw_column() {
        let mut df = DataFrame::new(vec![
            Series::new(
                "amenities".into(),
                vec![Some("{TV,Wifi}"), None, Some("{Wifi,Sauna}")],
            )
            .into(),
        ])
        .unwrap();

        let summary = add_amenity_features(&mut df, "amenities", 0.5).unwrap();

        assert!(df.column("amenities").is_err());
        let counts: Vec<Option<u32>> = df
            .column(AMENITIES_COUNT)
            .unwrap()
            .u32()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(counts, vec![Some(2), Some(0), Some(2)]);
        assert_eq!(summary.listings, 3);
        // Threshold 1.5: "{TV", "Wifi}", "{Wifi" and "Sauna}" each appear once.
        assert_eq!(summary.premium_items, 4);
    }
}
