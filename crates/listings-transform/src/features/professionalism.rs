//! Host professionalism score.
//!
//! A weighted blend of how much of the year a listing is bookable, how many
//! listings the host runs, and how fast the host answers.

use listings_common::{column_f64_values, column_string_values};
use listings_model::HostResponseTime;
use listings_model::columns::{
    AVAILABILITY_365, HOST_LISTINGS_COUNT, HOST_RESPONSE_TIME, PROFESSIONALISM,
};
use polars::prelude::{Column, DataFrame, PolarsResult};

use crate::error::{Result, TransformError};

const AVAILABILITY_WEIGHT: f64 = 0.5;
const LISTINGS_WEIGHT: f64 = 0.25;
const RESPONSE_WEIGHT: f64 = 0.25;

/// Score for days available in the next year.
pub fn availability_score(days: Option<f64>) -> f64 {
    match days {
        None => 0.0,
        Some(d) if d < 0.0 => 0.0,
        Some(d) if d <= 50.0 => 0.2,
        Some(d) if d <= 100.0 => 0.4,
        Some(d) if d <= 200.0 => 0.6,
        Some(d) if d <= 300.0 => 0.8,
        Some(_) => 1.0,
    }
}

/// Score for the number of listings the host manages.
pub fn listings_score(count: Option<f64>) -> f64 {
    match count {
        None => 0.0,
        Some(c) if c < 1.0 => 0.0,
        Some(c) if c == 1.0 => 0.2,
        Some(c) if c <= 5.0 => 0.4,
        Some(c) if c <= 10.0 => 0.6,
        Some(c) if c <= 50.0 => 0.8,
        Some(_) => 1.0,
    }
}

/// Score for the reported response time; unknown wording scores zero.
pub fn response_time_score(raw: Option<&str>) -> f64 {
    raw.and_then(|value| value.parse::<HostResponseTime>().ok())
        .map_or(0.0, |response| response.score())
}

pub fn professionalism_score(availability: f64, listings: f64, response: f64) -> f64 {
    AVAILABILITY_WEIGHT * availability + LISTINGS_WEIGHT * listings + RESPONSE_WEIGHT * response
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ProfessionalismSummary {
    pub mean: f64,
}

fn required<T>(result: PolarsResult<T>, column: &str) -> Result<T> {
    result.map_err(|_| TransformError::ColumnNotFound {
        column: column.to_string(),
    })
}

/// Adds the `professionalism` column from availability, host listings, and
/// response time.
pub fn add_professionalism(df: &mut DataFrame) -> Result<ProfessionalismSummary> {
    let availability = required(column_f64_values(df, AVAILABILITY_365), AVAILABILITY_365)?;
    let listings = required(column_f64_values(df, HOST_LISTINGS_COUNT), HOST_LISTINGS_COUNT)?;
    let response = required(column_string_values(df, HOST_RESPONSE_TIME), HOST_RESPONSE_TIME)?;

    let scores: Vec<f64> = availability
        .iter()
        .zip(&listings)
        .zip(&response)
        .map(|((days, count), time)| {
            professionalism_score(
                availability_score(*days),
                listings_score(*count),
                response_time_score(time.as_deref()),
            )
        })
        .collect();

    let mean = if scores.is_empty() {
        0.0
    } else {
        scores.iter().sum::<f64>() / scores.len() as f64
    };
    df.with_column(Column::new(PROFESSIONALISM.into(), scores))?;

    tracing::debug!(mean, "scored host professionalism");
    Ok(ProfessionalismSummary { mean })
}
