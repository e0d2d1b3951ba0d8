//! Price cleaning.

use listings_common::{column_string_values, parse_f64};
use polars::prelude::{BooleanChunked, Column, DataFrame, NewChunkedArray};

use crate::error::{Result, TransformError};

/// Removes the currency sign, thousands separators, and a literal `.00`.
///
/// The `.00` removal is textual, so `"1.005"` becomes `"15"`.
pub fn strip_price_formatting(raw: &str) -> String {
    raw.replace('$', "").replace(',', "").replace(".00", "")
}

/// Parses an export price such as `"$1,200.00"`.
pub fn parse_price(raw: &str) -> Option<f64> {
    parse_f64(&strip_price_formatting(raw))
}

/// Row counts of the price stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PriceCleaning {
    pub kept: usize,
    pub dropped: usize,
}

/// Replaces `column` with parsed prices and drops rows that do not parse.
pub fn clean_price_column(df: &mut DataFrame, column: &str) -> Result<PriceCleaning> {
    let raw = column_string_values(df, column).map_err(|_| TransformError::ColumnNotFound {
        column: column.to_string(),
    })?;
    let prices: Vec<Option<f64>> = raw
        .iter()
        .map(|value| value.as_deref().and_then(parse_price))
        .collect();
    let keep: Vec<bool> = prices.iter().map(Option::is_some).collect();

    df.with_column(Column::new(column.into(), prices))?;
    let mask = BooleanChunked::from_slice("keep".into(), &keep);
    let filtered = df.filter(&mask)?;

    let outcome = PriceCleaning {
        kept: filtered.height(),
        dropped: df.height() - filtered.height(),
    };
    *df = filtered;

    tracing::debug!(
        kept = outcome.kept,
        dropped = outcome.dropped,
        "cleaned prices"
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{NamedFrom, Series};

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("$85.00"), Some(85.0));
        assert_eq!(parse_price("$1,200.00"), Some(1200.0));
        assert_eq!(parse_price("$99.50"), Some(99.5));
        assert_eq!(parse_price("1.005"), Some(15.0));
        assert_eq!(parse_price("free"), None);
        assert_eq!(parse_price(""), None);
    }

    #[test]
    fn test_clean_column_drops_unparseable_rows() {
        let mut df = DataFrame::new(vec![
            Series::new("id".into(), vec!["a", "b", "c", "d"]).into(),
            Series::new(
                "price".into(),
                vec![Some("$85.00"), Some("ask"), None, Some("$1,050.00")],
            )
            .into(),
        ])
        .unwrap();

        let outcome = clean_price_column(&mut df, "price").unwrap();

        assert_eq!(outcome, PriceCleaning { kept: 2, dropped: 2 });
        let prices: Vec<Option<f64>> = df.column("price").unwrap().f64().unwrap().into_iter().collect();
        assert_eq!(prices, vec![Some(85.0), Some(1050.0)]);
        let ids = df.column("id").unwrap().str().unwrap();
        assert_eq!(ids.get(1), Some("d"));
    }
}
