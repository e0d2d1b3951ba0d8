//! Column selection.

use polars::prelude::DataFrame;

use crate::error::{IngestError, Result};

/// Keeps only `columns`, in the given order.
///
/// Every requested column must exist; the first absent one is reported.
pub fn select_columns(df: &DataFrame, columns: &[String]) -> Result<DataFrame> {
    if let Some(missing) = columns
        .iter()
        .find(|name| df.get_column_index(name.as_str()).is_none())
    {
        return Err(IngestError::ColumnNotFound {
            column: missing.clone(),
        });
    }
    let selected = df.select(columns.iter().map(String::as_str))?;
    tracing::debug!(
        input_columns = df.width(),
        kept_columns = selected.width(),
        "selected listing columns"
    );
    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{NamedFrom, Series};

    fn frame() -> DataFrame {
        DataFrame::new(vec![
            Series::new("id".into(), vec!["1", "2"]).into(),
            Series::new("price".into(), vec!["$10.00", "$20.00"]).into(),
            Series::new("description".into(), vec!["a", "b"]).into(),
        ])
        .unwrap()
    }

    #[test]
    fn test_selects_in_requested_order() {
        let columns = vec!["price".to_string(), "id".to_string()];
        let selected = select_columns(&frame(), &columns).unwrap();
        let names: Vec<String> = selected
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect();
        assert_eq!(names, vec!["price", "id"]);
    }

    #[test]
    fn test_missing_column_is_reported() {
        let columns = vec!["id".to_string(), "square_feet".to_string()];
        let err = select_columns(&frame(), &columns).unwrap_err();
        assert!(
            matches!(err, IngestError::ColumnNotFound { ref column } if column == "square_feet")
        );
    }
}
