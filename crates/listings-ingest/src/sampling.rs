//! Seeded row sampling.

use listings_model::SampleSpec;
use polars::prelude::{DataFrame, IdxCa, IdxSize};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::index;

use crate::error::Result;

/// Reduces the frame to the rows selected by `spec`.
///
/// Rows are drawn without replacement and kept in draw order, so the
/// returned frame is shuffled. The same `seed` over the same input always
/// selects the same rows in the same order. [`SampleSpec::All`] returns the
/// frame unchanged.
pub fn sample_rows(df: &DataFrame, spec: SampleSpec, seed: u64) -> Result<DataFrame> {
    if matches!(spec, SampleSpec::All) {
        return Ok(df.clone());
    }

    let height = df.height();
    let target = spec.target_rows(height);
    let mut rng = StdRng::seed_from_u64(seed);
    let indices: Vec<IdxSize> = index::sample(&mut rng, height, target)
        .iter()
        .map(|idx| idx as IdxSize)
        .collect();

    let sampled = df.take(&IdxCa::from_vec("sample".into(), indices))?;
    tracing::debug!(
        input_rows = height,
        sampled_rows = sampled.height(),
        seed,
        "sampled listings"
    );
    Ok(sampled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{NamedFrom, Series};

    fn numbered(rows: i64) -> DataFrame {
        DataFrame::new(vec![
            Series::new("id".into(), (0..rows).collect::<Vec<i64>>()).into(),
        ])
        .unwrap()
    }

    fn ids(df: &DataFrame) -> Vec<i64> {
        df.column("id")
            .unwrap()
            .i64()
            .unwrap()
            .into_iter()
            .flatten()
            .collect()
    }

    #[test]
    fn test_fraction_is_reproducible() {
        let df = numbered(40);
        let first = sample_rows(&df, SampleSpec::Fraction(0.25), 42).unwrap();
        let second = sample_rows(&df, SampleSpec::Fraction(0.25), 42).unwrap();

        assert_eq!(first.height(), 10);
        assert_eq!(ids(&first), ids(&second));
    }

    #[test]
    fn test_rows_are_distinct() {
        let df = numbered(30);
        let sampled = sample_rows(&df, SampleSpec::Rows(20), 7).unwrap();
        let mut picked = ids(&sampled);
        picked.sort_unstable();
        picked.dedup();
        assert_eq!(picked.len(), 20);
    }

    #[test]
    fn test_rows_capped_at_height() {
        let df = numbered(5);
        let sampled = sample_rows(&df, SampleSpec::Rows(5000), 1).unwrap();
        assert_eq!(sampled.height(), 5);
    }

    #[test]
    fn test_all_keeps_order() {
        let df = numbered(4);
        let sampled = sample_rows(&df, SampleSpec::All, 1).unwrap();
        assert_eq!(ids(&sampled), vec![0, 1, 2, 3]);
    }
}
