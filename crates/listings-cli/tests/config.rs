//! Integration tests for layered configuration.

use std::fs;

use listings_cli::config::{CleaningOverrides, load_options, resolve_options};
use listings_model::{CleaningOptions, SampleSpec};

#[test]
fn test_partial_file_keeps_defaults() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("clean.toml");
    fs::write(
        &path,
        r#"
sample = "all"
write_indicator_free_copy = false

[imputation]
min_support = 10
"#,
    )
    .expect("write config");

    let options = load_options(Some(&path)).expect("load");
    let defaults = CleaningOptions::default();
    assert_eq!(options.sample, SampleSpec::All);
    assert!(!options.write_indicator_free_copy);
    assert_eq!(options.imputation.min_support, 10);
    assert_eq!(options.imputation.seed, defaults.imputation.seed);
    assert_eq!(options.columns, defaults.columns);
    assert_eq!(options.sqft_to_sqm, defaults.sqft_to_sqm);
}

#[test]
fn test_flags_override_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("clean.toml");
    fs::write(
        &path,
        r#"
sample_seed = 7

[sample]
rows = 500

[imputation]
seed = 1
std_floor = 25.0
"#,
    )
    .expect("write config");

    let overrides = CleaningOverrides {
        seed: Some(99),
        ..CleaningOverrides::default()
    };
    let options = resolve_options(Some(&path), &overrides).expect("resolve");
    assert_eq!(options.sample, SampleSpec::Rows(500));
    assert_eq!(options.sample_seed, 7);
    assert_eq!(options.imputation.seed, 99);
    assert_eq!(options.imputation.std_floor, 25.0);
}

#[test]
fn test_invalid_file_values_are_rejected() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("clean.toml");
    fs::write(&path, "[imputation]\nmin_support = 0\n").expect("write config");

    let err = resolve_options(Some(&path), &CleaningOverrides::default()).unwrap_err();
    assert!(format!("{err:#}").contains("minimum support must be at least 1"));
}

#[test]
fn test_malformed_file_names_path() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("broken.toml");
    fs::write(&path, "sample = [").expect("write config");

    let err = load_options(Some(&path)).unwrap_err();
    assert!(err.to_string().contains("broken.toml"));
}
