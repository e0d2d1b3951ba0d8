//! Integration tests for the hierarchical floor-area imputation.

use listings_model::{ImputationOptions, StratumLevel};
use listings_transform::{
    FallbackChain, HierarchicalImputer, ImputationColumns, ListingKeys, MissingMask, StratumKey, StratumTables,
    impute_floor_area,
};
use polars::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn imputer() -> HierarchicalImputer {
    HierarchicalImputer::new(ImputationOptions::default()).unwrap()
}

fn listing(property_type: &str, district: &str) -> ListingKeys {
    ListingKeys::new(Some(property_type), Some(district))
}

/// Six Apartment listings in district A and one in district B.
fn scenario() -> (Vec<ListingKeys>, Vec<Option<f64>>) {
    let mut keys = vec![listing("Apartment", "A"); 6];
    keys.push(listing("Apartment", "B"));
    let values = vec![
        Some(500.0),
        Some(520.0),
        Some(480.0),
        Some(510.0),
        Some(0.0),
        Some(f64::NAN),
        None,
    ];
    (keys, values)
}

#[test]
fn scenario_falls_back_to_global() {
    let (keys, values) = scenario();
    let mut rng = StdRng::seed_from_u64(42);

    let outcome = imputer().impute(&keys, &values, &mut rng).unwrap();

    let tables = outcome.tables.as_ref().unwrap();
    let two_key = tables
        .get(&StratumKey::for_level(
            StratumLevel::PropertyDistrict,
            &listing("Apartment", "A"),
        ))
        .unwrap();
    assert_eq!(two_key.support, 4);
    assert!((two_key.mean - 502.5).abs() < 1e-9);
    assert_eq!(tables.global().support, 4);

    // Every level has support 4 < 5, so all three records use the global stratum.
    assert_eq!(outcome.imputed.len(), 3);
    assert!(
        outcome
            .imputed
            .iter()
            .all(|imputed| imputed.level == StratumLevel::Global)
    );
    assert_eq!(outcome.mask.as_slice(), &[false, false, false, false, true, true, true]);
}

#[test]
fn scenario_uses_property_type_once_supported() {
    let (mut keys, mut values) = scenario();
    keys.push(listing("Apartment", "C"));
    values.push(Some(600.0));
    let mut rng = StdRng::seed_from_u64(42);

    let outcome = imputer().impute(&keys, &values, &mut rng).unwrap();

    let levels: Vec<(usize, StratumLevel)> = outcome
        .imputed
        .iter()
        .map(|imputed| (imputed.row, imputed.level))
        .collect();
    assert_eq!(
        levels,
        vec![
            (4, StratumLevel::PropertyType),
            (5, StratumLevel::PropertyType),
            (6, StratumLevel::PropertyType),
        ]
    );
}

#[test]
fn non_finite_values_are_missing() {
    let (_, values) = scenario();
    let mask = MissingMask::detect(&values);
    assert!(mask.is_missing(5));

    let df = DataFrame::new(vec![
        Series::new("square_feet".into(), vec!["500", "NaN", "inf", ""]).into(),
    ])
    .unwrap();
    let coerced = listings_transform::imputation::coerce_column(&df, "square_feet").unwrap();
    assert_eq!(MissingMask::detect(&coerced).missing_count(), 3);
}

#[test]
fn same_seed_same_values() {
    let (keys, values) = scenario();

    let first = imputer()
        .impute(&keys, &values, &mut StdRng::seed_from_u64(7))
        .unwrap();
    let second = imputer()
        .impute(&keys, &values, &mut StdRng::seed_from_u64(7))
        .unwrap();
    let other = imputer()
        .impute(&keys, &values, &mut StdRng::seed_from_u64(8))
        .unwrap();

    assert_eq!(first.values, second.values);
    assert_ne!(first.values, other.values);
}

#[test]
fn well_supported_two_key_stratum_drives_draws() {
    let mut keys = Vec::new();
    let mut values = Vec::new();
    for i in 0..30 {
        keys.push(listing("Apartment", "Eixample"));
        values.push(Some(880.0 + f64::from(i % 5) * 10.0));
    }
    for i in 0..200 {
        keys.push(listing("Room", "Sants-Montjuïc"));
        values.push(Some(90.0 + f64::from(i % 3) * 10.0));
    }
    for _ in 0..2000 {
        keys.push(listing("Apartment", "Eixample"));
        values.push(None);
    }
    let mut rng = StdRng::seed_from_u64(42);

    let outcome = imputer().impute(&keys, &values, &mut rng).unwrap();

    let tables = outcome.tables.as_ref().unwrap();
    let stratum_mean = tables
        .get(&StratumKey::for_level(
            StratumLevel::PropertyDistrict,
            &listing("Apartment", "Eixample"),
        ))
        .unwrap()
        .mean;
    let imputed_mean = outcome.imputed.iter().map(|imputed| imputed.value).sum::<f64>()
        / outcome.imputed.len() as f64;

    assert!((stratum_mean - 900.0).abs() < 1e-9);
    assert!((imputed_mean - stratum_mean).abs() < 5.0);
    assert!((imputed_mean - tables.global().mean).abs() > 500.0);
}

#[test]
fn thin_two_key_stratum_falls_back_to_property_type() {
    let mut keys = vec![listing("Loft", "Gràcia"); 3];
    let mut values = vec![Some(900.0); 3];
    keys.extend(vec![listing("Loft", "Eixample"); 17]);
    values.extend(vec![Some(300.0); 17]);
    keys.extend(vec![listing("Loft", "Gràcia"); 500]);
    values.extend(vec![None; 500]);
    let mut rng = StdRng::seed_from_u64(42);

    let outcome = imputer().impute(&keys, &values, &mut rng).unwrap();

    assert_eq!(
        outcome.level_counts().get(&StratumLevel::PropertyType),
        Some(&500)
    );
    let property_type = outcome
        .tables
        .as_ref()
        .unwrap()
        .get(&StratumKey::PropertyType(Some("Loft".to_string())))
        .copied()
        .unwrap();
    assert_eq!(property_type.support, 20);
    assert!((property_type.mean - 390.0).abs() < 1e-9);

    let imputed_mean = outcome.imputed.iter().map(|imputed| imputed.value).sum::<f64>() / 500.0;
    assert!((imputed_mean - 390.0).abs() < 40.0);
}

#[test]
fn single_point_stratum_has_floor_std() {
    let keys = vec![listing("Castle", "Les Corts"), listing("Room", "Gràcia")];
    let values = vec![Some(4000.0), Some(150.0)];
    let mask = MissingMask::detect(&values);
    let tables = StratumTables::from_records(&keys, &values, &mask, 10.0).unwrap();

    let castle = tables
        .get(&StratumKey::PropertyType(Some("Castle".to_string())))
        .unwrap();
    assert_eq!(castle.support, 1);
    assert_eq!(castle.std, 10.0);
}

#[test]
fn dataframe_adapter_fills_every_row() {
    let mut df = DataFrame::new(vec![
        Series::new(
            "property_type".into(),
            vec![
                Some("Apartment"),
                Some("Apartment"),
                None,
                Some("Loft"),
                Some("Apartment"),
            ],
        )
        .into(),
        Series::new(
            "neighbourhood".into(),
            vec!["Gràcia", "Gràcia", "Unknown", "Eixample", "Gràcia"],
        )
        .into(),
        Series::new(
            "square_feet".into(),
            vec![Some("650"), Some(""), Some("abc"), Some("0"), Some("700")],
        )
        .into(),
    ])
    .unwrap();
    let mut rng = StdRng::seed_from_u64(42);

    let report =
        impute_floor_area(&mut df, &ImputationColumns::default(), &imputer(), &mut rng).unwrap();

    assert_eq!(report.rows, 5);
    assert_eq!(report.missing, 3);
    assert_eq!(report.mask.as_slice(), &[false, true, true, true, false]);
    assert_eq!(report.level_counts.get(&StratumLevel::Global), Some(&3));

    let filled = df.column("square_feet").unwrap().f64().unwrap();
    assert_eq!(filled.null_count(), 0);
    assert_eq!(filled.get(0), Some(650.0));
    assert_eq!(filled.get(4), Some(700.0));
    assert!(filled.into_iter().flatten().all(|value| value >= 10.0));
}

#[test]
fn all_missing_is_fatal() {
    let keys = vec![listing("Loft", "Gràcia"); 3];
    let values = vec![None, Some(0.0), None];
    let err = imputer()
        .impute(&keys, &values, &mut StdRng::seed_from_u64(1))
        .unwrap_err();
    assert!(matches!(
        err,
        listings_transform::TransformError::NoReferenceData
    ));
}

#[test]
fn custom_chain_changes_selected_level() {
    let mut keys = vec![listing("Loft", "Gràcia"); 6];
    keys.extend(vec![listing("Room", "Eixample"); 5]);
    keys.push(listing("Loft", "Gràcia"));
    keys.push(listing("Castle", "Les Corts"));
    let mut values = vec![Some(500.0); 6];
    values.extend(vec![Some(300.0); 5]);
    values.extend([None, None]);

    let default_counts = imputer()
        .impute(&keys, &values, &mut StdRng::seed_from_u64(3))
        .unwrap()
        .level_counts();
    assert_eq!(
        default_counts.get(&StratumLevel::PropertyDistrict),
        Some(&1)
    );

    let district_only =
        imputer().with_chain(FallbackChain::new([StratumLevel::District]));
    assert_eq!(district_only.chain().levels(), &[StratumLevel::District]);

    let outcome = district_only
        .impute(&keys, &values, &mut StdRng::seed_from_u64(3))
        .unwrap();
    let counts = outcome.level_counts();
    assert_eq!(counts.get(&StratumLevel::PropertyDistrict), None);
    assert_eq!(counts.get(&StratumLevel::District), Some(&1));
    assert_eq!(counts.get(&StratumLevel::Global), Some(&1));
    assert_eq!(outcome.imputed[0].level, StratumLevel::District);
    assert_eq!(outcome.imputed[0].row, 11);
    assert_eq!(outcome.imputed[1].level, StratumLevel::Global);
}
