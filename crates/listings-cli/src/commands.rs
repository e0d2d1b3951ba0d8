use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use comfy_table::Table;
use tracing::{info, info_span, warn};

use listings_cli::config::{CleaningOverrides, resolve_options};
use listings_cli::logging::redact_value;
use listings_cli::pipeline::{IngestResult, OutputConfig, clean, ingest, output};
use listings_model::SampleSpec;
use listings_transform::normalization::NEIGHBOURHOOD_DISTRICTS;

use crate::cli::{CleanArgs, SampleArgs};
use crate::summary::apply_table_style;
use crate::types::CleanResult;

pub fn run_districts() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Neighbourhood", "District", "No."]);
    apply_table_style(&mut table);
    for (neighbourhood, district) in NEIGHBOURHOOD_DISTRICTS {
        table.add_row(vec![
            (*neighbourhood).to_string(),
            district.as_str().to_string(),
            district.number().to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_clean(args: &CleanArgs) -> Result<CleanResult> {
    let input = &args.input;
    let run_span = info_span!("clean", input = %input.display());
    let _run_guard = run_span.enter();
    let output_dir = args.output_dir.clone().unwrap_or_else(|| {
        input
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default()
    });

    let options = resolve_options(args.config.as_deref(), &overrides_from_args(args))?;

    // =========================================================================
    // Stage 1: Ingest - Read, sample, select columns
    // =========================================================================
    let ingest_span = info_span!("ingest", input = %input.display());
    let ingest_start = Instant::now();
    let IngestResult { raw_rows, frame } = ingest_span.in_scope(|| ingest(input, &options))?;
    let sampled_rows = frame.height();
    info!(
        raw_rows,
        sampled_rows,
        duration_ms = ingest_start.elapsed().as_millis(),
        "ingest complete"
    );

    // =========================================================================
    // Stage 2: Clean - Features, districts, imputation, units
    // =========================================================================
    let clean_span = info_span!("transform", rows = sampled_rows);
    let clean_start = Instant::now();
    let (mut cleaned, report) = clean_span.in_scope(|| clean(frame, &options))?;
    for name in &report.districts.unrecognized {
        let rows = report.districts.counts.get(name).copied().unwrap_or(0);
        warn!(
            neighbourhood = redact_value(name),
            rows, "neighbourhood without a district kept as-is"
        );
    }
    if report.price.dropped > 0 {
        warn!(
            dropped = report.price.dropped,
            "rows dropped for non-numeric price"
        );
    }
    info!(
        rows = report.output_rows,
        imputed = report.imputation.missing,
        duration_ms = clean_start.elapsed().as_millis(),
        "cleaning complete"
    );

    // =========================================================================
    // Stage 3: Output - Write CSVs
    // =========================================================================
    let output_span = info_span!("output", output_dir = %output_dir.display());
    let output_start = Instant::now();
    let outputs = output_span.in_scope(|| {
        output(
            &mut cleaned,
            &OutputConfig {
                output_dir: &output_dir,
                dry_run: args.dry_run,
                write_plain_copy: options.write_indicator_free_copy,
            },
        )
    })?;
    info!(
        duration_ms = output_start.elapsed().as_millis(),
        "output complete"
    );

    Ok(CleanResult {
        input: input.clone(),
        output_dir,
        raw_rows,
        sampled_rows,
        report,
        outputs,
        dry_run: args.dry_run,
    })
}

fn sample_from_args(sample: &SampleArgs) -> Option<SampleSpec> {
    if sample.no_sample {
        Some(SampleSpec::All)
    } else if let Some(fraction) = sample.sample_fraction {
        Some(SampleSpec::Fraction(fraction))
    } else {
        sample.sample_rows.map(SampleSpec::Rows)
    }
}

fn overrides_from_args(args: &CleanArgs) -> CleaningOverrides {
    CleaningOverrides {
        sample: sample_from_args(&args.sample),
        sample_seed: args.sample_seed,
        seed: args.seed,
        min_support: args.min_support,
        std_floor: args.std_floor,
        min_value: args.min_value,
        write_indicator_free_copy: args.no_plain_copy.then_some(false),
    }
}
