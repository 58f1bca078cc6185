//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and initialises logging
//! - parses CLI arguments
//! - runs the analysis pipeline or the simulator
//! - prints reports
//! - writes optional exports

use clap::Parser;
use log::info;

use crate::cli::{AnalyzeArgs, Command, ShowArgs, SimulateArgs};
use crate::data::SampleConfig;
use crate::domain::AnalysisConfig;
use crate::error::AppError;
use crate::io::ingest::IngestOptions;

pub mod pipeline;

/// Entry point for the `degen` binary.
pub fn run() -> Result<(), AppError> {
    // `.env` may set RUST_LOG; a missing file is fine.
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Analyze(args) => handle_analyze(args),
        Command::Simulate(args) => handle_simulate(args),
        Command::Show(args) => handle_show(args),
    }
}

fn handle_analyze(args: AnalyzeArgs) -> Result<(), AppError> {
    let config = config_from_args(&args);
    let options = ingest_options_from_args(&args);
    let run = pipeline::run_analysis(&options, &config)?;

    println!("{}", crate::report::format_run_summary(&run, &config));

    if let Some(path) = &args.export_cells {
        crate::io::export::write_cells_csv(path, &run.cells, &run.degeneracy)?;
        info!("Wrote cell export to '{}'", path.display());
    }
    if let Some(path) = &args.export_json {
        let summary = crate::io::summary::build_summary(&run, &config);
        crate::io::summary::write_summary_json(path, &summary)?;
        info!("Wrote run summary to '{}'", path.display());
    }

    Ok(())
}

fn handle_simulate(args: SimulateArgs) -> Result<(), AppError> {
    let config = SampleConfig {
        groups: args.groups,
        min_size: args.min_size,
        max_size: args.max_size,
        probability: args.probability,
        polarized_share: args.polarized_share,
        seed: args.seed,
        affirmative_token: args.affirmative.clone(),
    };
    let records = crate::data::generate_votes(&config)?;
    crate::io::ingest::write_vote_records(
        &args.output,
        &records,
        crate::io::ingest::DEFAULT_GROUP_COLUMN,
        crate::io::ingest::DEFAULT_VOTE_COLUMN,
    )?;
    println!(
        "Wrote {} votes across {} groups to {}",
        records.len(),
        config.groups,
        args.output.display()
    );
    Ok(())
}

fn handle_show(args: ShowArgs) -> Result<(), AppError> {
    let summary = crate::io::summary::read_summary_json(&args.summary)?;
    println!("{}", crate::report::format_saved_summary(&summary));
    Ok(())
}

pub fn config_from_args(args: &AnalyzeArgs) -> AnalysisConfig {
    AnalysisConfig {
        affirmative_token: args.affirmative.clone(),
        true_probability: args.true_probability,
        chi_squared_min_count: args.chi_min_count,
    }
}

pub fn ingest_options_from_args(args: &AnalyzeArgs) -> IngestOptions {
    IngestOptions {
        path: args.input.clone(),
        group_column: args.group_column.clone(),
        vote_column: args.vote_column.clone(),
    }
}
