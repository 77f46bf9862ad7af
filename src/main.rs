mod analysis;
mod common;
mod parsing;
mod report;

use std::path::{Path, PathBuf};
use thiserror::Error;

// Import analysis functions
use analysis::{
    compute_stats, format_stats_table, generate_concurrency_chart, generate_durations_chart,
    generate_gantt_chart, generate_gaps_chart,
};
use analysis::constants::MIB_F64;
use argh::FromArgs;
use indicatif::ProgressBar;

// Import parsing functionality
use parsing::{load_records, prepare_output_dir};

/// Analyzer for HTTP download logs exported to CSV
#[derive(FromArgs, Debug)]
pub struct Args {
    /// path to the exported CSV download log
    #[argh(positional)]
    input: PathBuf,
}

/// Errors that can occur during analysis
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Parsing error: {0}")]
    Parsing(#[from] parsing::ParsingError),

    #[error("Statistics error: {0}")]
    Stats(#[from] analysis::stats::StatsError),

    #[error("Chart generation error: {0}")]
    Plot(#[from] common::PlotError),

    #[error("Report error: {0}")]
    Report(#[from] report::ReportError),
}

type Result<T> = core::result::Result<T, AnalysisError>;

fn main() {
    // Parse command line arguments; argh prints usage and exits 1 on misuse
    let args: Args = argh::from_env();

    // Check if input file exists
    if !args.input.exists() {
        eprintln!("Error: file {} not found.", args.input.display());
        std::process::exit(1);
    }

    if let Err(error) = run(&args.input) {
        eprintln!("Error: {}", error);
        std::process::exit(1);
    }
}

fn run(input: &Path) -> Result<()> {
    // Prepare the output directory next to the input file
    let output_dir = prepare_output_dir(input)?;

    // Load the download log
    let records = load_records(input)?;

    // Compute and print the aggregate statistics
    let stats = compute_stats(&records)?;
    println!(
        "Całkowity czas ładowania strony: {:.1} ms",
        stats.total_time_ms
    );
    println!(
        "Średni czas pobierania obiektu: {:.1} ms",
        stats.avg_duration_ms
    );
    println!(
        "Łączna ilość danych: {:.2} MiB",
        stats.total_bytes_sum / MIB_F64
    );
    println!("\n{}\n", format_stats_table(&stats));

    // Render the four charts
    let progress = ProgressBar::new(4);
    generate_durations_chart(&records, &output_dir)?;
    progress.inc(1);
    generate_concurrency_chart(&records, &output_dir)?;
    progress.inc(1);
    generate_gaps_chart(&records, &output_dir)?;
    progress.inc(1);
    generate_gantt_chart(&records, &output_dir)?;
    progress.inc(1);
    progress.finish_and_clear();

    // Assemble the PDF report
    let report_path = report::assemble_report(&stats, &output_dir)?;
    println!("\nReport generated successfully: {}", report_path.display());

    Ok(())
}
