//! Aggregate statistics over the full download log
//!
//! Computes the page-level summary once per run: total load span, mean
//! per-object duration, and total bytes transferred.

use crate::analysis::constants::MIB_F64;
use crate::common::{AnalysisResult, DownloadRecord};
use bytesize::ByteSize;
use tabled::{Table, Tabled};
use thiserror::Error;

/// Errors that can occur during statistics computation
#[derive(Error, Debug)]
pub enum StatsError {
    #[error("Input table contains no records; nothing to analyze")]
    EmptyInput,
}

type Result<T> = core::result::Result<T, StatsError>;

/// Computes the aggregate statistics for a non-empty record set
///
/// * `total_time_ms` spans from the earliest download start to the latest
///   download end across all records.
/// * `avg_duration_ms` is the arithmetic mean of per-object durations.
/// * `total_bytes_sum` is the plain sum of transferred bytes.
///
/// # Returns
/// * `Ok(AnalysisResult)` - The computed aggregates
/// * `Err(StatsError::EmptyInput)` - If the record set is empty, since
///   min/max/mean are undefined there
pub fn compute_stats(records: &[DownloadRecord]) -> Result<AnalysisResult> {
    if records.is_empty() {
        return Err(StatsError::EmptyInput);
    }

    let min_start = records
        .iter()
        .map(DownloadRecord::start_ms)
        .min()
        .unwrap_or(0);
    let max_end = records
        .iter()
        .map(DownloadRecord::end_ms)
        .max()
        .unwrap_or(0);

    let duration_sum: f64 = records.iter().map(|r| r.duration_ms).sum();
    let total_bytes_sum: f64 = records.iter().map(|r| r.total_bytes).sum();

    Ok(AnalysisResult {
        total_time_ms: (max_end - min_start) as f64,
        avg_duration_ms: duration_sum / records.len() as f64,
        total_bytes_sum,
        record_count: records.len(),
    })
}

/// One row of the console summary table
#[derive(Tabled)]
struct StatRow {
    #[tabled(rename = "Metric")]
    metric: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

/// Formats the aggregate statistics as an ASCII table for console output
pub fn format_stats_table(stats: &AnalysisResult) -> String {
    let rows = vec![
        StatRow {
            metric: "Total page load time",
            value: format!("{:.1} ms", stats.total_time_ms),
        },
        StatRow {
            metric: "Average object download time",
            value: format!("{:.1} ms", stats.avg_duration_ms),
        },
        StatRow {
            metric: "Total data transferred",
            value: format!(
                "{:.2} MiB ({})",
                stats.total_bytes_sum / MIB_F64,
                ByteSize::b(stats.total_bytes_sum as u64)
            ),
        },
        StatRow {
            metric: "Objects analyzed",
            value: stats.record_count.to_string(),
        },
    ];

    Table::new(rows).to_string()
}
