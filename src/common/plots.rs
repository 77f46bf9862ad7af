//! Shared plotting infrastructure for the analysis charts
//!
//! All charts are rendered with the [`plotters`] bitmap backend into fixed-size
//! PNG files, using default font rendering so the tool keeps working in
//! headless environments (Docker/CI) without system font configuration.

use chrono::DateTime;
use thiserror::Error;

/// Errors that can occur during plot generation
#[derive(Error, Debug)]
pub enum PlotError {
    #[error("Failed to create drawing area: {0}")]
    DrawingArea(String),

    #[error("Failed to configure chart: {0}")]
    ChartConfig(String),

    #[error("Failed to draw chart elements: {0}")]
    Drawing(String),

    #[error("Failed to save plot to file: {0}")]
    FileSave(#[from] std::io::Error),
}

/// Width of every chart PNG in pixels
pub const CHART_WIDTH: u32 = 1200;

/// Default height of a chart PNG in pixels
pub const CHART_HEIGHT: u32 = 800;

/// Formats an epoch-millisecond instant as a wall-clock axis label
///
/// Produces `HH:MM:SS.mmm` (UTC), matching the time axes of the concurrency
/// and Gantt charts. Instants outside the representable range fall back to the
/// raw millisecond value.
pub fn format_wall_clock(epoch_ms: i64) -> String {
    match DateTime::from_timestamp_millis(epoch_ms) {
        Some(ts) => ts.format("%H:%M:%S%.3f").to_string(),
        None => format!("{} ms", epoch_ms),
    }
}

/// Number of y-axis label slots needed to label every record row
///
/// Integer row coordinates span `0..=rows`, so requesting one slot per row
/// boundary keeps a label on every row regardless of record count, the same
/// way the Gantt chart keeps every row by growing its figure height.
pub fn row_label_count(rows: usize) -> usize {
    rows + 1
}

/// Shortens a URI so it fits into an axis label area
///
/// Keeps the tail of the URI (the interesting part for most request paths)
/// and prefixes it with an ellipsis when truncation happened.
pub fn shorten_uri(uri: &str, max_chars: usize) -> String {
    let count = uri.chars().count();
    if count <= max_chars {
        return uri.to_string();
    }
    let tail: String = uri
        .chars()
        .skip(count - max_chars.saturating_sub(1))
        .collect();
    format!("…{}", tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_wall_clock() {
        // 1970-01-01 00:00:01.300 UTC
        assert_eq!(format_wall_clock(1300), "00:00:01.300");
        assert_eq!(format_wall_clock(0), "00:00:00.000");
    }

    #[test]
    fn test_row_label_count_never_caps() {
        // Every row keeps its label, even on large traces
        assert_eq!(row_label_count(3), 4);
        assert_eq!(row_label_count(200), 201);
    }

    #[test]
    fn test_shorten_uri_keeps_short_labels() {
        assert_eq!(shorten_uri("/index.html", 40), "/index.html");
    }

    #[test]
    fn test_shorten_uri_truncates_long_labels() {
        let uri = "/static/assets/images/very/deep/path/banner_large_2x.png";
        let short = shorten_uri(uri, 20);
        assert_eq!(short.chars().count(), 20);
        assert!(short.starts_with('…'));
        assert!(short.ends_with("banner_large_2x.png"));
    }
}
