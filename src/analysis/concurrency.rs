//! Concurrency-over-time analysis
//!
//! Samples a regular 10 ms grid spanning the whole capture and, for each grid
//! instant, counts how many downloads were in flight. The scan is
//! O(grid size × record count), which is fine for single-page-load traces;
//! this tool is not meant for high-volume streams.

use crate::analysis::constants::{CONCURRENCY_CHART_FILE, CONCURRENCY_GRID_STEP_MS};
use crate::common::plots::{format_wall_clock, PlotError, CHART_HEIGHT, CHART_WIDTH};
use crate::common::DownloadRecord;
use plotters::prelude::*;
use std::path::Path;

type Result<T> = core::result::Result<T, PlotError>;

/// Samples the number of concurrently active downloads over time
///
/// The grid runs from the global minimum `first_timestamp` to the global
/// maximum `last_timestamp` inclusive, stepping every 10 ms. A record counts
/// as active at instant `t` when `first_timestamp <= t <= last_timestamp`,
/// inclusive on both ends.
///
/// # Returns
/// A vector of `(epoch_ms, active_count)` pairs; empty for an empty record set
pub fn concurrency_series(records: &[DownloadRecord]) -> Vec<(i64, usize)> {
    let min_start = match records.iter().map(DownloadRecord::start_ms).min() {
        Some(value) => value,
        None => return Vec::new(),
    };
    let max_end = records
        .iter()
        .map(DownloadRecord::end_ms)
        .max()
        .unwrap_or(min_start);

    let mut series = Vec::new();
    let mut t = min_start;
    while t <= max_end {
        let active = records
            .iter()
            .filter(|r| r.start_ms() <= t && r.end_ms() >= t)
            .count();
        series.push((t, active));
        t += CONCURRENCY_GRID_STEP_MS;
    }
    series
}

/// Generates the concurrency-over-time line chart
///
/// The x axis shows wall-clock time (UTC); the y axis the number of active
/// downloads. Saved as `wykres_rownoleglosc.png` inside `output_dir`.
pub fn generate_concurrency_chart(records: &[DownloadRecord], output_dir: &Path) -> Result<()> {
    let series = concurrency_series(records);

    let output_path = output_dir.join(CONCURRENCY_CHART_FILE);
    let root = BitMapBackend::new(&output_path, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

    let x_min = series.first().map(|(t, _)| *t).unwrap_or(0) as f64;
    let mut x_max = series.last().map(|(t, _)| *t).unwrap_or(0) as f64;
    if x_max <= x_min {
        x_max = x_min + 1.0;
    }
    let max_active = series.iter().map(|(_, count)| *count).max().unwrap_or(0) as i32;

    let mut chart = ChartBuilder::on(&root)
        .caption("Concurrency of downloads over time", ("sans-serif", 40))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(85)
        .build_cartesian_2d(x_min..x_max, 0..max_active + 1)
        .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

    let mut mesh = chart.configure_mesh();
    mesh.x_desc("Time")
        .y_desc("Active downloads")
        .label_style(("sans-serif", 18))
        .x_label_formatter(&|x| format_wall_clock(*x as i64));
    mesh.draw().map_err(|e| PlotError::Drawing(e.to_string()))?;

    chart
        .draw_series(LineSeries::new(
            series.iter().map(|(t, count)| (*t as f64, *count as i32)),
            &BLUE,
        ))
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    root.present()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    Ok(())
}
