//! Per-object duration bar chart
//!
//! Renders one horizontal bar per downloaded object, in input row order, with
//! the bar length equal to the download duration and the request URI as the
//! row label.

use crate::analysis::constants::DURATIONS_CHART_FILE;
use crate::common::plots::{row_label_count, shorten_uri, PlotError, CHART_HEIGHT, CHART_WIDTH};
use crate::common::DownloadRecord;
use plotters::prelude::*;
use std::path::Path;

type Result<T> = core::result::Result<T, PlotError>;

/// Maximum characters kept of a URI before it is shortened for the axis
const URI_LABEL_CHARS: usize = 40;

/// Generates the per-object download time bar chart
///
/// Bars appear in input row order (row 0 at the bottom), are sized by
/// `duration_ms`, and are labeled with the request URI. The chart is saved as
/// `wykres_czasy_obiektow.png` inside `output_dir`.
///
/// # Returns
/// * `Ok(())` - If the chart was successfully rendered and saved
/// * `Err(PlotError)` - If chart configuration or drawing failed
pub fn generate_durations_chart(records: &[DownloadRecord], output_dir: &Path) -> Result<()> {
    let output_path = output_dir.join(DURATIONS_CHART_FILE);
    let root = BitMapBackend::new(&output_path, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

    let max_duration = records
        .iter()
        .map(|r| r.duration_ms)
        .fold(0.0_f64, f64::max)
        .max(1.0);
    let bar_count = records.len() as i32;

    let labels: Vec<String> = records
        .iter()
        .map(|r| shorten_uri(&r.request_uri, URI_LABEL_CHARS))
        .collect();

    let mut chart = ChartBuilder::on(&root)
        .caption("Download time per object", ("sans-serif", 40))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(280)
        .build_cartesian_2d(0.0..max_duration * 1.05, 0..bar_count)
        .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

    let y_label = |y: &i32| labels.get(*y as usize).cloned().unwrap_or_default();

    let mut mesh = chart.configure_mesh();
    mesh.x_desc("Download time [ms]")
        .y_desc("Object (URI)")
        .label_style(("sans-serif", 16))
        .y_labels(row_label_count(records.len()))
        .y_label_formatter(&y_label);
    mesh.draw().map_err(|e| PlotError::Drawing(e.to_string()))?;

    chart
        .draw_series(records.iter().enumerate().map(|(index, record)| {
            Rectangle::new(
                [
                    (0.0, index as i32),
                    (record.duration_ms, index as i32 + 1),
                ],
                BLUE.filled(),
            )
        }))
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    root.present()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    Ok(())
}
