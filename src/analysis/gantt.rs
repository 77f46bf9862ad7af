//! Gantt chart of download intervals
//!
//! One horizontal segment per object, sorted by start time, each at its own
//! row. The figure grows with the record count so large traces stay legible.

use crate::analysis::constants::GANTT_CHART_FILE;
use crate::common::plots::{
    format_wall_clock, row_label_count, shorten_uri, PlotError, CHART_WIDTH,
};
use crate::common::DownloadRecord;
use plotters::prelude::*;
use std::path::Path;

type Result<T> = core::result::Result<T, PlotError>;

/// Minimum chart height in pixels, so small inputs stay readable
const MIN_CHART_HEIGHT: u32 = 400;

/// Additional pixels of chart height per record row
const ROW_HEIGHT: u32 = 18;

/// Vertical pixels reserved for caption and x axis
const FRAME_HEIGHT: u32 = 200;

/// Maximum characters kept of a URI before it is shortened for the axis
const URI_LABEL_CHARS: usize = 40;

/// Returns the records sorted by start time, ascending and stable on ties
pub fn sorted_by_start(records: &[DownloadRecord]) -> Vec<&DownloadRecord> {
    let mut sorted: Vec<&DownloadRecord> = records.iter().collect();
    sorted.sort_by_key(|r| r.start_ms());
    sorted
}

/// Chart height in pixels for a given record count
pub fn chart_height(record_count: usize) -> u32 {
    (record_count as u32 * ROW_HEIGHT + FRAME_HEIGHT).max(MIN_CHART_HEIGHT)
}

/// Generates the Gantt chart of download intervals
///
/// Each record becomes one horizontal segment from `first_timestamp` to
/// `last_timestamp` at the row index given by its position in start-time
/// order, labeled with the request URI. Saved as `wykres_gantt.png` inside
/// `output_dir`.
pub fn generate_gantt_chart(records: &[DownloadRecord], output_dir: &Path) -> Result<()> {
    let sorted = sorted_by_start(records);

    let output_path = output_dir.join(GANTT_CHART_FILE);
    let height = chart_height(sorted.len());
    let root = BitMapBackend::new(&output_path, (CHART_WIDTH, height)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

    let x_min = sorted.first().map(|r| r.start_ms()).unwrap_or(0) as f64;
    let mut x_max = sorted
        .iter()
        .map(|r| r.end_ms())
        .max()
        .unwrap_or(0) as f64;
    if x_max <= x_min {
        x_max = x_min + 1.0;
    }
    let row_count = sorted.len() as i32;

    let labels: Vec<String> = sorted
        .iter()
        .map(|r| shorten_uri(&r.request_uri, URI_LABEL_CHARS))
        .collect();

    let mut chart = ChartBuilder::on(&root)
        .caption("Gantt: file downloads over time", ("sans-serif", 40))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(280)
        .build_cartesian_2d(x_min..x_max, 0..row_count)
        .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

    let y_label = |y: &i32| labels.get(*y as usize).cloned().unwrap_or_default();

    let mut mesh = chart.configure_mesh();
    mesh.x_desc("Time")
        .y_desc("Object (URI)")
        .label_style(("sans-serif", 16))
        .y_labels(row_label_count(sorted.len()))
        .y_label_formatter(&y_label)
        .x_label_formatter(&|x| format_wall_clock(*x as i64));
    mesh.draw().map_err(|e| PlotError::Drawing(e.to_string()))?;

    chart
        .draw_series(sorted.iter().enumerate().map(|(row, record)| {
            Rectangle::new(
                [
                    (record.start_ms() as f64, row as i32),
                    (record.end_ms() as f64, row as i32 + 1),
                ],
                BLUE.filled(),
            )
        }))
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    root.present()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::records::test_support::record;

    #[test]
    fn test_sorted_by_start_orders_ascending() {
        let records = vec![
            record("/c", 4000, 4200, 200.0, 40001),
            record("/a", 1000, 1300, 300.0, 40001),
            record("/b", 1500, 1800, 300.0, 40001),
        ];

        let sorted = sorted_by_start(&records);
        let uris: Vec<&str> = sorted.iter().map(|r| r.request_uri.as_str()).collect();
        assert_eq!(uris, vec!["/a", "/b", "/c"]);
    }

    #[test]
    fn test_sorted_by_start_stable_on_ties() {
        let records = vec![
            record("/first", 1000, 1300, 300.0, 40001),
            record("/second", 1000, 1200, 200.0, 40002),
        ];

        let sorted = sorted_by_start(&records);
        assert_eq!(sorted[0].request_uri, "/first");
        assert_eq!(sorted[1].request_uri, "/second");
    }

    #[test]
    fn test_sorted_by_start_is_order_independent_as_a_set() {
        let records = vec![
            record("/a", 1000, 1300, 300.0, 40001),
            record("/b", 1500, 1800, 300.0, 40001),
            record("/c", 4000, 4200, 200.0, 40001),
        ];
        let mut shuffled = records.clone();
        shuffled.reverse();

        let segments = |rs: &[DownloadRecord]| -> Vec<(i64, i64)> {
            sorted_by_start(rs)
                .iter()
                .map(|r| (r.start_ms(), r.end_ms()))
                .collect()
        };

        assert_eq!(segments(&records).len(), records.len());
        assert_eq!(segments(&records), segments(&shuffled));
    }

    #[test]
    fn test_chart_height_floors_and_scales() {
        assert_eq!(chart_height(0), MIN_CHART_HEIGHT);
        assert_eq!(chart_height(3), MIN_CHART_HEIGHT);
        // Past the floor, height grows linearly with the record count
        assert_eq!(chart_height(100), 100 * ROW_HEIGHT + FRAME_HEIGHT);
    }

    #[test]
    #[ignore = "Font rendering not available in test environment"]
    fn test_generate_gantt_chart_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let records = vec![
            record("/a", 1000, 1300, 300.0, 40001),
            record("/b", 1500, 1800, 300.0, 40001),
            record("/c", 4000, 4200, 200.0, 40001),
        ];

        let result = generate_gantt_chart(&records, dir.path());
        assert!(result.is_ok());
        assert!(dir.path().join(GANTT_CHART_FILE).exists());
    }
}
