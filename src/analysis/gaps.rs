//! Inter-download gap analysis
//!
//! Records sharing a client port are treated as sequential events on one
//! logical connection. Within each connection, ordered by start time, the gap
//! is the idle span between one download's end and the next download's start.
//! Only strictly positive gaps are kept; overlapping or back-to-back
//! downloads contribute nothing.

use crate::analysis::constants::{GAPS_CHART_FILE, GAP_HISTOGRAM_BINS};
use crate::common::plots::{PlotError, CHART_HEIGHT, CHART_WIDTH};
use crate::common::DownloadRecord;
use plotters::prelude::*;
use std::collections::BTreeMap;
use std::path::Path;

type Result<T> = core::result::Result<T, PlotError>;

/// Collects the positive inter-download gaps across all connections
///
/// Partitions records by `client_port`, sorts each group by start time
/// (stable), and computes adjacent differences: next `first_timestamp` minus
/// previous `last_timestamp`, in milliseconds. Non-positive gaps are
/// discarded.
///
/// # Returns
/// The pooled positive gaps from all groups, in connection order
pub fn collect_gaps(records: &[DownloadRecord]) -> Vec<f64> {
    let mut groups: BTreeMap<u32, Vec<&DownloadRecord>> = BTreeMap::new();
    for record in records {
        groups.entry(record.client_port).or_default().push(record);
    }

    let mut gaps = Vec::new();
    for group in groups.values_mut() {
        group.sort_by_key(|r| r.start_ms());
        for pair in group.windows(2) {
            let gap = (pair[1].start_ms() - pair[0].end_ms()) as f64;
            if gap > 0.0 {
                gaps.push(gap);
            }
        }
    }
    gaps
}

/// One histogram bin: `[start, end)` range and the number of gaps inside
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Buckets gap values into `bin_count` fixed-width bins spanning the observed range
///
/// Values equal to the maximum land in the last bin. An empty input yields no
/// bins; a degenerate range (all values equal) spans one unit instead.
pub fn histogram_bins(values: &[f64], bin_count: usize) -> Vec<HistogramBin> {
    if values.is_empty() || bin_count == 0 {
        return Vec::new();
    }

    let min = values.iter().fold(f64::INFINITY, |a, &b| a.min(b));
    let mut max = values.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b));
    if max <= min {
        max = min + 1.0;
    }
    let width = (max - min) / bin_count as f64;

    let mut counts = vec![0usize; bin_count];
    for &value in values {
        let index = (((value - min) / width) as usize).min(bin_count - 1);
        counts[index] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            start: min + i as f64 * width,
            end: min + (i + 1) as f64 * width,
            count,
        })
        .collect()
}

/// Generates the gap histogram chart
///
/// Pools the positive gaps of every connection into 50 fixed-width bins. When
/// no connection yields a positive gap the chart is rendered empty rather
/// than failing. Saved as `wykres_przerwy.png` inside `output_dir`.
pub fn generate_gaps_chart(records: &[DownloadRecord], output_dir: &Path) -> Result<()> {
    let gaps = collect_gaps(records);
    let bins = histogram_bins(&gaps, GAP_HISTOGRAM_BINS);

    let output_path = output_dir.join(GAPS_CHART_FILE);
    let root = BitMapBackend::new(&output_path, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

    let x_min = bins.first().map(|b| b.start).unwrap_or(0.0);
    let x_max = bins.last().map(|b| b.end).unwrap_or(1.0);
    let max_count = bins.iter().map(|b| b.count).max().unwrap_or(1) as i32;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Time gaps between downloads (same connection)",
            ("sans-serif", 40),
        )
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(85)
        .build_cartesian_2d(x_min..x_max, 0..max_count.max(1))
        .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

    let mut mesh = chart.configure_mesh();
    mesh.x_desc("Gap length [ms]")
        .y_desc("Occurrences")
        .label_style(("sans-serif", 18));
    mesh.draw().map_err(|e| PlotError::Drawing(e.to_string()))?;

    chart
        .draw_series(bins.iter().filter(|bin| bin.count > 0).map(|bin| {
            Rectangle::new([(bin.start, 0), (bin.end, bin.count as i32)], BLUE.filled())
        }))
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    root.present()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    Ok(())
}
