//! PDF report assembly
//!
//! Lays out the final report: a cover page with the aggregate statistics
//! followed by one page per chart, each caption plus the PNG scaled to fit
//! the page while preserving its aspect ratio. Built with [`printpdf`] on A4
//! portrait pages using the built-in Helvetica fonts.

use crate::analysis::constants::{
    CONCURRENCY_CHART_FILE, DURATIONS_CHART_FILE, GANTT_CHART_FILE, GAPS_CHART_FILE, MIB_F64,
    REPORT_FILE,
};
use crate::common::AnalysisResult;
use printpdf::image_crate::codecs::png::PngDecoder;
use printpdf::{
    BuiltinFont, Image, ImageTransform, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference,
};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while assembling the report
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to read chart image {path}: {source}")]
    ImageRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to decode chart image {path}: {message}")]
    ImageDecode { path: PathBuf, message: String },

    #[error("Failed to write report file: {0}")]
    FileWrite(#[from] std::io::Error),

    #[error("Failed to compose PDF: {0}")]
    Pdf(String),
}

type Result<T> = core::result::Result<T, ReportError>;

/// A4 portrait page size in millimeters
const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;

/// Horizontal margin on each side of an embedded chart
const SIDE_MARGIN_MM: f32 = 15.0;

/// Margin below an embedded chart
const BOTTOM_MARGIN_MM: f32 = 20.0;

/// Vertical space reserved above an embedded chart for the caption
const TOP_RESERVE_MM: f32 = 40.0;

/// Resolution the chart PNGs are embedded at
const EMBED_DPI: f32 = 150.0;

/// Chart pages in their fixed report order: caption and PNG file name
const CHART_PAGES: [(&str, &str); 4] = [
    ("Per-object download times", DURATIONS_CHART_FILE),
    ("Download concurrency over time", CONCURRENCY_CHART_FILE),
    ("Gaps within single connections", GAPS_CHART_FILE),
    ("Gantt chart of downloads", GANTT_CHART_FILE),
];

/// Assembles the multi-page PDF report
///
/// Page 1 carries the title and the four aggregate summary lines; pages 2-5
/// carry the charts in fixed order (durations, concurrency, gaps, Gantt).
/// Chart PNGs are read back from `output_dir`; a missing or undecodable image
/// aborts assembly and leaves the already-written PNGs on disk as a
/// diagnostic aid.
///
/// # Returns
/// * `Ok(PathBuf)` - Path of the written `raport_analizy.pdf`
/// * `Err(ReportError)` - If an image could not be embedded or the PDF could
///   not be written
pub fn assemble_report(stats: &AnalysisResult, output_dir: &Path) -> Result<PathBuf> {
    let (doc, cover_page, cover_layer) = PdfDocument::new(
        "HTTP Analysis Report",
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "summary",
    );
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ReportError::Pdf(e.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| ReportError::Pdf(e.to_string()))?;

    let layer = doc.get_page(cover_page).get_layer(cover_layer);
    layer.use_text(
        "HTTP Analysis Report",
        16.0,
        Mm(20.0),
        Mm(PAGE_HEIGHT_MM - 25.0),
        &bold,
    );

    let lines = [
        format!("Total page load time: {:.1} ms", stats.total_time_ms),
        format!(
            "Average object download time: {:.1} ms",
            stats.avg_duration_ms
        ),
        format!(
            "Total data transferred: {:.2} MiB",
            stats.total_bytes_sum / MIB_F64
        ),
        format!("Objects analyzed: {}", stats.record_count),
    ];
    let mut y = PAGE_HEIGHT_MM - 35.0;
    for line in &lines {
        layer.use_text(line.as_str(), 11.0, Mm(20.0), Mm(y), &regular);
        y -= 7.0;
    }

    for (caption, file_name) in CHART_PAGES {
        add_chart_page(&doc, caption, &output_dir.join(file_name), &bold)?;
    }

    let report_path = output_dir.join(REPORT_FILE);
    let mut writer = BufWriter::new(File::create(&report_path)?);
    doc.save(&mut writer)
        .map_err(|e| ReportError::Pdf(e.to_string()))?;

    Ok(report_path)
}

/// Adds one chart page: caption at the top, image scaled to fit below it
fn add_chart_page(
    doc: &PdfDocumentReference,
    caption: &str,
    image_path: &Path,
    caption_font: &IndirectFontRef,
) -> Result<()> {
    let (page, layer_index) = doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "chart");
    let layer = doc.get_page(page).get_layer(layer_index);
    layer.use_text(
        caption,
        12.0,
        Mm(20.0),
        Mm(PAGE_HEIGHT_MM - 20.0),
        caption_font,
    );

    let file = File::open(image_path).map_err(|source| ReportError::ImageRead {
        path: image_path.to_path_buf(),
        source,
    })?;
    let decoder = PngDecoder::new(BufReader::new(file)).map_err(|e| ReportError::ImageDecode {
        path: image_path.to_path_buf(),
        message: e.to_string(),
    })?;
    let image = Image::try_from(decoder).map_err(|e| ReportError::ImageDecode {
        path: image_path.to_path_buf(),
        message: e.to_string(),
    })?;

    let scale = fit_scale(
        image.image.width.0 as f32,
        image.image.height.0 as f32,
    );
    image.add_to_layer(
        layer,
        ImageTransform {
            translate_x: Some(Mm(SIDE_MARGIN_MM)),
            translate_y: Some(Mm(BOTTOM_MARGIN_MM)),
            scale_x: Some(scale),
            scale_y: Some(scale),
            dpi: Some(EMBED_DPI),
            ..Default::default()
        },
    );

    Ok(())
}

/// Uniform scale factor fitting an image into the chart area of one page
///
/// The image's natural size on the page follows from its pixel dimensions at
/// [`EMBED_DPI`]; the scale shrinks (or grows) it so it fills the area inside
/// the fixed margins without distorting the aspect ratio.
fn fit_scale(width_px: f32, height_px: f32) -> f32 {
    let natural_width_mm = width_px / EMBED_DPI * 25.4;
    let natural_height_mm = height_px / EMBED_DPI * 25.4;
    let available_width_mm = PAGE_WIDTH_MM - 2.0 * SIDE_MARGIN_MM;
    let available_height_mm = PAGE_HEIGHT_MM - BOTTOM_MARGIN_MM - TOP_RESERVE_MM;

    (available_width_mm / natural_width_mm).min(available_height_mm / natural_height_mm)
}

#[cfg(test)]
mod tests {
    use super::*;
    use plotters::prelude::*;
    use std::fs;

    #[test]
    fn test_fit_scale_preserves_aspect_ratio() {
        // 1200x800 px at 150 dpi is 203.2 x 135.5 mm, wider than the 180 mm
        // chart area, so the width constraint wins
        let scale = fit_scale(1200.0, 800.0);
        let expected = (PAGE_WIDTH_MM - 2.0 * SIDE_MARGIN_MM) / (1200.0 / EMBED_DPI * 25.4);
        assert!((scale - expected).abs() < 1e-6);
        assert!(scale < 1.0);
    }

    #[test]
    fn test_fit_scale_tall_image_limited_by_height() {
        let scale = fit_scale(800.0, 2000.0);
        let expected =
            (PAGE_HEIGHT_MM - BOTTOM_MARGIN_MM - TOP_RESERVE_MM) / (2000.0 / EMBED_DPI * 25.4);
        assert!((scale - expected).abs() < 1e-6);
    }

    #[test]
    fn test_fit_scale_small_image_scales_up() {
        let scale = fit_scale(100.0, 100.0);
        assert!(scale > 1.0);
    }

    fn sample_stats() -> AnalysisResult {
        AnalysisResult {
            total_time_ms: 3200.0,
            avg_duration_ms: 266.7,
            total_bytes_sum: 6000.0,
            record_count: 3,
        }
    }

    /// Writes a tiny blank PNG the way the chart modules do, but without any
    /// text so no fonts are required
    fn write_blank_png(path: &Path) {
        let root = BitMapBackend::new(path, (10, 10)).into_drawing_area();
        root.fill(&WHITE).unwrap();
        root.present().unwrap();
    }

    /// Counts page objects in raw PDF bytes by their `/Type /Page` dictionary
    /// entry, excluding the `/Pages` tree node and longer names
    fn count_page_objects(bytes: &[u8]) -> usize {
        count_name_entries(bytes, b"/Type /Page") + count_name_entries(bytes, b"/Type/Page")
    }

    fn count_name_entries(bytes: &[u8], needle: &[u8]) -> usize {
        let mut count = 0;
        for start in 0..bytes.len().saturating_sub(needle.len() - 1) {
            if &bytes[start..start + needle.len()] != needle {
                continue;
            }
            // "/Pages" and longer names continue with an alphanumeric byte
            let continues = bytes
                .get(start + needle.len())
                .is_some_and(|b| b.is_ascii_alphanumeric());
            if !continues {
                count += 1;
            }
        }
        count
    }

    #[test]
    fn test_assemble_report_has_five_pages() {
        let dir = tempfile::tempdir().unwrap();
        for (_, file_name) in CHART_PAGES {
            write_blank_png(&dir.path().join(file_name));
        }

        let report_path = assemble_report(&sample_stats(), dir.path()).unwrap();
        assert_eq!(report_path, dir.path().join(REPORT_FILE));

        let bytes = fs::read(&report_path).unwrap();
        // 1 summary page + 4 chart pages
        assert_eq!(count_page_objects(&bytes), 5);
    }

    #[test]
    fn test_assemble_report_missing_chart_image() {
        let dir = tempfile::tempdir().unwrap();

        // No chart PNGs were written; embedding the first one must fail
        let result = assemble_report(&sample_stats(), dir.path());
        assert!(matches!(result, Err(ReportError::ImageRead { .. })));
        assert!(!dir.path().join(REPORT_FILE).exists());
    }
}
