//! Shared constants for analysis and output naming

/// Name of the output directory created next to the input file
pub const OUTPUT_DIR_NAME: &str = "wyniki_analizy";

/// Per-object duration bar chart file name
pub const DURATIONS_CHART_FILE: &str = "wykres_czasy_obiektow.png";

/// Concurrency-over-time line chart file name
pub const CONCURRENCY_CHART_FILE: &str = "wykres_rownoleglosc.png";

/// Inter-download gap histogram file name
pub const GAPS_CHART_FILE: &str = "wykres_przerwy.png";

/// Gantt chart file name
pub const GANTT_CHART_FILE: &str = "wykres_gantt.png";

/// Assembled PDF report file name
pub const REPORT_FILE: &str = "raport_analizy.pdf";

/// Sampling step of the concurrency time grid, in milliseconds
pub const CONCURRENCY_GRID_STEP_MS: i64 = 10;

/// Number of fixed-width bins in the gap histogram
pub const GAP_HISTOGRAM_BINS: usize = 50;

/// Bytes per mebibyte, used when reporting transferred data
pub const MIB_F64: f64 = 1024.0 * 1024.0;
