//! Domain-specific analysis modules
//!
//! This module contains the analysis logic for:
//! - Aggregate statistics (load span, mean duration, total bytes)
//! - Per-object duration bar chart
//! - Concurrency-over-time line chart
//! - Inter-download gap histogram
//! - Gantt chart of download intervals

pub mod concurrency;
pub mod constants;
pub mod durations;
pub mod gantt;
pub mod gaps;
pub mod stats;

// Re-export analysis functions for convenience
pub use concurrency::generate_concurrency_chart;
pub use durations::generate_durations_chart;
pub use gantt::generate_gantt_chart;
pub use gaps::generate_gaps_chart;
pub use stats::{compute_stats, format_stats_table};
