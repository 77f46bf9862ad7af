//! Common infrastructure modules shared across analysis phases
//!
//! This module provides reusable infrastructure for:
//! - Data structures for download records and aggregate results
//! - Shared plotting helpers and error types

pub mod plots;
pub mod records;

// Re-export commonly used items
pub use plots::PlotError;
pub use records::{AnalysisResult, DownloadRecord};
