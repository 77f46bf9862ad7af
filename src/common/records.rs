use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One downloaded HTTP object, as reconstructed from a single log row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadRecord {
    /// URI of the fetched object
    pub request_uri: String,
    /// Instant the first byte of the request was observed
    pub first_timestamp: DateTime<Utc>,
    /// Instant the last byte of the response was observed
    pub last_timestamp: DateTime<Utc>,
    /// Download duration in milliseconds
    pub duration_ms: f64,
    /// Bytes transferred for this object
    pub total_bytes: f64,
    /// Client-side port, identifying the underlying connection
    pub client_port: u32,
}

impl DownloadRecord {
    /// Start of the download interval as milliseconds since the Unix epoch
    pub fn start_ms(&self) -> i64 {
        self.first_timestamp.timestamp_millis()
    }

    /// End of the download interval as milliseconds since the Unix epoch
    pub fn end_ms(&self) -> i64 {
        self.last_timestamp.timestamp_millis()
    }
}

/// Aggregate statistics over one full log, computed once per run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Span from the earliest download start to the latest download end, in milliseconds
    pub total_time_ms: f64,
    /// Arithmetic mean of per-object download durations, in milliseconds
    pub avg_duration_ms: f64,
    /// Sum of bytes transferred across all objects
    pub total_bytes_sum: f64,
    /// Number of objects analyzed
    pub record_count: usize,
}
