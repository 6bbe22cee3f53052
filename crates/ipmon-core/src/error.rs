//! Error types for the ipmon system
//!
//! One variant per failure boundary. All network failures are treated as
//! transient; no retry-vs-fatal classification is made. Retrying is the
//! scheduler's concern via the next tick.

use thiserror::Error;

/// Result type alias for ipmon operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the ipmon system
#[derive(Error, Debug)]
pub enum Error {
    /// Probe failures (fetching the public IP)
    #[error("probe error: {0}")]
    Probe(String),

    /// Record read failures (fetching the DNS record content)
    #[error("record read error: {0}")]
    RecordRead(String),

    /// Record write failures (replacing the DNS record)
    #[error("record write error: {0}")]
    RecordWrite(String),

    /// Notification failures (publishing to the event sink)
    #[error("notify error: {0}")]
    Notify(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a probe error
    pub fn probe(msg: impl Into<String>) -> Self {
        Self::Probe(msg.into())
    }

    /// Create a record read error
    pub fn record_read(msg: impl Into<String>) -> Self {
        Self::RecordRead(msg.into())
    }

    /// Create a record write error
    pub fn record_write(msg: impl Into<String>) -> Self {
        Self::RecordWrite(msg.into())
    }

    /// Create a notification error
    pub fn notify(msg: impl Into<String>) -> Self {
        Self::Notify(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
