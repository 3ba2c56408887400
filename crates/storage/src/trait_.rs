//! Booking source trait abstraction.

use async_trait::async_trait;
use homeaudit_core::{Booking, BookingNumber};

/// Error type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur while reading booking data.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Transport error talking to the booking API
    #[cfg(feature = "http")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Booking API answered with a non-success status
    #[error("booking API returned {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body
        body: String,
    },

    /// Other error
    #[error("{0}")]
    Other(String),
}

/// Read access to booking records.
///
/// The dashboard never writes bookings back; implementations wrap whatever
/// backend owns them.
#[async_trait]
pub trait BookingSource: Send + Sync {
    /// Load a booking by number.
    async fn load_booking(&self, number: &BookingNumber) -> Result<Option<Booking>>;

    /// List all bookings visible to this source.
    async fn list_bookings(&self) -> Result<Vec<Booking>>;
}
