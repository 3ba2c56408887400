//! Home energy audit core data models.
//!
//! This crate defines the data structures behind the customer dashboard:
//! the ordered booking pipeline, booking records, display formatting and
//! the click-to-edit field used by report editors.

#![warn(missing_docs)]

// Core identities
mod id;

// Booking pipeline
mod stage;
mod booking;

// Presentation helpers
mod format;
mod editable;

// Configuration
mod config;

// Re-exports
pub use id::BookingNumber;

// Pipeline & Booking
pub use stage::{Stage, StageStatus, StageCatalog, CatalogError};
pub use booking::Booking;

// Presentation
pub use format::{format_date, format_time, format_date_at, format_time_at};
pub use editable::{EditableField, EditState, EditError};

// Configuration
pub use config::{DashboardConfig, ConfigError};

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;
