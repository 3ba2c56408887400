//! Booking data sources for the home energy audit dashboard.
//!
//! This crate provides a trait-based interface to booking records with a
//! JSON-directory implementation and a REST client for the booking API.

#![warn(missing_docs)]

pub mod trait_;
pub mod json_storage;
#[cfg(feature = "http")]
pub mod http_storage;

pub use trait_::{BookingSource, StorageError, Result};
pub use json_storage::JsonStorage;
#[cfg(feature = "http")]
pub use http_storage::HttpStorage;
