//! Booking model - the record delivered by the booking API.

use serde::{Deserialize, Serialize};
use crate::id::BookingNumber;
use crate::Time;

/// A customer's audit booking.
///
/// `current_stage` is passed through as reported; it may name a stage the
/// local catalog does not know yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Booking number
    pub booking_number: BookingNumber,

    /// Current pipeline stage key
    pub current_stage: String,

    /// Scheduled appointment start
    #[serde(default)]
    pub appointment_start: Option<Time>,

    /// Scheduled appointment end
    #[serde(default)]
    pub appointment_end: Option<Time>,

    /// Cancellation flag (not part of stage resolution)
    #[serde(default)]
    pub cancelled: bool,

    /// Customer display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,

    /// Audited property address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl Booking {
    /// Create a booking at the given stage with no appointment.
    pub fn new(booking_number: BookingNumber, current_stage: impl Into<String>) -> Self {
        Self {
            booking_number,
            current_stage: current_stage.into(),
            appointment_start: None,
            appointment_end: None,
            cancelled: false,
            customer_name: None,
            address: None,
        }
    }

    /// Set the appointment window.
    pub fn with_appointment(mut self, start: Time, end: Time) -> Self {
        self.appointment_start = Some(start);
        self.appointment_end = Some(end);
        self
    }
}
