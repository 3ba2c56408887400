//! Scheduling window checks.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Default minimum lead time for a reschedule.
pub const DEFAULT_THRESHOLD_MINUTES: i64 = 90;

/// Whether `appointment_start` is strictly after `now` by at least
/// `threshold_minutes`.
///
/// A threshold too large to represent as a duration is never met.
pub fn is_comfortably_ahead(
    now: DateTime<Utc>,
    appointment_start: DateTime<Utc>,
    threshold_minutes: i64,
) -> bool {
    match Duration::try_minutes(threshold_minutes) {
        Some(threshold) => appointment_start > now && appointment_start - now >= threshold,
        None => false,
    }
}

/// What a booking card offers for the upcoming appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RescheduleAffordance {
    /// Enough lead time to show the reschedule control
    Reschedule,
    /// Too close or already past: show the "things are in motion" message
    InMotion,
}

/// Lead-time guard for time-sensitive booking actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulingWindowGuard {
    threshold_minutes: i64,
}

impl SchedulingWindowGuard {
    /// Guard with a threshold in minutes.
    pub fn from_minutes(minutes: i64) -> Self {
        Self {
            threshold_minutes: minutes,
        }
    }

    /// Minimum lead time in minutes.
    pub fn threshold_minutes(&self) -> i64 {
        self.threshold_minutes
    }

    /// Whether the appointment is far enough ahead of `now`.
    pub fn is_comfortably_ahead(&self, now: DateTime<Utc>, appointment_start: DateTime<Utc>) -> bool {
        is_comfortably_ahead(now, appointment_start, self.threshold_minutes)
    }

    /// Pick the control to show for an appointment.
    pub fn affordance(&self, now: DateTime<Utc>, appointment_start: DateTime<Utc>) -> RescheduleAffordance {
        if self.is_comfortably_ahead(now, appointment_start) {
            RescheduleAffordance::Reschedule
        } else {
            RescheduleAffordance::InMotion
        }
    }
}

impl Default for SchedulingWindowGuard {
    fn default() -> Self {
        Self::from_minutes(DEFAULT_THRESHOLD_MINUTES)
    }
}
