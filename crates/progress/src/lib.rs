//! Booking Progress
//!
//! Stage timeline resolution, scheduling windows, and the booking context
//! that feeds them.

#![warn(missing_docs)]

pub mod timeline;
pub mod window;
pub mod context;

pub use timeline::{resolve, StageProgressResolver, StageProgress, BookingProgress};
pub use window::{is_comfortably_ahead, SchedulingWindowGuard, RescheduleAffordance};
pub use context::{BookingContext, BookingSnapshot, ContextError};
