//! Booking context passed down to dashboard views.
//!
//! Holds the selected booking number and the last fetched record. Views get
//! derived timelines and scheduling verdicts from here instead of reading
//! process-wide state.

use std::sync::Arc;
use chrono::{DateTime, Utc};
use homeaudit_core::{format_date_at, format_time_at, Booking, BookingNumber, StageCatalog};
use homeaudit_storage::{BookingSource, StorageError};
use serde::Serialize;
use tracing::{debug, info};

use crate::timeline::{BookingProgress, StageProgressResolver};
use crate::window::{RescheduleAffordance, SchedulingWindowGuard};

/// Errors from context operations.
#[derive(Debug, thiserror::Error)]
pub enum ContextError {
    /// `refresh` called before a booking was selected
    #[error("no booking selected")]
    NoBookingSelected,

    /// The backend has no such booking
    #[error("booking not found: {0}")]
    NotFound(BookingNumber),

    /// Backend failure
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Everything a booking card renders, derived at one instant.
#[derive(Debug, Clone, Serialize)]
pub struct BookingSnapshot {
    /// When the snapshot was derived
    pub timestamp: DateTime<Utc>,

    /// Booking number
    pub booking_number: BookingNumber,

    /// Resolved stage timeline
    pub progress: BookingProgress,

    /// External cancellation flag, shown alongside the timeline
    pub cancelled: bool,

    /// Appointment date, empty when unscheduled
    pub appointment_date: String,

    /// Appointment start time, empty when unscheduled
    pub appointment_time: String,

    /// Reschedule control, `None` when unscheduled
    pub affordance: Option<RescheduleAffordance>,
}

/// Session-scoped booking state.
pub struct BookingContext {
    source: Arc<dyn BookingSource>,
    resolver: StageProgressResolver,
    guard: SchedulingWindowGuard,
    selected: Option<BookingNumber>,
    booking: Option<Booking>,
}

impl BookingContext {
    /// Create a context with nothing selected.
    pub fn new(
        source: Arc<dyn BookingSource>,
        catalog: StageCatalog,
        guard: SchedulingWindowGuard,
    ) -> Self {
        Self {
            source,
            resolver: StageProgressResolver::new(catalog),
            guard,
            selected: None,
            booking: None,
        }
    }

    /// Selected booking number.
    pub fn selected(&self) -> Option<&BookingNumber> {
        self.selected.as_ref()
    }

    /// Select a booking. A different number drops the cached record.
    pub fn select_booking(&mut self, number: BookingNumber) {
        if self.selected.as_ref() != Some(&number) {
            debug!("Booking context switched to {}", number);
            self.booking = None;
            self.selected = Some(number);
        }
    }

    /// Forget the selection and cached record (logout).
    pub fn clear(&mut self) {
        self.selected = None;
        self.booking = None;
    }

    /// Fetch the selected booking. On error the previous record is kept.
    pub async fn refresh(&mut self) -> Result<&Booking, ContextError> {
        let number = self.selected.clone().ok_or(ContextError::NoBookingSelected)?;

        let booking = self
            .source
            .load_booking(&number)
            .await?
            .ok_or_else(|| ContextError::NotFound(number.clone()))?;

        info!("Refreshed booking {} at stage {}", number, booking.current_stage);
        Ok(&*self.booking.insert(booking))
    }

    /// Last fetched booking.
    pub fn booking(&self) -> Option<&Booking> {
        self.booking.as_ref()
    }

    /// Timeline of the last fetched booking.
    pub fn progress(&self) -> Option<BookingProgress> {
        self.booking
            .as_ref()
            .map(|b| self.resolver.resolve(&b.current_stage))
    }

    /// Reschedule control for the last fetched booking's appointment.
    pub fn affordance(&self, now: DateTime<Utc>) -> Option<RescheduleAffordance> {
        let start = self.booking.as_ref()?.appointment_start?;
        Some(self.guard.affordance(now, start))
    }

    /// Derive everything the booking card shows.
    pub fn snapshot(&self, now: DateTime<Utc>) -> Option<BookingSnapshot> {
        let booking = self.booking.as_ref()?;
        let start = booking.appointment_start.as_ref();

        Some(BookingSnapshot {
            timestamp: now,
            booking_number: booking.booking_number.clone(),
            progress: self.resolver.resolve(&booking.current_stage),
            cancelled: booking.cancelled,
            appointment_date: start.map(format_date_at).unwrap_or_default(),
            appointment_time: start.map(format_time_at).unwrap_or_default(),
            affordance: self.affordance(now),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use homeaudit_core::StageStatus;
    use homeaudit_storage::JsonStorage;

    struct FailingSource;

    #[async_trait::async_trait]
    impl BookingSource for FailingSource {
        async fn load_booking(&self, _number: &BookingNumber) -> homeaudit_storage::Result<Option<Booking>> {
            Err(StorageError::Other("backend unavailable".to_string()))
        }
        async fn list_bookings(&self) -> homeaudit_storage::Result<Vec<Booking>> {
            Err(StorageError::Other("backend unavailable".to_string()))
        }
    }

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, h, m, 0).unwrap()
    }

    async fn seeded_context(dir: &std::path::Path) -> BookingContext {
        let storage = JsonStorage::new(dir).await.unwrap();
        storage
            .save_booking(
                &Booking::new(BookingNumber::new("HA-1"), "utilityBills")
                    .with_appointment(at(11, 30), at(13, 30)),
            )
            .await
            .unwrap();
        storage
            .save_booking(&Booking::new(BookingNumber::new("HA-2"), "paymentDone"))
            .await
            .unwrap();

        BookingContext::new(
            Arc::new(storage),
            StageCatalog::booking_pipeline(),
            SchedulingWindowGuard::default(),
        )
    }

    #[tokio::test]
    async fn test_refresh_without_selection() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = seeded_context(dir.path()).await;
        assert!(matches!(ctx.refresh().await, Err(ContextError::NoBookingSelected)));
    }

    #[tokio::test]
    async fn test_refresh_and_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = seeded_context(dir.path()).await;
        ctx.select_booking(BookingNumber::new("HA-1"));

        let booking = ctx.refresh().await.unwrap();
        assert_eq!(booking.current_stage, "utilityBills");

        let snapshot = ctx.snapshot(at(10, 0)).unwrap();
        assert_eq!(snapshot.booking_number.as_str(), "HA-1");
        assert_eq!(snapshot.progress.status_of("bookingCreated"), Some(StageStatus::Completed));
        assert_eq!(snapshot.progress.status_of("utilityBills"), Some(StageStatus::Current));
        assert_eq!(snapshot.appointment_date, "Mon, Jan 1");
        assert_eq!(snapshot.appointment_time, "11:30 AM");
        assert_eq!(snapshot.affordance, Some(RescheduleAffordance::Reschedule));

        assert_eq!(ctx.affordance(at(10, 1)), Some(RescheduleAffordance::InMotion));
    }

    #[tokio::test]
    async fn test_unscheduled_booking_has_no_affordance() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = seeded_context(dir.path()).await;
        ctx.select_booking(BookingNumber::new("HA-2"));
        ctx.refresh().await.unwrap();

        let snapshot = ctx.snapshot(at(10, 0)).unwrap();
        assert!(snapshot.affordance.is_none());
        assert_eq!(snapshot.appointment_date, "");
        assert_eq!(snapshot.appointment_time, "");
        assert_eq!(snapshot.progress.count(StageStatus::Completed), 6);
    }

    #[tokio::test]
    async fn test_missing_booking_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = seeded_context(dir.path()).await;
        ctx.select_booking(BookingNumber::new("HA-404"));

        match ctx.refresh().await {
            Err(ContextError::NotFound(number)) => assert_eq!(number.as_str(), "HA-404"),
            other => panic!("expected NotFound, got {:?}", other.map(|b| b.clone())),
        }
        assert!(ctx.booking().is_none());
    }

    #[tokio::test]
    async fn test_switching_booking_drops_cache() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = seeded_context(dir.path()).await;
        ctx.select_booking(BookingNumber::new("HA-1"));
        ctx.refresh().await.unwrap();

        ctx.select_booking(BookingNumber::new("HA-1"));
        assert!(ctx.booking().is_some());

        ctx.select_booking(BookingNumber::new("HA-2"));
        assert!(ctx.booking().is_none());
        assert!(ctx.progress().is_none());

        ctx.refresh().await.unwrap();
        assert_eq!(ctx.booking().map(|b| b.current_stage.as_str()), Some("paymentDone"));

        ctx.clear();
        assert!(ctx.selected().is_none());
        assert!(ctx.snapshot(at(10, 0)).is_none());
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_record() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = seeded_context(dir.path()).await;
        ctx.select_booking(BookingNumber::new("HA-1"));
        ctx.refresh().await.unwrap();

        ctx.source = Arc::new(FailingSource);
        assert!(matches!(ctx.refresh().await, Err(ContextError::Storage(_))));
        assert_eq!(ctx.booking().map(|b| b.booking_number.as_str()), Some("HA-1"));
    }
}
