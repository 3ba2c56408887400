//! Stage model - the ordered customer journey of a booking.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A named step of the booking pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    /// Stable identifier reported by the backend (e.g. `utilityBills`)
    pub key: String,

    /// Human-readable display name
    pub label: String,
}

impl Stage {
    /// Create a new stage.
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }
}

/// Display state of a stage relative to the booking's current stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageStatus {
    /// Positioned before the current stage
    Completed,
    /// The booking's present position
    Current,
    /// Positioned after the current stage
    Upcoming,
}

impl StageStatus {
    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            StageStatus::Completed => "completed",
            StageStatus::Current => "current",
            StageStatus::Upcoming => "upcoming",
        }
    }
}

impl std::fmt::Display for StageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised when building a stage catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// A catalog needs at least one stage
    #[error("stage catalog is empty")]
    Empty,

    /// Keys must be unique
    #[error("duplicate stage key: {0}")]
    DuplicateKey(String),
}

/// Ordered, non-empty list of stages with unique keys.
///
/// Catalog order is the only authority for "before" and "after"; stage
/// timestamps never take part in the comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Stage>", into = "Vec<Stage>")]
pub struct StageCatalog {
    stages: Vec<Stage>,
}

impl StageCatalog {
    /// Build a catalog, validating that it is non-empty and keys are unique.
    pub fn new(stages: Vec<Stage>) -> Result<Self, CatalogError> {
        if stages.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::with_capacity(stages.len());
        for stage in &stages {
            if !seen.insert(stage.key.as_str()) {
                return Err(CatalogError::DuplicateKey(stage.key.clone()));
            }
        }

        Ok(Self { stages })
    }

    /// The fixed customer journey of a home energy audit booking.
    pub fn booking_pipeline() -> Self {
        Self {
            stages: vec![
                Stage::new("bookingCreated", "Booking Created"),
                Stage::new("utilityBills", "Utility Bills Uploaded"),
                Stage::new("auditPerformed", "Audit Performed"),
                Stage::new("followUpSchedule", "Follow-up Scheduled"),
                Stage::new("reportGenerated", "Report Generated"),
                Stage::new("proposalSigned", "Proposal Signed"),
                Stage::new("paymentDone", "Payment Done"),
            ],
        }
    }

    /// Stages in catalog order.
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Position of a key in catalog order.
    pub fn position(&self, key: &str) -> Option<usize> {
        self.stages.iter().position(|s| s.key == key)
    }

    /// Look up a stage by key.
    pub fn get(&self, key: &str) -> Option<&Stage> {
        self.stages.iter().find(|s| s.key == key)
    }

    /// Number of stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Always false; catalogs are non-empty.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// First stage of the journey.
    pub fn first(&self) -> &Stage {
        &self.stages[0]
    }

    /// Last stage of the journey.
    pub fn last(&self) -> &Stage {
        &self.stages[self.stages.len() - 1]
    }

    /// Iterate stages in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Stage> {
        self.stages.iter()
    }
}

impl Default for StageCatalog {
    fn default() -> Self {
        Self::booking_pipeline()
    }
}

impl TryFrom<Vec<Stage>> for StageCatalog {
    type Error = CatalogError;

    fn try_from(stages: Vec<Stage>) -> Result<Self, Self::Error> {
        Self::new(stages)
    }
}

impl From<StageCatalog> for Vec<Stage> {
    fn from(catalog: StageCatalog) -> Self {
        catalog.stages
    }
}

impl<'a> IntoIterator for &'a StageCatalog {
    type Item = &'a Stage;
    type IntoIter = std::slice::Iter<'a, Stage>;

    fn into_iter(self) -> Self::IntoIter {
        self.stages.iter()
    }
}
