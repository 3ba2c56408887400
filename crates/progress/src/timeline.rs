//! Stage timeline resolution.

use homeaudit_core::{Stage, StageCatalog, StageStatus};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A stage paired with its derived status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageProgress {
    /// The stage
    pub stage: Stage,

    /// Status relative to the current stage
    pub status: StageStatus,
}

/// Resolve every stage against `current_stage_key`.
///
/// Stages before the current one are completed, the matching stage is
/// current, later ones are upcoming. A key that matches no stage leaves
/// every stage upcoming. Output keeps the length and order of `stages`.
pub fn resolve(stages: &[Stage], current_stage_key: &str) -> Vec<StageProgress> {
    let current = stages.iter().position(|s| s.key == current_stage_key);

    stages
        .iter()
        .enumerate()
        .map(|(j, stage)| StageProgress {
            stage: stage.clone(),
            status: status_at(j, current),
        })
        .collect()
}

fn status_at(position: usize, current: Option<usize>) -> StageStatus {
    match current {
        Some(i) if position < i => StageStatus::Completed,
        Some(i) if position == i => StageStatus::Current,
        _ => StageStatus::Upcoming,
    }
}

/// Resolved timeline of one booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingProgress {
    /// Stage key the timeline was resolved against
    pub current_stage_key: String,

    /// Per-stage status in catalog order
    pub stages: Vec<StageProgress>,
}

impl BookingProgress {
    /// Per-stage status in catalog order.
    pub fn stages(&self) -> &[StageProgress] {
        &self.stages
    }

    /// The current stage, if the key was recognized.
    pub fn current(&self) -> Option<&Stage> {
        self.stages
            .iter()
            .find(|p| p.status == StageStatus::Current)
            .map(|p| &p.stage)
    }

    /// Number of stages with the given status.
    pub fn count(&self, status: StageStatus) -> usize {
        self.stages.iter().filter(|p| p.status == status).count()
    }

    /// Whether the current stage key matched a catalog stage.
    pub fn is_recognized(&self) -> bool {
        self.current().is_some()
    }

    /// Status of a stage by key.
    pub fn status_of(&self, key: &str) -> Option<StageStatus> {
        self.stages
            .iter()
            .find(|p| p.stage.key == key)
            .map(|p| p.status)
    }
}

/// Resolves booking timelines against a fixed catalog.
#[derive(Debug, Clone, Default)]
pub struct StageProgressResolver {
    catalog: StageCatalog,
}

impl StageProgressResolver {
    /// Create a resolver over `catalog`.
    pub fn new(catalog: StageCatalog) -> Self {
        Self { catalog }
    }

    /// The catalog stages are resolved against.
    pub fn catalog(&self) -> &StageCatalog {
        &self.catalog
    }

    /// Resolve a booking's current stage key into a timeline.
    pub fn resolve(&self, current_stage_key: &str) -> BookingProgress {
        if self.catalog.position(current_stage_key).is_none() {
            // Unknown keys render as not yet started
            warn!(
                "Current stage {:?} is not in the stage catalog; all stages shown as upcoming",
                current_stage_key
            );
        }

        BookingProgress {
            current_stage_key: current_stage_key.to_string(),
            stages: resolve(self.catalog.stages(), current_stage_key),
        }
    }
}
