//! Tracked project domain model.
//!
//! # Responsibility
//! - Define the project record annotated onto process steps.
//! - Interpret the two status values the views aggregate on.
//!
//! # Invariants
//! - `current_stage` is a weak reference; a missing target is valid.
//! - `progress` is stored as parsed and never clamped in the model.
//! - Unknown statuses are preserved verbatim for display.

use crate::model::step::StepId;
use serde::{Deserialize, Serialize};

/// Upper bound applied when progress is drawn, not when it is stored.
pub const DISPLAY_PROGRESS_MAX: u64 = 100;

const STATUS_ON_TRACK: &str = "on-track";
const STATUS_BLOCKED: &str = "blocked";

/// Project health as reported by the tracking source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProjectStatus {
    OnTrack,
    Blocked,
    /// Any other value, passed through uninterpreted.
    Other(String),
}

impl ProjectStatus {
    pub fn from_raw(raw: &str) -> Self {
        match raw.trim() {
            STATUS_ON_TRACK => Self::OnTrack,
            STATUS_BLOCKED => Self::Blocked,
            _ => Self::Other(raw.to_string()),
        }
    }

    /// Wire value of this status.
    pub fn as_str(&self) -> &str {
        match self {
            Self::OnTrack => STATUS_ON_TRACK,
            Self::Blocked => STATUS_BLOCKED,
            Self::Other(raw) => raw.as_str(),
        }
    }

    /// Badge text for project cards.
    pub fn badge_label(&self) -> &str {
        match self {
            Self::OnTrack => "On-Track",
            Self::Blocked => "Blocked",
            Self::Other(raw) => raw.as_str(),
        }
    }
}

impl From<String> for ProjectStatus {
    fn from(value: String) -> Self {
        Self::from_raw(&value)
    }
}

impl From<ProjectStatus> for String {
    fn from(value: ProjectStatus) -> Self {
        value.as_str().to_string()
    }
}

/// One tracked project and the stage it currently occupies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub current_stage: StepId,
    pub status: ProjectStatus,
    /// Free-text note on upcoming work. Not a step reference.
    pub next_steps: String,
    pub blocking_reason: Option<String>,
    pub progress: u64,
}

impl Project {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        current_stage: impl Into<StepId>,
        status: ProjectStatus,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            current_stage: current_stage.into(),
            status,
            next_steps: String::new(),
            blocking_reason: None,
            progress: 0,
        }
    }

    /// Progress value capped for drawing a bar; the stored value is untouched.
    pub fn display_progress(&self) -> u64 {
        self.progress.min(DISPLAY_PROGRESS_MAX)
    }
}
