//! Process step domain model.
//!
//! # Responsibility
//! - Define the canonical process node shared by flowchart and list views.
//! - Classify nodes into ordinary activities and decision gateways.
//!
//! # Invariants
//! - `id` is stable for the lifetime of a loaded session.
//! - `inputs`/`outputs`/`duration`/`owner` are meaningful only for `StepKind::Step`.
//! - `criteria`/`outcomes` are meaningful only for `StepKind::Gateway`.
//! - `next_steps` are weak references and may name ids that do not exist.

use serde::{Deserialize, Serialize};

/// Stable identifier of one process step.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type StepId = String;

/// Node category for one process step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    /// Ordinary activity with inputs and outputs.
    Step,
    /// Decision point with criteria and outcomes.
    Gateway,
}

impl StepKind {
    /// Classifies a raw `type` field value.
    ///
    /// Only `gateway` (case-insensitive) selects `Gateway`; every other value,
    /// including blank input, falls back to `Step`.
    pub fn from_raw(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("gateway") {
            Self::Gateway
        } else {
            Self::Step
        }
    }

    /// Stable lowercase string used on the wire and as a view class name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Step => "step",
            Self::Gateway => "gateway",
        }
    }

    /// Badge text shown in the detail panel header.
    pub fn badge_label(self) -> &'static str {
        match self {
            Self::Step => "Step",
            Self::Gateway => "Gateway",
        }
    }
}

/// Canonical process node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub id: StepId,
    pub title: String,
    /// Serialized as `type` to match external schema naming.
    #[serde(rename = "type")]
    pub kind: StepKind,
    pub description: String,
    /// Long-form text shown in the detail panel.
    pub details: String,
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
    /// Free text, possibly empty.
    pub duration: String,
    /// Free text, possibly empty.
    pub owner: String,
    pub criteria: Vec<String>,
    pub outcomes: Vec<String>,
    /// Ordered weak references to follow-up steps.
    pub next_steps: Vec<StepId>,
}

impl Step {
    /// Creates a step with empty descriptive fields and no links.
    pub fn new(id: impl Into<StepId>, title: impl Into<String>, kind: StepKind) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            kind,
            description: String::new(),
            details: String::new(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            duration: String::new(),
            owner: String::new(),
            criteria: Vec::new(),
            outcomes: Vec::new(),
            next_steps: Vec::new(),
        }
    }

    pub fn is_gateway(&self) -> bool {
        self.kind == StepKind::Gateway
    }
}

#[cfg(test)]
mod tests {
    use super::{Step, StepKind};

    #[test]
    fn kind_from_raw_only_recognizes_gateway() {
        assert_eq!(StepKind::from_raw("gateway"), StepKind::Gateway);
        assert_eq!(StepKind::from_raw(" Gateway "), StepKind::Gateway);
        assert_eq!(StepKind::from_raw("step"), StepKind::Step);
        assert_eq!(StepKind::from_raw("decision"), StepKind::Step);
        assert_eq!(StepKind::from_raw(""), StepKind::Step);
    }

    #[test]
    fn step_serializes_kind_as_type() {
        let step = Step::new("s2", "Review", StepKind::Gateway);
        let json = serde_json::to_value(&step).expect("step should serialize");
        assert_eq!(json["type"], "gateway");
        assert_eq!(json["nextSteps"], serde_json::json!([]));
    }
}
