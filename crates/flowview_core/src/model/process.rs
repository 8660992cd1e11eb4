//! Ordered process model.
//!
//! # Responsibility
//! - Hold the loaded step sequence in display order.
//! - Resolve weak step references without failing on unknown ids.
//!
//! # Invariants
//! - The sequence is non-empty.
//! - Step ids are unique; duplicates are rejected at construction.
//! - The model is immutable once built.

use crate::model::step::{Step, StepId};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Data-integrity failures detected while building the process model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// The process source yielded no steps.
    EmptyProcess,
    /// Two step records share one id.
    DuplicateStepId(StepId),
}

impl Display for ModelError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyProcess => write!(f, "process definition contains no steps"),
            Self::DuplicateStepId(id) => write!(f, "duplicate step id: {id}"),
        }
    }
}

impl Error for ModelError {}

/// Immutable, ordered step sequence with id lookup.
#[derive(Debug, Clone)]
pub struct ProcessModel {
    steps: Vec<Step>,
    positions: HashMap<StepId, usize>,
}

impl ProcessModel {
    /// Builds the model from steps in display order.
    ///
    /// # Errors
    /// - `EmptyProcess` when `steps` is empty.
    /// - `DuplicateStepId` for the first id seen twice.
    pub fn new(steps: Vec<Step>) -> Result<Self, ModelError> {
        if steps.is_empty() {
            return Err(ModelError::EmptyProcess);
        }

        let mut positions = HashMap::with_capacity(steps.len());
        for (index, step) in steps.iter().enumerate() {
            if positions.insert(step.id.clone(), index).is_some() {
                return Err(ModelError::DuplicateStepId(step.id.clone()));
            }
        }

        Ok(Self { steps, positions })
    }

    /// Full ordered sequence for layout and rendering.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Looks up a step by id. Unknown ids return `None`.
    pub fn get(&self, id: &str) -> Option<&Step> {
        self.position(id).map(|index| &self.steps[index])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.positions.contains_key(id)
    }

    /// Zero-based slot of a step in the sequence.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.positions.get(id).copied()
    }

    /// One-based label shown on flowchart nodes and list items.
    pub fn step_number(&self, id: &str) -> Option<usize> {
        self.position(id).map(|index| index + 1)
    }

    /// Next-step targets of `step` that resolve, in declared order.
    ///
    /// Unknown ids are dropped so callers never offer a dead link.
    pub fn resolved_next_steps<'a>(&'a self, step: &Step) -> Vec<&'a Step> {
        step.next_steps
            .iter()
            .filter_map(|id| self.get(id))
            .collect()
    }
}
