//! Cross-reference of tracked projects against process steps.
//!
//! # Responsibility
//! - Count and list projects per step.
//! - Summarize per-step status breakdowns for badges and panels.
//!
//! # Invariants
//! - Projects whose stage matches no known step appear in no aggregate.

pub mod project_index;
