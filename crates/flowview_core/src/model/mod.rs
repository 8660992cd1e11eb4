//! Domain model for process flow visualization.
//!
//! # Responsibility
//! - Define the step and project records every view projects from.
//! - Own the ordered, immutable process sequence.
//!
//! # Invariants
//! - Both entity sets are loaded once and never mutated afterwards.
//! - Cross-entity links are id-based weak references.

pub mod process;
pub mod project;
pub mod step;
