//! Active-step selection state.
//!
//! # Responsibility
//! - Own the only mutable state of a session: which step the panel shows.
//! - Translate view intents into explicit state transitions.
//!
//! # Invariants
//! - The initial state is `Closed`.
//! - `Open` always names a step that exists in the process model.

pub mod controller;
