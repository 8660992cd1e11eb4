//! Session-level orchestration.
//!
//! # Responsibility
//! - Wire loading, layout, selection and projection into one owned context.
//! - Keep host/FFI layers decoupled from component details.

pub mod flow_session;
