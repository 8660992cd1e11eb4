//! Data ingestion from the two startup sources.
//!
//! # Responsibility
//! - Fetch raw envelopes through the `RecordSource` seam.
//! - Normalize records into domain values and build the session dataset.
//!
//! # Invariants
//! - Per-record problems never fail a load; only whole-source failures do.

pub mod loader;
pub mod record;
pub mod source;
