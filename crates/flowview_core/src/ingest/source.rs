//! Data-source contracts and built-in implementations.
//!
//! # Responsibility
//! - Abstract the fetch mechanism behind a small trait.
//! - Unwrap the `{"data": [...]}` envelope both sources share.
//!
//! # Invariants
//! - A source fetch is attempted once; there are no retries.
//! - Envelope failures are reported per source, never per record.

use crate::ingest::record::RawRecord;
use log::warn;
use serde::Deserialize;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

/// Failure of one whole data source.
///
/// Equality compares kind, source name and message; the IO cause is not
/// comparable and is only exposed through `Error::source`.
#[derive(Debug, Clone)]
pub enum SourceError {
    /// Transport or IO failure; nothing was received.
    Unavailable {
        source_name: String,
        message: String,
        cause: Option<Arc<io::Error>>,
    },
    /// A body was received but is not a valid envelope.
    Envelope {
        source_name: String,
        message: String,
    },
}

impl SourceError {
    pub fn unavailable(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Unavailable {
            source_name: source_name.into(),
            message: message.into(),
            cause: None,
        }
    }

    /// Unavailable source whose read failed with `err`.
    pub fn io(source_name: impl Into<String>, message: impl Into<String>, err: io::Error) -> Self {
        Self::Unavailable {
            source_name: source_name.into(),
            message: message.into(),
            cause: Some(Arc::new(err)),
        }
    }

    pub fn envelope(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Envelope {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    /// Stable code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unavailable { .. } => "source_unavailable",
            Self::Envelope { .. } => "envelope_invalid",
        }
    }
}

impl PartialEq for SourceError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Self::Unavailable {
                    source_name: a_name,
                    message: a_message,
                    ..
                },
                Self::Unavailable {
                    source_name: b_name,
                    message: b_message,
                    ..
                },
            )
            | (
                Self::Envelope {
                    source_name: a_name,
                    message: a_message,
                },
                Self::Envelope {
                    source_name: b_name,
                    message: b_message,
                },
            ) => a_name == b_name && a_message == b_message,
            _ => false,
        }
    }
}

impl Eq for SourceError {}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable {
                source_name,
                message,
                ..
            } => write!(f, "source `{source_name}` unavailable: {message}"),
            Self::Envelope {
                source_name,
                message,
            } => write!(f, "source `{source_name}` returned malformed envelope: {message}"),
        }
    }
}

impl Error for SourceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Unavailable {
                cause: Some(cause), ..
            } => Some(&**cause),
            _ => None,
        }
    }
}

/// Fetch contract for one record collection.
///
/// Implementations must be shareable across threads so both collections can
/// be fetched concurrently.
pub trait RecordSource: Send + Sync {
    /// Short name used in logs and errors.
    fn name(&self) -> &str;
    /// Returns the raw response body.
    fn fetch(&self) -> Result<String, SourceError>;
}

/// Source reading an envelope from a local JSON file.
#[derive(Debug, Clone)]
pub struct FileSource {
    name: String,
    path: PathBuf,
}

impl FileSource {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

impl RecordSource for FileSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch(&self) -> Result<String, SourceError> {
        std::fs::read_to_string(&self.path).map_err(|err| {
            SourceError::io(
                self.name.as_str(),
                format!("failed to read `{}`: {err}", self.path.display()),
                err,
            )
        })
    }
}

/// Source holding a body (or failure) already obtained by the host.
#[derive(Debug, Clone)]
pub struct StaticSource {
    name: String,
    outcome: Result<String, String>,
}

impl StaticSource {
    /// Source that yields `body`.
    pub fn ok(name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            outcome: Ok(body.into()),
        }
    }

    /// Source whose fetch failed with `message`.
    pub fn failed(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            outcome: Err(message.into()),
        }
    }
}

impl RecordSource for StaticSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch(&self) -> Result<String, SourceError> {
        self.outcome
            .clone()
            .map_err(|message| SourceError::unavailable(self.name.as_str(), message))
    }
}

#[derive(Deserialize)]
struct Envelope {
    data: Vec<Value>,
}

/// Extracts record maps from a `{"data": [...]}` body.
///
/// Entries that are not JSON objects are skipped with a warning.
///
/// # Errors
/// - `SourceError::Envelope` when the body is not JSON or lacks a `data` array.
pub fn parse_envelope(source_name: &str, body: &str) -> Result<Vec<RawRecord>, SourceError> {
    let envelope: Envelope = serde_json::from_str(body)
        .map_err(|err| SourceError::envelope(source_name, err.to_string()))?;

    let total = envelope.data.len();
    let records = envelope
        .data
        .into_iter()
        .filter_map(|entry| match entry {
            Value::Object(map) => Some(map),
            _ => None,
        })
        .collect::<Vec<_>>();

    if records.len() != total {
        warn!(
            "event=envelope_parse module=ingest status=degraded source={} skipped_entries={}",
            source_name,
            total - records.len()
        );
    }
    Ok(records)
}
