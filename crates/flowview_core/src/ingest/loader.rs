//! Joint loading of the process and project collections.
//!
//! # Responsibility
//! - Fetch both collections concurrently and wait for both.
//! - Build the immutable process model and project index.
//!
//! # Invariants
//! - A failed project source degrades to an empty collection and is logged.
//! - An empty process is fatal; an empty project collection is not.
//! - No partially built dataset is ever returned.

use crate::index::project_index::ProjectIndex;
use crate::ingest::record::{parse_project, parse_step, RawRecord};
use crate::ingest::source::{parse_envelope, RecordSource, SourceError};
use crate::model::process::{ModelError, ProcessModel};
use log::{error, info, log, warn, Level};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Fatal initialization failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// The process source failed, leaving no steps to draw.
    ProcessUnavailable(SourceError),
    /// Steps were received but violate model invariants.
    Model(ModelError),
}

impl Display for LoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ProcessUnavailable(err) => write!(f, "process data unavailable: {err}"),
            Self::Model(err) => write!(f, "process data rejected: {err}"),
        }
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ProcessUnavailable(err) => Some(err),
            Self::Model(err) => Some(err),
        }
    }
}

impl From<ModelError> for LoadError {
    fn from(value: ModelError) -> Self {
        Self::Model(value)
    }
}

/// Immutable data shared by every component for one session.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub process: ProcessModel,
    pub index: ProjectIndex,
}

/// Fetches both sources concurrently and builds the dataset.
///
/// # Errors
/// - `ProcessUnavailable` when the process source fails.
/// - `Model` when the process source yields no steps or duplicate ids.
pub fn load_dataset(
    process_source: &dyn RecordSource,
    project_source: &dyn RecordSource,
) -> Result<Dataset, LoadError> {
    let started_at = Instant::now();
    info!("event=flow_load module=ingest status=start");

    let (step_outcome, project_outcome) =
        rayon::join(|| fetch_records(process_source), || fetch_records(project_source));

    let projects = match project_outcome {
        Ok(records) => records.iter().map(parse_project).collect::<Vec<_>>(),
        Err(_) => Vec::new(),
    };

    let steps = match step_outcome {
        Ok(records) => records.iter().map(parse_step).collect::<Vec<_>>(),
        Err(err) => {
            error!(
                "event=flow_load module=ingest status=error duration_ms={} error_code={} error={}",
                started_at.elapsed().as_millis(),
                err.code(),
                err
            );
            return Err(LoadError::ProcessUnavailable(err));
        }
    };

    let process = match ProcessModel::new(steps) {
        Ok(process) => process,
        Err(err) => {
            error!(
                "event=model_build module=ingest status=error duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    let index = ProjectIndex::build(&process, projects);
    let unassigned = index.unassigned().len();
    let (level, status) = model_build_status(unassigned);
    log!(
        level,
        "event=model_build module=ingest status={} steps={} unassigned_projects={}",
        status,
        process.len(),
        unassigned
    );

    info!(
        "event=flow_load module=ingest status=ok duration_ms={} steps={} projects={} tracked={}",
        started_at.elapsed().as_millis(),
        process.len(),
        index.projects().len(),
        index.tracked_total()
    );

    Ok(Dataset { process, index })
}

/// A build that leaves projects off every stage still succeeds, but degraded.
fn model_build_status(unassigned: usize) -> (Level, &'static str) {
    if unassigned == 0 {
        (Level::Info, "ok")
    } else {
        (Level::Warn, "degraded")
    }
}

fn fetch_records(source: &dyn RecordSource) -> Result<Vec<RawRecord>, SourceError> {
    let started_at = Instant::now();
    let outcome = source
        .fetch()
        .and_then(|body| parse_envelope(source.name(), &body));

    match &outcome {
        Ok(records) => info!(
            "event=source_fetch module=ingest status=ok source={} duration_ms={} records={}",
            source.name(),
            started_at.elapsed().as_millis(),
            records.len()
        ),
        Err(err) => warn!(
            "event=source_fetch module=ingest status=degraded source={} duration_ms={} error_code={} error={}",
            source.name(),
            started_at.elapsed().as_millis(),
            err.code(),
            err
        ),
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::{load_dataset, model_build_status};
    use crate::ingest::source::StaticSource;
    use log::Level;

    #[test]
    fn model_build_reports_ok_when_every_project_is_placed() {
        assert_eq!(model_build_status(0), (Level::Info, "ok"));
        assert_eq!(model_build_status(2), (Level::Warn, "degraded"));
    }

    #[test]
    fn unassigned_projects_do_not_fail_the_load() {
        let dataset = load_dataset(
            &StaticSource::ok("steps", r#"{"data": [{"id": "s1", "title": "Intake"}]}"#),
            &StaticSource::ok(
                "projects",
                r#"{"data": [{"id": "p1", "currentStage": "s1"}, {"id": "p2", "currentStage": "gone"}]}"#,
            ),
        )
        .expect("load should succeed");

        assert_eq!(dataset.process.len(), 1);
        assert_eq!(dataset.index.unassigned().len(), 1);
        assert_eq!(dataset.index.tracked_total(), 1);
    }
}
