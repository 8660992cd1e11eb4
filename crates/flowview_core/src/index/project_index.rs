//! Session-lifetime project index.

use crate::model::process::ProcessModel;
use crate::model::project::{Project, ProjectStatus};
use crate::model::step::StepId;
use serde::Serialize;
use std::collections::HashMap;

/// Status breakdown for the projects at one stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageSummary {
    pub on_track: usize,
    pub blocked: usize,
    /// Every project at the stage, including statuses not broken out above.
    pub total: usize,
}

/// Projects grouped by the step they occupy.
///
/// Built once from an immutable model, so every aggregate is computed at
/// construction and cached for the session.
#[derive(Debug, Clone, Default)]
pub struct ProjectIndex {
    projects: Vec<Project>,
    by_stage: HashMap<StepId, Vec<usize>>,
    unassigned: Vec<usize>,
}

impl ProjectIndex {
    /// Indexes `projects` against the steps of `process`.
    ///
    /// Input order is preserved inside every stage bucket.
    pub fn build(process: &ProcessModel, projects: Vec<Project>) -> Self {
        let mut by_stage: HashMap<StepId, Vec<usize>> = process
            .steps()
            .iter()
            .map(|step| (step.id.clone(), Vec::new()))
            .collect();
        let mut unassigned = Vec::new();

        for (slot, project) in projects.iter().enumerate() {
            match by_stage.get_mut(project.current_stage.as_str()) {
                Some(bucket) => bucket.push(slot),
                None => unassigned.push(slot),
            }
        }

        Self {
            projects,
            by_stage,
            unassigned,
        }
    }

    /// Every loaded project, in source order.
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Number of projects at `step_id`; unknown steps count zero.
    pub fn count_for(&self, step_id: &str) -> usize {
        self.by_stage.get(step_id).map_or(0, Vec::len)
    }

    /// Project count for every known step.
    pub fn stage_counts(&self) -> HashMap<StepId, usize> {
        self.by_stage
            .iter()
            .map(|(id, bucket)| (id.clone(), bucket.len()))
            .collect()
    }

    /// Projects at `step_id`, in source order.
    pub fn projects_at(&self, step_id: &str) -> Vec<&Project> {
        self.by_stage
            .get(step_id)
            .map(|bucket| bucket.iter().map(|&slot| &self.projects[slot]).collect())
            .unwrap_or_default()
    }

    /// Status breakdown for `step_id`.
    pub fn summary_for(&self, step_id: &str) -> StageSummary {
        self.projects_at(step_id)
            .into_iter()
            .fold(StageSummary::default(), |mut summary, project| {
                match project.status {
                    ProjectStatus::OnTrack => summary.on_track += 1,
                    ProjectStatus::Blocked => summary.blocked += 1,
                    ProjectStatus::Other(_) => {}
                }
                summary.total += 1;
                summary
            })
    }

    /// Sum of all stage counts.
    pub fn tracked_total(&self) -> usize {
        self.by_stage.values().map(Vec::len).sum()
    }

    /// Projects whose stage resolves to no step.
    pub fn unassigned(&self) -> Vec<&Project> {
        self.unassigned
            .iter()
            .map(|&slot| &self.projects[slot])
            .collect()
    }
}
