//! Detail panel projection for the active step.

use crate::index::project_index::StageSummary;
use crate::ingest::loader::Dataset;
use crate::model::project::{Project, ProjectStatus};
use crate::model::step::StepKind;
use crate::selection::controller::SelectionController;
use serde::Serialize;

/// Type-specific field set of the panel body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DetailFields {
    Step {
        inputs: Vec<String>,
        outputs: Vec<String>,
        duration: String,
        owner: String,
    },
    Gateway {
        criteria: Vec<String>,
        outcomes: Vec<String>,
    },
}

/// Actionable link to a resolvable next step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NextStepLink {
    pub step_id: String,
    pub title: String,
}

/// Card for one project at the active stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectCard {
    pub project_id: String,
    pub name: String,
    pub status_label: String,
    pub status_class: &'static str,
    /// Stored progress, possibly above 100.
    pub progress: u64,
    /// Progress capped for the bar width.
    pub display_progress: u64,
    pub next_steps: String,
    pub blocking_reason: Option<String>,
}

impl ProjectCard {
    fn from_project(project: &Project) -> Self {
        Self {
            project_id: project.id.clone(),
            name: project.name.clone(),
            status_label: project.status.badge_label().to_string(),
            status_class: status_class(&project.status),
            progress: project.progress,
            display_progress: project.display_progress(),
            next_steps: project.next_steps.clone(),
            blocking_reason: project.blocking_reason.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailPanel {
    pub step_id: String,
    pub step_number: usize,
    pub title: String,
    pub badge: &'static str,
    pub description: String,
    pub details: String,
    pub fields: DetailFields,
    pub next_steps: Vec<NextStepLink>,
    pub projects: Vec<ProjectCard>,
    pub summary: StageSummary,
}

/// Panel for the open step, or `None` while the panel is closed.
pub(crate) fn project_detail(
    dataset: &Dataset,
    selection: &SelectionController,
) -> Option<DetailPanel> {
    let step = selection.active_step(&dataset.process)?;
    let fields = match step.kind {
        StepKind::Step => DetailFields::Step {
            inputs: step.inputs.clone(),
            outputs: step.outputs.clone(),
            duration: step.duration.clone(),
            owner: step.owner.clone(),
        },
        StepKind::Gateway => DetailFields::Gateway {
            criteria: step.criteria.clone(),
            outcomes: step.outcomes.clone(),
        },
    };

    let next_steps = selection
        .next_step_links(&dataset.process)
        .into_iter()
        .map(|target| NextStepLink {
            step_id: target.id.clone(),
            title: target.title.clone(),
        })
        .collect();

    let projects = dataset
        .index
        .projects_at(&step.id)
        .into_iter()
        .map(ProjectCard::from_project)
        .collect();

    Some(DetailPanel {
        step_id: step.id.clone(),
        step_number: dataset.process.step_number(&step.id).unwrap_or_default(),
        title: step.title.clone(),
        badge: step.kind.badge_label(),
        description: step.description.clone(),
        details: step.details.clone(),
        fields,
        next_steps,
        projects,
        summary: dataset.index.summary_for(&step.id),
    })
}

fn status_class(status: &ProjectStatus) -> &'static str {
    match status {
        ProjectStatus::OnTrack => "on-track",
        ProjectStatus::Blocked => "blocked",
        ProjectStatus::Other(_) => "other",
    }
}
