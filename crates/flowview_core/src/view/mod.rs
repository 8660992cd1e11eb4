//! View adapter projections.
//!
//! # Responsibility
//! - Turn `(dataset, layout, selection)` into renderer-neutral output.
//! - Choose between the desktop flowchart and the mobile list.
//!
//! # Invariants
//! - Projection is a pure function; it never mutates session state.
//! - A detail panel is produced iff the selection is open.

pub mod detail;
pub mod surface;

use crate::config::FlowViewConfig;
use crate::ingest::loader::{Dataset, LoadError};
use crate::layout::FlowLayout;
use crate::selection::controller::SelectionController;
use serde::Serialize;

use self::detail::{project_detail, DetailPanel};
use self::surface::{project_flowchart, project_list, FlowchartView, StepListItem};

const ERROR_TITLE: &str = "Process flow unavailable";
const ERROR_MESSAGE: &str = "The process flow could not be loaded. Reload the page to try again.";

/// Main drawing surface for the current container width.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", content = "view", rename_all = "snake_case")]
pub enum Surface {
    Desktop(FlowchartView),
    Mobile(Vec<StepListItem>),
}

/// Placeholder shown instead of a flowchart when loading failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorPlaceholder {
    pub title: String,
    pub message: String,
    /// Diagnostic cause, for logs and developer tooling.
    pub detail: String,
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RenderOutput {
    Ready {
        surface: Surface,
        panel: Option<DetailPanel>,
    },
    Error(ErrorPlaceholder),
}

impl RenderOutput {
    /// Error state for a failed initialization.
    pub fn error(err: &LoadError) -> Self {
        Self::Error(ErrorPlaceholder {
            title: ERROR_TITLE.to_string(),
            message: ERROR_MESSAGE.to_string(),
            detail: err.to_string(),
        })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    pub fn panel(&self) -> Option<&DetailPanel> {
        match self {
            Self::Ready { panel, .. } => panel.as_ref(),
            Self::Error(_) => None,
        }
    }
}

/// Projects the current session state into renderable output.
pub fn render(
    dataset: &Dataset,
    layout: &FlowLayout,
    selection: &SelectionController,
    config: &FlowViewConfig,
    container_width: f64,
) -> RenderOutput {
    let active = selection.active_step_id();
    let surface = if config.is_mobile(container_width) {
        Surface::Mobile(project_list(dataset, active))
    } else {
        Surface::Desktop(project_flowchart(dataset, layout, active))
    };
    let panel = project_detail(dataset, selection);

    RenderOutput::Ready { surface, panel }
}
