//! Desktop flowchart and mobile list projections.

use crate::index::project_index::StageSummary;
use crate::ingest::loader::Dataset;
use crate::layout::{FlowLayout, NodeBox, Point};
use crate::model::step::StepKind;
use serde::Serialize;

/// One node of the desktop flowchart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowchartNode {
    pub step_id: String,
    /// One-based label drawn on the node.
    pub step_number: usize,
    pub title: String,
    pub kind: StepKind,
    pub project_count: usize,
    pub is_active: bool,
    pub bounds: NodeBox,
}

/// One drawn connector with its renderer class.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowchartEdge {
    pub from_step_id: String,
    pub to_step_id: String,
    pub class_name: &'static str,
    pub start: Point,
    pub end: Point,
    /// Arrow marker heading in degrees.
    pub angle: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowchartView {
    pub nodes: Vec<FlowchartNode>,
    pub edges: Vec<FlowchartEdge>,
    pub width: f64,
    pub height: f64,
}

/// One row of the mobile list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepListItem {
    pub step_id: String,
    pub step_number: usize,
    pub title: String,
    pub kind: StepKind,
    pub description: String,
    pub summary: StageSummary,
    pub is_active: bool,
}

pub(crate) fn project_flowchart(
    dataset: &Dataset,
    layout: &FlowLayout,
    active: Option<&str>,
) -> FlowchartView {
    let steps = dataset.process.steps();

    let nodes = steps
        .iter()
        .zip(layout.nodes.iter())
        .map(|(step, bounds)| FlowchartNode {
            step_id: step.id.clone(),
            step_number: bounds.index + 1,
            title: step.title.clone(),
            kind: step.kind,
            project_count: dataset.index.count_for(&step.id),
            is_active: active == Some(step.id.as_str()),
            bounds: *bounds,
        })
        .collect();

    let edges = layout
        .connectors
        .iter()
        .filter_map(|connector| {
            let from = steps.get(connector.from)?;
            let to = steps.get(connector.to)?;
            Some(FlowchartEdge {
                from_step_id: from.id.clone(),
                to_step_id: to.id.clone(),
                class_name: connector.direction.as_str(),
                start: connector.start,
                end: connector.end,
                angle: connector.angle(),
            })
        })
        .collect();

    FlowchartView {
        nodes,
        edges,
        width: layout.canvas_width,
        height: layout.canvas_height,
    }
}

pub(crate) fn project_list(dataset: &Dataset, active: Option<&str>) -> Vec<StepListItem> {
    dataset
        .process
        .steps()
        .iter()
        .enumerate()
        .map(|(index, step)| StepListItem {
            step_id: step.id.clone(),
            step_number: index + 1,
            title: step.title.clone(),
            kind: step.kind,
            description: step.description.clone(),
            summary: dataset.index.summary_for(&step.id),
            is_active: active == Some(step.id.as_str()),
        })
        .collect()
}
