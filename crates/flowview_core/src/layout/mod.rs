//! Deterministic flowchart layout.
//!
//! # Responsibility
//! - Place an ordered node sequence on a wrapping grid.
//! - Derive connectors between consecutive nodes from their grid cells.
//!
//! # Invariants
//! - Output depends only on `(policy, container_width, node_count)`.
//! - Relative node order is stable across container widths.
//! - The row block is horizontally centered in the container.

pub mod connector;
pub mod debounce;
pub mod policy;

use log::debug;
use serde::Serialize;

use self::connector::Connector;
use self::policy::LayoutPolicy;

/// A point in drawing coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Placed bounding box for the node at `index`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeBox {
    pub index: usize,
    pub row: usize,
    /// Visual column, after serpentine reversal.
    pub column: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl NodeBox {
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }
}

/// Complete layout for one container width.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowLayout {
    pub nodes: Vec<NodeBox>,
    pub connectors: Vec<Connector>,
    pub canvas_width: f64,
    pub canvas_height: f64,
}

impl FlowLayout {
    pub fn node(&self, index: usize) -> Option<&NodeBox> {
        self.nodes.get(index)
    }

    pub fn row_count(&self) -> usize {
        self.nodes.iter().map(|node| node.row + 1).max().unwrap_or(0)
    }
}

/// Computes node boxes and connectors for `node_count` nodes.
///
/// Nodes fill rows of `policy.nodes_per_row`. With `policy.serpentine`, odd
/// rows run right to left, so the last node of one row sits directly above the
/// first node of the next. A row block wider than the container is pinned to
/// the left edge instead of going negative.
///
/// A zero `node_count` means the model was built wrong; debug builds assert,
/// release builds return an empty layout.
pub fn compute_layout(policy: &LayoutPolicy, container_width: f64, node_count: usize) -> FlowLayout {
    debug_assert!(node_count > 0, "layout requested for an empty process");
    if node_count == 0 {
        return FlowLayout::default();
    }

    let per_row = policy.nodes_per_row.max(1);
    let columns = node_count.min(per_row);
    let rows = node_count.div_ceil(per_row);
    let container_width = if container_width.is_finite() {
        container_width.max(0.0)
    } else {
        0.0
    };

    let block_width = policy.row_width(columns);
    let left = ((container_width - block_width) / 2.0).max(0.0);

    let nodes = (0..node_count)
        .map(|index| {
            let row = index / per_row;
            let offset = index % per_row;
            let column = if policy.serpentine && row % 2 == 1 {
                per_row - 1 - offset
            } else {
                offset
            };
            NodeBox {
                index,
                row,
                column,
                x: left + column as f64 * (policy.node_width + policy.horizontal_gap),
                y: policy.margin_top + row as f64 * (policy.node_height + policy.vertical_gap),
                width: policy.node_width,
                height: policy.node_height,
            }
        })
        .collect::<Vec<_>>();

    let connectors = nodes
        .windows(2)
        .map(|pair| Connector::between(&pair[0], &pair[1], policy.connector_inset))
        .collect::<Vec<_>>();

    let canvas_height = 2.0 * policy.margin_top
        + rows as f64 * policy.node_height
        + (rows - 1) as f64 * policy.vertical_gap;

    debug!(
        "event=layout_compute module=layout status=ok nodes={} rows={} container_width={}",
        node_count, rows, container_width
    );

    FlowLayout {
        nodes,
        connectors,
        canvas_width: container_width.max(block_width),
        canvas_height,
    }
}

#[cfg(test)]
mod tests {
    use super::compute_layout;
    use super::connector::ConnectorDirection;
    use super::policy::LayoutPolicy;

    #[test]
    fn canonical_eight_node_serpentine() {
        let layout = compute_layout(&LayoutPolicy::default(), 1100.0, 8);

        let cells: Vec<(usize, usize)> = layout.nodes.iter().map(|n| (n.row, n.column)).collect();
        assert_eq!(
            cells,
            vec![
                (0, 0),
                (0, 1),
                (0, 2),
                (0, 3),
                (1, 3),
                (1, 2),
                (1, 1),
                (1, 0)
            ]
        );

        let directions: Vec<ConnectorDirection> =
            layout.connectors.iter().map(|c| c.direction).collect();
        assert_eq!(
            directions,
            vec![
                ConnectorDirection::Horizontal,
                ConnectorDirection::Horizontal,
                ConnectorDirection::Horizontal,
                ConnectorDirection::Vertical,
                ConnectorDirection::HorizontalReverse,
                ConnectorDirection::HorizontalReverse,
                ConnectorDirection::HorizontalReverse,
            ]
        );
    }

    #[test]
    fn row_block_is_centered() {
        let layout = compute_layout(&LayoutPolicy::default(), 1100.0, 8);
        // block is 4 * 180 + 3 * 60 = 900 wide
        assert!((layout.nodes[0].x - 100.0).abs() < f64::EPSILON);
        assert!((layout.nodes[3].right() - 1000.0).abs() < f64::EPSILON);
        assert!((layout.nodes[4].x - layout.nodes[3].x).abs() < f64::EPSILON);
        assert!((layout.canvas_height - 360.0).abs() < f64::EPSILON);
    }

    #[test]
    fn narrow_container_pins_block_left() {
        let layout = compute_layout(&LayoutPolicy::default(), 500.0, 8);
        assert!(layout.nodes[0].x.abs() < f64::EPSILON);
        assert!((layout.canvas_width - 900.0).abs() < f64::EPSILON);
    }

    #[test]
    fn partial_serpentine_row_starts_under_previous_row_end() {
        let layout = compute_layout(&LayoutPolicy::default(), 1000.0, 6);
        assert_eq!((layout.nodes[4].row, layout.nodes[4].column), (1, 3));
        assert_eq!((layout.nodes[5].row, layout.nodes[5].column), (1, 2));
        assert_eq!(layout.connectors.len(), 5);
    }

    #[test]
    fn non_serpentine_policy_wraps_left() {
        let policy = LayoutPolicy {
            serpentine: false,
            nodes_per_row: 3,
            ..LayoutPolicy::default()
        };
        let layout = compute_layout(&policy, 800.0, 5);
        assert_eq!((layout.nodes[3].row, layout.nodes[3].column), (1, 0));
        assert_eq!(layout.connectors[2].direction, ConnectorDirection::Vertical);
        assert_eq!(layout.connectors[3].direction, ConnectorDirection::Horizontal);
        assert_eq!(layout.row_count(), 2);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "empty process")]
    fn empty_layout_asserts_in_debug() {
        let _ = compute_layout(&LayoutPolicy::default(), 800.0, 0);
    }
}
