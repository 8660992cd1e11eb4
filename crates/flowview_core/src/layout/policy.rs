//! Layout policy for the flowchart grid.
//!
//! # Responsibility
//! - Hold the row size, serpentine flag and node geometry used by layout.
//! - Reject values that would produce a degenerate grid.
//!
//! # Invariants
//! - `nodes_per_row` is at least 1 after `check`.
//! - Node sizes are positive; gaps, margin and inset are non-negative.

use serde::{Deserialize, Serialize};

/// Grid policy and node geometry for the flowchart layout.
///
/// All values are in logical drawing units. The defaults reproduce the
/// canonical two rows of four with a serpentine return row.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutPolicy {
    /// Nodes placed in one row before wrapping.
    pub nodes_per_row: usize,
    /// Reverse the direction of every odd row.
    pub serpentine: bool,

    pub node_width: f64,
    pub node_height: f64,
    /// Space between neighbours in one row.
    pub horizontal_gap: f64,
    /// Space between rows.
    pub vertical_gap: f64,
    /// Space above the first row and below the last one.
    pub margin_top: f64,

    /// Distance kept between a connector endpoint and the node edge, leaving
    /// room for the arrow marker.
    pub connector_inset: f64,
}

impl Default for LayoutPolicy {
    fn default() -> Self {
        Self {
            nodes_per_row: 4,
            serpentine: true,
            node_width: 180.0,
            node_height: 100.0,
            horizontal_gap: 60.0,
            vertical_gap: 80.0,
            margin_top: 40.0,
            connector_inset: 8.0,
        }
    }
}

impl LayoutPolicy {
    /// Returns a description of the first invalid value, if any.
    pub fn check(&self) -> Result<(), String> {
        if self.nodes_per_row == 0 {
            return Err("nodesPerRow must be at least 1".to_string());
        }
        for (name, value) in [
            ("nodeWidth", self.node_width),
            ("nodeHeight", self.node_height),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(format!("{name} must be a positive number, got {value}"));
            }
        }
        for (name, value) in [
            ("horizontalGap", self.horizontal_gap),
            ("verticalGap", self.vertical_gap),
            ("marginTop", self.margin_top),
            ("connectorInset", self.connector_inset),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{name} must be a non-negative number, got {value}"));
            }
        }
        Ok(())
    }

    /// Width of a full row of `columns` nodes including gaps.
    pub fn row_width(&self, columns: usize) -> f64 {
        if columns == 0 {
            return 0.0;
        }
        columns as f64 * self.node_width + (columns - 1) as f64 * self.horizontal_gap
    }
}

#[cfg(test)]
mod tests {
    use super::LayoutPolicy;

    #[test]
    fn defaults_are_the_two_by_four_grid() {
        let policy = LayoutPolicy::default();

        assert_eq!(policy.nodes_per_row, 4);
        assert!(policy.serpentine);
        assert!((policy.node_width - 180.0).abs() < f64::EPSILON);
        assert!((policy.node_height - 100.0).abs() < f64::EPSILON);
        assert!((policy.horizontal_gap - 60.0).abs() < f64::EPSILON);
        assert!((policy.vertical_gap - 80.0).abs() < f64::EPSILON);
        assert!((policy.margin_top - 40.0).abs() < f64::EPSILON);
        assert!((policy.connector_inset - 8.0).abs() < f64::EPSILON);
        assert!(policy.check().is_ok());
    }

    #[test]
    fn row_width_counts_inner_gaps_only() {
        let policy = LayoutPolicy::default();
        assert!((policy.row_width(4) - 900.0).abs() < f64::EPSILON);
        assert!((policy.row_width(1) - 180.0).abs() < f64::EPSILON);
        assert!(policy.row_width(0).abs() < f64::EPSILON);
    }

    #[test]
    fn check_rejects_degenerate_values() {
        let zero_row = LayoutPolicy {
            nodes_per_row: 0,
            ..LayoutPolicy::default()
        };
        assert!(zero_row.check().is_err());

        let negative_gap = LayoutPolicy {
            vertical_gap: -1.0,
            ..LayoutPolicy::default()
        };
        assert!(negative_gap.check().unwrap_err().contains("verticalGap"));

        let nan_width = LayoutPolicy {
            node_width: f64::NAN,
            ..LayoutPolicy::default()
        };
        assert!(nan_width.check().is_err());
    }
}
