//! Connector classification and endpoint geometry.

use crate::layout::{NodeBox, Point};
use serde::Serialize;

/// Drawing direction of one connector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConnectorDirection {
    /// Left to right within a row.
    Horizontal,
    /// Right to left within a row (serpentine return).
    HorizontalReverse,
    /// Row transition.
    Vertical,
}

impl ConnectorDirection {
    /// Derives the direction from the grid cells of both endpoints.
    pub fn classify(from: &NodeBox, to: &NodeBox) -> Self {
        if from.row != to.row {
            Self::Vertical
        } else if to.column >= from.column {
            Self::Horizontal
        } else {
            Self::HorizontalReverse
        }
    }

    /// Class name handed to renderers.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::HorizontalReverse => "horizontal-reverse",
            Self::Vertical => "vertical",
        }
    }
}

/// Directed link between two consecutive nodes.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Connector {
    pub from: usize,
    pub to: usize,
    pub direction: ConnectorDirection,
    pub start: Point,
    pub end: Point,
}

impl Connector {
    /// Builds the connector between `from` and `to`, attaching to box edges.
    pub fn between(from: &NodeBox, to: &NodeBox, inset: f64) -> Self {
        let direction = ConnectorDirection::classify(from, to);
        let (start, end) = match direction {
            ConnectorDirection::Horizontal => (
                Point::new(from.right() + inset, from.center_y()),
                Point::new(to.x - inset, to.center_y()),
            ),
            ConnectorDirection::HorizontalReverse => (
                Point::new(from.x - inset, from.center_y()),
                Point::new(to.right() + inset, to.center_y()),
            ),
            ConnectorDirection::Vertical => (
                Point::new(from.center_x(), from.bottom() + inset),
                Point::new(to.center_x(), to.y - inset),
            ),
        };

        Self {
            from: from.index,
            to: to.index,
            direction,
            start,
            end,
        }
    }

    /// Heading of the connector at its end, in degrees, for arrow markers.
    pub fn angle(&self) -> f64 {
        (self.end.y - self.start.y)
            .atan2(self.end.x - self.start.x)
            .to_degrees()
    }
}

#[cfg(test)]
mod tests {
    use super::{Connector, ConnectorDirection};
    use crate::layout::NodeBox;

    fn node(index: usize, row: usize, column: usize, x: f64, y: f64) -> NodeBox {
        NodeBox {
            index,
            row,
            column,
            x,
            y,
            width: 100.0,
            height: 50.0,
        }
    }

    #[test]
    fn horizontal_connector_spans_the_gap() {
        let a = node(0, 0, 0, 0.0, 0.0);
        let b = node(1, 0, 1, 140.0, 0.0);
        let connector = Connector::between(&a, &b, 5.0);

        assert_eq!(connector.direction, ConnectorDirection::Horizontal);
        assert!((connector.start.x - 105.0).abs() < f64::EPSILON);
        assert!((connector.end.x - 135.0).abs() < f64::EPSILON);
        assert!((connector.start.y - 25.0).abs() < f64::EPSILON);
        assert!(connector.angle().abs() < f64::EPSILON);
    }

    #[test]
    fn reverse_connector_points_left() {
        let a = node(4, 1, 1, 140.0, 100.0);
        let b = node(5, 1, 0, 0.0, 100.0);
        let connector = Connector::between(&a, &b, 5.0);

        assert_eq!(connector.direction, ConnectorDirection::HorizontalReverse);
        assert!((connector.start.x - 135.0).abs() < f64::EPSILON);
        assert!((connector.end.x - 105.0).abs() < f64::EPSILON);
        assert!((connector.angle().abs() - 180.0).abs() < 1e-9);
    }

    #[test]
    fn vertical_connector_drops_between_rows() {
        let a = node(3, 0, 1, 140.0, 0.0);
        let b = node(4, 1, 1, 140.0, 100.0);
        let connector = Connector::between(&a, &b, 5.0);

        assert_eq!(connector.direction, ConnectorDirection::Vertical);
        assert!((connector.start.y - 55.0).abs() < f64::EPSILON);
        assert!((connector.end.y - 95.0).abs() < f64::EPSILON);
        assert!((connector.angle() - 90.0).abs() < 1e-9);
        assert_eq!(connector.direction.as_str(), "vertical");
    }
}
