use crate::color::Color;
use crate::geom::{Point, Rect};
use crate::text::{ImageInfo, TextInfo};
use serde::{Deserialize, Serialize};

/// A single decoded xdot drawing operation.
///
/// Font (`F`) and font-characteristic (`t`) directives have no variant: the decoder folds them
/// into the [`TextInfo`] of the `Text` operations that follow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", content = "args", rename_all = "snake_case")]
pub enum DrawingOp {
    /// Ellipse inscribed in the given rectangle.
    FilledEllipse(Rect),
    UnfilledEllipse(Rect),
    FilledPolygon(Vec<Point>),
    UnfilledPolygon(Vec<Point>),
    /// Cubic B-spline control points (`3n + 1` of them).
    FilledBezier(Vec<Point>),
    UnfilledBezier(Vec<Point>),
    PolyLine(Vec<Point>),
    Text(TextInfo),
    Image(ImageInfo),
    FillColor(Color),
    PenColor(Color),
    /// Raw style item, e.g. `dashed` or `setlinewidth(2)`.
    Style(String),
}

impl DrawingOp {
    /// Vertices of the point-list operations (polygons, beziers and polylines).
    pub fn points(&self) -> Option<&[Point]> {
        match self {
            Self::FilledPolygon(points)
            | Self::UnfilledPolygon(points)
            | Self::FilledBezier(points)
            | Self::UnfilledBezier(points)
            | Self::PolyLine(points) => Some(points),
            Self::FilledEllipse(_)
            | Self::UnfilledEllipse(_)
            | Self::Text(_)
            | Self::Image(_)
            | Self::FillColor(_)
            | Self::PenColor(_)
            | Self::Style(_) => None,
        }
    }

    /// Whether the operation carries coordinates (and is therefore subject to coordinate
    /// conversion).
    pub fn is_geometry(&self) -> bool {
        match self {
            Self::FilledEllipse(_)
            | Self::UnfilledEllipse(_)
            | Self::FilledPolygon(_)
            | Self::UnfilledPolygon(_)
            | Self::FilledBezier(_)
            | Self::UnfilledBezier(_)
            | Self::PolyLine(_)
            | Self::Text(_)
            | Self::Image(_) => true,
            Self::FillColor(_) | Self::PenColor(_) | Self::Style(_) => false,
        }
    }
}

/// Iterates over every vertex of every point-list operation, in drawing order.
pub fn all_points(ops: &[DrawingOp]) -> impl Iterator<Item = &Point> + '_ {
    ops.iter().filter_map(DrawingOp::points).flatten()
}
