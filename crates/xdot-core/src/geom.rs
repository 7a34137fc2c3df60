#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

pub type Unit = euclid::UnknownUnit;

pub type Point = euclid::Point2D<f64, Unit>;
pub type Size = euclid::Size2D<f64, Unit>;
/// Axis-aligned rectangle whose `origin` is the corner closest to the origin of the coordinate
/// system it is expressed in.
pub type Rect = euclid::Rect<f64, Unit>;

pub fn point(x: f64, y: f64) -> Point {
    euclid::point2(x, y)
}

pub fn size(width: f64, height: f64) -> Size {
    euclid::size2(width, height)
}

pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Rect {
    euclid::rect(x, y, width, height)
}

/// Where the y-axis starts.
///
/// Graphviz writes every coordinate with the origin in the bottom-left corner of the drawing.
/// `TopLeft` is the convention of most screen toolkits; converting to it needs the drawing's
/// maximum y extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordinateSystem {
    #[default]
    BottomLeft,
    TopLeft,
}

/// Values that can be re-expressed in another coordinate system.
///
/// Only the y-axis differs between the two systems, so a conversion is either the identity or a
/// flip around `max_y`. A flip is its own inverse.
pub trait CoordTransform: Sized + Clone {
    /// Mirrors the value vertically inside a drawing of height `max_y`.
    fn flip_y(&self, max_y: f64) -> Self;

    fn convert(&self, from: CoordinateSystem, to: CoordinateSystem, max_y: f64) -> Self {
        if from == to {
            self.clone()
        } else {
            self.flip_y(max_y)
        }
    }

    /// Converts a value given in native Graphviz coordinates into `system`.
    fn for_coord_system(&self, system: CoordinateSystem, max_y: f64) -> Self {
        self.convert(CoordinateSystem::BottomLeft, system, max_y)
    }
}

impl CoordTransform for Point {
    fn flip_y(&self, max_y: f64) -> Self {
        point(self.x, max_y - self.y)
    }
}

impl CoordTransform for Rect {
    // The origin has to stay the corner nearest to the origin, so the opposite edge becomes the
    // new origin edge.
    fn flip_y(&self, max_y: f64) -> Self {
        rect(
            self.origin.x,
            max_y - self.origin.y - self.size.height,
            self.size.width,
            self.size.height,
        )
    }
}

impl<T: CoordTransform> CoordTransform for Vec<T> {
    fn flip_y(&self, max_y: f64) -> Self {
        self.iter().map(|v| v.flip_y(max_y)).collect()
    }

    fn for_coord_system(&self, system: CoordinateSystem, max_y: f64) -> Self {
        self.iter().map(|v| v.for_coord_system(system, max_y)).collect()
    }
}
