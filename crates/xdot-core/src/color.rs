use crate::geom::{CoordTransform, Point};
use serde::{Deserialize, Serialize};

/// One `(fraction, color)` step of a gradient. Stops do not depend on the coordinate system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    /// Position along the gradient, in `[0, 1]`.
    pub fraction: f32,
    pub html_color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearGradient {
    pub start: Point,
    pub end: Point,
    pub stops: Vec<ColorStop>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadialGradient {
    pub start: Point,
    pub start_radius: f64,
    pub end: Point,
    pub end_radius: f64,
    pub stops: Vec<ColorStop>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Color {
    /// An HTML color (`#rrggbb`, `#rrggbbaa`), a color name, or a `/scheme/name` reference.
    Uniform(String),
    Linear(LinearGradient),
    Radial(RadialGradient),
}

impl Color {
    pub fn uniform(html_color: impl Into<String>) -> Self {
        Self::Uniform(html_color.into())
    }

    pub fn stops(&self) -> &[ColorStop] {
        match self {
            Self::Uniform(_) => &[],
            Self::Linear(g) => &g.stops,
            Self::Radial(g) => &g.stops,
        }
    }
}

impl CoordTransform for LinearGradient {
    fn flip_y(&self, max_y: f64) -> Self {
        Self {
            start: self.start.flip_y(max_y),
            end: self.end.flip_y(max_y),
            stops: self.stops.clone(),
        }
    }
}

impl CoordTransform for RadialGradient {
    fn flip_y(&self, max_y: f64) -> Self {
        Self {
            start: self.start.flip_y(max_y),
            start_radius: self.start_radius,
            end: self.end.flip_y(max_y),
            end_radius: self.end_radius,
            stops: self.stops.clone(),
        }
    }
}

impl CoordTransform for Color {
    fn flip_y(&self, max_y: f64) -> Self {
        match self {
            Self::Uniform(c) => Self::Uniform(c.clone()),
            Self::Linear(g) => Self::Linear(g.flip_y(max_y)),
            Self::Radial(g) => Self::Radial(g.flip_y(max_y)),
        }
    }
}
