use crate::geom::{CoordTransform, CoordinateSystem, Point, Rect, rect};
use serde::{Deserialize, Serialize};

/// Ratio between the descender depth and the font size used when no better metric is known.
pub const DEFAULT_DESCENDER_RATIO: f64 = 0.23;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Font {
    /// Size in points.
    pub size: f64,
    pub name: String,
}

impl Font {
    pub const DEFAULT_SIZE: f64 = 14.0;
    pub const DEFAULT_NAME: &'static str = "Times-Roman";

    pub fn new(size: f64, name: impl Into<String>) -> Self {
        Self {
            size,
            name: name.into(),
        }
    }
}

/// Graphviz's default label font.
impl Default for Font {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SIZE, Self::DEFAULT_NAME)
    }
}

bitflags::bitflags! {
    /// Font characteristics set by the xdot `t` directive.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FontChar: u32 {
        const BOLD = 1 << 0;
        const ITALIC = 1 << 1;
        const UNDERLINE = 1 << 2;
        const SUPERSCRIPT = 1 << 3;
        const SUBSCRIPT = 1 << 4;
        const STRIKE_THROUGH = 1 << 5;
        const OVERLINE = 1 << 6;
    }
}

// Serialized as the raw bit set so unknown bits survive a round trip.
impl Serialize for FontChar {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u32(self.bits())
    }
}

impl<'de> Deserialize<'de> for FontChar {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bits = u32::deserialize(deserializer)?;
        Ok(Self::from_bits_retain(bits))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl TextAlign {
    /// xdot encodes alignment as the sign of an integer.
    pub fn from_xdot(value: i64) -> Self {
        match value.signum() {
            -1 => Self::Left,
            0 => Self::Center,
            _ => Self::Right,
        }
    }
}

/// A run of text drawn on a baseline.
///
/// `anchor.y` is the baseline in `coord_system`; `align` says whether `anchor.x` is the left end,
/// the middle or the right end of the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextInfo {
    pub anchor: Point,
    pub align: TextAlign,
    /// Width of the run as estimated by the layout engine.
    pub width_estimate: f64,
    pub text: String,
    pub font: Font,
    pub font_char: FontChar,
    pub coord_system: CoordinateSystem,
}

impl TextInfo {
    /// Re-expresses the text in `system`, starting from whatever system it is currently in.
    pub fn for_coord_system(&self, system: CoordinateSystem, max_y: f64) -> Self {
        self.convert(self.coord_system, system, max_y)
    }

    pub fn left_x(&self) -> f64 {
        match self.align {
            TextAlign::Left => self.anchor.x,
            TextAlign::Center => self.anchor.x - self.width_estimate / 2.0,
            TextAlign::Right => self.anchor.x - self.width_estimate,
        }
    }

    /// Estimates the box covering the rendered glyphs.
    ///
    /// The box is one font size high and reaches `descender` below the baseline; without an
    /// override the descender is taken as [`DEFAULT_DESCENDER_RATIO`] of the font size.
    pub fn bounding_box_estimate(&self, descender: Option<f64>) -> Rect {
        let descender = descender.unwrap_or(self.font.size * DEFAULT_DESCENDER_RATIO);
        let height = self.font.size;
        let origin_y = match self.coord_system {
            CoordinateSystem::BottomLeft => self.anchor.y - descender,
            CoordinateSystem::TopLeft => self.anchor.y + descender - height,
        };
        rect(self.left_x(), origin_y, self.width_estimate, height)
    }
}

impl CoordTransform for TextInfo {
    // The baseline moves into the other system, so the label follows it.
    fn flip_y(&self, max_y: f64) -> Self {
        Self {
            anchor: self.anchor.flip_y(max_y),
            coord_system: match self.coord_system {
                CoordinateSystem::BottomLeft => CoordinateSystem::TopLeft,
                CoordinateSystem::TopLeft => CoordinateSystem::BottomLeft,
            },
            ..self.clone()
        }
    }

    fn for_coord_system(&self, system: CoordinateSystem, max_y: f64) -> Self {
        TextInfo::for_coord_system(self, system, max_y)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageInfo {
    pub position: Rect,
    pub name: String,
}

impl CoordTransform for ImageInfo {
    fn flip_y(&self, max_y: f64) -> Self {
        Self {
            position: self.position.flip_y(max_y),
            name: self.name.clone(),
        }
    }
}
