#![forbid(unsafe_code)]

//! Decoder for Graphviz xdot drawing attributes (headless, no I/O).
//!
//! Graphviz's `xdot` output annotates every graph object with drawing attributes (`_draw_`,
//! `_ldraw_`, ...) written in a small command language. This crate turns such a string into
//! typed [`DrawingOp`]s, optionally converted to a top-left coordinate system, and lines up the
//! field rectangles of record-shaped nodes with that drawing.
//!
//! ```
//! use xdot_core::{DecodeOptions, DrawingOp, decode};
//!
//! let ops = decode("c 7 -#ff0000 P 3 0 0 10 0 5 8", DecodeOptions::top_left(8.0))?;
//! assert_eq!(ops.len(), 2);
//! assert!(matches!(ops[1], DrawingOp::FilledPolygon(_)));
//! # Ok::<(), xdot_core::Error>(())
//! ```

pub mod color;
pub mod decode;
pub mod error;
pub mod geom;
pub mod ops;
pub mod records;
mod scanner;
pub mod text;

pub use color::{Color, ColorStop, LinearGradient, RadialGradient};
pub use decode::decode;
pub use error::{Error, Malformed, Result};
pub use geom::{CoordTransform, CoordinateSystem, Point, Rect, Size};
pub use ops::DrawingOp;
pub use records::{RecordOptions, reconcile_record_rects};
pub use text::{Font, FontChar, ImageInfo, TextAlign, TextInfo};

use serde::{Deserialize, Serialize};

/// Target coordinate system for decoded geometry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DecodeOptions {
    pub coord_system: CoordinateSystem,
    /// Height of the whole drawing in points (the upper y of the root graph's `bb`). Only used
    /// when converting to [`CoordinateSystem::TopLeft`].
    pub max_y: f64,
}

impl DecodeOptions {
    /// Keep Graphviz's bottom-left coordinates.
    pub fn native() -> Self {
        Self::default()
    }

    /// Flip to a top-left origin inside a drawing of height `max_y`.
    pub fn top_left(max_y: f64) -> Self {
        Self {
            coord_system: CoordinateSystem::TopLeft,
            max_y,
        }
    }

    pub fn with_coord_system(mut self, coord_system: CoordinateSystem) -> Self {
        self.coord_system = coord_system;
        self
    }

    pub fn with_max_y(mut self, max_y: f64) -> Self {
        self.max_y = max_y;
        self
    }
}
