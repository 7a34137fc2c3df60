//! Record-shape field rectangles.
//!
//! Graphviz stores the field rectangles of a `shape=record` node in its `rects` attribute as
//! space-separated `x1,y1,x2,y2` quadruples, one per field, in label order. The coordinates are
//! known to drift slightly from the lines of the node's own drawing; snapping moves every edge
//! onto the nearest coordinate that actually occurs in the drawing.

use crate::DecodeOptions;
use crate::error::{Error, Malformed, Result};
use crate::geom::{CoordTransform, Rect, rect};
use crate::ops::{DrawingOp, all_points};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordOptions {
    /// Snap rectangle edges to coordinates of the node's point-list drawing operations.
    pub snap_to_drawing: bool,
}

impl RecordOptions {
    pub fn snapped() -> Self {
        Self {
            snap_to_drawing: true,
        }
    }
}

/// Parses a `rects` attribute into rectangles expressed in `options.coord_system`, preserving
/// field order.
///
/// `drawing` must be the node's decoded `_draw_` operations in the same coordinate system; it is
/// only consulted when snapping.
pub fn reconcile_record_rects(
    raw: &str,
    drawing: &[DrawingOp],
    options: DecodeOptions,
    record_options: RecordOptions,
) -> Result<Vec<Rect>> {
    let rects = parse_rects(raw)?
        .into_iter()
        .map(|r| r.for_coord_system(options.coord_system, options.max_y))
        .collect::<Vec<_>>();
    if !record_options.snap_to_drawing {
        return Ok(rects);
    }

    let grid = SnapGrid::from_ops(drawing);
    if grid.xs.is_empty() || grid.ys.is_empty() {
        tracing::debug!(
            xs = grid.xs.len(),
            ys = grid.ys.len(),
            "record drawing has no snap candidates on at least one axis"
        );
    }
    Ok(rects.iter().map(|r| grid.snap(r)).collect())
}

fn parse_rects(raw: &str) -> Result<Vec<Rect>> {
    let mut out = Vec::new();
    let mut rest = raw;
    let mut consumed = 0;
    while let Some(start) = rest.find(|c: char| !c.is_ascii_whitespace()) {
        let token = &rest[start..];
        let len = token
            .find(|c: char| c.is_ascii_whitespace())
            .unwrap_or(token.len());
        out.push(parse_quadruple(&token[..len], consumed + start)?);
        consumed += start + len;
        rest = &token[len..];
    }
    Ok(out)
}

fn parse_quadruple(token: &str, offset: usize) -> Result<Rect> {
    let mut values = [0.0f64; 4];
    let mut parts = token.split(',');
    let mut part_offset = offset;
    for value in &mut values {
        let Some(part) = parts.next() else {
            return Err(Error::malformed(
                offset,
                Malformed::Expected {
                    expected: "four comma-separated coordinates",
                    found: token.to_string(),
                },
            ));
        };
        *value = part.parse::<f64>().map_err(|_| {
            Error::malformed(part_offset, Malformed::InvalidNumber(part.to_string()))
        })?;
        part_offset += part.len() + 1;
    }
    if parts.next().is_some() {
        return Err(Error::malformed(
            offset,
            Malformed::Expected {
                expected: "four comma-separated coordinates",
                found: token.to_string(),
            },
        ));
    }
    let [x1, y1, x2, y2] = values;
    Ok(rect(x1, y1, x2 - x1, y2 - y1))
}

/// Sorted, de-duplicated coordinates seen in a drawing.
#[derive(Debug, Default)]
struct SnapGrid {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl SnapGrid {
    fn from_ops(ops: &[DrawingOp]) -> Self {
        let mut grid = Self::default();
        for p in all_points(ops) {
            grid.xs.push(p.x);
            grid.ys.push(p.y);
        }
        for axis in [&mut grid.xs, &mut grid.ys] {
            axis.sort_by(f64::total_cmp);
            axis.dedup();
        }
        grid
    }

    fn snap(&self, r: &Rect) -> Rect {
        let x0 = nearest(&self.xs, r.origin.x);
        let x1 = nearest(&self.xs, r.origin.x + r.size.width);
        let y0 = nearest(&self.ys, r.origin.y);
        let y1 = nearest(&self.ys, r.origin.y + r.size.height);
        let snapped = rect(x0, y0, x1 - x0, y1 - y0);
        tracing::trace!(from = ?r, to = ?snapped, "snapped record rectangle");
        snapped
    }
}

/// Closest candidate by absolute difference; the first one in sort order wins ties. Returns
/// `value` itself when there are no candidates.
fn nearest(sorted: &[f64], value: f64) -> f64 {
    let mut best = value;
    let mut best_dist = f64::INFINITY;
    for &candidate in sorted {
        let dist = (candidate - value).abs();
        if dist < best_dist {
            best = candidate;
            best_dist = dist;
        }
    }
    best
}
