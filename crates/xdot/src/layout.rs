//! Typed access to the layout attributes `dot -Txdot` writes next to the drawings: the graph's
//! `bb`, node `pos`/`width`/`height`/`rects` and edge `pos`.
//!
//! All geometry is returned in the coordinate system chosen in [`DrawingOptions`]. Converting to
//! [`CoordinateSystem::TopLeft`] mirrors around the upper y of the root graph's bounding box.

use crate::attributes::{AttributeSource, DrawingAttribute};
use serde::{Deserialize, Serialize};
use xdot_core::geom::{point, rect, size};
use xdot_core::{
    CoordTransform, CoordinateSystem, DecodeOptions, DrawingOp, Error, Malformed, Point, Rect,
    RecordOptions, Result, Size, decode, reconcile_record_rects,
};

/// Graphviz sizes nodes in inches.
pub const POINTS_PER_INCH: f64 = 72.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawingOptions {
    pub coord_system: CoordinateSystem,
    /// Snap record field rectangles to the lines of the node's `_draw_` drawing.
    pub snap_record_rects: bool,
}

impl DrawingOptions {
    pub fn top_left() -> Self {
        Self {
            coord_system: CoordinateSystem::TopLeft,
            snap_record_rects: false,
        }
    }

    pub fn with_snap_record_rects(mut self, snap: bool) -> Self {
        self.snap_record_rects = snap;
        self
    }
}

/// One piece of an edge's route.
///
/// `points` are B-spline control points (`3n + 1` of them). `start` and `end` are the tips of
/// the tail and head arrows when the edge has them; the spline then stops short of the tip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spline {
    pub start: Option<Point>,
    pub end: Option<Point>,
    pub points: Vec<Point>,
}

impl CoordTransform for Spline {
    fn flip_y(&self, max_y: f64) -> Self {
        Self {
            start: self.start.map(|p| p.flip_y(max_y)),
            end: self.end.map(|p| p.flip_y(max_y)),
            points: self.points.flip_y(max_y),
        }
    }
}

/// Reads layout attributes of the objects of one laid-out root graph.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutReader {
    options: DrawingOptions,
    bounding_box: Rect,
    max_y: f64,
}

impl LayoutReader {
    /// Reads the root graph's `bb`. Without one the drawing height is taken as zero.
    pub fn from_graph(graph: &impl AttributeSource, options: DrawingOptions) -> Result<Self> {
        let bounding_box = match graph.attribute("bb") {
            Some(bb) => {
                let [llx, lly, urx, ury] = parse_reals(bb, 0, "bounding box `llx,lly,urx,ury`")?;
                rect(llx, lly, urx - llx, ury - lly)
            }
            None => {
                tracing::debug!("graph has no `bb` attribute; assuming an empty drawing");
                Rect::zero()
            }
        };
        let max_y = bounding_box.max_y();
        Ok(Self {
            options,
            bounding_box,
            max_y,
        })
    }

    pub fn options(&self) -> DrawingOptions {
        self.options
    }

    /// Options handed to the drawing decoder for objects of this graph.
    pub fn decode_options(&self) -> DecodeOptions {
        DecodeOptions {
            coord_system: self.options.coord_system,
            max_y: self.max_y,
        }
    }

    pub fn max_y(&self) -> f64 {
        self.max_y
    }

    pub fn bounding_box(&self) -> Rect {
        self.convert(self.bounding_box)
    }

    fn convert<T: CoordTransform>(&self, value: T) -> T {
        value.for_coord_system(self.options.coord_system, self.max_y)
    }

    /// Decodes one drawing attribute of `object`; an absent attribute draws nothing.
    pub fn drawing(
        &self,
        object: &impl AttributeSource,
        attribute: DrawingAttribute,
    ) -> Result<Vec<DrawingOp>> {
        let Some(value) = object.attribute(attribute.name()) else {
            return Ok(Vec::new());
        };
        decode(value, self.decode_options()).inspect_err(|err| {
            tracing::debug!(attribute = attribute.name(), %err, "failed to decode drawing")
        })
    }

    /// Field rectangles of a record-shaped node, in label order.
    pub fn record_rectangles(&self, node: &impl AttributeSource) -> Result<Vec<Rect>> {
        let Some(rects) = node.attribute("rects") else {
            return Ok(Vec::new());
        };
        let drawing = if self.options.snap_record_rects {
            self.drawing(node, DrawingAttribute::Draw)?
        } else {
            Vec::new()
        };
        reconcile_record_rects(
            rects,
            &drawing,
            self.decode_options(),
            RecordOptions {
                snap_to_drawing: self.options.snap_record_rects,
            },
        )
    }

    /// Center of the node.
    pub fn node_position(&self, node: &impl AttributeSource) -> Result<Option<Point>> {
        let Some(pos) = node.attribute("pos") else {
            return Ok(None);
        };
        // `!` marks a position pinned by the user.
        let pos = pos.strip_suffix('!').unwrap_or(pos);
        let [x, y] = parse_reals(pos, 0, "node position `x,y`")?;
        Ok(Some(self.convert(point(x, y))))
    }

    /// Node size in points.
    pub fn node_size(&self, node: &impl AttributeSource) -> Result<Option<Size>> {
        let (Some(width), Some(height)) = (node.attribute("width"), node.attribute("height"))
        else {
            return Ok(None);
        };
        let [width] = parse_reals(width, 0, "node width")?;
        let [height] = parse_reals(height, 0, "node height")?;
        Ok(Some(size(
            width * POINTS_PER_INCH,
            height * POINTS_PER_INCH,
        )))
    }

    pub fn node_bounding_box(&self, node: &impl AttributeSource) -> Result<Option<Rect>> {
        let (Some(center), Some(size)) = (self.node_position(node)?, self.node_size(node)?) else {
            return Ok(None);
        };
        Ok(Some(rect(
            center.x - size.width / 2.0,
            center.y - size.height / 2.0,
            size.width,
            size.height,
        )))
    }

    /// Splines of an edge's `pos`. Most edges have one; concentrated edges may have several.
    pub fn edge_splines(&self, edge: &impl AttributeSource) -> Result<Vec<Spline>> {
        let Some(pos) = edge.attribute("pos") else {
            return Ok(Vec::new());
        };
        let mut splines = Vec::new();
        let mut offset = 0;
        for part in pos.split(';') {
            if !part.trim().is_empty() {
                splines.push(self.convert(parse_spline(part, offset)?));
            }
            offset += part.len() + 1;
        }
        tracing::trace!(splines = splines.len(), "read edge splines");
        Ok(splines)
    }

    pub fn first_spline(&self, edge: &impl AttributeSource) -> Result<Option<Spline>> {
        Ok(self.edge_splines(edge)?.into_iter().next())
    }
}

/// `[s,x,y] [e,x,y] x,y x,y ...`
fn parse_spline(text: &str, offset: usize) -> Result<Spline> {
    let mut spline = Spline {
        start: None,
        end: None,
        points: Vec::new(),
    };
    for (at, token) in tokens(text, offset) {
        if let Some(tip) = token.strip_prefix("s,") {
            let [x, y] = parse_reals(tip, at + 2, "start arrow tip `s,x,y`")?;
            spline.start = Some(point(x, y));
        } else if let Some(tip) = token.strip_prefix("e,") {
            let [x, y] = parse_reals(tip, at + 2, "end arrow tip `e,x,y`")?;
            spline.end = Some(point(x, y));
        } else {
            let [x, y] = parse_reals(token, at, "spline point `x,y`")?;
            spline.points.push(point(x, y));
        }
    }
    if spline.points.is_empty() {
        return Err(Error::malformed(
            offset,
            Malformed::Expected {
                expected: "at least one spline point",
                found: text.trim().to_string(),
            },
        ));
    }
    Ok(spline)
}

/// Whitespace-separated tokens with their absolute byte offsets.
fn tokens(text: &str, offset: usize) -> Vec<(usize, &str)> {
    let mut out = Vec::new();
    let mut rest = text;
    let mut consumed = offset;
    while let Some(start) = rest.find(|c: char| !c.is_ascii_whitespace()) {
        let token = &rest[start..];
        let len = token
            .find(|c: char| c.is_ascii_whitespace())
            .unwrap_or(token.len());
        out.push((consumed + start, &token[..len]));
        consumed += start + len;
        rest = &token[len..];
    }
    out
}

/// Exactly `N` comma-separated reals.
fn parse_reals<const N: usize>(
    text: &str,
    offset: usize,
    expected: &'static str,
) -> Result<[f64; N]> {
    let wrong_shape = || {
        Error::malformed(
            offset,
            Malformed::Expected {
                expected,
                found: text.to_string(),
            },
        )
    };
    let mut values = [0.0; N];
    let mut parts = text.split(',');
    let mut at = offset;
    for value in &mut values {
        let part = parts.next().ok_or_else(wrong_shape)?;
        let trimmed = part.trim();
        *value = trimmed.parse::<f64>().map_err(|_| {
            let lead = part.len() - part.trim_start().len();
            Error::malformed(at + lead, Malformed::InvalidNumber(trimmed.to_string()))
        })?;
        at += part.len() + 1;
    }
    if parts.next().is_some() {
        return Err(wrong_shape());
    }
    Ok(values)
}
