//! Decoder for the xdot drawing-attribute language.
//!
//! An attribute such as `_draw_` holds a sequence of directives, each a single letter followed
//! by its arguments:
//!
//! ```text
//! c 7 -#000000 C 7 -#ffffff P 4 0 0 0 72.25 136.5 72.25 136.5 0
//! ```
//!
//! Decoding happens in two stages. [`Directives`] turns the text into raw [`Directive`]s, one per
//! letter, and [`DecodeState`] folds them into [`DrawingOp`]s. The fold carries the active font
//! and font characteristics, which are attached to every text operation that follows them.

use crate::DecodeOptions;
use crate::color::{Color, ColorStop, LinearGradient, RadialGradient};
use crate::error::{Malformed, Result};
use crate::geom::{CoordTransform, Point, Rect, point, rect};
use crate::ops::DrawingOp;
use crate::scanner::Scanner;
use crate::text::{Font, FontChar, ImageInfo, TextAlign, TextInfo};

/// One xdot directive, as written in the input (native coordinates).
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Directive {
    Ellipse { filled: bool, bounds: Rect },
    Polygon { filled: bool, points: Vec<Point> },
    Bezier { filled: bool, points: Vec<Point> },
    PolyLine(Vec<Point>),
    Text {
        anchor: Point,
        align: TextAlign,
        width: f64,
        text: String,
    },
    Image(ImageInfo),
    FillColor(Color),
    PenColor(Color),
    Font(Font),
    FontChar(FontChar),
    Style(String),
}

/// Iterator over the directives of an xdot string. Stops after the first error.
pub(crate) struct Directives<'input> {
    scanner: Scanner<'input>,
    failed: bool,
}

impl<'input> Directives<'input> {
    pub(crate) fn new(input: &'input str) -> Self {
        Self {
            scanner: Scanner::new(input),
            failed: false,
        }
    }

    fn next_directive(&mut self) -> Result<Directive> {
        let s = &mut self.scanner;
        let at = s.offset();
        let letter = s.peek_char().unwrap_or('\0');
        s.bump();
        let directive = match letter {
            'E' | 'e' => Directive::Ellipse {
                filled: letter == 'E',
                bounds: ellipse_bounds(s)?,
            },
            'P' | 'p' => Directive::Polygon {
                filled: letter == 'P',
                points: point_list(s)?,
            },
            'b' | 'B' => Directive::Bezier {
                filled: letter == 'b',
                points: point_list(s)?,
            },
            'L' => Directive::PolyLine(point_list(s)?),
            'T' => {
                let x = s.real("text x")?;
                let y = s.real("text y")?;
                let align = TextAlign::from_xdot(s.int("text alignment")?);
                let width = s.real("text width")?;
                let (text, _) = s.string("text")?;
                Directive::Text {
                    anchor: point(x, y),
                    align,
                    width,
                    text: text.to_string(),
                }
            }
            'C' | 'c' => {
                let (body, body_at) = s.string("color")?;
                let color = parse_color(body, body_at)?;
                if letter == 'C' {
                    Directive::PenColor(color)
                } else {
                    Directive::FillColor(color)
                }
            }
            'F' => {
                let size = s.real("font size")?;
                let (name, _) = s.string_or_word("font name")?;
                Directive::Font(Font::new(size, name))
            }
            'S' => {
                let (style, _) = s.string("style")?;
                Directive::Style(style.to_string())
            }
            'I' => {
                let x = s.real("image x")?;
                let y = s.real("image y")?;
                let w = s.real("image width")?;
                let h = s.real("image height")?;
                let (name, _) = s.string("image name")?;
                Directive::Image(ImageInfo {
                    position: rect(x, y, w, h),
                    name: name.to_string(),
                })
            }
            't' => {
                let flags_at = s.offset();
                let bits = s.int("font characteristics")?;
                let bits = u32::try_from(bits).map_err(|_| {
                    crate::Error::malformed(flags_at, Malformed::InvalidCount(bits))
                })?;
                Directive::FontChar(FontChar::from_bits_retain(bits))
            }
            other => {
                return Err(crate::Error::malformed(
                    at,
                    Malformed::UnknownDirective(other),
                ));
            }
        };
        Ok(directive)
    }
}

impl Iterator for Directives<'_> {
    type Item = Result<Directive>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.scanner.at_end() {
            return None;
        }
        let res = self.next_directive();
        self.failed = res.is_err();
        Some(res)
    }
}

/// `x y w h` with `(x, y)` the center and `w`, `h` the radii; returned as the bounding box.
fn ellipse_bounds(s: &mut Scanner<'_>) -> Result<Rect> {
    let x = s.real("ellipse center x")?;
    let y = s.real("ellipse center y")?;
    let w = s.real("ellipse x radius")?;
    let h = s.real("ellipse y radius")?;
    Ok(rect(x - w, y - h, 2.0 * w, 2.0 * h))
}

fn point_list(s: &mut Scanner<'_>) -> Result<Vec<Point>> {
    let n = s.count("point count")?;
    let mut points = Vec::with_capacity(n.min(1024));
    for _ in 0..n {
        let x = s.real("point x")?;
        let y = s.real("point y")?;
        points.push(point(x, y));
    }
    Ok(points)
}

/// Parses the body of a `c`/`C` directive: a plain color or a `[...]`/`(...)` gradient.
fn parse_color(body: &str, body_at: usize) -> Result<Color> {
    let mut s = Scanner::nested(body, body_at);
    let color = match s.peek() {
        Some(b'[') => {
            s.bump();
            let start = point(s.real("gradient x0")?, s.real("gradient y0")?);
            let end = point(s.real("gradient x1")?, s.real("gradient y1")?);
            let stops = color_stops(&mut s)?;
            close_gradient(&mut s, b']')?;
            Color::Linear(LinearGradient { start, end, stops })
        }
        Some(b'(') => {
            s.bump();
            let start = point(s.real("gradient x0")?, s.real("gradient y0")?);
            let start_radius = s.real("gradient r0")?;
            let end = point(s.real("gradient x1")?, s.real("gradient y1")?);
            let end_radius = s.real("gradient r1")?;
            let stops = color_stops(&mut s)?;
            close_gradient(&mut s, b')')?;
            Color::Radial(RadialGradient {
                start,
                start_radius,
                end,
                end_radius,
                stops,
            })
        }
        Some(b) if b == b'#' || b == b'/' || b.is_ascii_alphanumeric() => {
            Color::Uniform(body.to_string())
        }
        _ => {
            return Err(s.error(Malformed::Expected {
                expected: "color or gradient",
                found: body.to_string(),
            }));
        }
    };
    Ok(color)
}

fn color_stops(s: &mut Scanner<'_>) -> Result<Vec<ColorStop>> {
    let n = s.count("gradient stop count")?;
    let mut stops = Vec::with_capacity(n.min(64));
    for _ in 0..n {
        let fraction = s.real("stop fraction")? as f32;
        let (color, _) = s.string("stop color")?;
        stops.push(ColorStop {
            fraction,
            html_color: color.to_string(),
        });
    }
    Ok(stops)
}

fn close_gradient(s: &mut Scanner<'_>, close: u8) -> Result<()> {
    s.skip_ws();
    if s.peek() == Some(close) {
        s.bump();
    }
    if !s.at_end() {
        return Err(s.error(Malformed::TrailingInput(s.rest().to_string())));
    }
    Ok(())
}

/// Accumulator of the decode fold.
pub(crate) struct DecodeState {
    options: DecodeOptions,
    font: Font,
    font_char: FontChar,
    ops: Vec<DrawingOp>,
}

impl DecodeState {
    pub(crate) fn new(options: DecodeOptions) -> Self {
        Self {
            options,
            font: Font::default(),
            font_char: FontChar::empty(),
            ops: Vec::new(),
        }
    }

    fn convert<T: CoordTransform>(&self, value: T) -> T {
        value.for_coord_system(self.options.coord_system, self.options.max_y)
    }

    pub(crate) fn apply(mut self, directive: Directive) -> Self {
        let op = match directive {
            Directive::Ellipse { filled, bounds } => {
                let bounds = self.convert(bounds);
                if filled {
                    DrawingOp::FilledEllipse(bounds)
                } else {
                    DrawingOp::UnfilledEllipse(bounds)
                }
            }
            Directive::Polygon { filled, points } => {
                let points = self.convert(points);
                if filled {
                    DrawingOp::FilledPolygon(points)
                } else {
                    DrawingOp::UnfilledPolygon(points)
                }
            }
            Directive::Bezier { filled, points } => {
                let points = self.convert(points);
                if filled {
                    DrawingOp::FilledBezier(points)
                } else {
                    DrawingOp::UnfilledBezier(points)
                }
            }
            Directive::PolyLine(points) => DrawingOp::PolyLine(self.convert(points)),
            Directive::Text {
                anchor,
                align,
                width,
                text,
            } => DrawingOp::Text(self.convert(TextInfo {
                anchor,
                align,
                width_estimate: width,
                text,
                font: self.font.clone(),
                font_char: self.font_char,
                coord_system: Default::default(),
            })),
            Directive::Image(image) => DrawingOp::Image(self.convert(image)),
            Directive::FillColor(color) => DrawingOp::FillColor(self.convert(color)),
            Directive::PenColor(color) => DrawingOp::PenColor(self.convert(color)),
            Directive::Style(style) => DrawingOp::Style(style),
            Directive::Font(font) => {
                tracing::trace!(size = font.size, name = %font.name, "active font changed");
                self.font = font;
                return self;
            }
            Directive::FontChar(font_char) => {
                tracing::trace!(bits = font_char.bits(), "active font characteristics changed");
                self.font_char = font_char;
                return self;
            }
        };
        self.ops.push(op);
        self
    }

    pub(crate) fn finish(self) -> Vec<DrawingOp> {
        self.ops
    }
}

/// Decodes an xdot attribute value into drawing operations expressed in
/// `options.coord_system`.
///
/// An empty (or all-whitespace) input yields no operations. Any grammar violation aborts the
/// whole decode with [`crate::Error::MalformedInput`].
pub fn decode(input: &str, options: DecodeOptions) -> Result<Vec<DrawingOp>> {
    let state = Directives::new(input)
        .try_fold(DecodeState::new(options), |state, directive| {
            directive.map(|d| state.apply(d))
        })
        .inspect_err(|err| tracing::debug!(offset = err.offset(), %err, "xdot decode failed"))?;
    let ops = state.finish();
    tracing::debug!(
        ops = ops.len(),
        coord_system = ?options.coord_system,
        "decoded xdot drawing"
    );
    Ok(ops)
}
