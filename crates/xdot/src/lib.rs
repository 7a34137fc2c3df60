#![forbid(unsafe_code)]

//! `xdot` reads the output of Graphviz's `-Txdot` renderer.
//!
//! The drawing language itself is decoded by [`xdot_core`] (re-exported here). On top of it this
//! crate knows which attributes carry what: the graph bounding box that anchors coordinate
//! conversion, node positions and sizes, record field rectangles and edge splines.
//!
//! ```
//! use xdot::{Attributes, DrawingAttribute, DrawingOptions, LayoutReader};
//!
//! let mut graph = Attributes::default();
//! graph.insert("bb".to_string(), "0,0,54,36".to_string());
//! let mut node = Attributes::default();
//! node.insert("pos".to_string(), "27,18".to_string());
//! node.insert("_draw_".to_string(), "c 7 -#000000 e 27 18 27 18 ".to_string());
//!
//! let reader = LayoutReader::from_graph(&graph, DrawingOptions::top_left())?;
//! let ops = reader.drawing(&node, DrawingAttribute::Draw)?;
//! assert_eq!(ops.len(), 2);
//! assert_eq!(reader.node_position(&node)?, Some(xdot::geom::point(27.0, 18.0)));
//! # Ok::<(), xdot::Error>(())
//! ```

pub mod attributes;
pub mod layout;

pub use attributes::{AttributeSource, Attributes, DrawingAttribute, UnknownDrawingAttribute};
pub use layout::{DrawingOptions, LayoutReader, POINTS_PER_INCH, Spline};
pub use xdot_core::*;
