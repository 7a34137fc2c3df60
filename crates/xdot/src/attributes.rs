use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;
use std::str::FromStr;

/// Owned attribute map of one graph object.
pub type Attributes = FxHashMap<String, String>;

/// Read access to the string attributes of a graph, node or edge.
///
/// An empty value is reported as absent; Graphviz writes `""` for attributes that were declared
/// but never set on the object.
pub trait AttributeSource {
    fn attribute(&self, name: &str) -> Option<&str>;
}

impl<S: BuildHasher> AttributeSource for HashMap<String, String, S> {
    fn attribute(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str).filter(|v| !v.is_empty())
    }
}

impl AttributeSource for BTreeMap<String, String> {
    fn attribute(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str).filter(|v| !v.is_empty())
    }
}

impl<T: AttributeSource + ?Sized> AttributeSource for &T {
    fn attribute(&self, name: &str) -> Option<&str> {
        (**self).attribute(name)
    }
}

/// The xdot drawing attributes Graphviz attaches to graph objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DrawingAttribute {
    /// Shape of a node, spline of an edge, background of a graph or cluster.
    #[serde(rename = "_draw_")]
    Draw,
    #[serde(rename = "_ldraw_")]
    LabelDraw,
    #[serde(rename = "_hdraw_")]
    HeadArrowDraw,
    #[serde(rename = "_tdraw_")]
    TailArrowDraw,
    #[serde(rename = "_hldraw_")]
    HeadLabelDraw,
    #[serde(rename = "_tldraw_")]
    TailLabelDraw,
}

impl DrawingAttribute {
    pub const ALL: [Self; 6] = [
        Self::Draw,
        Self::LabelDraw,
        Self::HeadArrowDraw,
        Self::TailArrowDraw,
        Self::HeadLabelDraw,
        Self::TailLabelDraw,
    ];

    /// Attribute name as written by Graphviz.
    pub fn name(self) -> &'static str {
        match self {
            Self::Draw => "_draw_",
            Self::LabelDraw => "_ldraw_",
            Self::HeadArrowDraw => "_hdraw_",
            Self::TailArrowDraw => "_tdraw_",
            Self::HeadLabelDraw => "_hldraw_",
            Self::TailLabelDraw => "_tldraw_",
        }
    }
}

impl std::fmt::Display for DrawingAttribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown drawing attribute `{0}`")]
pub struct UnknownDrawingAttribute(pub String);

impl FromStr for DrawingAttribute {
    type Err = UnknownDrawingAttribute;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|attr| attr.name() == s)
            .ok_or_else(|| UnknownDrawingAttribute(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_from_str() {
        for attr in DrawingAttribute::ALL {
            assert_eq!(attr.name().parse::<DrawingAttribute>(), Ok(attr));
        }
        assert_eq!(
            "_xdraw_".parse::<DrawingAttribute>(),
            Err(UnknownDrawingAttribute("_xdraw_".to_string()))
        );
    }

    #[test]
    fn empty_values_are_absent() {
        let mut attrs = Attributes::default();
        attrs.insert("label".to_string(), String::new());
        attrs.insert("pos".to_string(), "27,18".to_string());
        assert_eq!(attrs.attribute("label"), None);
        assert_eq!(attrs.attribute("pos"), Some("27,18"));
        assert_eq!(attrs.attribute("rects"), None);

        let sorted: BTreeMap<String, String> = attrs.clone().into_iter().collect();
        assert_eq!((&sorted).attribute("pos"), Some("27,18"));
    }
}
