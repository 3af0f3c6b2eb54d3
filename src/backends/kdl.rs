//! Read-only KDL backend.
//!
//! ```kdl
//! stop-time 10.5
//! levels 1 2 4
//! simulation {
//!     name "collapse"
//!     grid size=16
//!     grid size=32
//! }
//! ```
//!
//! - a node with one argument is a scalar, several arguments form a list
//! - child blocks are groups; properties are addressable like children
//!   (`simulation.grid[1].size`)
//! - repeated sibling nodes are indexed with `[i]`

use crate::backends::path::{Segment, parse_path};
use crate::backends::traits::{Interpreter, InterpreterSource};
use crate::error::{ParamError, Result};
use kdl::{KdlDocument, KdlNode, KdlValue};

pub struct KdlInterpreter {
    name: String,
    doc: KdlDocument,
}

enum Resolved<'a> {
    Doc(&'a KdlDocument),
    Node(&'a KdlNode),
    Siblings(Vec<&'a KdlNode>),
    Value(&'a KdlValue),
}

impl KdlInterpreter {
    pub fn from_source(name: &str, source: InterpreterSource<'_>) -> Result<Self> {
        let content = source.read(name)?;
        Self::parse(name, &content)
    }

    pub fn parse(name: &str, content: &str) -> Result<Self> {
        let doc: KdlDocument = content.parse().map_err(|e: kdl::KdlError| {
            ParamError::BackendInit {
                backend: name.to_string(),
                reason: format!("KDL parsing error: {}", e),
            }
        })?;

        Ok(Self {
            name: name.to_string(),
            doc,
        })
    }

    fn resolve(&self, key: &str) -> Option<Resolved<'_>> {
        let segments = parse_path(key).ok()?;
        let mut current = Resolved::Doc(&self.doc);

        for segment in &segments {
            current = match (segment, current) {
                (Segment::Name(name), Resolved::Doc(doc)) => named_nodes(doc, name)?,
                (Segment::Name(name), Resolved::Node(node)) => {
                    match node.children().and_then(|doc| named_nodes(doc, name)) {
                        Some(found) => found,
                        None => Resolved::Value(property(node, name)?),
                    }
                }
                (Segment::Index(index), Resolved::Siblings(nodes)) => {
                    Resolved::Node(nodes.get(*index).copied()?)
                }
                (Segment::Index(index), Resolved::Node(node)) => {
                    Resolved::Value(arguments(node).get(*index).copied()?)
                }
                _ => return None,
            };
        }

        Some(current)
    }
}

fn named_nodes<'a>(doc: &'a KdlDocument, name: &str) -> Option<Resolved<'a>> {
    let mut nodes: Vec<&KdlNode> = doc
        .nodes()
        .iter()
        .filter(|node| node.name().value() == name)
        .collect();

    match nodes.len() {
        0 => None,
        1 => nodes.pop().map(Resolved::Node),
        _ => Some(Resolved::Siblings(nodes)),
    }
}

fn arguments(node: &KdlNode) -> Vec<&KdlValue> {
    node.entries()
        .iter()
        .filter(|entry| entry.name().is_none())
        .map(|entry| entry.value())
        .collect()
}

fn property<'a>(node: &'a KdlNode, name: &str) -> Option<&'a KdlValue> {
    node.entries()
        .iter()
        .find(|entry| entry.name().is_some_and(|n| n.value() == name))
        .map(|entry| entry.value())
}

/// Text form of a KDL value; `null` counts as absent
fn value_text(value: &KdlValue) -> Option<String> {
    if let Some(s) = value.as_string() {
        return Some(s.to_string());
    }
    if let Some(i) = value.as_integer() {
        return Some(i.to_string());
    }
    if let Some(f) = value.as_float() {
        return Some(f.to_string());
    }
    value.as_bool().map(|b| b.to_string())
}

/// A node is a scalar when it carries exactly one argument and no children
fn node_scalar(node: &KdlNode) -> Option<String> {
    if node.children().is_some_and(|c| !c.nodes().is_empty()) {
        return None;
    }
    match arguments(node).as_slice() {
        [value] => value_text(value),
        _ => None,
    }
}

impl Interpreter for KdlInterpreter {
    fn backend_name(&self) -> &str {
        &self.name
    }

    fn query(&self, key: &str) -> Option<String> {
        match self.resolve(key)? {
            Resolved::Value(value) => value_text(value),
            Resolved::Node(node) => node_scalar(node),
            Resolved::Doc(_) | Resolved::Siblings(_) => None,
        }
    }

    fn query_list(&self, key: &str) -> Option<Vec<String>> {
        match self.resolve(key)? {
            Resolved::Value(value) => value_text(value).map(|text| vec![text]),
            Resolved::Node(node) => {
                if node.children().is_some_and(|c| !c.nodes().is_empty()) {
                    return None;
                }
                arguments(node).into_iter().map(value_text).collect()
            }
            Resolved::Siblings(nodes) => nodes.into_iter().map(node_scalar).collect(),
            Resolved::Doc(_) => None,
        }
    }

    fn size(&self, key: &str) -> usize {
        match self.resolve(key) {
            None => 0,
            Some(Resolved::Value(value)) => usize::from(value_text(value).is_some()),
            Some(Resolved::Node(node)) => match node.children() {
                Some(children) if !children.nodes().is_empty() => children.nodes().len(),
                _ => arguments(node).len(),
            },
            Some(Resolved::Siblings(nodes)) => nodes.len(),
            Some(Resolved::Doc(doc)) => doc.nodes().len(),
        }
    }

    fn contains(&self, key: &str) -> bool {
        match self.resolve(key) {
            None => false,
            Some(Resolved::Value(value)) => value_text(value).is_some(),
            Some(_) => true,
        }
    }
}
