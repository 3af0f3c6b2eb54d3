//! libconfig structured-text backend.
//!
//! This is the backend behind [`DEFAULTS_INTERPRETER`](super::DEFAULTS_INTERPRETER),
//! so it must parse the in-memory defaults blob as well as parameter files.
//!
//! ```text
//! # comment
//! StopTime = 10.0;
//! Levels   = [1, 2, 4];
//! Simulation :
//! {
//!   Name  = "collapse";
//!   Grids = ( { Size = 16; }, { Size = 32; } );
//! };
//! ```

mod syntax;
mod writer;

pub use syntax::SyntaxError;

use crate::backends::path::{Segment, parse_path};
use crate::backends::traits::{Interpreter, InterpreterSource};
use crate::backends::write_document;
use crate::convert::{self, ValueKind};
use crate::error::{ParamError, Result};
use chrono::Utc;
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub struct Scalar {
    pub kind: ValueKind,
    pub text: String,
}

impl Scalar {
    /// Validate `text` against `kind` and normalize it the way the lexer
    /// would have
    fn from_text(key: &str, text: &str, kind: ValueKind) -> Result<Self> {
        let rejected = |what: &str| ParamError::InvalidKey {
            key: key.to_string(),
            reason: format!("'{}' is not a valid {}", text, what),
        };

        let text = match kind {
            ValueKind::String => text.to_string(),
            ValueKind::Integer => convert::parse::<i64>(text)
                .map_err(|_| rejected("64-bit integer"))?
                .to_string(),
            ValueKind::Float => {
                let value = convert::parse::<f64>(text).map_err(|_| rejected("float"))?;
                if !value.is_finite() {
                    return Err(rejected("finite float"));
                }
                text.trim().to_string()
            }
            ValueKind::Boolean => convert::parse::<bool>(text)
                .map_err(|_| rejected("boolean"))?
                .to_string(),
        };

        Ok(Self { kind, text })
    }
}

/// Ordered `name -> setting` pairs
pub type Group = Vec<(String, Setting)>;

#[derive(Debug, Clone, PartialEq)]
pub enum Setting {
    Scalar(Scalar),
    /// `[ ... ]`: scalars of a single kind
    Array(Vec<Scalar>),
    /// `( ... )`: any settings, including groups
    List(Vec<Setting>),
    Group(Group),
}

#[derive(Clone, Copy)]
enum Found<'a> {
    Setting(&'a Setting),
    Element(&'a Scalar),
}

impl<'a> Found<'a> {
    fn scalar(self) -> Option<&'a Scalar> {
        match self {
            Found::Setting(Setting::Scalar(scalar)) => Some(scalar),
            Found::Element(scalar) => Some(scalar),
            Found::Setting(_) => None,
        }
    }
}

pub struct LibconfigInterpreter {
    name: String,
    root: Setting,
}

impl LibconfigInterpreter {
    pub fn from_source(name: &str, source: InterpreterSource<'_>) -> Result<Self> {
        let content = source.read(name)?;
        Self::parse(name, &content)
    }

    pub fn parse(name: &str, content: &str) -> Result<Self> {
        let group = syntax::parse_document(content).map_err(|e| ParamError::BackendInit {
            backend: name.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            name: name.to_string(),
            root: Setting::Group(group),
        })
    }

    /// Current document as libconfig text
    pub fn render(&self) -> String {
        match &self.root {
            Setting::Group(group) => writer::render_document(group),
            _ => String::new(),
        }
    }

    fn lookup(&self, key: &str) -> Option<Found<'_>> {
        let segments = parse_path(key).ok()?;
        let mut current = &self.root;

        for (i, segment) in segments.iter().enumerate() {
            current = match (segment, current) {
                (Segment::Name(name), Setting::Group(group)) => {
                    group.iter().find(|(n, _)| n == name).map(|(_, s)| s)?
                }
                (Segment::Index(index), Setting::List(items)) => items.get(*index)?,
                (Segment::Index(index), Setting::Array(items)) => {
                    // Array elements are leaves
                    return if i + 1 == segments.len() {
                        items.get(*index).map(Found::Element)
                    } else {
                        None
                    };
                }
                _ => return None,
            };
        }

        Some(Found::Setting(current))
    }

    fn replace(&mut self, key: &str, value: Setting) -> Result<()> {
        let segments = parse_path(key)?;
        let mut next = self.root.clone();
        assign(&mut next, &segments, value, key)?;
        self.root = next;
        Ok(())
    }
}

fn assign(current: &mut Setting, segments: &[Segment], value: Setting, key: &str) -> Result<()> {
    match (segments, current) {
        ([], current) => {
            *current = value;
            Ok(())
        }
        ([Segment::Index(index)], Setting::Array(items)) => {
            let Setting::Scalar(scalar) = value else {
                return Err(invalid(key, "array elements must be scalars"));
            };
            if items
                .iter()
                .enumerate()
                .any(|(i, other)| i != *index && other.kind != scalar.kind)
            {
                return Err(invalid(key, "array elements must all have the same type"));
            }
            match *index {
                i if i < items.len() => items[i] = scalar,
                i if i == items.len() => items.push(scalar),
                i => {
                    return Err(invalid(
                        key,
                        &format!("index {} is out of range for an array of {}", i, items.len()),
                    ));
                }
            }
            Ok(())
        }
        ([first, rest @ ..], current) => {
            let child = child_mut(current, first, key)?;
            assign(child, rest, value, key)
        }
    }
}

/// Step into `segment`, creating a group when a name is missing
fn child_mut<'a>(current: &'a mut Setting, segment: &Segment, key: &str) -> Result<&'a mut Setting> {
    match (segment, current) {
        (Segment::Name(name), Setting::Group(group)) => {
            let pos = match group.iter().position(|(n, _)| n == name) {
                Some(pos) => pos,
                None => {
                    group.push((name.clone(), Setting::Group(Group::new())));
                    group.len() - 1
                }
            };
            Ok(&mut group[pos].1)
        }
        (Segment::Index(index), Setting::List(items)) => {
            let len = items.len();
            if *index == len {
                items.push(Setting::Group(Group::new()));
            }
            items.get_mut(*index).ok_or_else(|| {
                invalid(key, &format!("index {} is out of range for a list of {}", index, len))
            })
        }
        (segment, _) => Err(invalid(
            key,
            &format!("'{}' does not address a group or list", segment),
        )),
    }
}

fn invalid(key: &str, reason: &str) -> ParamError {
    ParamError::InvalidKey {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

impl Interpreter for LibconfigInterpreter {
    fn backend_name(&self) -> &str {
        &self.name
    }

    fn query(&self, key: &str) -> Option<String> {
        self.lookup(key)?.scalar().map(|scalar| scalar.text.clone())
    }

    fn query_list(&self, key: &str) -> Option<Vec<String>> {
        let found = self.lookup(key)?;
        if let Some(scalar) = found.scalar() {
            return Some(vec![scalar.text.clone()]);
        }

        match found {
            Found::Setting(Setting::Array(items)) => {
                Some(items.iter().map(|s| s.text.clone()).collect())
            }
            Found::Setting(Setting::List(items)) => items
                .iter()
                .map(|item| match item {
                    Setting::Scalar(scalar) => Some(scalar.text.clone()),
                    _ => None,
                })
                .collect(),
            _ => None,
        }
    }

    fn size(&self, key: &str) -> usize {
        match self.lookup(key) {
            None => 0,
            Some(Found::Element(_)) | Some(Found::Setting(Setting::Scalar(_))) => 1,
            Some(Found::Setting(Setting::Array(items))) => items.len(),
            Some(Found::Setting(Setting::List(items))) => items.len(),
            Some(Found::Setting(Setting::Group(group))) => group.len(),
        }
    }

    fn contains(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }

    fn set(&mut self, key: &str, value: &str, kind: ValueKind) -> Result<()> {
        let scalar = Scalar::from_text(key, value, kind)?;
        self.replace(key, Setting::Scalar(scalar))
    }

    fn set_list(&mut self, key: &str, values: &[String], kind: ValueKind) -> Result<()> {
        let items = values
            .iter()
            .map(|v| Scalar::from_text(key, v, kind))
            .collect::<Result<Vec<_>>>()?;
        self.replace(key, Setting::Array(items))
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let segments = parse_path(key)?;
        let Some((last, parents)) = segments.split_last() else {
            return Err(invalid(key, "no such parameter"));
        };

        let mut current = &mut self.root;
        for segment in parents {
            current = match (segment, current) {
                (Segment::Name(name), Setting::Group(group)) => group
                    .iter_mut()
                    .find(|(n, _)| n == name)
                    .map(|(_, s)| s)
                    .ok_or_else(|| invalid(key, "no such parameter"))?,
                (Segment::Index(index), Setting::List(items)) => items
                    .get_mut(*index)
                    .ok_or_else(|| invalid(key, "no such parameter"))?,
                _ => return Err(invalid(key, "no such parameter")),
            };
        }

        let removed = match (last, current) {
            (Segment::Name(name), Setting::Group(group)) => {
                match group.iter().position(|(n, _)| n == name) {
                    Some(pos) => {
                        group.remove(pos);
                        true
                    }
                    None => false,
                }
            }
            (Segment::Index(index), Setting::List(items)) if *index < items.len() => {
                items.remove(*index);
                true
            }
            (Segment::Index(index), Setting::Array(items)) if *index < items.len() => {
                items.remove(*index);
                true
            }
            _ => false,
        };

        if removed {
            Ok(())
        } else {
            Err(invalid(key, "no such parameter"))
        }
    }

    fn dump(&self, path: &Path) -> Result<()> {
        let content = format!(
            "# Parameters written by {} on {}\n\n{}",
            crate::project_identity::BINARY_NAME,
            Utc::now().to_rfc3339(),
            self.render()
        );
        write_document(path, &content)
    }

    fn supports_mutation(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests;
