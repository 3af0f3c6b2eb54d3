//! Document tree shared by the JSON and YAML backends
//!
//! Both formats are loaded into a `serde_json::Value`: objects act as groups,
//! arrays as lists. `null` is treated the same as a missing key.

use crate::backends::path::{Segment, parse_path};
use crate::convert::ValueKind;
use crate::error::{ParamError, Result};
use serde_json::{Map, Number, Value};

#[derive(Debug, Clone, Default)]
pub struct DocumentTree {
    root: Value,
}

impl DocumentTree {
    pub fn new(root: Value) -> Self {
        let root = if root.is_null() {
            Value::Object(Map::new())
        } else {
            root
        };
        Self { root }
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    fn lookup(&self, key: &str) -> Option<&Value> {
        let segments = parse_path(key).ok()?;
        let mut current = &self.root;

        for segment in &segments {
            current = match (segment, current) {
                (Segment::Name(name), Value::Object(map)) => map.get(name)?,
                (Segment::Index(index), Value::Array(items)) => items.get(*index)?,
                _ => return None,
            };
        }

        (!current.is_null()).then_some(current)
    }

    pub fn query(&self, key: &str) -> Option<String> {
        self.lookup(key).and_then(scalar_text)
    }

    pub fn query_list(&self, key: &str) -> Option<Vec<String>> {
        match self.lookup(key)? {
            Value::Array(items) => items.iter().map(scalar_text).collect(),
            Value::Object(_) => None,
            scalar => scalar_text(scalar).map(|text| vec![text]),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }

    pub fn size(&self, key: &str) -> usize {
        match self.lookup(key) {
            None => 0,
            Some(Value::Array(items)) => items.len(),
            Some(Value::Object(map)) => map.len(),
            Some(_) => 1,
        }
    }

    pub fn set(&mut self, key: &str, value: &str, kind: ValueKind) -> Result<()> {
        let value = typed_value(key, value, kind)?;
        self.replace(key, value)
    }

    pub fn set_list(&mut self, key: &str, values: &[String], kind: ValueKind) -> Result<()> {
        let items = values
            .iter()
            .map(|v| typed_value(key, v, kind))
            .collect::<Result<Vec<_>>>()?;
        self.replace(key, Value::Array(items))
    }

    /// Works on a copy so a failure half way down the path leaves the tree
    /// untouched.
    fn replace(&mut self, key: &str, value: Value) -> Result<()> {
        let segments = parse_path(key)?;
        let mut next = self.root.clone();
        *slot_mut(&mut next, &segments, key)? = value;
        self.root = next;
        Ok(())
    }

    pub fn remove(&mut self, key: &str) -> Result<()> {
        let segments = parse_path(key)?;
        let Some((last, parents)) = segments.split_last() else {
            return Err(not_present(key));
        };

        let mut current = &mut self.root;
        for segment in parents {
            current = match (segment, current) {
                (Segment::Name(name), Value::Object(map)) => {
                    map.get_mut(name).ok_or_else(|| not_present(key))?
                }
                (Segment::Index(index), Value::Array(items)) => {
                    items.get_mut(*index).ok_or_else(|| not_present(key))?
                }
                _ => return Err(not_present(key)),
            };
        }

        let removed = match (last, current) {
            (Segment::Name(name), Value::Object(map)) => map.remove(name).is_some(),
            (Segment::Index(index), Value::Array(items)) if *index < items.len() => {
                items.remove(*index);
                true
            }
            _ => false,
        };

        if removed { Ok(()) } else { Err(not_present(key)) }
    }
}

fn slot_mut<'a>(current: &'a mut Value, segments: &[Segment], key: &str) -> Result<&'a mut Value> {
    let Some((first, rest)) = segments.split_first() else {
        return Ok(current);
    };

    if current.is_null() {
        *current = match first {
            Segment::Name(_) => Value::Object(Map::new()),
            Segment::Index(_) => Value::Array(Vec::new()),
        };
    }

    let next = match (first, current) {
        (Segment::Name(name), Value::Object(map)) => {
            map.entry(name.clone()).or_insert(Value::Null)
        }
        (Segment::Index(index), Value::Array(items)) => {
            if *index == items.len() {
                items.push(Value::Null);
            }
            let len = items.len();
            items.get_mut(*index).ok_or_else(|| ParamError::InvalidKey {
                key: key.to_string(),
                reason: format!("index {} is out of range for a list of {}", index, len),
            })?
        }
        (segment, _) => {
            return Err(ParamError::InvalidKey {
                key: key.to_string(),
                reason: format!("'{}' does not address a group or list", segment),
            });
        }
    };

    slot_mut(next, rest, key)
}

fn not_present(key: &str) -> ParamError {
    ParamError::InvalidKey {
        key: key.to_string(),
        reason: "no such parameter".to_string(),
    }
}

/// Text of a scalar node; aggregates and `null` have none
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn typed_value(key: &str, text: &str, kind: ValueKind) -> Result<Value> {
    let rejected = |what: &str| ParamError::InvalidKey {
        key: key.to_string(),
        reason: format!("'{}' is not a valid {}", text, what),
    };

    match kind {
        ValueKind::String => Ok(Value::String(text.to_string())),
        ValueKind::Boolean => crate::convert::parse::<bool>(text)
            .map(Value::Bool)
            .map_err(|_| rejected("boolean")),
        ValueKind::Integer => {
            let text = text.trim();
            if let Ok(i) = text.parse::<i64>() {
                Ok(Value::Number(i.into()))
            } else if let Ok(u) = text.parse::<u64>() {
                Ok(Value::Number(u.into()))
            } else {
                Err(rejected("integer"))
            }
        }
        ValueKind::Float => text
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .ok_or_else(|| rejected("finite float")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tree() -> DocumentTree {
        DocumentTree::new(json!({
            "Simulation": {
                "StopTime": 10.5,
                "Name": "collapse",
                "Levels": [1, 2, 4],
                "Grids": [{"Size": 16}, {"Size": 32}],
                "Unset": null
            },
            "Debug": true
        }))
    }

    #[test]
    fn test_query_scalars() {
        let tree = tree();
        assert_eq!(tree.query("Simulation.StopTime").as_deref(), Some("10.5"));
        assert_eq!(tree.query("Simulation.Name").as_deref(), Some("collapse"));
        assert_eq!(tree.query("Debug").as_deref(), Some("true"));
        assert_eq!(tree.query("Simulation.Grids[1].Size").as_deref(), Some("32"));
        assert_eq!(tree.query("Simulation.Levels[2]").as_deref(), Some("4"));
    }

    #[test]
    fn test_query_aggregates_and_null_are_absent() {
        let tree = tree();
        assert_eq!(tree.query("Simulation"), None);
        assert_eq!(tree.query("Simulation.Levels"), None);
        assert_eq!(tree.query("Simulation.Unset"), None);
        assert_eq!(tree.query("Missing.Key"), None);
        assert_eq!(tree.query("bad..key"), None);
    }

    #[test]
    fn test_query_list() {
        let tree = tree();
        assert_eq!(
            tree.query_list("Simulation.Levels"),
            Some(vec!["1".to_string(), "2".to_string(), "4".to_string()])
        );
        assert_eq!(tree.query_list("Debug"), Some(vec!["true".to_string()]));
        assert_eq!(tree.query_list("Simulation.Grids"), None);
        assert_eq!(tree.query_list("Simulation"), None);
    }

    #[test]
    fn test_size() {
        let tree = tree();
        assert_eq!(tree.size("Simulation.Levels"), 3);
        assert_eq!(tree.size("Simulation.Name"), 1);
        assert_eq!(tree.size("Simulation.Unset"), 0);
        assert_eq!(tree.size("Nope"), 0);
        assert_eq!(tree.size("Simulation"), 5);
    }

    #[test]
    fn test_set_creates_groups() {
        let mut tree = tree();
        tree.set("Output.Dir.Name", "run1", ValueKind::String).unwrap();
        tree.set("Output.Cycle", "12", ValueKind::Integer).unwrap();
        assert_eq!(tree.query("Output.Dir.Name").as_deref(), Some("run1"));
        assert_eq!(tree.root()["Output"]["Cycle"], json!(12));
    }

    #[test]
    fn test_set_append_index() {
        let mut tree = tree();
        tree.set("Simulation.Levels[3]", "8", ValueKind::Integer).unwrap();
        assert_eq!(tree.size("Simulation.Levels"), 4);
        assert!(tree.set("Simulation.Levels[9]", "8", ValueKind::Integer).is_err());
    }

    #[test]
    fn test_failed_set_leaves_tree_untouched() {
        let mut tree = tree();
        let before = tree.root().clone();
        assert!(tree.set("New.Group[3]", "1", ValueKind::Integer).is_err());
        assert!(tree.set("Debug.Child", "1", ValueKind::Integer).is_err());
        assert!(tree.set_list("Arr", &["1".into(), "x".into()], ValueKind::Integer).is_err());
        assert_eq!(tree.root(), &before);
    }

    #[test]
    fn test_remove() {
        let mut tree = tree();
        tree.remove("Simulation.Name").unwrap();
        tree.remove("Simulation.Levels[0]").unwrap();
        assert_eq!(tree.query("Simulation.Name"), None);
        assert_eq!(tree.size("Simulation.Levels"), 2);
        assert!(tree.remove("Simulation.Name").is_err());
        assert!(tree.remove("Simulation.Levels[5]").is_err());
    }
}
