use crate::backends::traits::{Interpreter, InterpreterSource};
use crate::backends::tree::DocumentTree;
use crate::backends::write_document;
use crate::convert::ValueKind;
use crate::error::{ParamError, Result};
use serde_json::Value;
use std::path::Path;

/// JSON document backend. Objects are groups, arrays are lists.
pub struct JsonInterpreter {
    name: String,
    tree: DocumentTree,
}

impl JsonInterpreter {
    pub fn from_source(name: &str, source: InterpreterSource<'_>) -> Result<Self> {
        let content = source.read(name)?;
        Self::parse(name, &content)
    }

    pub fn parse(name: &str, content: &str) -> Result<Self> {
        // A blank defaults blob is an empty document
        let root: Value = if content.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(content).map_err(|e| ParamError::BackendInit {
                backend: name.to_string(),
                reason: format!("Failed to parse JSON: {}", e),
            })?
        };

        Ok(Self {
            name: name.to_string(),
            tree: DocumentTree::new(root),
        })
    }
}

impl Interpreter for JsonInterpreter {
    fn backend_name(&self) -> &str {
        &self.name
    }

    fn query(&self, key: &str) -> Option<String> {
        self.tree.query(key)
    }

    fn query_list(&self, key: &str) -> Option<Vec<String>> {
        self.tree.query_list(key)
    }

    fn size(&self, key: &str) -> usize {
        self.tree.size(key)
    }

    fn contains(&self, key: &str) -> bool {
        self.tree.contains(key)
    }

    fn set(&mut self, key: &str, value: &str, kind: ValueKind) -> Result<()> {
        self.tree.set(key, value, kind)
    }

    fn set_list(&mut self, key: &str, values: &[String], kind: ValueKind) -> Result<()> {
        self.tree.set_list(key, values, kind)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.tree.remove(key)
    }

    fn dump(&self, path: &Path) -> Result<()> {
        let mut content = serde_json::to_string_pretty(self.tree.root())?;
        content.push('\n');
        write_document(path, &content)
    }

    fn supports_mutation(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_query() {
        let cfg = JsonInterpreter::parse(
            "json",
            r#"{"Cosmology": {"Hubble": 0.7, "Flags": [true, false]}}"#,
        )
        .unwrap();

        assert_eq!(cfg.query("Cosmology.Hubble").as_deref(), Some("0.7"));
        assert_eq!(cfg.size("Cosmology.Flags"), 2);
        assert_eq!(
            cfg.query_list("Cosmology.Flags"),
            Some(vec!["true".to_string(), "false".to_string()])
        );
    }

    #[test]
    fn test_blank_text_is_empty_document() {
        let cfg = JsonInterpreter::parse("json", "  \n").unwrap();
        assert_eq!(cfg.size("anything"), 0);
    }

    #[test]
    fn test_invalid_json() {
        let err = JsonInterpreter::parse("json", "{\"a\": }").err().expect("must fail");
        assert!(matches!(err, ParamError::BackendInit { .. }));
    }

    #[test]
    fn test_dump_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("params.json");

        let mut cfg = JsonInterpreter::parse("json", "{}").unwrap();
        cfg.set("Run.Name", "test", ValueKind::String).unwrap();
        cfg.set_list("Run.Sizes", &["8".into(), "16".into()], ValueKind::Integer)
            .unwrap();
        cfg.dump(&path).unwrap();

        let reloaded = JsonInterpreter::from_source("json", InterpreterSource::File(&path)).unwrap();
        assert_eq!(reloaded.query("Run.Name").as_deref(), Some("test"));
        assert_eq!(
            reloaded.query_list("Run.Sizes"),
            Some(vec!["8".to_string(), "16".to_string()])
        );
    }
}
