use crate::backends::traits::{Interpreter, InterpreterSource};
use crate::backends::tree::DocumentTree;
use crate::backends::write_document;
use crate::convert::ValueKind;
use crate::error::{ParamError, Result};
use serde_json::Value;
use std::path::Path;

/// YAML document backend, loaded into the same tree as the JSON backend
pub struct YamlInterpreter {
    name: String,
    tree: DocumentTree,
}

impl YamlInterpreter {
    pub fn from_source(name: &str, source: InterpreterSource<'_>) -> Result<Self> {
        let content = source.read(name)?;
        Self::parse(name, &content)
    }

    pub fn parse(name: &str, content: &str) -> Result<Self> {
        let root: Value = if content.trim().is_empty() {
            Value::Null
        } else {
            serde_yml::from_str(content).map_err(|e| ParamError::BackendInit {
                backend: name.to_string(),
                reason: format!("Failed to parse YAML: {}", e),
            })?
        };

        if !matches!(root, Value::Object(_) | Value::Null) {
            return Err(ParamError::BackendInit {
                backend: name.to_string(),
                reason: "top level of a YAML parameter file must be a mapping".to_string(),
            });
        }

        Ok(Self {
            name: name.to_string(),
            tree: DocumentTree::new(root),
        })
    }
}

impl Interpreter for YamlInterpreter {
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
        let content = serde_yml::to_string(self.tree.root())?;
        write_document(path, &content)
    }

    fn supports_mutation(&self) -> bool {
        true
    }
}
