use crate::convert::ValueKind;
use crate::error::{ParamError, Result};
use std::fs;
use std::path::Path;

/// Where a backend reads its parameters from
#[derive(Debug, Clone, Copy)]
pub enum InterpreterSource<'a> {
    /// Path to a parameter file
    File(&'a Path),
    /// Literal document text (used for the defaults blob)
    Text(&'a str),
}

impl<'a> InterpreterSource<'a> {
    /// Build a source from the `(source, from_text)` pair used by the
    /// registration surface
    pub fn new(source: &'a str, from_text: bool) -> Self {
        if from_text {
            InterpreterSource::Text(source)
        } else {
            InterpreterSource::File(Path::new(source))
        }
    }

    /// Load the document text, reading the file when needed
    pub fn read(&self, backend: &str) -> Result<String> {
        match self {
            InterpreterSource::Text(text) => Ok((*text).to_string()),
            InterpreterSource::File(path) => {
                fs::read_to_string(path).map_err(|e| ParamError::BackendInit {
                    backend: backend.to_string(),
                    reason: format!("failed to read '{}': {}", path.display(), e),
                })
            }
        }
    }
}

/// A parameter file parser.
///
/// Lookups never fail for a missing key: absence is reported as `None` (or
/// `0` for [`size`](Interpreter::size)). Mutation and dump are optional; the
/// default implementations report [`ParamError::Unsupported`] so a read-only
/// backend never silently drops a write.
pub trait Interpreter: Send {
    /// Name the backend was registered under
    fn backend_name(&self) -> &str;

    fn query(&self, key: &str) -> Option<String>;

    fn query_list(&self, key: &str) -> Option<Vec<String>>;

    /// Number of elements addressable under `key`: 0 when absent, 1 for a
    /// scalar, N for lists and groups
    fn size(&self, key: &str) -> usize;

    /// Whether `key` names anything at all, whatever its shape. An empty
    /// list or group still counts.
    fn contains(&self, key: &str) -> bool {
        self.size(key) > 0 || self.query_list(key).is_some()
    }

    fn set(&mut self, _key: &str, _value: &str, _kind: ValueKind) -> Result<()> {
        Err(self.unsupported("setting values"))
    }

    /// Replace `key` with the given elements. Either every element is
    /// stored or the backend is left untouched.
    fn set_list(&mut self, _key: &str, _values: &[String], _kind: ValueKind) -> Result<()> {
        Err(self.unsupported("setting lists"))
    }

    fn remove(&mut self, _key: &str) -> Result<()> {
        Err(self.unsupported("removing values"))
    }

    fn dump(&self, _path: &Path) -> Result<()> {
        Err(self.unsupported("dumping to a file"))
    }

    fn supports_mutation(&self) -> bool {
        false
    }

    fn unsupported(&self, capability: &'static str) -> ParamError {
        ParamError::Unsupported {
            backend: self.backend_name().to_string(),
            capability,
        }
    }
}
