//! # Interpreter Registry
//!
//! Maps a backend name to a factory that builds an [`Interpreter`] from an
//! [`InterpreterSource`]. The configuration facade only ever sees names, so
//! new formats can be added without touching it.
//!
//! ## Adding a New Backend
//!
//! 1. Implement [`Interpreter`] for the new parser
//! 2. Register it in `BackendRegistry::register_defaults()`, or call
//!    [`register_interpreter`] during startup before any
//!    `Configuration::initialize`
//!
//! ```no_run
//! # use paramctl::backends::registry::register_interpreter;
//! # use paramctl::backends::json::JsonInterpreter;
//! register_interpreter("my_json", |source| {
//!     Ok(Box::new(JsonInterpreter::from_source("my_json", source)?))
//! })?;
//! # Ok::<(), paramctl::error::ParamError>(())
//! ```

use crate::backends::json::JsonInterpreter;
use crate::backends::kdl::KdlInterpreter;
use crate::backends::libconfig::LibconfigInterpreter;
use crate::backends::traits::{Interpreter, InterpreterSource};
use crate::backends::yaml::YamlInterpreter;
use crate::error::{ParamError, Result};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, RwLock};

/// Name of the backend used to parse the in-memory defaults blob
pub const DEFAULTS_INTERPRETER: &str = "enzo2_libconfig";

/// Factory function for creating interpreter instances
pub type InterpreterFactory =
    Box<dyn Fn(InterpreterSource<'_>) -> Result<Box<dyn Interpreter>> + Send + Sync>;

pub struct BackendRegistry {
    factories: HashMap<String, InterpreterFactory>,
}

impl BackendRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register a backend with its factory function. Registering an
    /// existing name replaces the earlier factory.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(InterpreterSource<'_>) -> Result<Box<dyn Interpreter>> + Send + Sync + 'static,
    {
        self.factories.insert(name.into(), Box::new(factory));
    }

    /// Create an interpreter for the given backend name
    pub fn create(&self, name: &str, source: InterpreterSource<'_>) -> Result<Box<dyn Interpreter>> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| ParamError::UnknownBackend {
                name: name.to_string(),
                available: self.registered_backends().join(", "),
            })?;

        factory(source)
    }

    /// Get all registered backend names, sorted
    pub fn registered_backends(&self) -> Vec<String> {
        let mut names: Vec<String> = self.factories.keys().cloned().collect();
        names.sort();
        names
    }

    /// Check if a backend is registered
    pub fn has_backend(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Register all built-in backends
    pub fn register_defaults(&mut self) {
        for name in [DEFAULTS_INTERPRETER, "libconfig"] {
            self.register(name, move |source| {
                Ok(Box::new(LibconfigInterpreter::from_source(name, source)?))
            });
        }

        self.register("json", |source| {
            Ok(Box::new(JsonInterpreter::from_source("json", source)?))
        });

        self.register("yaml", |source| {
            Ok(Box::new(YamlInterpreter::from_source("yaml", source)?))
        });

        self.register("kdl", |source| {
            Ok(Box::new(KdlInterpreter::from_source("kdl", source)?))
        });
    }
}

impl Default for BackendRegistry {
    fn default() -> Self {
        let mut registry = Self::new();
        registry.register_defaults();
        registry
    }
}

static REGISTRY: OnceLock<Arc<RwLock<BackendRegistry>>> = OnceLock::new();

/// Get the global backend registry
pub fn get_registry() -> Arc<RwLock<BackendRegistry>> {
    REGISTRY
        .get_or_init(|| Arc::new(RwLock::new(BackendRegistry::default())))
        .clone()
}

/// Register a backend in the global registry
pub fn register_interpreter<F>(name: impl Into<String>, factory: F) -> Result<()>
where
    F: Fn(InterpreterSource<'_>) -> Result<Box<dyn Interpreter>> + Send + Sync + 'static,
{
    let registry = get_registry();
    let mut guard = registry
        .write()
        .map_err(|e| ParamError::Other(format!("Registry lock failed: {}", e)))?;

    guard.register(name, factory);
    Ok(())
}

/// Create an interpreter using the global registry
pub fn create_interpreter(name: &str, source: InterpreterSource<'_>) -> Result<Box<dyn Interpreter>> {
    let registry = get_registry();
    let guard = registry
        .read()
        .map_err(|e| ParamError::Other(format!("Registry lock failed: {}", e)))?;

    guard.create(name, source)
}

/// Names registered in the global registry
pub fn registered_backends() -> Result<Vec<String>> {
    let registry = get_registry();
    let guard = registry
        .read()
        .map_err(|e| ParamError::Other(format!("Registry lock failed: {}", e)))?;

    Ok(guard.registered_backends())
}

#[cfg(test)]
mod tests;
