//! # Configuration facade
//!
//! Owns one primary backend (built from a parameter file by name through the
//! [registry](crate::backends::registry)) and one defaults backend (always
//! [`DEFAULTS_INTERPRETER`], built from an in-memory text blob).
//!
//! ## Resolution policy
//!
//! Reads ask the primary backend first. Only a definite miss there sends the
//! lookup to the defaults backend; a conversion failure never does. A miss in
//! both is the only way to get [`ParamError::ParameterNotFound`].
//!
//! Writes, removals, `size` and `dump` only ever touch the primary backend.
//!
//! ```no_run
//! use paramctl::Configuration;
//!
//! let mut config = Configuration::new();
//! config.initialize("enzo2_libconfig", "run.cfg", "StopTime = 1.0;\nLevels = [1, 2];")?;
//!
//! let stop: f64 = config.get_scalar("StopTime")?;
//! let level_size: i32 = config.get_scalar(format_args!("Levels[{}]", 1))?;
//! # Ok::<(), paramctl::ParamError>(())
//! ```

use crate::backends::registry::{BackendRegistry, DEFAULTS_INTERPRETER, get_registry};
use crate::backends::{Interpreter, InterpreterSource};
use crate::convert::{self, Formattable, Parsable};
use crate::error::{ParamError, Result};
use crate::key::ParamKey;
use crate::ui;
use std::path::Path;

const LIST_SHAPE: &str = "a list of scalars";

struct Backends {
    primary: Box<dyn Interpreter>,
    defaults: Box<dyn Interpreter>,
}

/// Typed parameter access over a primary backend with a defaults fallback
#[derive(Default)]
pub struct Configuration {
    backends: Option<Backends>,
}

/// Which backend answered a lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Primary,
    Defaults,
}

impl Origin {
    pub fn as_str(&self) -> &'static str {
        match self {
            Origin::Primary => "primary",
            Origin::Defaults => "defaults",
        }
    }
}

impl Configuration {
    pub fn new() -> Self {
        Self { backends: None }
    }

    /// Load `source` with the backend registered as `backend_name` and the
    /// defaults blob with the built-in defaults backend, using the global
    /// registry.
    pub fn initialize(
        &mut self,
        backend_name: &str,
        source: impl AsRef<Path>,
        defaults_text: &str,
    ) -> Result<()> {
        let registry = get_registry();
        let guard = registry
            .read()
            .map_err(|e| ParamError::Other(format!("Registry lock failed: {}", e)))?;

        self.initialize_with(&guard, backend_name, source, defaults_text)
    }

    /// Same as [`initialize`](Self::initialize) against an explicit registry.
    ///
    /// Any previous backends are dropped first, so on failure the
    /// configuration is left uninitialized rather than half replaced.
    pub fn initialize_with(
        &mut self,
        registry: &BackendRegistry,
        backend_name: &str,
        source: impl AsRef<Path>,
        defaults_text: &str,
    ) -> Result<()> {
        self.backends = None;

        let source = source.as_ref();
        let primary = registry.create(backend_name, InterpreterSource::File(source))?;
        let defaults = registry.create(DEFAULTS_INTERPRETER, InterpreterSource::Text(defaults_text))?;

        ui::verbose(&format!(
            "Loaded parameters from '{}' with backend '{}'",
            source.display(),
            backend_name
        ));

        self.backends = Some(Backends { primary, defaults });
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.backends.is_some()
    }

    /// Name of the primary backend, if initialized
    pub fn backend_name(&self) -> Option<&str> {
        self.backends.as_ref().map(|b| b.primary.backend_name())
    }

    fn backends(&self) -> Result<&Backends> {
        self.backends.as_ref().ok_or(ParamError::NotInitialized)
    }

    fn backends_mut(&mut self) -> Result<&mut Backends> {
        self.backends.as_mut().ok_or(ParamError::NotInitialized)
    }

    /// Two-tier lookup shared by the scalar and array accessors.
    ///
    /// A key the primary backend holds in another shape (a group where a
    /// scalar was asked for, say) is an error; it never falls through to the
    /// defaults.
    fn resolve<T>(
        &self,
        key: &str,
        expected: &'static str,
        lookup: impl Fn(&dyn Interpreter, &str) -> Option<T>,
    ) -> Result<(T, Origin)> {
        let backends = self.backends()?;

        if let Some(found) = lookup(&*backends.primary, key) {
            return Ok((found, Origin::Primary));
        }
        if backends.primary.contains(key) {
            return Err(shape_error(key, "parameter file", expected));
        }

        ui::verbose(&format!(
            "Did not find <{}> in parameter file, trying defaults.",
            key
        ));

        if let Some(found) = lookup(&*backends.defaults, key) {
            return Ok((found, Origin::Defaults));
        }
        if backends.defaults.contains(key) {
            return Err(shape_error(key, "defaults", expected));
        }

        ui::verbose(&format!("Did not find <{}> in defaults either.", key));
        Err(ParamError::ParameterNotFound {
            key: key.to_string(),
        })
    }

    /// Which backend holds `key` in any shape, or `None` when neither does
    pub fn origin(&self, key: impl Into<ParamKey>) -> Result<Option<Origin>> {
        let key = key.into();
        let backends = self.backends()?;

        if backends.primary.contains(key.as_str()) {
            Ok(Some(Origin::Primary))
        } else if backends.defaults.contains(key.as_str()) {
            Ok(Some(Origin::Defaults))
        } else {
            Ok(None)
        }
    }

    /// True when either backend has `key`
    pub fn contains(&self, key: impl Into<ParamKey>) -> Result<bool> {
        Ok(self.origin(key)?.is_some())
    }

    pub fn get_scalar<T: Parsable>(&self, key: impl Into<ParamKey>) -> Result<T> {
        self.get_scalar_with_origin(key).map(|(value, _)| value)
    }

    /// [`get_scalar`](Self::get_scalar) plus the backend that answered
    pub fn get_scalar_with_origin<T: Parsable>(
        &self,
        key: impl Into<ParamKey>,
    ) -> Result<(T, Origin)> {
        let key = key.into();
        let (text, origin) = self.resolve(key.as_str(), "a scalar", |b, k| b.query(k))?;

        let value = convert::parse::<T>(&text).map_err(|source| ParamError::Conversion {
            key: key.into_string(),
            source,
        })?;
        Ok((value, origin))
    }

    /// Like [`get_scalar`](Self::get_scalar), but `default` stands in when
    /// neither backend has the key. Conversion errors are still reported.
    pub fn get_scalar_or<T: Parsable>(&self, default: T, key: impl Into<ParamKey>) -> Result<T> {
        match self.get_scalar(key) {
            Err(ParamError::ParameterNotFound { .. }) => Ok(default),
            other => other,
        }
    }

    pub fn set_scalar<T: Formattable + ?Sized>(
        &mut self,
        value: &T,
        key: impl Into<ParamKey>,
    ) -> Result<()> {
        let key = key.into();
        let text = convert::format(value);

        self.backends_mut()?
            .primary
            .set(key.as_str(), &text, T::KIND)
            .map_err(|e| write_error(&key, e))
    }

    pub fn get_array<T: Parsable>(&self, key: impl Into<ParamKey>) -> Result<Vec<T>> {
        self.get_array_with_origin(key).map(|(values, _)| values)
    }

    /// [`get_array`](Self::get_array) plus the backend that answered
    pub fn get_array_with_origin<T: Parsable>(
        &self,
        key: impl Into<ParamKey>,
    ) -> Result<(Vec<T>, Origin)> {
        let key = key.into();
        let (items, origin) = self.resolve(key.as_str(), LIST_SHAPE, |b, k| b.query_list(k))?;

        let values = items
            .iter()
            .map(|item| {
                convert::parse::<T>(item).map_err(|source| ParamError::Conversion {
                    key: key.to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<T>>>()?;
        Ok((values, origin))
    }

    /// Convert the elements of `key` into `buffer` in backend order and
    /// return how many were written. Fails instead of writing past the end.
    pub fn get_array_into<T: Parsable>(
        &self,
        buffer: &mut [T],
        key: impl Into<ParamKey>,
    ) -> Result<usize> {
        let key = key.into();
        let (items, _) = self.resolve(key.as_str(), LIST_SHAPE, |b, k| b.query_list(k))?;

        if items.len() > buffer.len() {
            return Err(ParamError::BufferTooSmall {
                key: key.into_string(),
                needed: items.len(),
                capacity: buffer.len(),
            });
        }

        for (slot, item) in buffer.iter_mut().zip(&items) {
            *slot = convert::parse::<T>(item).map_err(|source| ParamError::Conversion {
                key: key.to_string(),
                source,
            })?;
        }

        Ok(items.len())
    }

    /// Store every element of `values` under `key`; the backend applies the
    /// whole array or nothing.
    pub fn set_array<T: Formattable>(&mut self, values: &[T], key: impl Into<ParamKey>) -> Result<()> {
        let key = key.into();
        let texts: Vec<String> = values.iter().map(convert::format).collect();

        self.backends_mut()?
            .primary
            .set_list(key.as_str(), &texts, T::KIND)
            .map_err(|e| write_error(&key, e))
    }

    /// Remove `key` from the primary backend. Defaults are never modified.
    pub fn remove(&mut self, key: impl Into<ParamKey>) -> Result<()> {
        let key = key.into();

        self.backends_mut()?
            .primary
            .remove(key.as_str())
            .map_err(|e| ParamError::ParameterRemove {
                key: key.to_string(),
                reason: e.reason(),
            })
    }

    /// Element count of `key` in the primary backend. Defaults are not
    /// consulted.
    pub fn size(&self, key: impl Into<ParamKey>) -> Result<usize> {
        let key = key.into();
        Ok(self.backends()?.primary.size(key.as_str()))
    }

    /// Write the primary backend's current state to `path`
    pub fn dump(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        self.backends()?.primary.dump(path).map_err(|e| {
            ui::warning(&format!(
                "Could not write parameters to file '{}'.",
                path.display()
            ));
            ParamError::Dump {
                path: path.to_path_buf(),
                reason: e.reason(),
            }
        })
    }
}

fn shape_error(key: &str, location: &'static str, expected: &'static str) -> ParamError {
    ParamError::ShapeMismatch {
        key: key.to_string(),
        location,
        expected,
    }
}

fn write_error(key: &ParamKey, e: ParamError) -> ParamError {
    ParamError::ParameterWrite {
        key: key.to_string(),
        reason: e.reason(),
    }
}
