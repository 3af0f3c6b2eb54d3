//! CLI settings file
//!
//! An optional KDL document read through the crate's own `kdl` backend:
//!
//! ```kdl
//! backend "json"
//! defaults "defaults.cfg"
//! verbose #true
//! ```
//!
//! Looked up from `--settings`, then `$PARAMCTL_SETTINGS`, then
//! `./paramctl.kdl`. A relative `defaults` path is resolved against the
//! settings file's directory. Command-line flags always win.

use crate::backends::{Interpreter, InterpreterSource, create_interpreter};
use crate::convert;
use crate::error::{ParamError, Result};
use crate::project_identity;
use crate::ui as output;
use std::env;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Settings {
    pub backend: Option<String>,
    pub defaults: Option<PathBuf>,
    pub verbose: bool,
}

impl Settings {
    /// Load the settings file named on the command line, or the first one
    /// found in the environment or working directory. No file means empty
    /// settings.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        if let Some(path) = env::var_os(project_identity::env_key("SETTINGS")) {
            return Self::load(Path::new(&path));
        }

        let local = Path::new(project_identity::SETTINGS_FILE_BASENAME);
        if local.is_file() {
            return Self::load(local);
        }

        Ok(Self::default())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let doc = create_interpreter("kdl", InterpreterSource::File(path)).map_err(|e| {
            ParamError::ConfigError(format!(
                "Failed to load settings '{}': {}",
                path.display(),
                e.reason()
            ))
        })?;

        output::verbose(&format!("Using settings from '{}'", path.display()));
        Self::from_interpreter(&*doc, path.parent())
    }

    fn from_interpreter(doc: &dyn Interpreter, base: Option<&Path>) -> Result<Self> {
        let verbose = match doc.query("verbose") {
            Some(text) => convert::parse::<bool>(&text).map_err(|e| {
                ParamError::ConfigError(format!("Invalid 'verbose' setting: {}", e))
            })?,
            None => false,
        };

        let defaults = doc.query("defaults").map(PathBuf::from).map(|path| {
            match base {
                Some(dir) if path.is_relative() => dir.join(path),
                _ => path,
            }
        });

        Ok(Self {
            backend: doc.query("backend"),
            defaults,
            verbose,
        })
    }
}
