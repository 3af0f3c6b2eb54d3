//! Shared setup for commands that work on a parameter file

use crate::backends::DEFAULTS_INTERPRETER;
use crate::cli::args::SourceArgs;
use crate::configuration::Configuration;
use crate::error::{ParamError, Result};
use crate::settings::Settings;
use crate::ui as output;
use std::fs;
use std::path::{Path, PathBuf};

/// A loaded configuration plus where it came from and where edits go
pub struct Session {
    pub config: Configuration,
    input: PathBuf,
    output: Option<PathBuf>,
}

impl Session {
    /// Resolve backend and defaults from flags and settings, then load the
    /// parameter file
    pub fn open(source: &SourceArgs, settings: &Settings) -> Result<Self> {
        let input = source.input.clone().ok_or_else(|| {
            ParamError::ConfigError("No parameter file given. Pass --input <FILE>.".to_string())
        })?;

        let backend = source
            .backend
            .as_deref()
            .or(settings.backend.as_deref())
            .unwrap_or(DEFAULTS_INTERPRETER);

        let defaults_text = match source.defaults.as_deref().or(settings.defaults.as_deref()) {
            Some(path) => read_defaults(path)?,
            None => String::new(),
        };

        let mut config = Configuration::new();
        config.initialize(backend, &input, &defaults_text)?;

        Ok(Self {
            config,
            input,
            output: source.output.clone(),
        })
    }

    /// File that mutating commands write back to
    pub fn target(&self) -> &Path {
        self.output.as_deref().unwrap_or(&self.input)
    }

    /// Persist the current state of the parameter file
    pub fn write_back(&self) -> Result<&Path> {
        let target = self.target();
        self.config.dump(target)?;
        output::verbose(&format!("Wrote parameters to '{}'", target.display()));
        Ok(target)
    }
}

fn read_defaults(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| ParamError::IoError {
        path: path.to_path_buf(),
        source,
    })
}
