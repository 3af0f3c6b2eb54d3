//! # Parameter Backends
//!
//! A backend ("interpreter") parses one configuration format and answers
//! key lookups against it. The configuration facade never names a concrete
//! backend type; it asks the [`registry`] for one by name.
//!
//! ## Module Structure
//!
//! - [`traits`]: the [`Interpreter`] contract and [`InterpreterSource`]
//! - [`registry`]: name -> factory mapping, global registry
//! - [`path`]: `Group.Field[2]` key syntax shared by the tree backends
//! - [`libconfig`]: libconfig text format, also the defaults backend
//! - [`json`] / [`yaml`]: document backends on a shared [`tree`]
//! - [`kdl`]: read-only KDL backend

pub mod json;
pub mod kdl;
pub mod libconfig;
pub mod path;
pub mod registry;
pub mod traits;
pub mod tree;
pub mod yaml;

pub use registry::{
    BackendRegistry, DEFAULTS_INTERPRETER, create_interpreter, get_registry, register_interpreter,
};
pub use traits::{Interpreter, InterpreterSource};

use crate::error::{ParamError, Result};
use fs2::FileExt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Write a serialized document to `path` atomically.
///
/// The content goes to a temporary file next to the target, is synced, then
/// renamed over it, so a failed write never leaves a truncated document. An
/// existing target stays exclusively locked until the rename is done.
pub(crate) fn write_document(path: &Path, content: &str) -> Result<()> {
    let tmp_path = temp_path_for(path)?;

    let guard = match fs::File::open(path) {
        Ok(file) => {
            file.lock_exclusive().map_err(|e| io_error(path, e))?;
            Some(file)
        }
        Err(_) => None,
    };

    let written = write_and_rename(&tmp_path, path, content);
    if written.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }

    if let Some(file) = guard {
        let _ = FileExt::unlock(&file);
    }
    written
}

fn temp_path_for(path: &Path) -> Result<PathBuf> {
    let name = path.file_name().ok_or_else(|| {
        ParamError::Other(format!("'{}' does not name a file", path.display()))
    })?;
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    Ok(dir.join(format!(".{}.tmp", name.to_string_lossy())))
}

fn write_and_rename(tmp_path: &Path, path: &Path, content: &str) -> Result<()> {
    let mut tmp_file = fs::File::create(tmp_path).map_err(|e| io_error(tmp_path, e))?;

    tmp_file
        .write_all(content.as_bytes())
        .and_then(|_| tmp_file.sync_all())
        .map_err(|e| io_error(tmp_path, e))?;
    drop(tmp_file);

    fs::rename(tmp_path, path).map_err(|e| io_error(path, e))
}

fn io_error(path: &Path, source: std::io::Error) -> ParamError {
    ParamError::IoError {
        path: path.to_path_buf(),
        source,
    }
}
