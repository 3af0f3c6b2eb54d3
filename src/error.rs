use std::path::PathBuf;
use thiserror::Error;

/// Text could not be converted into the requested value type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid conversion of '{value}' to {target}")]
pub struct ConversionError {
    pub value: String,
    pub target: &'static str,
}

impl ConversionError {
    pub fn new<T: ?Sized>(value: &str) -> Self {
        Self {
            value: value.to_string(),
            target: std::any::type_name::<T>(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ParamError {
    #[error("Unknown parameter backend '{name}' (available: {available})")]
    UnknownBackend { name: String, available: String },

    #[error("Backend '{backend}' failed to load its source: {reason}")]
    BackendInit { backend: String, reason: String },

    #[error("Parameter <{key}> not found in parameter file or defaults")]
    ParameterNotFound { key: String },

    /// The key exists but holds a group, list or scalar other than the
    /// shape the accessor asked for
    #[error("Parameter <{key}> in {location} is not {expected}")]
    ShapeMismatch {
        key: String,
        location: &'static str,
        expected: &'static str,
    },

    #[error("Parameter <{key}>: {source}")]
    Conversion {
        key: String,
        #[source]
        source: ConversionError,
    },

    #[error("Could not set <{key}> in parameter file: {reason}")]
    ParameterWrite { key: String, reason: String },

    #[error("Could not remove <{key}> from parameter file: {reason}")]
    ParameterRemove { key: String, reason: String },

    #[error("Could not write parameters to '{path}': {reason}")]
    Dump { path: PathBuf, reason: String },

    /// Accessor called before `Configuration::initialize`
    #[error("Configuration has not been initialized")]
    NotInitialized,

    #[error("Backend '{backend}' does not support {capability}")]
    Unsupported {
        backend: String,
        capability: &'static str,
    },

    #[error("Invalid parameter key '{key}': {reason}")]
    InvalidKey { key: String, reason: String },

    #[error("Key template '{template}' could not be formatted: {reason}")]
    KeyFormat { template: String, reason: String },

    #[error("Parameter <{key}> has {needed} elements but the buffer holds {capacity}")]
    BufferTooSmall {
        key: String,
        needed: usize,
        capacity: usize,
    },

    #[error("IO error at '{path}': {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    StdIoError(#[from] std::io::Error),

    #[error(transparent)]
    JsonError(#[from] serde_json::Error),

    #[error(transparent)]
    YamlError(#[from] serde_yml::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("{0}")]
    Other(String),
}

impl ParamError {
    /// Reason text without the key prefix, used when a backend error is
    /// re-wrapped by the configuration facade.
    pub fn reason(&self) -> String {
        match self {
            ParamError::InvalidKey { reason, .. } => reason.clone(),
            ParamError::Unsupported { capability, .. } => {
                format!("{} is not supported by this backend", capability)
            }
            other => other.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ParamError::ParameterNotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, ParamError>;
