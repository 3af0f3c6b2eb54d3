use crate::convert::ValueKind;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "paramctl",
    about = "Typed parameter lookup over pluggable file formats",
    long_about = "Read and edit simulation parameter files through a named backend, \
                  falling back to a defaults document for keys the file does not set",
    version,
    next_line_help = false,
    term_width = 80
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalFlags,

    #[command(flatten)]
    pub source: SourceArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Args, Debug, Default)]
pub struct GlobalFlags {
    /// Verbose output (reports every fallback to defaults)
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Quiet mode
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Machine-readable output for read commands
    #[arg(long, value_enum, global = true)]
    pub format: Option<OutputFormat>,
}

#[derive(Args, Debug, Default)]
pub struct SourceArgs {
    /// Backend used to parse the parameter file [default: enzo2_libconfig]
    #[arg(short = 'b', long, global = true, help_heading = "Source")]
    pub backend: Option<String>,

    /// Parameter file
    #[arg(short = 'i', long, value_name = "FILE", global = true, help_heading = "Source")]
    pub input: Option<PathBuf>,

    /// Defaults document, always parsed as libconfig text
    #[arg(short = 'd', long, value_name = "FILE", global = true, help_heading = "Source")]
    pub defaults: Option<PathBuf>,

    /// Where mutating commands write the result (defaults to --input)
    #[arg(short = 'o', long, value_name = "FILE", global = true, help_heading = "Source")]
    pub output: Option<PathBuf>,

    /// KDL settings file supplying backend, defaults and verbose
    #[arg(long, value_name = "FILE", global = true, help_heading = "Source")]
    pub settings: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print one scalar parameter
    Get {
        /// Key or printf-style template, e.g. "Levels[%d]"
        template: String,

        /// Values substituted into the template placeholders
        #[arg(allow_negative_numbers = true)]
        args: Vec<String>,

        /// Type the value must convert to
        #[arg(short = 't', long = "type", value_enum, default_value_t = ValueType::String)]
        value_type: ValueType,
    },

    /// Print every element of an array parameter
    GetArray {
        /// Key or printf-style template
        template: String,

        /// Values substituted into the template placeholders
        #[arg(allow_negative_numbers = true)]
        args: Vec<String>,

        /// Type every element must convert to
        #[arg(short = 't', long = "type", value_enum, default_value_t = ValueType::String)]
        value_type: ValueType,
    },

    /// Print the element count of a parameter in the parameter file
    Size {
        /// Key or printf-style template
        template: String,

        /// Values substituted into the template placeholders
        #[arg(allow_negative_numbers = true)]
        args: Vec<String>,
    },

    /// Set a scalar parameter and write the file back
    Set {
        key: String,

        #[arg(allow_negative_numbers = true)]
        value: String,

        /// Stored type; guessed from the value when omitted
        #[arg(short = 't', long = "type", value_enum)]
        value_type: Option<ValueType>,
    },

    /// Replace an array parameter and write the file back
    SetArray {
        key: String,

        #[arg(required = true, num_args = 1.., allow_negative_numbers = true)]
        values: Vec<String>,

        /// Stored element type; guessed from the first value when omitted
        #[arg(short = 't', long = "type", value_enum)]
        value_type: Option<ValueType>,
    },

    /// Remove a parameter from the parameter file and write it back
    Remove { key: String },

    /// Write the loaded parameter file to PATH in canonical form
    Dump { path: PathBuf },

    /// List registered backend names
    Backends,

    /// Generate shell completions
    #[command(hide = true)]
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ValueType {
    Bool,
    Int,
    Float,
    String,
}

impl From<ValueType> for ValueKind {
    fn from(value: ValueType) -> Self {
        match value {
            ValueType::Bool => ValueKind::Boolean,
            ValueType::Int => ValueKind::Integer,
            ValueType::Float => ValueKind::Float,
            ValueType::String => ValueKind::String,
        }
    }
}

impl From<ValueKind> for ValueType {
    fn from(kind: ValueKind) -> Self {
        match kind {
            ValueKind::Boolean => ValueType::Bool,
            ValueKind::Integer => ValueType::Int,
            ValueKind::Float => ValueType::Float,
            ValueKind::String => ValueType::String,
        }
    }
}

#[cfg(test)]
mod tests;
