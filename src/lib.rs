//! # paramctl
//!
//! Typed parameter lookup over pluggable file formats. A [`Configuration`]
//! loads a parameter file through a backend chosen by name and falls back to
//! an in-memory defaults document for keys the file does not set.

pub mod backends;
pub mod cli;
pub mod commands;
pub mod configuration;
pub mod convert;
pub mod error;
pub mod key;
pub mod project_identity;
pub mod settings;
pub mod ui;

pub use backends::{
    BackendRegistry, DEFAULTS_INTERPRETER, Interpreter, InterpreterSource, create_interpreter,
    register_interpreter,
};
pub use configuration::{Configuration, Origin};
pub use convert::{Formattable, Parsable, ValueKind};
pub use error::{ConversionError, ParamError, Result};
pub use key::ParamKey;

use clap::Parser;
use std::process::exit;

/// Run the paramctl CLI entrypoint.
pub fn run_cli() {
    // Color settings first so every later message honors NO_COLOR
    ui::init_colors();

    let args = cli::args::Cli::parse();
    ui::set_quiet(args.global.quiet);
    ui::set_verbose(args.global.verbose);

    if let Err(e) = cli::dispatcher::dispatch(&args) {
        ui::error(&format!("{}", e));
        exit(1);
    }
}
