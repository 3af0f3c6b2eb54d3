use crate::backends::registry::registered_backends;
use crate::backends::DEFAULTS_INTERPRETER;
use crate::cli::args::OutputFormat;
use crate::commands::report::emit;
use crate::error::Result;
use serde::Serialize;

#[derive(Serialize)]
struct BackendsReport {
    backends: Vec<String>,
    defaults: &'static str,
}

pub fn run(format: Option<OutputFormat>) -> Result<()> {
    let backends = registered_backends()?;

    let plain: Vec<String> = backends
        .iter()
        .map(|name| {
            if name == DEFAULTS_INTERPRETER {
                format!("{} (defaults)", name)
            } else {
                name.clone()
            }
        })
        .collect();

    emit(
        format,
        &BackendsReport {
            backends,
            defaults: DEFAULTS_INTERPRETER,
        },
        &plain,
    )
}
