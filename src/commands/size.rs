use crate::cli::args::OutputFormat;
use crate::commands::get::expand_key;
use crate::commands::report::emit;
use crate::configuration::Configuration;
use crate::error::Result;
use serde::Serialize;

#[derive(Serialize)]
struct SizeReport<'a> {
    key: &'a str,
    size: usize,
}

/// Element count in the parameter file only; defaults are not consulted
pub fn run(
    config: &Configuration,
    template: &str,
    args: &[String],
    format: Option<OutputFormat>,
) -> Result<()> {
    let key = expand_key(template, args)?;
    let size = config.size(&key)?;

    emit(
        format,
        &SizeReport {
            key: key.as_str(),
            size,
        },
        &[size.to_string()],
    )
}
