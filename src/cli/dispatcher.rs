//! Command dispatcher
//!
//! Routes CLI commands to their handlers. Commands that read or edit a
//! parameter file get a [`Session`] built from the source flags and the
//! settings file.

use crate::cli::args::{Cli, Command};
use crate::commands;
use crate::commands::session::Session;
use crate::error::Result;
use crate::project_identity;
use crate::settings::Settings;
use crate::ui as output;

/// Dispatch the parsed CLI command to the appropriate handler
pub fn dispatch(args: &Cli) -> Result<()> {
    let Some(command) = &args.command else {
        print_quick_start();
        return Ok(());
    };

    match command {
        Command::Backends => return commands::backends::run(args.global.format),
        Command::Completions { shell } => return commands::completions::run(*shell),
        _ => {}
    }

    let settings = Settings::discover(args.source.settings.as_deref())?;
    if settings.verbose && !args.global.quiet {
        output::set_verbose(true);
    }

    let mut session = Session::open(&args.source, &settings)?;
    run_with_session(args, command, &mut session)
}

fn run_with_session(args: &Cli, command: &Command, session: &mut Session) -> Result<()> {
    let format = args.global.format;

    match command {
        Command::Get {
            template,
            args: values,
            value_type,
        } => commands::get::run_scalar(
            &session.config,
            commands::get::GetOptions {
                template: template.clone(),
                args: values.clone(),
                value_type: *value_type,
                format,
            },
        ),

        Command::GetArray {
            template,
            args: values,
            value_type,
        } => commands::get::run_array(
            &session.config,
            commands::get::GetOptions {
                template: template.clone(),
                args: values.clone(),
                value_type: *value_type,
                format,
            },
        ),

        Command::Size {
            template,
            args: values,
        } => commands::size::run(&session.config, template, values, format),

        Command::Set {
            key,
            value,
            value_type,
        } => commands::set::run_scalar(
            session,
            commands::set::SetOptions {
                key: key.clone(),
                value: value.clone(),
                value_type: *value_type,
            },
        ),

        Command::SetArray {
            key,
            values,
            value_type,
        } => commands::set::run_array(
            session,
            commands::set::SetArrayOptions {
                key: key.clone(),
                values: values.clone(),
                value_type: *value_type,
            },
        ),

        Command::Remove { key } => commands::remove::run(session, key),

        Command::Dump { path } => commands::dump::run(&session.config, path),

        Command::Backends | Command::Completions { .. } => Ok(()),
    }
}

fn print_quick_start() {
    output::info("No command provided.");
    output::info("Quick start:");
    output::indent(
        &project_identity::cli_with("--input run.cfg get StopTime --type float"),
        2,
    );
    output::indent(
        &project_identity::cli_with("--input run.cfg get 'Level[%d].Size' 2"),
        2,
    );
    output::indent(
        &project_identity::cli_with("--input run.json --backend json set Run.Name test"),
        2,
    );
    output::indent(&project_identity::cli_with("backends"), 2);
    output::info(&format!(
        "Use `{}` for full command list.",
        project_identity::cli_with("--help")
    ));
}
