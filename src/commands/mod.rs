pub mod get_size;

use std::io::{self, Write};

use anyhow::{Context, Result, bail};

use crate::args::{Args, Command, GetSizeArgs};
use crate::help::{self, CommandHelp};
use crate::printer;
use get_size::GetSizeCommand;

pub const BUILD_APKS_COMMAND_NAME: &str = "build-apks";
pub const GET_DEVICE_SPEC_COMMAND_NAME: &str = "get-device-spec";

pub fn command_names() -> Vec<&'static str> {
    vec![get_size::COMMAND_NAME]
}

pub fn help_for(command_name: &str) -> Option<CommandHelp> {
    match command_name {
        get_size::COMMAND_NAME => Some(GetSizeCommand::help()),
        _ => None,
    }
}

/// Executes a parsed command line, writing its normal output to `out`.
pub fn run(args: Args, out: &mut impl Write) -> Result<()> {
    match args.command {
        Command::GetSize(get_size) => run_get_size(&get_size, out),
        Command::Help { command } => run_help(command.as_deref(), out),
    }
}

/// Reports the outcome of [`run`] on `err` and returns the process exit code.
///
/// A closed stdout (`EPIPE`) is not a failure.
pub fn report(result: Result<()>, err: &mut impl Write) -> u8 {
    let Err(e) = result else {
        return 0;
    };
    if is_broken_pipe(&e) {
        return 0;
    }
    let _ = writeln!(err, "Error: {:#}", e);
    1
}

fn is_broken_pipe(error: &anyhow::Error) -> bool {
    error
        .chain()
        .filter_map(|cause| cause.downcast_ref::<io::Error>())
        .any(|io_error| io_error.kind() == io::ErrorKind::BrokenPipe)
}

fn run_get_size(args: &GetSizeArgs, out: &mut impl Write) -> Result<()> {
    let command = GetSizeCommand::from_args(&args.flags).context("Invalid get-size request")?;
    printer::write_command(out, &command, args.output).context("Failed to print the request")?;
    Ok(())
}

fn run_help(command: Option<&str>, out: &mut impl Write) -> Result<()> {
    let names = match command {
        Some(name) => vec![name],
        None => command_names(),
    };

    for name in names {
        let Some(command_help) = help_for(name) else {
            bail!(
                "Unknown command '{}'. Available commands: {}",
                name,
                command_names().join(", ")
            );
        };
        writeln!(out, "{}\n", help::render(&command_help))?;
    }
    Ok(())
}
