use std::io::{self, Write};

use apksize::args::{Args, Command, LogLevel, OutputFormat};
use apksize::commands::{command_names, help_for, report, run};
use apksize::{GetSizeCommand, help};
use clap::Parser;

#[path = "common/mod.rs"]
mod common;

fn parse(argv: &[&str]) -> Args {
    Args::try_parse_from(argv).expect("command line parses")
}

struct ClosedPipe;

impl Write for ClosedPipe {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::from(io::ErrorKind::BrokenPipe))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn get_size_forwards_trailing_flags_verbatim() {
    let args = parse(&[
        "apksize",
        "get-size",
        "--output",
        "json",
        "--",
        "--apks=archive.apks",
        "--instant",
        "--unknown=1",
    ]);

    let Command::GetSize(get_size) = args.command else {
        panic!("expected get-size");
    };
    assert_eq!(get_size.output, OutputFormat::Json);
    assert_eq!(
        get_size.flags,
        vec!["--apks=archive.apks", "--instant", "--unknown=1"]
    );
}

#[test]
fn get_size_defaults_to_text_output() {
    let args = parse(&["apksize", "get-size", "--", "--apks=a.apks"]);

    let Command::GetSize(get_size) = args.command else {
        panic!("expected get-size");
    };
    assert_eq!(get_size.output, OutputFormat::Text);
    assert_eq!(args.log.log_level, LogLevel::Warn);
    assert!(!args.log.verbose);
}

#[test]
fn global_log_options_follow_the_subcommand() {
    let args = parse(&["apksize", "help", "get-size", "-v", "--log-level", "trace"]);

    assert!(args.log.verbose);
    assert_eq!(args.log.log_level, LogLevel::Trace);
    assert!(matches!(
        args.command,
        Command::Help { command: Some(ref name) } if name == "get-size"
    ));
}

#[test]
fn help_lookup_knows_only_registered_commands() {
    assert_eq!(command_names(), vec!["get-size"]);
    assert!(help_for("get-size").is_some());
    assert!(help_for("nope").is_none());
}

#[test]
fn rendered_help_mentions_every_flag() {
    let rendered = help::render(&GetSizeCommand::help());

    for flag in ["apks", "device-spec", "modules", "dimensions", "instant"] {
        assert!(rendered.contains(&format!("--{}", flag)), "{}", flag);
    }
}

#[test]
fn help_without_a_name_describes_every_command() {
    let mut out = Vec::new();
    run(parse(&["apksize", "help"]), &mut out).expect("help runs");

    let out = String::from_utf8(out).unwrap();
    assert!(out.starts_with("get-size\n"));
    assert!(out.contains("Synopsis:"));
}

#[test]
fn help_for_unknown_command_fails() {
    let mut out = Vec::new();
    let err = run(parse(&["apksize", "help", "nope"]), &mut out).unwrap_err();

    assert_eq!(
        err.to_string(),
        "Unknown command 'nope'. Available commands: get-size"
    );
    assert!(out.is_empty());
}

#[test]
fn get_size_prints_json() {
    let dir = common::scratch_dir();
    let archive = common::write_archive(&dir);
    let apks = common::apks_flag(&archive);

    let mut out = Vec::new();
    let args = parse(&[
        "apksize",
        "get-size",
        "--output",
        "json",
        "--",
        &apks,
        "--dimensions=ABI",
    ]);
    run(args, &mut out).expect("get-size runs");

    let json: serde_json::Value = serde_json::from_slice(&out).expect("valid json");
    assert_eq!(json["dimensions"], serde_json::json!(["ABI"]));
    assert_eq!(json["instant"], serde_json::json!(false));
    assert_eq!(
        json["apksArchivePath"],
        serde_json::json!(archive.display().to_string())
    );
}

#[test]
fn get_size_prints_a_table() {
    let dir = common::scratch_dir();
    let archive = common::write_archive(&dir);
    let apks = common::apks_flag(&archive);

    let mut out = Vec::new();
    run(parse(&["apksize", "get-size", "--", &apks]), &mut out).expect("get-size runs");

    let out = String::from_utf8(out).unwrap();
    assert!(out.contains("get-size request"));
    assert!(out.contains("default (empty)"));
}

#[test]
fn failed_request_reports_error_and_exit_code_one() {
    let dir = common::scratch_dir();
    let archive = common::write_archive(&dir);
    let apks = common::apks_flag(&archive);

    let mut out = Vec::new();
    let result = run(
        parse(&["apksize", "get-size", "--", &apks, "--bogus=1"]),
        &mut out,
    );
    let mut err = Vec::new();
    let code = report(result, &mut err);

    assert_eq!(code, 1);
    assert!(out.is_empty());
    assert_eq!(
        String::from_utf8(err).unwrap(),
        "Error: Invalid get-size request: Unrecognized flags: --bogus.\n"
    );
}

#[test]
fn success_reports_exit_code_zero() {
    let mut err = Vec::new();
    assert_eq!(report(Ok(()), &mut err), 0);
    assert!(err.is_empty());
}

#[test]
fn closed_stdout_is_not_an_error() {
    let dir = common::scratch_dir();
    let archive = common::write_archive(&dir);
    let apks = common::apks_flag(&archive);

    let result = run(parse(&["apksize", "get-size", "--", &apks]), &mut ClosedPipe);
    assert!(result.is_err());

    let mut err = Vec::new();
    assert_eq!(report(result, &mut err), 0);
    assert!(err.is_empty());
}
