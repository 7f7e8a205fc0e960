use apksize::args::Args;
use apksize::{commands, logging};
use clap::Parser;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(&args.log);

    let result = commands::run(args, &mut io::stdout().lock());
    ExitCode::from(commands::report(result, &mut io::stderr()))
}
