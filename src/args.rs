use clap::{Parser, Subcommand, ValueEnum};

// Top-level CLI parser. Logging options are flattened from their own Args struct.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Resolve get-size requests against an APK Set",
    disable_help_subcommand = true
)]
pub struct Args {
    #[command(flatten)]
    pub log: LogArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Args, Debug, Clone)]
pub struct LogArgs {
    #[arg(
        long,
        global = true,
        value_enum,
        value_name = "LEVEL",
        default_value_t = LogLevel::Warn,
        help = "Log level, overridden by the APKSIZE_LOG environment variable"
    )]
    pub log_level: LogLevel,

    #[arg(
        short = 'v',
        long,
        global = true,
        help = "Shorthand for --log-level=debug"
    )]
    pub verbose: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Gets the over-the-wire sizes of APKs served from an APK Set
    GetSize(GetSizeArgs),

    /// Describes the flags of a command
    Help {
        #[arg(value_name = "COMMAND", help = "Command to describe (all when omitted)")]
        command: Option<String>,
    },
}

#[derive(clap::Args, Debug, Clone)]
pub struct GetSizeArgs {
    #[arg(
        long,
        value_enum,
        value_name = "FORMAT",
        default_value_t = OutputFormat::Text,
        help = "How to print the resolved request"
    )]
    pub output: OutputFormat,

    #[arg(
        value_name = "FLAGS",
        trailing_var_arg = true,
        allow_hyphen_values = true,
        help = "get-size flags in --name=value form, e.g. -- --apks=archive.apks --dimensions=ALL"
    )]
    pub flags: Vec<String>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}
