use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::args::{LogArgs, LogLevel};

pub const LOG_ENV_VAR: &str = "APKSIZE_LOG";

pub fn level_filter(args: &LogArgs) -> LevelFilter {
    if args.verbose {
        return LevelFilter::DEBUG.max(level_to_filter(args.log_level));
    }
    level_to_filter(args.log_level)
}

fn level_to_filter(level: LogLevel) -> LevelFilter {
    match level {
        LogLevel::Error => LevelFilter::ERROR,
        LogLevel::Warn => LevelFilter::WARN,
        LogLevel::Info => LevelFilter::INFO,
        LogLevel::Debug => LevelFilter::DEBUG,
        LogLevel::Trace => LevelFilter::TRACE,
    }
}

/// Installs a stderr subscriber. Directives in `APKSIZE_LOG` take precedence
/// over the command-line level. Calling this twice is a no-op.
pub fn init(args: &LogArgs) {
    let filter = EnvFilter::builder()
        .with_default_directive(level_filter(args).into())
        .with_env_var(LOG_ENV_VAR)
        .from_env_lossy();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
