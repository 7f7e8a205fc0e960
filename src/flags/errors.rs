use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FlagError {
    #[error("Missing the required --{0} flag.")]
    MissingArgument(String),

    #[error("Unrecognized flags: {}.", join_flag_names(.0))]
    UnrecognizedArgument(Vec<String>),

    #[error("Invalid value for flag --{flag}: {reason}.")]
    InvalidValue { flag: String, reason: String },

    #[error("Flag --{0} has been set more than once.")]
    DuplicateFlag(String),

    #[error("Syntax error: flags should start with \"--\", found '{0}'.")]
    UnexpectedPositional(String),

    #[error("Syntax error: empty flag name in '{0}'.")]
    InvalidFlagName(String),
}

fn join_flag_names(names: &[String]) -> String {
    names
        .iter()
        .map(|name| format!("--{}", name))
        .collect::<Vec<_>>()
        .join(", ")
}
