use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeviceSpecError {
    #[error("Failed to read device spec '{path}': {reason}.")]
    Read { path: String, reason: String },

    #[error("Unsupported device spec file '{0}', expected a .json, .yaml or .toml file.")]
    UnsupportedExtension(String),

    #[error("Malformed device spec '{path}': {reason}")]
    Malformed { path: String, reason: String },

    #[error("Incomplete device spec '{path}': {reason}.")]
    Incomplete { path: String, reason: String },
}
