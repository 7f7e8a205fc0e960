use thiserror::Error;

use crate::device::errors::DeviceSpecError;
use crate::files::FileError;
use crate::flags::errors::FlagError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GetSizeError {
    #[error(transparent)]
    Flag(#[from] FlagError),

    #[error(transparent)]
    File(#[from] FileError),

    #[error(transparent)]
    DeviceSpec(#[from] DeviceSpecError),
}
