pub mod args;
pub mod commands;
pub mod device;
pub mod dimension;
pub mod error;
pub mod files;
pub mod flags;
pub mod help;
pub mod logging;
pub mod printer;

pub use commands::get_size::GetSizeCommand;
pub use device::DeviceSpec;
pub use dimension::Dimension;
pub use error::GetSizeError;
