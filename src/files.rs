use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FileError {
    #[error("File '{}' was not found.", .0.display())]
    NotFound(PathBuf),

    #[error("File '{}' is a directory, expected a file.", .0.display())]
    NotAFile(PathBuf),

    #[error("File '{}' is not readable.", .0.display())]
    NotReadable(PathBuf),
}

/// Checks that `path` names an existing, readable regular file.
///
/// Readability is decided by the OS for the current process (`access(2)` on
/// unix), so the file is never opened.
pub fn check_file_exists_and_readable(path: &Path) -> Result<(), FileError> {
    let metadata = fs::metadata(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => FileError::NotFound(path.to_path_buf()),
        _ => FileError::NotReadable(path.to_path_buf()),
    })?;

    if metadata.is_dir() {
        return Err(FileError::NotAFile(path.to_path_buf()));
    }
    if !is_readable(path) {
        return Err(FileError::NotReadable(path.to_path_buf()));
    }

    tracing::debug!(path = %path.display(), "file exists and is readable");
    Ok(())
}

#[cfg(unix)]
fn is_readable(path: &Path) -> bool {
    use nix::unistd::{AccessFlags, access};
    access(path, AccessFlags::R_OK).is_ok()
}

#[cfg(not(unix))]
fn is_readable(_path: &Path) -> bool {
    true
}
