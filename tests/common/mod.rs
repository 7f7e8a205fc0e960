#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

pub fn scratch_dir() -> TempDir {
    TempDir::new().expect("create scratch dir")
}

pub fn write_archive(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("archive.apks");
    fs::write(&path, b"PK\x03\x04").expect("write archive");
    path
}

pub fn write_device_spec(dir: &TempDir, file_name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(file_name);
    fs::write(&path, contents).expect("write device spec");
    path
}

pub fn flag(name: &str, value: &Path) -> String {
    format!("--{}={}", name, value.display())
}

pub fn apks_flag(path: &Path) -> String {
    flag("apks", path)
}
