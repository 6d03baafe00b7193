//! Shared test fixtures and helpers.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;

/// Create a temporary stand-in for the browser downloads directory.
pub fn temp_downloads() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().expect("failed to create temp dir");
    let dir = tmp.path().to_path_buf();
    (tmp, dir)
}

/// Write `name` into `dir`, then pause so the next write gets a strictly
/// later creation timestamp.
pub fn write_download(dir: &Path, name: &str, content: &str) {
    std::fs::write(dir.join(name), content).unwrap();
    std::thread::sleep(Duration::from_millis(25));
}
