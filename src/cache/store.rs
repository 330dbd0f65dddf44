//! Sidecar cache store - Read/write the single-line path cache

use std::io;
use std::path::{Path, PathBuf};

use crate::backends::fs::FileSystem;
use crate::core::paths::{os_from_bytes, os_to_bytes};

/// Read the cached target path.
///
/// Returns the first line byte for byte, or `None` when the file is missing
/// or cannot be opened. The content is not checked against the filesystem.
pub fn read_cached_path(fs: &dyn FileSystem, sidecar: &Path) -> Option<PathBuf> {
    let content = fs.read(sidecar).ok()?;
    Some(PathBuf::from(os_from_bytes(first_line(&content).to_vec())))
}

/// Persist the resolved path, replacing any previous content
pub fn write_cached_path(fs: &dyn FileSystem, sidecar: &Path, path: &Path) -> io::Result<()> {
    fs.write(sidecar, &os_to_bytes(path.as_os_str()))
}

fn first_line(content: &[u8]) -> &[u8] {
    let line = content.split(|&b| b == b'\n').next().unwrap_or(&[]);
    line.strip_suffix(b"\r").unwrap_or(line)
}
