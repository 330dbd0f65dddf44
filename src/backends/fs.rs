//! Filesystem access
//!
//! Narrow set of operations the resolver needs, behind a trait.

use std::fs;
use std::io;
use std::path::Path;

/// Filesystem operations used by target resolution
pub trait FileSystem {
    /// Whether anything exists at `path`
    fn exists(&self, path: &Path) -> bool;

    /// Whole content of a file, as raw bytes
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Create or truncate `path` and write `contents`
    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()>;
}

/// std::fs-backed implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct RealFs;

impl FileSystem for RealFs {
    fn exists(&self, path: &Path) -> bool {
        fs::metadata(path).is_ok()
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        fs::write(path, contents)
    }
}
