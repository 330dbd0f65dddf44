//! Environment access
//!
//! The resolver reads PATH through this trait so tests can supply their own.

use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

/// Read-only view of the process environment
pub trait Environment {
    /// Raw value of a variable, if set
    fn var_os(&self, key: &str) -> Option<OsString>;

    /// PATH split on the platform separator, in order, empty entries dropped
    fn path_entries(&self) -> Vec<PathBuf> {
        self.var_os("PATH")
            .map(|path| {
                env::split_paths(&path)
                    .filter(|entry| !entry.as_os_str().is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// The real process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn var_os(&self, key: &str) -> Option<OsString> {
        env::var_os(key)
    }
}
