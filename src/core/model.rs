//! Launcher model
//!
//! Default names, the dispatch decision, and the typed launch errors.

use std::env::consts::EXE_SUFFIX;
use std::ffi::{OsStr, OsString};
use std::io;
use thiserror::Error;

/// Base name of the real binary this launcher stands in for
pub const TARGET_STEM: &str = "azd";

/// Sidecar file memoizing the resolved target path
pub const CACHE_FILE_NAME: &str = "azd.ini";

/// Substring a PATH candidate must contain to be accepted
pub const REQUIRED_MARKER: &str = "Azure Dev CLI";

/// First argument that routes the invocation to the alternate binary
pub const RESERVED_KEYWORD: &str = "ai";

/// Base name of the alternate binary
pub const ALTERNATE_STEM: &str = "ai";

/// Target binary file name for the current platform (`azd.exe` on Windows)
pub fn default_target_binary() -> String {
    format!("{}{}", TARGET_STEM, EXE_SUFFIX)
}

/// Alternate binary file name for the current platform
pub fn default_alternate_binary() -> String {
    format!("{}{}", ALTERNATE_STEM, EXE_SUFFIX)
}

/// Which program an invocation is forwarded to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch<'a> {
    /// The resolved target, with every forwarded argument
    Target {
        path: &'a OsStr,
        args: &'a [OsString],
    },
    /// The alternate binary, with the arguments after the keyword
    Alternate {
        program: &'a str,
        args: &'a [OsString],
    },
}

impl<'a> Dispatch<'a> {
    /// Pick the destination for `args`; only the first argument is inspected
    pub fn select(
        args: &'a [OsString],
        keyword: &str,
        target_path: &'a OsStr,
        alternate: &'a str,
    ) -> Self {
        match args.split_first() {
            Some((first, rest)) if first.as_os_str() == OsStr::new(keyword) => {
                Dispatch::Alternate {
                    program: alternate,
                    args: rest,
                }
            }
            _ => Dispatch::Target {
                path: target_path,
                args,
            },
        }
    }
}

/// Launch failures
#[derive(Debug, Error)]
pub enum LaunchError {
    /// No PATH entry holds an acceptable target binary
    #[error(
        "ERROR: `{binary}` not found in PATH!!\n\n  TRY: Update PATH to include location {binary}...\n   OR: Update {cache_file} with full path to {binary}"
    )]
    TargetNotFound { binary: String, cache_file: String },

    /// The AZD_SHIM_* environment could not be parsed
    #[error("invalid AZD_SHIM_* environment settings")]
    Settings(#[from] clap::Error),

    /// The OS shell could not be started
    #[error("failed to execute `{command_line}`")]
    Spawn {
        command_line: String,
        #[source]
        source: io::Error,
    },
}
