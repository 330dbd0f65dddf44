//! CLI module - Settings and the process boundary
//!
//! Every command-line argument belongs to the forwarded program, so the
//! launcher's own settings come from environment variables only.

use anyhow::Result;
use clap::Parser;
use std::ffi::OsString;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::backends::env::ProcessEnv;
use crate::backends::fs::RealFs;
use crate::backends::process::{OsProcess, ShellSpawner};
use crate::core::diag::Diag;
use crate::core::model::{
    default_alternate_binary, default_target_binary, LaunchError, CACHE_FILE_NAME,
    RESERVED_KEYWORD, REQUIRED_MARKER,
};
use crate::flows::launch::{LaunchConfig, Launcher};
use crate::flows::resolve::ResolveOptions;

/// azd - locates the real azd binary and forwards every argument to it.
#[derive(Parser, Debug)]
#[command(
    name = "azd",
    about,
    disable_help_flag = true,
    disable_version_flag = true,
    long_about = r#"azd is a launcher shim. It finds the real azd binary on PATH, remembers its
location in a sidecar file (azd.ini) next to itself, and runs it with every
argument passed through unchanged.

When the first argument is `ai`, the remaining arguments go to the `ai`
binary instead.

Settings are read from the environment only:
    AZD_SHIM_TARGET      target binary file name
    AZD_SHIM_CACHE_FILE  sidecar cache file name
    AZD_SHIM_CACHE_DIR   directory holding the sidecar (defaults to the launcher's)
    AZD_SHIM_MARKER      substring an accepted PATH candidate must contain
    AZD_SHIM_KEYWORD     first argument that selects the alternate binary
    AZD_SHIM_ALTERNATE   alternate binary file name
    AZD_SHIM_VERBOSE     print diagnostics on stderr
"#
)]
pub struct Settings {
    /// Target binary file name.
    #[arg(long, env = "AZD_SHIM_TARGET", default_value_t = default_target_binary())]
    pub target: String,

    /// Sidecar cache file name.
    #[arg(long, env = "AZD_SHIM_CACHE_FILE", default_value = CACHE_FILE_NAME)]
    pub cache_file: String,

    /// Directory holding the sidecar cache file.
    #[arg(long, env = "AZD_SHIM_CACHE_DIR", value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Substring a PATH candidate must contain to be accepted.
    #[arg(long, env = "AZD_SHIM_MARKER", default_value = REQUIRED_MARKER)]
    pub marker: String,

    /// First argument that selects the alternate binary.
    #[arg(long, env = "AZD_SHIM_KEYWORD", default_value = RESERVED_KEYWORD)]
    pub keyword: String,

    /// Alternate binary file name.
    #[arg(long, env = "AZD_SHIM_ALTERNATE", default_value_t = default_alternate_binary())]
    pub alternate: String,

    /// Print diagnostics on stderr.
    #[arg(
        long,
        env = "AZD_SHIM_VERBOSE",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub verbose: bool,
}

impl Settings {
    /// Load settings from the environment, ignoring the real argv
    pub fn from_env() -> Result<Self, LaunchError> {
        Ok(Self::try_parse_from(["azd"])?)
    }

    pub fn launch_config(&self) -> LaunchConfig {
        LaunchConfig {
            resolve: ResolveOptions {
                binary: self.target.clone(),
                cache_file: self.cache_file.clone(),
                marker: self.marker.clone(),
            },
            cache_dir: self.cache_dir.clone(),
            keyword: self.keyword.clone(),
            alternate: self.alternate.clone(),
        }
    }
}

/// Run the launcher with the forwarded arguments and return this process's exit code
pub fn run(args: Vec<OsString>) -> Result<i32> {
    let settings = Settings::from_env()?;
    let diag = Diag::new(settings.verbose);

    let launcher = Launcher {
        env: &ProcessEnv,
        fs: &RealFs,
        exe: &OsProcess,
        spawner: &ShellSpawner,
        diag,
    };

    match launcher.launch(&settings.launch_config(), &args) {
        Ok(code) => Ok(code),
        Err(err @ LaunchError::TargetNotFound { .. }) => {
            let mut stdout = io::stdout().lock();
            write!(stdout, "{}", err)?;
            stdout.flush()?;
            Ok(1)
        }
        Err(err) => Err(err.into()),
    }
}
