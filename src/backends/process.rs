//! Process capabilities
//!
//! Self-location and shell execution, each behind a narrow trait.

use std::ffi::OsStr;
use std::path::PathBuf;
use std::process::{Command, ExitStatus};

use crate::core::model::LaunchError;

/// Locates the running executable
pub trait CurrentExe {
    /// Full path of the running executable, if the OS can tell
    fn current_exe(&self) -> Option<PathBuf>;
}

/// Runs a command line to completion
pub trait Spawner {
    /// Execute `command_line` with inherited stdio and return its exit code
    fn run(&self, command_line: &OsStr) -> Result<i32, LaunchError>;
}

/// The OS view of this process
#[derive(Debug, Clone, Copy, Default)]
pub struct OsProcess;

impl CurrentExe for OsProcess {
    fn current_exe(&self) -> Option<PathBuf> {
        std::env::current_exe().ok()
    }
}

/// Hands command lines to the platform shell (`sh -c` / `cmd /C`)
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellSpawner;

impl ShellSpawner {
    #[cfg(windows)]
    fn command(command_line: &OsStr) -> Command {
        use std::os::windows::process::CommandExt;

        // cmd.exe does its own parsing; the line must reach it untouched.
        let mut cmd = Command::new("cmd");
        cmd.arg("/C").raw_arg(command_line);
        cmd
    }

    #[cfg(not(windows))]
    fn command(command_line: &OsStr) -> Command {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(command_line);
        cmd
    }
}

impl Spawner for ShellSpawner {
    fn run(&self, command_line: &OsStr) -> Result<i32, LaunchError> {
        let status = Self::command(command_line)
            .status()
            .map_err(|source| LaunchError::Spawn {
                command_line: command_line.to_string_lossy().into_owned(),
                source,
            })?;
        Ok(exit_code(status))
    }
}

/// Exit code to report for a finished child
pub fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}
