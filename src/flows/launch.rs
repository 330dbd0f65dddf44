//! Launch flow
//!
//! Self-locate, resolve the target, build the command line, run it.

use std::ffi::OsString;
use std::path::PathBuf;

use crate::backends::env::Environment;
use crate::backends::fs::FileSystem;
use crate::backends::process::{CurrentExe, Spawner};
use crate::core::diag::Diag;
use crate::core::model::{Dispatch, LaunchError};
use crate::core::paths::exe_dir;
use crate::core::quote::build_command_line;
use crate::flows::resolve::{ResolveOptions, Resolver};

/// Everything the launcher needs to know besides the forwarded arguments
#[derive(Debug, Clone)]
pub struct LaunchConfig {
    pub resolve: ResolveOptions,
    /// Sidecar directory; the launcher's own directory when `None`
    pub cache_dir: Option<PathBuf>,
    pub keyword: String,
    pub alternate: String,
}

/// OS collaborators for one launch
pub struct Launcher<'a> {
    pub env: &'a dyn Environment,
    pub fs: &'a dyn FileSystem,
    pub exe: &'a dyn CurrentExe,
    pub spawner: &'a dyn Spawner,
    pub diag: Diag,
}

impl Launcher<'_> {
    /// Directory holding the sidecar cache
    pub fn sidecar_dir(&self, config: &LaunchConfig) -> PathBuf {
        match &config.cache_dir {
            Some(dir) => dir.clone(),
            None => exe_dir(self.exe.current_exe().as_deref()),
        }
    }

    /// Command line for `args`, resolving the target first
    pub fn command_line(
        &self,
        config: &LaunchConfig,
        args: &[OsString],
    ) -> Result<OsString, LaunchError> {
        let dir = self.sidecar_dir(config);
        let resolver = Resolver::new(self.env, self.fs, self.diag);
        let target = resolver.resolve(&dir, &config.resolve)?;

        let dispatch = Dispatch::select(
            args,
            &config.keyword,
            target.as_os_str(),
            &config.alternate,
        );
        Ok(build_command_line(&dispatch))
    }

    /// Run the forwarded invocation and return the child's exit code
    pub fn launch(&self, config: &LaunchConfig, args: &[OsString]) -> Result<i32, LaunchError> {
        let command_line = self.command_line(config, args)?;
        self.diag
            .note(format!("running: {}", command_line.to_string_lossy()));

        let code = self.spawner.run(&command_line)?;
        self.diag.note(format!("exit code: {}", code));
        Ok(code)
    }
}
