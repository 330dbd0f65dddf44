//! Target resolution
//!
//! Loads the target path from the sidecar cache, or scans PATH for it and
//! records the result in the sidecar for the next run.

use std::path::{Path, PathBuf};

use crate::backends::env::Environment;
use crate::backends::fs::FileSystem;
use crate::cache::store::{read_cached_path, write_cached_path};
use crate::core::diag::Diag;
use crate::core::model::LaunchError;
use crate::core::paths::{candidate_path, path_contains, sidecar_path};

/// What to look for and where to remember it
#[derive(Debug, Clone)]
pub struct ResolveOptions {
    /// Target binary file name, e.g. `azd.exe`
    pub binary: String,
    /// Sidecar cache file name, e.g. `azd.ini`
    pub cache_file: String,
    /// Substring an accepted candidate path must contain
    pub marker: String,
}

/// Resolves the target binary using injected collaborators
pub struct Resolver<'a> {
    env: &'a dyn Environment,
    fs: &'a dyn FileSystem,
    diag: Diag,
}

impl<'a> Resolver<'a> {
    pub fn new(env: &'a dyn Environment, fs: &'a dyn FileSystem, diag: Diag) -> Self {
        Self { env, fs, diag }
    }

    /// Resolve the target path, consulting and filling the sidecar in `dir`
    pub fn resolve(&self, dir: &Path, options: &ResolveOptions) -> Result<PathBuf, LaunchError> {
        let sidecar = sidecar_path(dir, &options.cache_file);
        self.diag.note(format!("sidecar cache: {}", sidecar.display()));

        if let Some(cached) = read_cached_path(self.fs, &sidecar) {
            self.diag.note(format!("cache hit: {}", cached.display()));
            return Ok(cached);
        }
        self.diag.note("cache miss, scanning PATH");

        let found = self.scan_path(options).ok_or_else(|| LaunchError::TargetNotFound {
            binary: options.binary.clone(),
            cache_file: options.cache_file.clone(),
        })?;

        if let Err(err) = write_cached_path(self.fs, &sidecar, &found) {
            self.diag
                .warn(format!("could not write {}: {}", sidecar.display(), err));
        }

        Ok(found)
    }

    /// First PATH candidate that exists and contains the marker
    pub fn scan_path(&self, options: &ResolveOptions) -> Option<PathBuf> {
        for entry in self.env.path_entries() {
            let candidate = candidate_path(&entry, &options.binary);

            if !self.fs.exists(&candidate) {
                continue;
            }
            if !path_contains(&candidate, &options.marker) {
                self.diag.note(format!(
                    "skipping {} (path lacks \"{}\")",
                    candidate.display(),
                    options.marker
                ));
                continue;
            }

            self.diag.note(format!("found {}", candidate.display()));
            return Some(candidate);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::collections::{HashMap, HashSet};
    use std::ffi::OsString;
    use std::io;

    #[derive(Default)]
    struct FakeEnv {
        path: Vec<PathBuf>,
        reads: Cell<usize>,
    }

    impl FakeEnv {
        fn with_path(entries: &[&str]) -> Self {
            Self {
                path: entries.iter().map(PathBuf::from).collect(),
                reads: Cell::new(0),
            }
        }
    }

    impl Environment for FakeEnv {
        fn var_os(&self, _key: &str) -> Option<OsString> {
            self.reads.set(self.reads.get() + 1);
            std::env::join_paths(&self.path).ok()
        }
    }

    #[derive(Default)]
    struct FakeFs {
        existing: HashSet<PathBuf>,
        files: RefCell<HashMap<PathBuf, Vec<u8>>>,
        read_only: bool,
    }

    impl FakeFs {
        fn with_binaries(paths: &[&str]) -> Self {
            Self {
                existing: paths.iter().map(PathBuf::from).collect(),
                ..Default::default()
            }
        }

        fn content(&self, path: &str) -> Option<Vec<u8>> {
            self.files.borrow().get(Path::new(path)).cloned()
        }
    }

    impl FileSystem for FakeFs {
        fn exists(&self, path: &Path) -> bool {
            self.existing.contains(path) || self.files.borrow().contains_key(path)
        }

        fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
            self.files
                .borrow()
                .get(path)
                .cloned()
                .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
        }

        fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
            if self.read_only {
                return Err(io::Error::from(io::ErrorKind::PermissionDenied));
            }
            self.files
                .borrow_mut()
                .insert(path.to_path_buf(), contents.to_vec());
            Ok(())
        }
    }

    fn options() -> ResolveOptions {
        ResolveOptions {
            binary: "azd".to_string(),
            cache_file: "azd.ini".to_string(),
            marker: "Azure Dev CLI".to_string(),
        }
    }

    #[test]
    fn test_cache_hit_is_verbatim_and_skips_path() {
        let env = FakeEnv::with_path(&["/opt/Azure Dev CLI"]);
        let fs = FakeFs::default();
        fs.files.borrow_mut().insert(
            PathBuf::from("/launcher/azd.ini"),
            b"/does/not/exist/azd\n".to_vec(),
        );

        let resolver = Resolver::new(&env, &fs, Diag::default());
        let resolved = resolver.resolve(Path::new("/launcher"), &options()).unwrap();

        assert_eq!(resolved, PathBuf::from("/does/not/exist/azd"));
        assert_eq!(env.reads.get(), 0);
    }

    #[test]
    fn test_scan_takes_first_match_in_order() {
        let env = FakeEnv::with_path(&[
            "/usr/bin",
            "/opt/Azure Dev CLI/one",
            "/opt/Azure Dev CLI/two",
        ]);
        let fs = FakeFs::with_binaries(&[
            "/usr/bin/azd",
            "/opt/Azure Dev CLI/one/azd",
            "/opt/Azure Dev CLI/two/azd",
        ]);

        let resolver = Resolver::new(&env, &fs, Diag::default());
        let resolved = resolver.resolve(Path::new("/launcher"), &options()).unwrap();

        assert_eq!(resolved, PathBuf::from("/opt/Azure Dev CLI/one/azd"));
    }

    #[test]
    fn test_scan_requires_existence() {
        let env = FakeEnv::with_path(&["/opt/Azure Dev CLI/empty", "/opt/Azure Dev CLI/real"]);
        let fs = FakeFs::with_binaries(&["/opt/Azure Dev CLI/real/azd"]);

        let resolver = Resolver::new(&env, &fs, Diag::default());
        assert_eq!(
            resolver.scan_path(&options()),
            Some(PathBuf::from("/opt/Azure Dev CLI/real/azd"))
        );
    }

    #[test]
    fn test_scan_writes_sidecar() {
        let env = FakeEnv::with_path(&["/opt/Azure Dev CLI"]);
        let fs = FakeFs::with_binaries(&["/opt/Azure Dev CLI/azd"]);

        let resolver = Resolver::new(&env, &fs, Diag::default());
        resolver.resolve(Path::new("/launcher"), &options()).unwrap();

        assert_eq!(
            fs.content("/launcher/azd.ini").as_deref(),
            Some(&b"/opt/Azure Dev CLI/azd"[..])
        );
    }

    #[test]
    fn test_second_resolve_uses_cache() {
        let env = FakeEnv::with_path(&["/opt/Azure Dev CLI"]);
        let fs = FakeFs::with_binaries(&["/opt/Azure Dev CLI/azd"]);
        let resolver = Resolver::new(&env, &fs, Diag::default());

        resolver.resolve(Path::new("/launcher"), &options()).unwrap();
        let reads = env.reads.get();
        resolver.resolve(Path::new("/launcher"), &options()).unwrap();

        assert_eq!(env.reads.get(), reads);
    }

    #[test]
    fn test_marker_missing_is_not_found() {
        let env = FakeEnv::with_path(&["/usr/local/bin"]);
        let fs = FakeFs::with_binaries(&["/usr/local/bin/azd"]);

        let resolver = Resolver::new(&env, &fs, Diag::default());
        let err = resolver
            .resolve(Path::new("/launcher"), &options())
            .unwrap_err();

        assert!(matches!(
            err,
            LaunchError::TargetNotFound { ref binary, ref cache_file }
                if binary == "azd" && cache_file == "azd.ini"
        ));
        assert!(err.to_string().contains("`azd` not found in PATH"));
        assert_eq!(fs.content("/launcher/azd.ini"), None);
    }

    #[test]
    fn test_empty_path_is_not_found() {
        let env = FakeEnv::default();
        let fs = FakeFs::default();

        let resolver = Resolver::new(&env, &fs, Diag::default());
        assert!(resolver.resolve(Path::new("/launcher"), &options()).is_err());
    }

    #[test]
    fn test_empty_marker_accepts_any_existing_candidate() {
        let env = FakeEnv::with_path(&["/nothing", "/usr/local/bin"]);
        let fs = FakeFs::with_binaries(&["/usr/local/bin/azd"]);
        let mut opts = options();
        opts.marker.clear();

        let resolver = Resolver::new(&env, &fs, Diag::default());
        assert_eq!(
            resolver.resolve(Path::new("/launcher"), &opts).unwrap(),
            Path::new("/usr/local/bin/azd")
        );
    }

    #[test]
    fn test_write_failure_is_ignored() {
        let env = FakeEnv::with_path(&["/opt/Azure Dev CLI"]);
        let mut fs = FakeFs::with_binaries(&["/opt/Azure Dev CLI/azd"]);
        fs.read_only = true;

        let resolver = Resolver::new(&env, &fs, Diag::default());
        assert_eq!(
            resolver.resolve(Path::new("/launcher"), &options()).unwrap(),
            Path::new("/opt/Azure Dev CLI/azd")
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_cache_is_trusted_verbatim() {
        use std::os::unix::ffi::OsStrExt;

        let env = FakeEnv::with_path(&["/opt/Azure Dev CLI"]);
        let fs = FakeFs::with_binaries(&["/opt/Azure Dev CLI/azd"]);
        fs.files
            .borrow_mut()
            .insert(PathBuf::from("/launcher/azd.ini"), b"/opt/caf\xe9/azd".to_vec());

        let resolver = Resolver::new(&env, &fs, Diag::default());
        let resolved = resolver.resolve(Path::new("/launcher"), &options()).unwrap();

        assert_eq!(resolved.as_os_str().as_bytes(), b"/opt/caf\xe9/azd");
        assert_eq!(env.reads.get(), 0);
        assert_eq!(
            fs.content("/launcher/azd.ini").as_deref(),
            Some(&b"/opt/caf\xe9/azd"[..])
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_path_entry_is_cached_exactly() {
        use std::os::unix::ffi::{OsStrExt, OsStringExt};

        let entry = PathBuf::from(OsString::from_vec(b"/opt/caf\xe9/Azure Dev CLI".to_vec()));
        let binary = entry.join("azd");
        let env = FakeEnv {
            path: vec![entry],
            reads: Cell::new(0),
        };
        let fs = FakeFs {
            existing: HashSet::from([binary.clone()]),
            ..Default::default()
        };

        let resolver = Resolver::new(&env, &fs, Diag::default());
        let resolved = resolver.resolve(Path::new("/launcher"), &options()).unwrap();

        assert_eq!(resolved, binary);
        assert_eq!(
            fs.content("/launcher/azd.ini").as_deref(),
            Some(binary.as_os_str().as_bytes())
        );
    }
}
