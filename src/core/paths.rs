//! Path helpers for the launcher
//!
//! Self-location, the sidecar cache location, and raw conversions between
//! OS strings and the bytes stored in the sidecar.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// Directory portion of an executable path, `.` when there is none
pub fn exe_dir(exe: Option<&Path>) -> PathBuf {
    exe.and_then(Path::parent)
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Location of the sidecar cache file
pub fn sidecar_path(dir: &Path, cache_file: &str) -> PathBuf {
    dir.join(cache_file)
}

/// Candidate target location inside one PATH entry
pub fn candidate_path(entry: &Path, binary: &str) -> PathBuf {
    entry.join(binary)
}

/// Whether the path text contains `needle`, compared byte for byte
pub fn path_contains(path: &Path, needle: &str) -> bool {
    let haystack = path.as_os_str().as_encoded_bytes();
    let needle = needle.as_bytes();
    needle.is_empty() || haystack.windows(needle.len()).any(|window| window == needle)
}

/// OS string for bytes read from the sidecar
#[cfg(unix)]
pub fn os_from_bytes(bytes: Vec<u8>) -> OsString {
    use std::os::unix::ffi::OsStringExt;
    OsString::from_vec(bytes)
}

/// OS string for bytes read from the sidecar
#[cfg(windows)]
pub fn os_from_bytes(bytes: Vec<u8>) -> OsString {
    match String::from_utf8(bytes) {
        Ok(text) => OsString::from(text),
        Err(err) => OsString::from(String::from_utf8_lossy(err.as_bytes()).into_owned()),
    }
}

/// Bytes to store in the sidecar for an OS string
#[cfg(unix)]
pub fn os_to_bytes(value: &OsStr) -> Vec<u8> {
    use std::os::unix::ffi::OsStrExt;
    value.as_bytes().to_vec()
}

/// Bytes to store in the sidecar for an OS string
#[cfg(windows)]
pub fn os_to_bytes(value: &OsStr) -> Vec<u8> {
    value.to_string_lossy().into_owned().into_bytes()
}
