//! Command-line assembly
//!
//! Forwarded arguments are joined into a single OS string for the OS shell.
//! Argument bytes are never re-encoded; quoting only inserts ASCII.

use std::ffi::{OsStr, OsString};

use crate::core::model::Dispatch;

/// Quote an argument if it contains whitespace or a double quote.
///
/// Quoting wraps the argument in `"` and escapes embedded quotes as `\"`.
/// Anything else, including the empty string, is returned unchanged.
pub fn quote_arg(arg: &OsStr) -> OsString {
    // U+FFFD stands in for undecodable bytes and is neither whitespace nor a quote
    let needs_quotes = arg
        .to_string_lossy()
        .chars()
        .any(|c| c.is_whitespace() || c == '"');
    if !needs_quotes {
        return arg.to_os_string();
    }

    let mut quoted = OsString::with_capacity(arg.len() + 2);
    quoted.push("\"");
    quoted.push(escape_quotes(arg));
    quoted.push("\"");
    quoted
}

#[cfg(unix)]
fn escape_quotes(arg: &OsStr) -> OsString {
    use std::os::unix::ffi::{OsStrExt, OsStringExt};

    let mut escaped = Vec::with_capacity(arg.len());
    for &b in arg.as_bytes() {
        if b == b'"' {
            escaped.push(b'\\');
        }
        escaped.push(b);
    }
    OsString::from_vec(escaped)
}

#[cfg(windows)]
fn escape_quotes(arg: &OsStr) -> OsString {
    use std::os::windows::ffi::{OsStrExt, OsStringExt};

    let mut escaped = Vec::with_capacity(arg.len());
    for unit in arg.encode_wide() {
        if unit == u16::from(b'"') {
            escaped.push(u16::from(b'\\'));
        }
        escaped.push(unit);
    }
    OsString::from_wide(&escaped)
}

/// Build the shell command line for a dispatch decision
pub fn build_command_line(dispatch: &Dispatch<'_>) -> OsString {
    let (mut line, args) = match dispatch {
        Dispatch::Target { path, args } => {
            let mut line = OsString::from("\"");
            line.push(path);
            line.push("\"");
            (line, *args)
        }
        Dispatch::Alternate { program, args } => (OsString::from(program), *args),
    };

    for arg in args {
        line.push(" ");
        line.push(quote_arg(arg));
    }

    line
}
