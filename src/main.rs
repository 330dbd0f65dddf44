//! azd - a launcher shim for the Azure Developer CLI
//!
//! azd provides:
//! - Lookup of the real azd binary on PATH, memoized in a sidecar file
//! - Transparent forwarding of every argument to it
//! - Dispatch of `azd ai ...` to the separate `ai` binary
//! - Exit status propagation from the forwarded program

use std::ffi::OsString;
use std::process;

mod backends;
mod cache;
mod cli;
mod core;
mod flows;

fn main() {
    let args: Vec<OsString> = std::env::args_os().skip(1).collect();

    match cli::run(args) {
        Ok(code) => process::exit(code),
        Err(err) => {
            eprintln!("Error: {err:#}");
            process::exit(1);
        }
    }
}
