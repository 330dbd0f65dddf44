//! Backends module - Operating-system collaborators
//!
//! Provides:
//! - env: environment variable access (PATH)
//! - fs: filesystem access for the sidecar and PATH candidates
//! - process: self-location and shell execution

pub mod env;
pub mod fs;
pub mod process;
