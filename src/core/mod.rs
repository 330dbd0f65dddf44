//! Core module - Launcher model and pure helpers
//!
//! This module provides:
//! - Default names and typed launch errors
//! - Self-location and sidecar path helpers
//! - Argument quoting and command-line assembly
//! - Verbose diagnostics

pub mod diag;
pub mod model;
pub mod paths;
pub mod quote;
