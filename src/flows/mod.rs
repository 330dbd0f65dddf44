//! Flows module - The launcher sequence built from core, cache and backends
//!
//! - resolve: locate the target binary (sidecar cache, then PATH)
//! - launch: build the command line and run it

pub mod launch;
pub mod resolve;
