//! Cache module - Manages the sidecar path cache next to the launcher
//!
//! The cache is a single line of text: the resolved target path.

pub mod store;
