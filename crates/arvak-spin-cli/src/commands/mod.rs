//! CLI command implementations.

pub mod build;
pub mod common;
pub mod nn;
pub mod power_law;
pub mod version;
