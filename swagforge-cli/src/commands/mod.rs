//! CLI command implementations.

pub mod swagger;
