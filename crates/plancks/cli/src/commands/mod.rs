//! CLI command implementations

pub mod services;
