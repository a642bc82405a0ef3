//! Configuration utilities.

/// Layered configuration loading (TOML file + environment overrides).
pub mod config;
