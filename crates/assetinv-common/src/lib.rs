//! AssetInv Common - Shared utilities: logging, configuration
//!
//! This crate provides common functionality used across the AssetInv crates.

pub mod config;
pub mod logging;

pub use config::{ComponentConfig, Config, ConfigBuilder, LoggingConfig};
pub use logging::{init_logging, LogFormat};
