//! Configuration management for proofstore
//!
//! Settings live in ~/.proofstore/config.toml and can be overridden by
//! environment variables and command-line flags.

pub mod settings;

// Re-export commonly used items
pub use settings::{ClientConfig, Config, StoreConfig};
