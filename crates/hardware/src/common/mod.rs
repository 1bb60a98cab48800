//! Common types shared across the simulator.

/// Error types for configuration validation and program loading.
pub mod error;

pub use error::{ConfigError, LoadError};
