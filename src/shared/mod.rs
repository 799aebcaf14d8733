//! Shared Module
//!
//! This module contains types used by both the identity core and the HTTP
//! backend: configuration and shared error types.

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use error::SharedError;
pub use config::{AppConfig, AppConfigBuilder, ConfigError, Environment};
