//! Shared Module
//!
//! Types that are independent of the HTTP layer and the storage engine.
//! Currently this is the application configuration, which is consumed by the
//! server binary and by tests that build an application in-process.

/// Application configuration
pub mod config;

pub use config::{AppConfig, AppConfigBuilder, ConfigError};
