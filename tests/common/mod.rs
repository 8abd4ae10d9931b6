//! Common test utilities and helpers
//!
//! This module provides shared utilities for the integration tests:
//! - An in-memory test application driven through `tower::ServiceExt::oneshot`
//! - Authentication test helpers
//! - Fixture payloads

#![allow(dead_code)]

pub mod app;
pub mod auth_helpers;
pub mod fixtures;

// Re-export commonly used utilities
pub use app::*;
pub use auth_helpers::*;
pub use fixtures::*;
