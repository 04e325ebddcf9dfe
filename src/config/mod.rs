//! Configuration module for search-tree sessions
//!
//! This module provides the `ExplorerConfig` struct and its type-safe builder
//! for configuring the backend connection and per-call-site request sizes.

// Sub-modules
pub mod builder;
pub mod getters;
pub mod methods;
pub mod types;

// Re-exports for public API
pub use builder::{ExplorerConfigBuilder, WithBackendUrl};
pub use types::ExplorerConfig;
