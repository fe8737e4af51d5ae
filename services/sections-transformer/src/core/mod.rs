//! Core domain logic (protocol-agnostic)
//!
//! This module contains all business logic that is independent
//! of the HTTP transport.
//!
//! # Architecture
//!
//! - **config**: Configuration loading (TOML + environment)
//! - **error**: Error types and Result alias
//! - **types**: Raw terms, sections, response shapes
//! - **transformer**: Term to section conversion and id derivation
//! - **source**: Taxonomy source trait and TME HTTP client
//! - **store**: Snapshot cache with atomic reload
//! - **services**: Unified service container

pub mod config;
pub mod error;
pub mod services;
pub mod source;
pub mod store;
pub mod transformer;
pub mod types;

// Re-export key types for convenience
pub use config::Config;
pub use error::{Result, TransformerError};
pub use services::Services;
