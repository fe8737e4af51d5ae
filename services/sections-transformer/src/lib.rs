//! Sections Transformer - TME sections taxonomy lookup service
//!
//! Serves the TME "Sections" taxonomy over HTTP. Every raw term is
//! turned into a section with a deterministic, content-derived UUID,
//! so identifiers stay stable across reloads.
//!
//! # Architecture
//!
//! - **core**: Domain logic (protocol-agnostic)
//!   - config, error, types
//!   - transformer (term to section, id derivation)
//!   - source (taxonomy source trait, TME HTTP client)
//!   - store (immutable snapshots, atomic reload)
//!   - services (unified service container)
//!
//! - **http**: REST adapter (depends on core)
//!   - handlers, middleware, error mapping
//!
//! # Key Features
//!
//! - Lock-free reads against an immutable snapshot
//! - Reloads build off to the side and publish with one atomic swap
//! - A failed reload keeps serving the last good snapshot
//! - Health and good-to-go probes driven by TME connectivity

// Core domain logic (protocol-agnostic)
pub mod core;

// HTTP REST adapter
pub mod http;

// Re-export commonly used types for convenience
pub use crate::core::config::Config;
pub use crate::core::error::{Result, TransformerError};
pub use crate::core::services::Services;
pub use crate::core::source::{HttpTaxonomySource, TaxonomySource};
pub use crate::core::store::{SectionSnapshot, SectionStore};
pub use crate::core::transformer::transform;
pub use crate::core::types::*;
