//! Core data types for the sections transformer.
//!
//! Raw TME terms, transformed sections, reload statistics, and the
//! response shapes shared by the HTTP adapter.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fixed type literal carried by every section
pub const SECTION_TYPE: &str = "Section";

/// A single term as delivered by the taxonomy source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTerm {
    /// Human-readable term name
    #[serde(rename = "canonicalName")]
    pub canonical_name: String,

    /// Opaque TME identifier, unique only within one taxonomy
    #[serde(rename = "id", alias = "rawID")]
    pub raw_id: String,
}

impl RawTerm {
    pub fn new(canonical_name: impl Into<String>, raw_id: impl Into<String>) -> Self {
        Self {
            canonical_name: canonical_name.into(),
            raw_id: raw_id.into(),
        }
    }
}

/// Identifiers under which a section is known outside this service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlternativeIdentifiers {
    /// Reversible TME provenance tokens
    #[serde(rename = "TME", default, skip_serializing_if = "Vec::is_empty")]
    pub tme: Vec<String>,

    /// Derived UUIDs (currently always the section id)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub uuids: Vec<String>,
}

/// A section as served by this service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Deterministic identifier derived from taxonomy and raw id
    #[serde(rename = "uuid")]
    pub id: String,

    #[serde(rename = "prefLabel")]
    pub pref_label: String,

    #[serde(rename = "alternativeIdentifiers")]
    pub alternative_identifiers: AlternativeIdentifiers,

    #[serde(rename = "type")]
    pub section_type: String,
}

/// Statistics from a successful reload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReloadStats {
    /// Terms returned by the source
    pub terms_fetched: usize,

    /// Sections published in the new snapshot
    pub sections_loaded: usize,

    /// Terms dropped because their id was already taken
    pub duplicates_skipped: usize,

    /// Reload duration in milliseconds
    pub duration_ms: u64,

    /// Build time of the published snapshot
    pub loaded_at: DateTime<Utc>,
}

/// Line item of the `__ids` listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionId {
    pub id: String,
}

/// JSON error body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

/// A single health check result
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheck {
    pub id: String,
    pub name: String,
    pub ok: bool,
    pub severity: u8,
    pub business_impact: String,
    pub technical_summary: String,
    pub panic_guide: String,
    pub check_output: String,
    pub last_updated: DateTime<Utc>,
}

/// Health report returned by `/__health`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub schema_version: u8,
    pub system_code: String,
    pub name: String,
    pub description: String,
    pub ok: bool,
    pub checks: Vec<HealthCheck>,
}
