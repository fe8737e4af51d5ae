//! In-memory section store
//!
//! Holds the current immutable [`SectionSnapshot`] behind an
//! [`ArcSwapOption`]. Readers load the published pointer and never
//! wait on a reload; a reload builds a complete replacement snapshot
//! off to the side and publishes it with a single swap.
//!
//! Only one reload runs at a time. A reload requested while another
//! one is in flight is rejected with
//! [`TransformerError::ReloadInProgress`] rather than queued.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use arc_swap::ArcSwapOption;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::core::error::{Result, TransformerError};
use crate::core::source::TaxonomySource;
use crate::core::transformer::transform;
use crate::core::types::{RawTerm, ReloadStats, Section};

/// One fully built, immutable set of sections
#[derive(Debug)]
pub struct SectionSnapshot {
    by_id: HashMap<String, Section>,
    ordered_ids: Vec<String>,
    duplicates_skipped: usize,
    loaded_at: DateTime<Utc>,
}

impl SectionSnapshot {
    /// Transform `terms` and index the resulting sections
    ///
    /// When two terms derive the same id the first one wins and the
    /// later ones are counted as duplicates.
    pub fn build(terms: &[RawTerm], taxonomy_name: &str) -> Self {
        let mut by_id = HashMap::with_capacity(terms.len());
        let mut ordered_ids = Vec::with_capacity(terms.len());
        let mut duplicates_skipped = 0;

        for term in terms {
            let section = transform(term, taxonomy_name);

            if by_id.contains_key(&section.id) {
                duplicates_skipped += 1;
                tracing::warn!(
                    raw_id = %term.raw_id,
                    uuid = %section.id,
                    "Duplicate section id, keeping first occurrence"
                );
                continue;
            }

            ordered_ids.push(section.id.clone());
            by_id.insert(section.id.clone(), section);
        }

        Self {
            by_id,
            ordered_ids,
            duplicates_skipped,
            loaded_at: Utc::now(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&Section> {
        self.by_id.get(id)
    }

    /// Sections in snapshot order
    pub fn sections(&self) -> Vec<Section> {
        self.ordered_ids
            .iter()
            .filter_map(|id| self.by_id.get(id).cloned())
            .collect()
    }

    pub fn ids(&self) -> &[String] {
        &self.ordered_ids
    }

    pub fn len(&self) -> usize {
        self.ordered_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered_ids.is_empty()
    }

    pub fn duplicates_skipped(&self) -> usize {
        self.duplicates_skipped
    }

    /// When this snapshot was built
    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

/// Cache of the sections taxonomy with atomic reload
pub struct SectionStore {
    source: Arc<dyn TaxonomySource>,
    taxonomy_name: String,
    current: ArcSwapOption<SectionSnapshot>,
    reload_guard: Mutex<()>,
}

impl SectionStore {
    /// Create an empty (never loaded) store
    pub fn new(source: Arc<dyn TaxonomySource>, taxonomy_name: impl Into<String>) -> Self {
        Self {
            source,
            taxonomy_name: taxonomy_name.into(),
            current: ArcSwapOption::empty(),
            reload_guard: Mutex::new(()),
        }
    }

    pub fn taxonomy_name(&self) -> &str {
        &self.taxonomy_name
    }

    /// Current snapshot, or `None` if the store was never loaded
    ///
    /// Use this when several reads must agree with each other.
    pub fn snapshot(&self) -> Option<Arc<SectionSnapshot>> {
        self.current.load_full()
    }

    /// All sections; `None` only before the first successful reload
    pub fn get_all(&self) -> Option<Vec<Section>> {
        self.snapshot().map(|snap| snap.sections())
    }

    pub fn get_by_id(&self, id: &str) -> Option<Section> {
        let current = self.current.load();
        (*current).as_deref()?.get(id).cloned()
    }

    pub fn get_count(&self) -> usize {
        let current = self.current.load();
        (*current).as_deref().map_or(0, SectionSnapshot::len)
    }

    pub fn get_ids(&self) -> Vec<String> {
        let current = self.current.load();
        (*current)
            .as_deref()
            .map(|snap| snap.ids().to_vec())
            .unwrap_or_default()
    }

    pub fn is_loaded(&self) -> bool {
        self.current.load().is_some()
    }

    /// Fetch, transform and publish a new snapshot
    ///
    /// # Errors
    ///
    /// - `ReloadInProgress`: another reload holds the guard
    /// - `SourceUnavailable`: the fetch failed; the previous snapshot
    ///   stays current
    pub async fn reload(&self) -> Result<ReloadStats> {
        let _guard = self
            .reload_guard
            .try_lock()
            .map_err(|_| TransformerError::ReloadInProgress)?;

        let start = Instant::now();
        tracing::info!(taxonomy = %self.taxonomy_name, "Reloading sections from TME");

        let terms = self.source.fetch_terms(&self.taxonomy_name).await?;
        let snapshot = SectionSnapshot::build(&terms, &self.taxonomy_name);

        let stats = ReloadStats {
            terms_fetched: terms.len(),
            sections_loaded: snapshot.len(),
            duplicates_skipped: snapshot.duplicates_skipped(),
            duration_ms: start.elapsed().as_millis() as u64,
            loaded_at: snapshot.loaded_at(),
        };

        self.current.store(Some(Arc::new(snapshot)));

        tracing::info!(
            taxonomy = %self.taxonomy_name,
            terms_fetched = stats.terms_fetched,
            sections_loaded = stats.sections_loaded,
            duplicates_skipped = stats.duplicates_skipped,
            duration_ms = stats.duration_ms,
            "Sections reloaded"
        );

        Ok(stats)
    }

    /// Probe the taxonomy source without touching the snapshot
    pub async fn check_connectivity(&self) -> Result<()> {
        self.source.ping().await
    }
}
