//! Unified service container for the sections transformer
//!
//! Provides shared access to the configuration and the section store.

use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::source::{HttpTaxonomySource, TaxonomySource};
use crate::core::store::SectionStore;
use std::sync::Arc;

/// Unified services container
///
/// The HTTP adapter and the binary share this struct.
#[derive(Clone)]
pub struct Services {
    /// Section cache backed by the taxonomy source
    pub store: Arc<SectionStore>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl Services {
    /// Create services talking to TME over HTTP
    pub fn new(config: Config) -> Result<Self> {
        let source = Arc::new(HttpTaxonomySource::new(&config.source)?);
        Ok(Self::with_source(config, source))
    }

    /// Create services on top of an arbitrary taxonomy source
    pub fn with_source(config: Config, source: Arc<dyn TaxonomySource>) -> Self {
        let store = Arc::new(SectionStore::new(source, config.source.taxonomy_name.clone()));

        Self {
            store,
            config: Arc::new(config),
        }
    }

    /// Run the TME connectivity check
    ///
    /// Returns the human-readable check output alongside the result.
    pub async fn check_tme(&self) -> (String, Result<()>) {
        match self.store.check_connectivity().await {
            Ok(()) => ("Connectivity to TME is ok".to_string(), Ok(())),
            Err(e) => (format!("Error connecting to TME: {e}"), Err(e)),
        }
    }
}
