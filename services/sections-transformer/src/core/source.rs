//! Taxonomy source clients
//!
//! The store only depends on the [`TaxonomySource`] trait. The
//! production implementation talks to the TME REST API over HTTP.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::core::config::SourceConfig;
use crate::core::error::{Result, TransformerError};
use crate::core::types::RawTerm;

/// Supplier of raw taxonomy terms
#[async_trait]
pub trait TaxonomySource: Send + Sync {
    /// Fetch every term of the named taxonomy
    async fn fetch_terms(&self, taxonomy_name: &str) -> Result<Vec<RawTerm>>;

    /// Lightweight connectivity probe
    async fn ping(&self) -> Result<()>;
}

/// TME REST client
///
/// Terms are read page by page from
/// `{base_url}/rs/authorities/{taxonomy}/terms` until a short page
/// comes back.
pub struct HttpTaxonomySource {
    client: Client,
    base_url: String,
    taxonomy_name: String,
    page_size: usize,
    credentials: Option<(String, String)>,
}

impl HttpTaxonomySource {
    /// Create a client from the source configuration
    pub fn new(config: &SourceConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_sec))
            .build()
            .map_err(|e| TransformerError::ConfigError(format!("Failed to build HTTP client: {e}")))?;

        let credentials = match (&config.username, &config.password) {
            (Some(user), password) => Some((user.clone(), password.clone().unwrap_or_default())),
            (None, _) => None,
        };

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            taxonomy_name: config.taxonomy_name.clone(),
            page_size: config.page_size,
            credentials,
        })
    }

    fn terms_url(&self, taxonomy_name: &str) -> String {
        format!("{}/rs/authorities/{}/terms", self.base_url, taxonomy_name)
    }

    async fn get_page(&self, taxonomy_name: &str, limit: usize, offset: usize) -> Result<reqwest::Response> {
        let mut request = self
            .client
            .get(self.terms_url(taxonomy_name))
            .query(&[("maximumResults", limit), ("offset", offset)]);

        if let Some((user, password)) = &self.credentials {
            request = request.basic_auth(user, Some(password));
        }

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransformerError::SourceUnavailable(format!(
                "TME returned status {status} for {taxonomy_name} (offset {offset})"
            )));
        }

        Ok(response)
    }

    /// Fetch one page, returning the decoded terms and the number of
    /// items the server sent
    async fn fetch_page(&self, taxonomy_name: &str, offset: usize) -> Result<(Vec<RawTerm>, usize)> {
        let response = self.get_page(taxonomy_name, self.page_size, offset).await?;

        let items: Vec<serde_json::Value> = response.json().await.map_err(|e| {
            TransformerError::SourceUnavailable(format!("Undecodable TME page at offset {offset}: {e}"))
        })?;

        let received = items.len();
        Ok((decode_terms(items), received))
    }
}

/// Decode a page item by item, skipping the ones that are not terms
fn decode_terms(items: Vec<serde_json::Value>) -> Vec<RawTerm> {
    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<RawTerm>(item) {
            Ok(term) => Some(term),
            Err(e) => {
                let err = TransformerError::TransformFailure(e.to_string());
                tracing::warn!(error = %err, "Skipping malformed TME term");
                None
            }
        })
        .collect()
}

#[async_trait]
impl TaxonomySource for HttpTaxonomySource {
    async fn fetch_terms(&self, taxonomy_name: &str) -> Result<Vec<RawTerm>> {
        let mut terms = Vec::new();
        let mut offset = 0;

        loop {
            let (page, received) = self.fetch_page(taxonomy_name, offset).await?;
            tracing::debug!(taxonomy = taxonomy_name, offset, received, "Fetched TME page");

            terms.extend(page);
            offset += received;

            if received < self.page_size {
                break;
            }
        }

        Ok(terms)
    }

    async fn ping(&self) -> Result<()> {
        self.get_page(&self.taxonomy_name, 1, 0).await.map(|_| ())
    }
}
