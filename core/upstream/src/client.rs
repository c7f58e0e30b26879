//! Production upstream client backed by reqwest.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::future;
use reqwest::{Client, StatusCode};
use tokio::sync::Semaphore;
use tracing::{debug, warn};

use herodex_common::{CharacterRecord, Error, Result};

use crate::auth::signature_params;
use crate::fetcher::Fetcher;
use crate::models::{ApiError, Envelope, UPSTREAM_TIME_FORMAT};

/// Configuration for the upstream client.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// Base URL of the upstream API, without a trailing slash.
    pub base_url: String,
    /// Public half of the API key pair.
    pub public_key: String,
    /// Private half of the API key pair.
    pub private_key: String,
    /// Page size for batch retrieval.
    pub page_size: usize,
    /// Maximum number of trailing page requests in flight at once.
    pub max_concurrent_pages: usize,
    /// Per-call transport timeout.
    pub timeout: Duration,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            public_key: String::new(),
            private_key: String::new(),
            page_size: 100,
            max_concurrent_pages: 8,
            timeout: Duration::from_secs(15),
        }
    }
}

/// Upstream catalog API client.
pub struct ApiClient {
    config: UpstreamConfig,
    http: Client,
}

impl ApiClient {
    /// Create a new client from the given configuration.
    pub fn new(config: UpstreamConfig) -> Self {
        let http = Client::builder()
            .user_agent("Herodex/0.1")
            .timeout(config.timeout)
            .build()
            .expect("failed to build HTTP client");

        Self { config, http }
    }

    /// Issue a GET against `path` with the signature parameters plus
    /// `params`, and decode the response envelope.
    async fn get_envelope(&self, path: &str, params: &[(String, String)]) -> Result<Envelope> {
        let url = format!("{}{}", self.config.base_url, path);
        let auth = signature_params(&self.config.public_key, &self.config.private_key, Utc::now());

        debug!(path, "requesting upstream");

        let response = self
            .http
            .get(&url)
            .query(&auth)
            .query(params)
            .send()
            .await
            .map_err(|e| Error::Transport(format!("upstream request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail: ApiError = serde_json::from_str(&body).unwrap_or_default();
            warn!(
                status = %status,
                upstream_status = %detail.status,
                message = %detail.message,
                "error response from upstream"
            );

            if status == StatusCode::NOT_FOUND {
                return Err(Error::NotFound("no results".to_string()));
            }

            return Err(Error::BadGateway(format!(
                "upstream returned {status}: {}",
                detail.message
            )));
        }

        response
            .json::<Envelope>()
            .await
            .map_err(|e| Error::Decode(format!("invalid upstream envelope: {e}")))
    }

    /// Fetch one page of the batch at the given offset.
    async fn fetch_page(
        &self,
        base_params: &[(String, String)],
        offset: usize,
    ) -> Result<Vec<CharacterRecord>> {
        let mut params = base_params.to_vec();
        params.push(("offset".to_string(), offset.to_string()));

        let envelope = self.get_envelope("/entities", &params).await?;
        decode_results(envelope.data.results)
    }
}

#[async_trait]
impl Fetcher for ApiClient {
    async fn fetch_batch(
        &self,
        modified_since: Option<DateTime<Utc>>,
    ) -> Result<Vec<CharacterRecord>> {
        let page_size = self.config.page_size;

        let mut params = vec![
            ("limit".to_string(), page_size.to_string()),
            ("orderBy".to_string(), "-modified".to_string()),
        ];
        if let Some(cutoff) = modified_since {
            params.push((
                "modifiedSince".to_string(),
                cutoff.format(UPSTREAM_TIME_FORMAT).to_string(),
            ));
        }

        // The first page is fetched synchronously; its leading record is
        // the most recently modified one in the whole result set, which is
        // what the caller uses for watermark computation.
        let first = self.get_envelope("/entities", &params).await?;
        let total = first.data.total;
        let mut records = decode_results(first.data.results)?;

        if total > page_size {
            debug!(total, page_size, "fanning out for trailing pages");

            let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent_pages));
            let pages = (page_size..total).step_by(page_size).map(|offset| {
                let semaphore = Arc::clone(&semaphore);
                let params = &params;
                async move {
                    let _permit = semaphore
                        .acquire_owned()
                        .await
                        .map_err(|_| Error::Transport("page fan-out aborted".to_string()))?;
                    self.fetch_page(params, offset).await
                }
            });

            // Fail-fast: the first page error aborts the whole batch and
            // already collected pages are discarded.
            let trailing = future::try_join_all(pages).await?;
            for page in trailing {
                records.extend(page);
            }
        }

        Ok(records)
    }

    async fn fetch_one(&self, id: u64) -> Result<CharacterRecord> {
        let params = vec![("limit".to_string(), "1".to_string())];
        let envelope = self.get_envelope(&format!("/entities/{id}"), &params).await?;

        let raw = envelope
            .data
            .results
            .into_iter()
            .next()
            .ok_or_else(|| Error::NotFound(format!("character {id} not found")))?;

        CharacterRecord::try_from(raw)
    }
}

fn decode_results(results: Vec<crate::models::ApiCharacter>) -> Result<Vec<CharacterRecord>> {
    results.into_iter().map(CharacterRecord::try_from).collect()
}
