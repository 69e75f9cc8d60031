//! HTTP client for the reconciliation API.
//!
//! One plain `GET` per call: no body, no query parameters, no auth headers,
//! no retries. Every failure is mapped onto [`FetchError`] so the page can
//! render it inline.

use std::time::Duration;

use async_trait::async_trait;
use reconview_core::{FetchError, ReconciliationResponse, ReconciliationSource};
use url::Url;

use crate::config::UpstreamConfig;

/// [`ReconciliationSource`] backed by a live HTTP endpoint.
#[derive(Debug, Clone)]
pub struct HttpReconciliationSource {
    http_client: reqwest::Client,
    endpoint: Url,
}

impl HttpReconciliationSource {
    /// Builds a client with a whole-request timeout.
    pub fn new(endpoint: Url, timeout: Duration) -> anyhow::Result<Self> {
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            endpoint,
        })
    }

    pub fn from_config(cfg: &UpstreamConfig) -> anyhow::Result<Self> {
        let endpoint = Url::parse(&cfg.endpoint)?;
        Self::new(endpoint, cfg.timeout())
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl ReconciliationSource for HttpReconciliationSource {
    async fn fetch(&self) -> reconview_core::Result<ReconciliationResponse> {
        tracing::debug!(endpoint = %self.endpoint, "Fetching reconciliation data");

        let response = self
            .http_client
            .get(self.endpoint.as_str())
            .send()
            .await
            .map_err(|e| {
                tracing::debug!(endpoint = %self.endpoint, error = %e, "Reconciliation request failed");
                FetchError::from_error_chain(&e)
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(
                endpoint = %self.endpoint,
                http.status = status.as_u16(),
                "Reconciliation API returned non-success status"
            );
            return Err(FetchError::status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::from_error_chain(&e))?;

        let decoded = ReconciliationResponse::from_slice(&body).inspect_err(|e| {
            tracing::debug!(endpoint = %self.endpoint, error = %e, "Reconciliation response could not be decoded");
        })?;

        tracing::debug!(rows = decoded.records().len(), "Reconciliation data decoded");
        Ok(decoded)
    }
}
