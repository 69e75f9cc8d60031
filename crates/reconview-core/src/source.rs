//! Where reconciliation data comes from.
//!
//! The page only knows this trait; the HTTP implementation lives in the
//! server crate and tests plug in fixed responses.

use async_trait::async_trait;

use crate::error::Result;
use crate::model::ReconciliationResponse;

#[async_trait]
pub trait ReconciliationSource: Send + Sync {
    /// Performs one fetch. Implementations must not retry.
    async fn fetch(&self) -> Result<ReconciliationResponse>;
}

/// Source that always yields the same outcome.
#[derive(Debug, Clone)]
pub struct StaticSource {
    outcome: Result<ReconciliationResponse>,
}

impl StaticSource {
    pub fn new(outcome: Result<ReconciliationResponse>) -> Self {
        Self { outcome }
    }

    pub fn ok(response: ReconciliationResponse) -> Self {
        Self::new(Ok(response))
    }
}

#[async_trait]
impl ReconciliationSource for StaticSource {
    async fn fetch(&self) -> Result<ReconciliationResponse> {
        self.outcome.clone()
    }
}
