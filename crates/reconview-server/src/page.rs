use std::sync::Arc;

use reconview_core::{HtmlRenderer, PageRenderer, ReconciliationSource, ReconciliationView};

use crate::client::HttpReconciliationSource;
use crate::config::AppConfig;

/// The reconciliation page: one fetch, one view, one document per call.
///
/// Holds no per-request state, so a single instance is shared by all handlers.
#[derive(Clone)]
pub struct ReconciliationPage {
    source: Arc<dyn ReconciliationSource>,
    renderer: Arc<dyn PageRenderer>,
}

impl ReconciliationPage {
    pub fn new(source: Arc<dyn ReconciliationSource>, renderer: Arc<dyn PageRenderer>) -> Self {
        Self { source, renderer }
    }

    /// HTTP source and HTML renderer, both taken from configuration.
    pub fn from_config(cfg: &AppConfig) -> anyhow::Result<Self> {
        let source = HttpReconciliationSource::from_config(&cfg.upstream)?;
        tracing::info!(endpoint = %source.endpoint(), timeout_ms = cfg.upstream.timeout_ms, "Reconciliation source configured");
        Ok(Self::new(
            Arc::new(source),
            Arc::new(HtmlRenderer::new(cfg.page.title.clone())),
        ))
    }

    /// Fetches and shapes the data without rendering it.
    pub async fn view(&self) -> ReconciliationView {
        let view = ReconciliationView::from_outcome(self.source.fetch().await);
        match &view {
            ReconciliationView::Table(rows) => tracing::debug!(rows = rows.len(), "Rendering reconciliation table"),
            ReconciliationView::Empty => tracing::debug!("No reconciliation data"),
            ReconciliationView::Failed(failure) => {
                tracing::warn!(kind = %failure.kind, error = %failure.message, "Reconciliation data unavailable")
            }
        }
        view
    }

    /// Complete document for the current upstream state. Never fails.
    pub async fn render(&self) -> String {
        let view = self.view().await;
        self.renderer.render(&view)
    }
}
