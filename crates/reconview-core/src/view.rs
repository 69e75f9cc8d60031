//! View-model for the reconciliation page.
//!
//! A fetch outcome is turned into exactly one of three shapes: a table of
//! rows, an empty notice, or a failure notice. Renderers only ever see this
//! type, so the page and the JSON API agree on every decision made here.

use serde::Serialize;

use crate::error::{FetchError, FetchErrorKind};
use crate::model::{ReconciliationRecord, ReconciliationResponse};

/// Shown in the PO column when the upstream sent no purchase order.
pub const PO_PLACEHOLDER: &str = "—";

/// Fixed table header, in column order.
pub const TABLE_HEADER: [&str; 5] = ["Invoice No", "Vendor", "Amount", "Status", "PO No"];

/// One table row, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowView {
    /// CSS class for the `<tr>`: the status lower-cased, nothing else.
    pub class: String,
    pub invoice_number: String,
    pub vendor: String,
    pub amount: String,
    /// Status exactly as received.
    pub status: String,
    /// PO number, or [`PO_PLACEHOLDER`].
    pub po_number: String,
}

impl From<&ReconciliationRecord> for RowView {
    fn from(record: &ReconciliationRecord) -> Self {
        Self {
            class: status_class(&record.status),
            invoice_number: record.invoice_number.clone(),
            vendor: record.vendor.clone(),
            amount: record.amount.to_string(),
            status: record.status.clone(),
            po_number: record
                .po_number
                .clone()
                .unwrap_or_else(|| PO_PLACEHOLDER.to_string()),
        }
    }
}

/// Maps a status to its row class.
///
/// Lower-casing only: no trimming, no whitespace or punctuation folding, so
/// unknown or misspelled statuses reach the markup unchanged in spelling.
pub fn status_class(status: &str) -> String {
    status.to_lowercase()
}

/// Why the page could not show a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewFailure {
    pub kind: FetchErrorKind,
    pub message: String,
}

impl From<&FetchError> for ViewFailure {
    fn from(err: &FetchError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// Result of one request → decode → shape pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconciliationView {
    Table(Vec<RowView>),
    Empty,
    Failed(ViewFailure),
}

impl ReconciliationView {
    /// Shapes a decoded response. Missing, null and empty sequences are all `Empty`.
    pub fn from_response(response: &ReconciliationResponse) -> Self {
        if response.is_empty() {
            return Self::Empty;
        }
        Self::Table(response.records().iter().map(RowView::from).collect())
    }

    pub fn from_outcome(outcome: Result<ReconciliationResponse, FetchError>) -> Self {
        match outcome {
            Ok(response) => Self::from_response(&response),
            Err(err) => Self::Failed(ViewFailure::from(&err)),
        }
    }

    pub fn rows(&self) -> &[RowView] {
        match self {
            Self::Table(rows) => rows,
            _ => &[],
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}
