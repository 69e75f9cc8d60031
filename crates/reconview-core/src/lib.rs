pub mod error;
pub mod model;
pub mod render;
pub mod source;
pub mod view;

pub use error::{FetchError, FetchErrorKind, Result};
pub use model::{Amount, ReconciliationRecord, ReconciliationResponse};
pub use render::{HtmlRenderer, PageRenderer, html_escape};
pub use source::{ReconciliationSource, StaticSource};
pub use view::{PO_PLACEHOLDER, ReconciliationView, RowView, ViewFailure, status_class};
