//! Server-rendered HTML for the reconciliation page.
//!
//! The page is a fixed `<head>` with embedded styles, an `<h2>` title and one
//! of: an error paragraph, a "No data found." paragraph, or the results table.

use crate::error::FetchErrorKind;
use crate::view::{ReconciliationView, RowView, TABLE_HEADER, ViewFailure};

/// Default `<h2>` heading.
pub const DEFAULT_TITLE: &str = "Invoice Reconciliation Results";

/// Text shown when the upstream returned no rows.
pub const NO_DATA_MESSAGE: &str = "No data found.";

const DOCUMENT_TITLE: &str = "Invoice Reconciliation";

const PAGE_STYLES: &str = r#"
table {
    width: 80%;
    border-collapse: collapse;
    margin: 30px auto;
}
th, td {
    padding: 12px;
    border: 1px solid #ccc;
    text-align: center;
}
th {
    background-color: #2e3b4e;
    color: white;
}
.matched {
    background-color: #d4edda;
}
.unmatched {
    background-color: #f8d7da;
}
"#;

/// Turns a view into a complete document.
pub trait PageRenderer: Send + Sync {
    fn render(&self, view: &ReconciliationView) -> String;
}

/// Renders the HTML page.
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    title: String,
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_TITLE)
    }
}

impl HtmlRenderer {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

impl PageRenderer for HtmlRenderer {
    fn render(&self, view: &ReconciliationView) -> String {
        let body = match view {
            ReconciliationView::Table(rows) => render_table(rows),
            ReconciliationView::Empty => centered_paragraph(NO_DATA_MESSAGE),
            ReconciliationView::Failed(failure) => centered_paragraph(&failure_message(failure)),
        };
        html_page(&self.title, &body)
    }
}

/// User-facing text for a failed fetch.
pub fn failure_message(failure: &ViewFailure) -> String {
    match failure.kind {
        FetchErrorKind::Transport => format!("Error fetching data: {}", failure.message),
        FetchErrorKind::Malformed => format!("Error decoding data: {}", failure.message),
    }
}

fn html_page(title: &str, content: &str) -> String {
    let mut html = String::with_capacity(content.len() + 1024);
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    html.push_str("    <meta charset=\"UTF-8\">\n");
    html.push_str("    <title>");
    html.push_str(DOCUMENT_TITLE);
    html.push_str("</title>\n");
    html.push_str("    <style>");
    html.push_str(PAGE_STYLES);
    html.push_str("</style>\n</head>\n<body>\n");
    html.push_str("    <h2 style=\"text-align:center;\">");
    html.push_str(&html_escape(title));
    html.push_str("</h2>\n");
    html.push_str(content);
    html.push_str("</body>\n</html>\n");
    html
}

fn centered_paragraph(text: &str) -> String {
    format!("    <p style=\"text-align:center;\">{}</p>\n", html_escape(text))
}

fn render_table(rows: &[RowView]) -> String {
    let mut table = String::with_capacity(256 + rows.len() * 160);
    table.push_str("    <table>\n        <tr>");
    for heading in TABLE_HEADER {
        table.push_str("<th>");
        table.push_str(heading);
        table.push_str("</th>");
    }
    table.push_str("</tr>\n");

    for row in rows {
        // Class is escaped like any other text; benign statuses pass through unchanged.
        table.push_str("        <tr class=\"");
        table.push_str(&html_escape(&row.class));
        table.push_str("\">");
        for cell in [
            &row.invoice_number,
            &row.vendor,
            &row.amount,
            &row.status,
            &row.po_number,
        ] {
            table.push_str("<td>");
            table.push_str(&html_escape(cell));
            table.push_str("</td>");
        }
        table.push_str("</tr>\n");
    }

    table.push_str("    </table>\n");
    table
}

/// Simple HTML escaping to prevent markup injection from upstream values.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::model::ReconciliationResponse;

    const EXAMPLE: &[u8] = br#"{"reconciliation": [
        {"invoice_number":"INV-001","vendor":"Acme","amount":250.00,"status":"Matched","po_number":"PO-77"},
        {"invoice_number":"INV-002","vendor":"Globex","amount":99.50,"status":"Unmatched","po_number":null}
    ]}"#;

    fn render_body(body: &[u8]) -> String {
        let outcome = ReconciliationResponse::from_slice(body);
        HtmlRenderer::default().render(&ReconciliationView::from_outcome(outcome))
    }

    #[test]
    fn test_end_to_end_example() {
        let html = render_body(EXAMPLE);
        assert!(html.contains(
            "<tr><th>Invoice No</th><th>Vendor</th><th>Amount</th><th>Status</th><th>PO No</th></tr>"
        ));
        assert!(html.contains(
            "<tr class=\"matched\"><td>INV-001</td><td>Acme</td><td>250.00</td><td>Matched</td><td>PO-77</td></tr>"
        ));
        assert!(html.contains(
            "<tr class=\"unmatched\"><td>INV-002</td><td>Globex</td><td>99.50</td><td>Unmatched</td><td>—</td></tr>"
        ));
        assert_eq!(html.matches("<tr class=").count(), 2);
        assert!(html.find("INV-001").unwrap() < html.find("INV-002").unwrap());
    }

    #[test]
    fn test_render_is_deterministic() {
        assert_eq!(render_body(EXAMPLE), render_body(EXAMPLE));
    }

    #[test]
    fn test_empty_and_missing_render_identically() {
        let empty = render_body(br#"{"reconciliation": []}"#);
        let missing = render_body(b"{}");
        assert_eq!(empty, missing);
        assert!(empty.contains("<p style=\"text-align:center;\">No data found.</p>"));
        assert!(!empty.contains("<table>"));
    }

    #[test]
    fn test_transport_failure_page() {
        let view =
            ReconciliationView::from_outcome(Err(FetchError::transport("Connection refused")));
        let html = HtmlRenderer::default().render(&view);
        assert!(html.contains("Error fetching data: Connection refused"));
        assert!(!html.contains("<table>"));
        assert!(html.ends_with("</html>\n"));
    }

    #[test]
    fn test_malformed_page() {
        let html = render_body(b"not json");
        assert!(html.contains("Error decoding data: "));
        assert!(!html.contains("<table>"));
    }

    #[test]
    fn test_unknown_status_class() {
        let html = render_body(
            br#"{"reconciliation":[{"invoice_number":"A","vendor":"V","amount":"1","status":"On Hold"}]}"#,
        );
        assert!(html.contains("<tr class=\"on hold\">"));
        assert!(html.contains("<td>On Hold</td>"));
    }

    #[test]
    fn test_status_markup_is_escaped() {
        let html = render_body(
            br#"{"reconciliation":[{"invoice_number":"A","vendor":"<b>V</b>","amount":"1","status":"x\" onmouseover=\"alert(1)"}]}"#,
        );
        assert!(html.contains("<tr class=\"x&quot; onmouseover=&quot;alert(1)\">"));
        assert!(html.contains("<td>&lt;b&gt;V&lt;/b&gt;</td>"));
    }

    #[test]
    fn test_custom_title() {
        let html = HtmlRenderer::new("Q3 <Audit>").render(&ReconciliationView::Empty);
        assert!(html.contains("<h2 style=\"text-align:center;\">Q3 &lt;Audit&gt;</h2>"));
        assert!(html.contains("<title>Invoice Reconciliation</title>"));
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("<script>"), "&lt;script&gt;");
        assert_eq!(html_escape("a&b"), "a&amp;b");
        assert_eq!(html_escape("'q'"), "&#39;q&#39;");
    }
}
