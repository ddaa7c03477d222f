//! HTML rendering of tables.

use crate::model::Table;

/// Render a table as a compact HTML `<table>`.
///
/// Cells are laid out row by row in column order. Column and row headers
/// render as `th`, every other cell kind as `td`.
pub fn table_to_html(table: &Table) -> String {
    let mut output = String::from("<table>");

    for row in table.rows() {
        output.push_str("<tr>");
        for cell in row {
            let tag = if cell.is_header() { "th" } else { "td" };
            let mut attrs = String::new();
            if cell.column_span > 1 {
                attrs.push_str(&format!(" colSpan='{}'", cell.column_span));
            }
            if cell.row_span > 1 {
                attrs.push_str(&format!(" rowSpan='{}'", cell.row_span));
            }

            output.push_str(&format!("<{}{}>", tag, attrs));
            output.push_str(&escape_html(&cell.content));
            output.push_str(&format!("</{}>", tag));
        }
        output.push_str("</tr>");
    }

    output.push_str("</table>");
    output
}

/// Escape text for use inside HTML element content.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
