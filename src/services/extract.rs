//! Position-based HTML table extraction
//!
//! The upstream pages carry no semantic markup, so every page type is
//! described by a [`TableSchema`]: which table to pick, how many header and
//! footer rows to slice off, and how many cells a data row must have. Rows
//! with the wrong cell count (ad banners, spacer rows) are dropped silently.

use once_cell::sync::Lazy;
use scraper::{Html, Selector};

use crate::error::{AppError, Result};

static ROW_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("tr").expect("Failed to parse tr selector"));
static CELL_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("td, th").expect("Failed to parse cell selector"));

/// Declarative layout of one upstream table. Instances live in
/// [`crate::constants`] so that an upstream redesign is a data change.
#[derive(Debug, Clone, Copy)]
pub struct TableSchema {
    /// CSS selector locating the data table
    pub selector: &'static str,
    /// Rows to skip at the top (titles, captions, date banners)
    pub header_rows: usize,
    /// Rows to skip at the bottom (totals)
    pub footer_rows: usize,
    /// Exact cell count a qualifying data row must have
    pub columns: usize,
}

/// Extract the qualifying data rows of the first table matching the schema.
///
/// Returns `NotFound` when no table matches the selector; an empty vec when
/// the table exists but has no qualifying rows.
pub fn extract_rows(html: &str, schema: &TableSchema) -> Result<Vec<Vec<String>>> {
    let document = Html::parse_document(html);
    let table_selector = Selector::parse(schema.selector)
        .map_err(|e| AppError::Parse(format!("bad table selector {:?}: {}", schema.selector, e)))?;

    let table = document
        .select(&table_selector)
        .next()
        .ok_or_else(|| AppError::NotFound(format!("table {:?} not in page", schema.selector)))?;

    let rows: Vec<_> = table.select(&ROW_SELECTOR).collect();
    if rows.len() <= schema.header_rows + schema.footer_rows {
        return Ok(Vec::new());
    }

    let end = rows.len() - schema.footer_rows;
    let mut out = Vec::new();
    for row in &rows[schema.header_rows..end] {
        let cells: Vec<String> = row
            .select(&CELL_SELECTOR)
            .map(|cell| cell.text().collect::<String>())
            .collect();
        if cells.len() != schema.columns {
            continue;
        }
        out.push(cells);
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEMA: TableSchema = TableSchema {
        selector: "table.t01",
        header_rows: 1,
        footer_rows: 1,
        columns: 3,
    };

    const PAGE: &str = r#"
        <html><body>
        <table class="t01">
          <tr><th>a</th><th>b</th><th>c</th></tr>
          <tr><td>1</td><td>2</td><td>3</td></tr>
          <tr><td>spacer</td></tr>
          <tr><td>4</td><td>5</td><td>6</td></tr>
          <tr><td>total</td><td>x</td><td>y</td></tr>
        </table>
        </body></html>"#;

    #[test]
    fn slices_headers_footers_and_drops_short_rows() {
        let rows = extract_rows(PAGE, &SCHEMA).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec!["1", "2", "3"]);
        assert_eq!(rows[1], vec!["4", "5", "6"]);
    }

    #[test]
    fn reparse_is_deterministic() {
        let first = extract_rows(PAGE, &SCHEMA).unwrap();
        let second = extract_rows(PAGE, &SCHEMA).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn missing_table_is_not_found() {
        let err = extract_rows("<html><body><p>nope</p></body></html>", &SCHEMA).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn table_with_only_chrome_rows_yields_empty() {
        let page = r#"<table class="t01">
            <tr><th>a</th><th>b</th><th>c</th></tr>
            <tr><td>total</td><td>x</td><td>y</td></tr>
        </table>"#;
        let rows = extract_rows(page, &SCHEMA).unwrap();
        assert!(rows.is_empty());
    }
}
