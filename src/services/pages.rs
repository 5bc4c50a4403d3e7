//! Page-specific row mapping
//!
//! Takes the raw rows from the table extractor and maps cells to named
//! fields by the fixed positions declared in [`crate::constants`]. Every
//! field is a direct transcription of the cell text after normalization.

use once_cell::sync::Lazy;
use scraper::{Html, Selector};

use crate::constants::{
    branch_column, chip_column, quote_column, BRANCH_TABLE, CHIP_SELL_OFFSET, CHIP_TABLE,
    QUOTE_TABLE,
};
use crate::error::{AppError, Result};
use crate::models::{BranchHistoryRow, ChipEntry, StockQuote};
use crate::services::extract::extract_rows;
use crate::services::normalize::{clean, parse_f64, parse_i64};

/// Map the quote summary row of a `zca` page.
pub fn parse_quote(html: &str, code: &str) -> Result<StockQuote> {
    let rows = extract_rows(html, &QUOTE_TABLE)?;
    let row = rows
        .first()
        .ok_or_else(|| AppError::NotFound(format!("no quote row for {}", code)))?;

    Ok(StockQuote {
        code: code.to_string(),
        date: clean(&row[quote_column::DATE]),
        open: parse_f64(&row[quote_column::OPEN])?,
        high: parse_f64(&row[quote_column::HIGH])?,
        low: parse_f64(&row[quote_column::LOW])?,
        close: parse_f64(&row[quote_column::CLOSE])?,
        volume: parse_i64(&row[quote_column::VOLUME])?,
    })
}

/// Map a `zco` chip page into its buy-side and sell-side broker lists.
///
/// Each data row carries one buy entry and one sell entry side by side; the
/// shorter side is padded with empty cells upstream, so entries with an
/// empty broker cell are skipped.
pub fn parse_chip(html: &str) -> Result<(Vec<ChipEntry>, Vec<ChipEntry>)> {
    let rows = extract_rows(html, &CHIP_TABLE)?;
    let mut buyers = Vec::new();
    let mut sellers = Vec::new();
    for row in &rows {
        if let Some(entry) = chip_entry(row, 0)? {
            buyers.push(entry);
        }
        if let Some(entry) = chip_entry(row, CHIP_SELL_OFFSET)? {
            sellers.push(entry);
        }
    }
    Ok((buyers, sellers))
}

fn chip_entry(row: &[String], offset: usize) -> Result<Option<ChipEntry>> {
    let broker = clean(&row[offset + chip_column::BROKER]);
    if broker.is_empty() {
        return Ok(None);
    }
    Ok(Some(ChipEntry {
        broker,
        buy: parse_i64(&row[offset + chip_column::BUY])?,
        sell: parse_i64(&row[offset + chip_column::SELL])?,
        net: parse_i64(&row[offset + chip_column::NET])?,
        percent: parse_f64(&row[offset + chip_column::PERCENT])?,
    }))
}

/// Map the daily rows of a `zco0` broker-branch page, source order kept.
pub fn parse_branch_history(html: &str) -> Result<Vec<BranchHistoryRow>> {
    let rows = extract_rows(html, &BRANCH_TABLE)?;
    rows.iter()
        .map(|row| {
            Ok(BranchHistoryRow {
                date: clean(&row[branch_column::DATE]),
                buy: parse_i64(&row[branch_column::BUY])?,
                sell: parse_i64(&row[branch_column::SELL])?,
                total: parse_i64(&row[branch_column::TOTAL])?,
                net: parse_i64(&row[branch_column::NET])?,
            })
        })
        .collect()
}

static BROKER_SELECT: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"select[name="sel_Broker"] option"#)
        .expect("Failed to parse broker select selector")
});
static BRANCH_SELECT: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"select[name="sel_BrokerBranch"] option"#)
        .expect("Failed to parse branch select selector")
});

/// Scrape the filter-option lists (broker houses and branches) from the
/// `zco0` form page.
pub fn parse_filter_options(html: &str) -> (Vec<String>, Vec<String>) {
    let document = Html::parse_document(html);
    let collect = |selector: &Selector| {
        document
            .select(selector)
            .map(|option| clean(&option.text().collect::<String>()))
            .filter(|text| !text.is_empty())
            .collect()
    };
    (collect(&BROKER_SELECT), collect(&BRANCH_SELECT))
}
