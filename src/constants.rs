//! Upstream page layout constants
//!
//! The Fubon e-broker pages are static Big5 HTML rendered by MoneyDJ. All of
//! the scraping is position-based: each page type has a known table selector,
//! a known number of header/footer rows to skip, and a fixed column layout.
//! When the upstream layout changes, the numbers below are the only thing
//! that should need to change.

use crate::services::extract::TableSchema;

pub const FUBON_BASE_URL: &str = "https://fubon-ebrokerdj.fbs.com.tw";

/// Browser-like User-Agent sent on every upstream request. The site serves a
/// different (frameset) page to unknown agents.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Referer required by the broker-branch (`zco0`) page family; requests
/// without it get an empty shell page.
pub const BRANCH_REFERER: &str =
    "https://fubon-ebrokerdj.fbs.com.tw/z/zc/zco/zco0/zco0.djhtm";

pub const ACCEPT_LANGUAGE: &str = "zh-TW,zh;q=0.9,en;q=0.8";

/// Yahoo Finance chart API, used for the multi-year history endpoint only.
pub const YAHOO_CHART_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";
pub const YAHOO_HISTORY_RANGE: &str = "5y";

/// Per-stock quote page (`zca_{code}.djhtm`): one summary table, two header
/// rows (page title + column captions), one data row of 7 cells.
pub const QUOTE_TABLE: TableSchema = TableSchema {
    selector: "table.t01",
    header_rows: 2,
    footer_rows: 0,
    columns: 7,
};

/// Column layout of the quote summary row.
pub mod quote_column {
    pub const DATE: usize = 0;
    pub const OPEN: usize = 1;
    pub const HIGH: usize = 2;
    pub const LOW: usize = 3;
    pub const CLOSE: usize = 4;
    pub const CHANGE: usize = 5;
    pub const VOLUME: usize = 6;
}

/// Chip page (`zco`): one wide table where every data row carries a buy-side
/// entry in cells 0..5 and a sell-side entry in cells 5..10. Five header rows
/// (title, date banner, two caption rows, spacer) and one footer row (合計).
pub const CHIP_TABLE: TableSchema = TableSchema {
    selector: "table.t01",
    header_rows: 5,
    footer_rows: 1,
    columns: 10,
};

/// Column layout of one side of a chip row; the sell side starts at
/// [`CHIP_SELL_OFFSET`].
pub mod chip_column {
    pub const BROKER: usize = 0;
    pub const BUY: usize = 1;
    pub const SELL: usize = 2;
    pub const NET: usize = 3;
    pub const PERCENT: usize = 4;
}

pub const CHIP_SELL_OFFSET: usize = 5;

/// Broker-branch history page (`zco0`): daily rows of 5 cells under six
/// header rows (title, branch banner, form row, two caption rows, spacer)
/// and one totals footer row.
pub const BRANCH_TABLE: TableSchema = TableSchema {
    selector: "table.t01",
    header_rows: 6,
    footer_rows: 1,
    columns: 5,
};

pub mod branch_column {
    pub const DATE: usize = 0;
    pub const BUY: usize = 1;
    pub const SELL: usize = 2;
    pub const TOTAL: usize = 3;
    pub const NET: usize = 4;
}

/// Stock codes are zero-padded to this width before exact lookup ("50" is
/// the ETF 0050, not a prefix).
pub const STOCK_CODE_WIDTH: usize = 4;
