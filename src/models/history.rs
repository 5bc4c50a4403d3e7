use serde::Serialize;

/// One trading day on the broker-branch page: what the branch bought, sold,
/// traded in total and netted on the stock.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BranchHistoryRow {
    #[serde(rename = "日期")]
    pub date: String,
    #[serde(rename = "買進")]
    pub buy: i64,
    #[serde(rename = "賣出")]
    pub sell: i64,
    #[serde(rename = "總計")]
    pub total: i64,
    #[serde(rename = "買賣超")]
    pub net: i64,
}

/// Broker history response: the scraped daily rows joined with the branch's
/// registry contact fields.
#[derive(Debug, Clone, Serialize)]
pub struct BrokerHistoryRecord {
    #[serde(rename = "股票代號")]
    pub code: String,
    #[serde(rename = "券商名稱")]
    pub house_name: String,
    #[serde(rename = "分行名稱")]
    pub branch_name: String,
    #[serde(rename = "券商分點位置")]
    pub address: Option<String>,
    #[serde(rename = "電話")]
    pub phone: Option<String>,
    #[serde(rename = "資料")]
    pub rows: Vec<BranchHistoryRow>,
}

/// One daily OHLCV bar from the Yahoo chart API (English keys; this data is
/// not a transcription of the scraped site).
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DailyBar {
    pub date: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}
