use serde::Serialize;

/// Latest quote scraped from the per-stock `zca` page. The date stays as the
/// page prints it (ROC calendar, e.g. "113/05/20").
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StockQuote {
    #[serde(rename = "股票代號")]
    pub code: String,
    #[serde(rename = "日期")]
    pub date: String,
    #[serde(rename = "開盤價")]
    pub open: f64,
    #[serde(rename = "收盤價")]
    pub close: f64,
    #[serde(rename = "最高價")]
    pub high: f64,
    #[serde(rename = "最低價")]
    pub low: f64,
    #[serde(rename = "成交量")]
    pub volume: i64,
}
