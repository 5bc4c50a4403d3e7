use serde::Serialize;

/// One broker entry on either side of the chip table. Values are kept as the
/// page displays them after normalization; nothing is re-derived.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChipEntry {
    #[serde(rename = "券商名稱")]
    pub broker: String,
    #[serde(rename = "買張")]
    pub buy: i64,
    #[serde(rename = "賣張")]
    pub sell: i64,
    #[serde(rename = "買賣超")]
    pub net: i64,
    #[serde(rename = "佔成交量比重")]
    pub percent: f64,
}

/// Full chip-data response: resolved company metadata plus the ordered
/// buy-side and sell-side broker lists for the requested range.
#[derive(Debug, Clone, Serialize)]
pub struct ChipDataRecord {
    #[serde(rename = "股票代號")]
    pub code: String,
    #[serde(rename = "公司名稱")]
    pub name: String,
    #[serde(rename = "產業類別")]
    pub industry: Option<String>,
    #[serde(rename = "日期區間")]
    pub date_range: String,
    #[serde(rename = "買超券商")]
    pub buyers: Vec<ChipEntry>,
    #[serde(rename = "賣超券商")]
    pub sellers: Vec<ChipEntry>,
}
