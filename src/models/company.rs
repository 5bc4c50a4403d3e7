use serde::{Deserialize, Serialize};

/// Exchange venue a company is registered on. The listed (TWSE) and
/// over-the-counter (TPEx) registries are merged into one lookup table at
/// load time; the venue also picks the Yahoo symbol suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingVenue {
    Listed,
    Otc,
}

impl ListingVenue {
    /// Suffix Yahoo Finance expects on Taiwan symbols.
    pub fn yahoo_suffix(&self) -> &'static str {
        match self {
            ListingVenue::Listed => ".TW",
            ListingVenue::Otc => ".TWO",
        }
    }
}

/// One row of the merged company registry. Read-only after startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyRecord {
    /// 4-digit zero-padded stock code
    #[serde(rename = "股票代號")]
    pub code: String,
    #[serde(rename = "公司名稱")]
    pub name: String,
    #[serde(rename = "公司簡稱")]
    pub short_name: String,
    #[serde(rename = "產業類別")]
    pub industry: Option<String>,
    #[serde(rename = "地址")]
    pub address: String,
    #[serde(rename = "市場別")]
    pub venue: ListingVenue,
    #[serde(rename = "股票過戶機構")]
    pub transfer_agent: String,
}
