use serde::{Deserialize, Serialize};

/// One brokerage branch from `brokers.json`. The file is produced offline by
/// the `convert-brokers` subcommand from an HTML snapshot of the upstream
/// branch picker plus a contacts CSV.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrokerRecord {
    /// Branch/house identifier the upstream query string wants (`BHID`)
    #[serde(rename = "BHID")]
    pub bhid: String,
    #[serde(rename = "券商名稱")]
    pub house_name: String,
    #[serde(rename = "分行名稱")]
    pub branch_name: String,
    /// Site-internal code for the branch (the `<option>` value)
    #[serde(rename = "富邦編碼")]
    pub house_code: String,
    #[serde(rename = "地址", default)]
    pub address: Option<String>,
    #[serde(rename = "電話", default)]
    pub phone: Option<String>,
}
