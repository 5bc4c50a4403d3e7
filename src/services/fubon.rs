//! Fubon e-broker page fetcher
//!
//! Builds the `*.djhtm` URLs and fetches them with a fixed browser
//! User-Agent. The pages are Big5 regardless of what the server declares, so
//! the body is always decoded with the Big5 override. One fetch per request;
//! no retry, no timeout, no response caching.

use chrono::NaiveDate;
use encoding_rs::BIG5;
use reqwest::header::{ACCEPT_LANGUAGE, REFERER, USER_AGENT};
use tracing::debug;

use crate::constants;
use crate::error::Result;
use crate::models::BrokerRecord;

/// Inclusive trading-date range from the query string; `None` means the
/// upstream default (latest single day).
pub type DateRange = Option<(NaiveDate, NaiveDate)>;

pub struct FubonClient {
    client: reqwest::Client,
    base_url: String,
}

impl FubonClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(constants::FUBON_BASE_URL.to_string())
    }

    pub fn with_base_url(base_url: String) -> Result<Self> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self { client, base_url })
    }

    /// Per-stock quote page (`zca_{code}.djhtm`).
    pub async fn fetch_quote_page(&self, code: &str) -> Result<String> {
        let url = format!("{}/z/zc/zca/zca_{}.djhtm", self.base_url, code);
        self.get_big5(&url, false).await
    }

    /// Chip page: the dated form when a range is given, otherwise the static
    /// latest-day page.
    pub async fn fetch_chip_page(&self, code: &str, range: DateRange) -> Result<String> {
        let url = match range {
            Some((start, end)) => format!(
                "{}/z/zc/zco/zco.djhtm?a={}&e={}&f={}",
                self.base_url,
                code,
                start.format("%Y-%m-%d"),
                end.format("%Y-%m-%d"),
            ),
            None => format!("{}/z/zc/zco/zco_{}.djhtm", self.base_url, code),
        };
        self.get_big5(&url, false).await
    }

    /// Broker-branch trade page (`zco0`). This family refuses requests that
    /// do not carry the Referer/Accept-Language pair.
    pub async fn fetch_branch_page(
        &self,
        code: &str,
        broker: &BrokerRecord,
        range: DateRange,
    ) -> Result<String> {
        let mut url = format!(
            "{}/z/zc/zco/zco0/zco0.djhtm?a={}&b={}&BHID={}&C=1",
            self.base_url, code, broker.house_code, broker.bhid,
        );
        if let Some((start, end)) = range {
            url.push_str(&format!(
                "&e={}&f={}",
                start.format("%Y-%m-%d"),
                end.format("%Y-%m-%d")
            ));
        }
        self.get_big5(&url, true).await
    }

    async fn get_big5(&self, url: &str, branch_headers: bool) -> Result<String> {
        debug!(url, "Fetching upstream page");
        let mut request = self.client.get(url).header(USER_AGENT, constants::USER_AGENT);
        if branch_headers {
            request = request
                .header(REFERER, constants::BRANCH_REFERER)
                .header(ACCEPT_LANGUAGE, constants::ACCEPT_LANGUAGE);
        }
        let response = request.send().await?.error_for_status()?;
        let bytes = response.bytes().await?;
        // Fixed legacy-encoding override; the declared charset is ignored.
        let (text, _, _) = BIG5.decode(&bytes);
        Ok(text.into_owned())
    }
}
