use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, instrument};

use crate::error::{AppError, Result};
use crate::models::{BrokerHistoryRecord, ChipDataRecord, DailyBar, StockQuote};
use crate::server::AppState;
use crate::services::fubon::DateRange;
use crate::services::pages;
use crate::services::registry::pad_stock_code;

/// GET / - liveness message
pub async fn home_handler() -> &'static str {
    "歡迎使用股票資料API"
}

/// Optional inclusive date range shared by the chip/broker endpoints.
#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Validate the date pair. Omitting both means the upstream default (latest
/// single day); giving only one, or an unparseable date, is malformed input.
fn parse_range(params: &RangeQuery) -> Result<DateRange> {
    match (&params.start_date, &params.end_date) {
        (None, None) => Ok(None),
        (Some(start), Some(end)) => {
            let start = parse_date(start)?;
            let end = parse_date(end)?;
            if start > end {
                return Err(AppError::InvalidInput(format!(
                    "start_date {} is after end_date {}",
                    start, end
                )));
            }
            Ok(Some((start, end)))
        }
        _ => Err(AppError::InvalidInput(
            "start_date and end_date must be given together".to_string(),
        )),
    }
}

fn parse_date(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map_err(|_| AppError::InvalidInput(format!("bad date {:?}, expected YYYY-MM-DD", text)))
}

fn range_label(range: &DateRange) -> String {
    match range {
        Some((start, end)) => format!("{}~{}", start.format("%Y-%m-%d"), end.format("%Y-%m-%d")),
        None => "最近一日".to_string(),
    }
}

/// Normalize a path code: digits get zero-padded, anything else is rejected
/// before we build an upstream URL out of it.
fn normalize_code(code: &str) -> Result<String> {
    let code = code.trim();
    if code.is_empty() || !code.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::InvalidInput(format!("bad stock code {:?}", code)));
    }
    Ok(pad_stock_code(code))
}

/// GET /api/stock_data/{code} - latest quote from the per-stock page
#[instrument(skip(state))]
pub async fn stock_data_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<StockQuote>> {
    let code = normalize_code(&code)?;
    let html = state.fubon.fetch_quote_page(&code).await?;
    let quote = pages::parse_quote(&html, &code)?;
    info!(code, date = %quote.date, "Returning stock quote");
    Ok(Json(quote))
}

/// GET /api/chip_data/{code_or_name}?start_date&end_date
#[instrument(skip(state))]
pub async fn chip_data_handler(
    State(state): State<AppState>,
    Path(query): Path<String>,
    Query(params): Query<RangeQuery>,
) -> Result<Json<ChipDataRecord>> {
    let company = state
        .companies
        .resolve(&query)
        .ok_or_else(|| AppError::NotFound(format!("no company matching {:?}", query)))?;
    let range = parse_range(&params)?;

    let html = state.fubon.fetch_chip_page(&company.code, range).await?;
    let (buyers, sellers) = pages::parse_chip(&html)?;
    info!(
        code = %company.code,
        buyers = buyers.len(),
        sellers = sellers.len(),
        "Returning chip data"
    );

    Ok(Json(ChipDataRecord {
        code: company.code.clone(),
        name: company.name.clone(),
        industry: company.industry.clone(),
        date_range: range_label(&range),
        buyers,
        sellers,
    }))
}

/// GET /api/stock_history/{code} - multi-year daily OHLCV from Yahoo
#[instrument(skip(state))]
pub async fn stock_history_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<Vec<DailyBar>>> {
    let company = state
        .companies
        .resolve(&code)
        .ok_or_else(|| AppError::NotFound(format!("no company matching {:?}", code)))?;
    let symbol = format!("{}{}", company.code, company.venue.yahoo_suffix());
    let bars = state.yahoo.fetch_daily_history(&symbol).await?;
    info!(symbol, bars = bars.len(), "Returning stock history");
    Ok(Json(bars))
}

/// GET /api/broker_history/{code}/{broker_id}?start_date&end_date
///
/// Broker resolution happens before any upstream fetch; an unknown broker is
/// a 404 with no network traffic.
#[instrument(skip(state))]
pub async fn broker_history_handler(
    State(state): State<AppState>,
    Path((code, broker_id)): Path<(String, String)>,
    Query(params): Query<RangeQuery>,
) -> Result<Json<BrokerHistoryRecord>> {
    let broker = state
        .brokers
        .resolve(&broker_id)
        .ok_or_else(|| AppError::NotFound(format!("no broker matching {:?}", broker_id)))?;
    let code = normalize_code(&code)?;
    let range = parse_range(&params)?;

    let html = state.fubon.fetch_branch_page(&code, broker, range).await?;
    let rows = pages::parse_branch_history(&html)?;
    info!(code, branch = %broker.branch_name, days = rows.len(), "Returning broker history");

    Ok(Json(BrokerHistoryRecord {
        code,
        house_name: broker.house_name.clone(),
        branch_name: broker.branch_name.clone(),
        address: broker.address.clone(),
        phone: broker.phone.clone(),
        rows,
    }))
}

#[derive(Debug, Deserialize)]
pub struct BrokerDataQuery {
    pub stock_id: String,
    pub broker: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// GET /api/broker_data?stock_id&broker&start_date&end_date
///
/// Detailed broker-vs-stock history plus the filter-option lists scraped
/// from the upstream form page.
#[instrument(skip(state))]
pub async fn broker_data_handler(
    State(state): State<AppState>,
    Query(params): Query<BrokerDataQuery>,
) -> Result<Json<Value>> {
    let broker = state
        .brokers
        .resolve(&params.broker)
        .ok_or_else(|| AppError::NotFound(format!("no broker matching {:?}", params.broker)))?;
    let code = normalize_code(&params.stock_id)?;
    let range = parse_range(&RangeQuery {
        start_date: params.start_date.clone(),
        end_date: params.end_date.clone(),
    })?;

    let html = state.fubon.fetch_branch_page(&code, broker, range).await?;
    let rows = pages::parse_branch_history(&html)?;
    let (broker_options, branch_options) = pages::parse_filter_options(&html);
    info!(code, branch = %broker.branch_name, days = rows.len(), "Returning broker data");

    Ok(Json(json!({
        "股票代號": code,
        "券商名稱": broker.house_name,
        "分行名稱": broker.branch_name,
        "日期區間": range_label(&range),
        "資料": rows,
        "券商選項": broker_options,
        "分點選項": branch_options,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_requires_both_dates() {
        let ok = parse_range(&RangeQuery {
            start_date: Some("2024-05-01".to_string()),
            end_date: Some("2024-05-20".to_string()),
        })
        .unwrap();
        assert!(ok.is_some());

        let none = parse_range(&RangeQuery {
            start_date: None,
            end_date: None,
        })
        .unwrap();
        assert!(none.is_none());

        let half = parse_range(&RangeQuery {
            start_date: Some("2024-05-01".to_string()),
            end_date: None,
        });
        assert!(matches!(half.unwrap_err(), AppError::InvalidInput(_)));

        let inverted = parse_range(&RangeQuery {
            start_date: Some("2024-05-20".to_string()),
            end_date: Some("2024-05-01".to_string()),
        });
        assert!(matches!(inverted.unwrap_err(), AppError::InvalidInput(_)));

        let garbage = parse_range(&RangeQuery {
            start_date: Some("05/01/2024".to_string()),
            end_date: Some("2024-05-20".to_string()),
        });
        assert!(matches!(garbage.unwrap_err(), AppError::InvalidInput(_)));
    }

    #[test]
    fn codes_are_padded_and_validated() {
        assert_eq!(normalize_code("50").unwrap(), "0050");
        assert_eq!(normalize_code("2330").unwrap(), "2330");
        assert!(normalize_code("abc").is_err());
        assert!(normalize_code("").is_err());
    }
}
