//! Router-level tests
//!
//! Drive the axum router with `tower::ServiceExt::oneshot` against registries
//! built in memory. The upstream clients point at a closed local port, so any
//! test that reaches the fetch stage observes a transport failure; tests that
//! must not fetch at all (unknown broker/company) pass without any listener.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use twchip::models::{BrokerRecord, CompanyRecord, ListingVenue};
use twchip::server::{router, AppState};
use twchip::services::{BrokerRegistry, CompanyRegistry, FubonClient, YahooClient};

// Nothing listens here; fetches fail fast with a connection error.
const DEAD_UPSTREAM: &str = "http://127.0.0.1:9";

fn test_state() -> AppState {
    let companies = CompanyRegistry::from_records(vec![CompanyRecord {
        code: "2330".to_string(),
        name: "台灣積體電路製造股份有限公司".to_string(),
        short_name: "台積電".to_string(),
        industry: Some("半導體業".to_string()),
        address: "新竹科學園區力行六路8號".to_string(),
        venue: ListingVenue::Listed,
        transfer_agent: "中國信託商業銀行代理部".to_string(),
    }]);
    let brokers = BrokerRegistry::from_records(vec![BrokerRecord {
        bhid: "9200".to_string(),
        house_name: "凱基".to_string(),
        branch_name: "凱基-台北".to_string(),
        house_code: "9217".to_string(),
        address: Some("台北市中山區明水路700號".to_string()),
        phone: Some("02-2181-8888".to_string()),
    }]);

    AppState {
        companies: Arc::new(companies),
        brokers: Arc::new(brokers),
        fubon: Arc::new(FubonClient::with_base_url(DEAD_UPSTREAM.to_string()).unwrap()),
        yahoo: Arc::new(YahooClient::with_base_url(DEAD_UPSTREAM.to_string()).unwrap()),
    }
}

async fn get(uri: &str) -> (StatusCode, serde_json::Value) {
    let response = router(test_state())
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, body)
}

#[tokio::test]
async fn home_returns_liveness_message() {
    let response = router(test_state())
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(bytes.as_ref(), "歡迎使用股票資料API".as_bytes());
}

#[tokio::test]
async fn unknown_broker_is_404_without_fetch() {
    // The dead upstream would turn any fetch into a 500; a 404 here proves
    // resolution failed before the fetch stage.
    let (status, body) = get("/api/broker_history/2330/999999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("999999"));
}

#[tokio::test]
async fn unknown_company_is_404() {
    let (status, body) = get("/api/chip_data/9999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn transport_failure_is_500_with_error_body() {
    let (status, body) = get("/api/stock_data/2330").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("Network error"));
    // No partial payload alongside the error.
    assert_eq!(body.as_object().unwrap().len(), 1);
}

#[tokio::test]
async fn half_open_date_range_is_rejected() {
    let (status, body) = get("/api/chip_data/2330?start_date=2024-05-01").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("start_date"));
}

#[tokio::test]
async fn chip_query_resolves_company_by_name_before_fetching() {
    // 台積電 resolves via name substring; the dead upstream then yields the
    // transport 500, proving resolution succeeded.
    let (status, body) = get("/api/chip_data/%E7%A9%8D%E9%AB%94%E9%9B%BB%E8%B7%AF").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("Network error"));
}
