pub mod api;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::Method;
use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::error::Result;
use crate::services::{BrokerRegistry, CompanyRegistry, FubonClient, YahooClient};

/// Read-only shared context handed to every handler. The registries are
/// loaded once at startup and never written afterwards; the clients hold no
/// request state.
#[derive(Clone)]
pub struct AppState {
    pub companies: Arc<CompanyRegistry>,
    pub brokers: Arc<BrokerRegistry>,
    pub fubon: Arc<FubonClient>,
    pub yahoo: Arc<YahooClient>,
}

/// Build the router; split out from [`serve`] so tests can drive it with
/// `tower::ServiceExt::oneshot`.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers(Any);

    Router::new()
        .route("/", get(api::home_handler))
        .route("/api/stock_data/{code}", get(api::stock_data_handler))
        .route("/api/chip_data/{query}", get(api::chip_data_handler))
        .route("/api/stock_history/{code}", get(api::stock_history_handler))
        .route(
            "/api/broker_history/{code}/{broker_id}",
            get(api::broker_history_handler),
        )
        .route("/api/broker_data", get(api::broker_data_handler))
        .layer(cors)
        .with_state(state)
}

pub async fn serve(state: AppState, port: u16) -> Result<()> {
    let app = router(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(%addr, "Server listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .await
        .map_err(|e| crate::error::AppError::Io(e.to_string()))?;
    Ok(())
}
