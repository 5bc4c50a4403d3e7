use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::error::Result;
use crate::server::{self, AppState};
use crate::services::{BrokerRegistry, CompanyRegistry, FubonClient, YahooClient};

pub async fn run(port: u16, data_dir: &Path) -> Result<()> {
    info!(data_dir = %data_dir.display(), "Loading reference data");

    let companies = Arc::new(CompanyRegistry::load(data_dir)?);
    let brokers = Arc::new(BrokerRegistry::load(data_dir)?);

    let state = AppState {
        companies,
        brokers,
        fubon: Arc::new(FubonClient::new()?),
        yahoo: Arc::new(YahooClient::new()?),
    };

    server::serve(state, port).await
}
