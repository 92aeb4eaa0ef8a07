use std::time::Duration;

use crate::action_router::{ActionRouterInput, ActionRouterOutput};
use crate::ingestion::config::IngestionConfig;
use crate::ingestion::processor::{
    FetchTodayInputArgs, IngestionProcessorInput, IngestionProcessorOutput,
};
use crate::utils::app_config::AppConfig;

/// Drives the fetch-today operation on a fixed interval. The first tick
/// fires immediately, so a fresh deploy fills the current day without
/// waiting for the next boundary. Failures are logged and swallowed; the
/// following tick retries naturally.
pub async fn run_ingestion_loop(app_config: AppConfig, config: IngestionConfig) {
    let mut ticker = tokio::time::interval(Duration::from_secs(config.ingest_interval_mins * 60));

    loop {
        ticker.tick().await;

        tracing::info!("Fetching today's market data for {}", config.ingest_symbol);

        let action = ActionRouterInput::Ingestion(IngestionProcessorInput::FetchToday(
            FetchTodayInputArgs {
                symbol: config.ingest_symbol.clone(),
            },
        ));

        match action.process(app_config.clone()).await {
            Ok(ActionRouterOutput::Ingestion(IngestionProcessorOutput::FetchToday(appended))) => {
                tracing::info!(
                    "Saved {} candle entries for {}",
                    appended,
                    config.ingest_symbol
                );
            }
            Ok(_) => {}
            Err(e) => {
                tracing::error!(
                    "Failed to ingest market data for {}: {}",
                    config.ingest_symbol,
                    e
                );
            }
        }
    }
}
