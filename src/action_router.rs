use anyhow::Result;

use crate::ingestion::config::IngestionConfig;
use crate::ingestion::processor::{IngestionProcessorInput, IngestionProcessorOutput};
use crate::market_symbol::config::MarketSymbolConfig;
use crate::market_symbol::processor_enums::{MarketSymbolProcessorInput, MarketSymbolProcessorOutput};
use crate::utils::app_config::AppConfig;
use crate::utils::db::get_conn;
use crate::utils::traits::ActionProcessor;

pub enum ActionRouterInput {
    MarketSymbols(MarketSymbolProcessorInput),
    Ingestion(IngestionProcessorInput),
}

pub enum ActionRouterOutput {
    MarketSymbols(MarketSymbolProcessorOutput),
    Ingestion(IngestionProcessorOutput),
}

impl ActionRouterInput {
    pub async fn process(&self, app_config: AppConfig) -> Result<ActionRouterOutput> {
        match self {
            ActionRouterInput::MarketSymbols(processor) => {
                let mut conn = get_conn(app_config.pool.clone())?;

                let mut config = MarketSymbolConfig::default();

                let res = processor
                    .process(&mut app_config.clone(), &mut config, Some(&mut conn))
                    .await?;

                Ok(ActionRouterOutput::MarketSymbols(res))
            }
            ActionRouterInput::Ingestion(processor) => {
                let mut conn = get_conn(app_config.pool.clone())?;

                let mut config = IngestionConfig::from_env()?;

                let res = processor
                    .process(&mut app_config.clone(), &mut config, Some(&mut conn))
                    .await?;

                Ok(ActionRouterOutput::Ingestion(res))
            }
        }
    }
}
