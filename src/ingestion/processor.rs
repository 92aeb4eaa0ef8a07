use anyhow::anyhow;
use chrono::Utc;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use diesel::PgConnection;
use serde::{Deserialize, Serialize};

use crate::ingestion::config::IngestionConfig;
use crate::ingestion::kucoin::KucoinClient;
use crate::market_clock;
use crate::market_symbol::db_types::CreatePricePointRecord;
use crate::market_symbol::operations;
use crate::utils::app_config::AppConfig;
use crate::utils::traits::ActionProcessor;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct FetchTodayInputArgs {
    pub symbol: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub enum IngestionProcessorInput {
    /// Fetch 1-minute candles for the current exchange-local day and upsert
    /// them into the symbol's time-series
    FetchToday(FetchTodayInputArgs),
}

#[derive(Serialize, Deserialize, Debug)]
pub enum IngestionProcessorOutput {
    /// Number of points written
    FetchToday(u32),
}

impl ActionProcessor<IngestionConfig, IngestionProcessorOutput> for IngestionProcessorInput {
    async fn process(&self, _app_config: &mut AppConfig, local_config: &mut IngestionConfig, conn: Option<&mut PooledConnection<ConnectionManager<PgConnection>>>) -> anyhow::Result<IngestionProcessorOutput> {
        let app_conn = conn.ok_or_else(|| anyhow!("Failed to get conn"))?;

        match self {
            IngestionProcessorInput::FetchToday(args) => {
                let now = Utc::now();
                let (start_of_day, end_of_day) = market_clock::exchange_day_bounds(now);

                let client = KucoinClient::new(local_config.kucoin_base_url.clone());
                let candles = client
                    .get_market_candles(
                        &args.symbol,
                        "1min",
                        start_of_day.timestamp(),
                        end_of_day.timestamp(),
                    )
                    .await?;

                // Symbol documents come into existence on first ingestion
                let symbol_record = operations::ensure_symbol(app_conn, &args.symbol)?;

                let mut appended = 0u32;
                for candle in &candles {
                    operations::upsert_price_point(
                        app_conn,
                        &CreatePricePointRecord {
                            symbol_id: symbol_record.id,
                            point_time: candle.point_time.naive_utc(),
                            open: candle.open.clone(),
                            close: candle.close.clone(),
                            high: candle.high.clone(),
                            low: candle.low.clone(),
                        },
                    )?;
                    appended += 1;
                }

                Ok(IngestionProcessorOutput::FetchToday(appended))
            }
        }
    }
}
