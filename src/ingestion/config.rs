use anyhow::{anyhow, Result};
use clap::Parser;

/// Ingestion settings, sourced from the environment.
#[derive(Parser, Clone, Debug)]
pub struct IngestionConfig {
    #[clap(long, env, default_value = "BTC-USDT")]
    pub ingest_symbol: String,
    #[clap(long, env, default_value = "https://openapi-v2.kucoin.com")]
    pub kucoin_base_url: String,
    #[clap(long, env, default_value_t = 30)]
    pub ingest_interval_mins: u64,
}

impl IngestionConfig {
    pub fn from_env() -> Result<Self> {
        Self::try_parse().map_err(|e| anyhow!(e))
    }
}
