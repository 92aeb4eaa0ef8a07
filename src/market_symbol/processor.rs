use anyhow::anyhow;
use chrono::{Duration, Utc};
use diesel::r2d2::{ConnectionManager, PooledConnection};
use diesel::PgConnection;

use crate::aggregators;
use crate::market_symbol::config::MarketSymbolConfig;
use crate::market_symbol::operations;
use crate::market_symbol::processor_enums::{MarketSymbolProcessorInput, MarketSymbolProcessorOutput};
use crate::market_symbol::view;
use crate::utils::app_config::AppConfig;
use crate::utils::traits::ActionProcessor;

impl ActionProcessor<MarketSymbolConfig, MarketSymbolProcessorOutput> for MarketSymbolProcessorInput {
    async fn process(&self, _app_config: &mut AppConfig, _local_config: &mut MarketSymbolConfig, conn: Option<&mut PooledConnection<ConnectionManager<PgConnection>>>) -> anyhow::Result<MarketSymbolProcessorOutput> {
        let app_conn = conn.ok_or_else(|| anyhow!("Failed to get conn"))?;

        match self {
            MarketSymbolProcessorInput::GetView(args) => {
                let now = Utc::now();

                let Some(symbol_record) = operations::load_symbol(app_conn, &args.symbol)? else {
                    return Ok(MarketSymbolProcessorOutput::GetView(None));
                };

                let latest = operations::latest_point_in_range(
                    app_conn,
                    symbol_record.id,
                    (now - Duration::days(1)).naive_utc(),
                    now.naive_utc(),
                )?;

                let history =
                    aggregators::build_history(app_conn, symbol_record.id, args.aggregation, now)?;

                let view =
                    view::assemble_view(&symbol_record, args.aggregation, now, latest.as_ref(), history)?;

                Ok(MarketSymbolProcessorOutput::GetView(Some(view)))
            }
        }
    }
}
