use serde::{Deserialize, Serialize};
use crate::aggregators::AggregationWindow;
use crate::market_symbol::view::MarketSymbolView;

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct GetViewInputArgs {
    pub symbol: String,
    pub aggregation: AggregationWindow,
}

#[derive(Deserialize, Serialize, Debug)]
pub enum MarketSymbolProcessorInput {
    GetView(GetViewInputArgs),
}

#[derive(Deserialize, Serialize, Debug)]
pub enum MarketSymbolProcessorOutput {
    /// None when the symbol was never ingested; a symbol with no recent
    /// points still yields a (zeroed) view.
    GetView(Option<MarketSymbolView>),
}
