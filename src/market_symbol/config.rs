/// Configuration for the market symbol processor
#[derive(Clone, Debug, Default)]
pub struct MarketSymbolConfig {}
