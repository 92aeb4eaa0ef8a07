pub mod config;
pub mod db_types;
pub mod operations;
pub mod processor;
pub mod processor_enums;
pub mod view;

// Re-export commonly used types
pub use db_types::{CreatePricePointRecord, MarketSymbolRecord, PricePointRecord};
pub use view::MarketSymbolView;
