pub mod config;
pub mod kucoin;
pub mod processor;
pub mod scheduler;

// Re-export commonly used types
pub use config::IngestionConfig;
pub use kucoin::{CandleBucket, KucoinClient};
pub use processor::{FetchTodayInputArgs, IngestionProcessorInput, IngestionProcessorOutput};
