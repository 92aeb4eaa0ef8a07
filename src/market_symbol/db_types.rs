use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use diesel::{Identifiable, Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::schema::market_symbols as MarketSymbolsTable;
use crate::schema::symbol_price_points as SymbolPricePointsTable;

/// A tracked market symbol. Owns one price time-series keyed by its id;
/// created on first ingestion and never deleted.
#[derive(Deserialize, Serialize, Debug, Clone, Queryable, Identifiable, Selectable)]
#[diesel(table_name = MarketSymbolsTable)]
pub struct MarketSymbolRecord {
    pub id: Uuid,
    pub symbol: String,
    pub created_at: NaiveDateTime,
}

#[derive(Deserialize, Serialize, Insertable)]
#[diesel(table_name = MarketSymbolsTable)]
pub struct CreateMarketSymbolRecord {
    pub symbol: String,
}

/// A single OHLC point in a symbol's time-series. `point_time` is a UTC
/// instant; re-ingesting the same instant overwrites the prices in place.
#[derive(Deserialize, Serialize, Debug, Clone, Queryable, Identifiable, Selectable)]
#[diesel(table_name = SymbolPricePointsTable)]
pub struct PricePointRecord {
    pub id: Uuid,
    pub symbol_id: Uuid,
    pub point_time: NaiveDateTime,
    pub open: BigDecimal,
    pub close: BigDecimal,
    pub high: BigDecimal,
    pub low: BigDecimal,
    pub created_at: NaiveDateTime,
}

#[derive(Deserialize, Serialize, Insertable)]
#[diesel(table_name = SymbolPricePointsTable)]
pub struct CreatePricePointRecord {
    pub symbol_id: Uuid,
    pub point_time: NaiveDateTime,
    pub open: BigDecimal,
    pub close: BigDecimal,
    pub high: BigDecimal,
    pub low: BigDecimal,
}
