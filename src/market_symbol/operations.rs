use anyhow::Result;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use diesel::PgConnection;
use uuid::Uuid;

use crate::market_symbol::db_types::{
    CreateMarketSymbolRecord, CreatePricePointRecord, MarketSymbolRecord, PricePointRecord,
};
use crate::schema::market_symbols as MarketSymbolsTable;
use crate::schema::symbol_price_points as SymbolPricePointsTable;

/// Loads a symbol document by its ticker string, None if it was never
/// ingested.
pub fn load_symbol(
    conn: &mut PooledConnection<ConnectionManager<PgConnection>>,
    ticker: &str,
) -> Result<Option<MarketSymbolRecord>> {
    use crate::schema::market_symbols::dsl::*;

    let record = market_symbols
        .filter(symbol.eq(ticker))
        .first::<MarketSymbolRecord>(conn)
        .optional()?;

    Ok(record)
}

/// Loads the symbol document, creating it on first sight.
pub fn ensure_symbol(
    conn: &mut PooledConnection<ConnectionManager<PgConnection>>,
    ticker: &str,
) -> Result<MarketSymbolRecord> {
    if let Some(existing) = load_symbol(conn, ticker)? {
        return Ok(existing);
    }

    let created = diesel::insert_into(MarketSymbolsTable::table)
        .values(&CreateMarketSymbolRecord {
            symbol: ticker.to_string(),
        })
        .get_result::<MarketSymbolRecord>(conn)?;

    Ok(created)
}

/// Appends a price point, overwriting the OHLC values when the exact
/// `(symbol_id, point_time)` pair already exists. Re-running ingestion for
/// the same day is therefore idempotent.
pub fn upsert_price_point(
    conn: &mut PooledConnection<ConnectionManager<PgConnection>>,
    record: &CreatePricePointRecord,
) -> Result<()> {
    use crate::schema::symbol_price_points::dsl::*;

    diesel::insert_into(SymbolPricePointsTable::table)
        .values(record)
        .on_conflict((symbol_id, point_time))
        .do_update()
        .set((
            open.eq(record.open.clone()),
            close.eq(record.close.clone()),
            high.eq(record.high.clone()),
            low.eq(record.low.clone()),
        ))
        .execute(conn)?;

    Ok(())
}

/// Points for a symbol over the half-open range `[from, to)`, ordered by
/// ascending timestamp.
pub fn get_points_in_range(
    conn: &mut PooledConnection<ConnectionManager<PgConnection>>,
    series_symbol_id: Uuid,
    from: NaiveDateTime,
    to: NaiveDateTime,
) -> Result<Vec<PricePointRecord>> {
    use crate::schema::symbol_price_points::dsl::*;

    let points = symbol_price_points
        .filter(
            symbol_id
                .eq(series_symbol_id)
                .and(point_time.ge(from).and(point_time.lt(to))),
        )
        .order(point_time.asc())
        .get_results::<PricePointRecord>(conn)?;

    Ok(points)
}

/// The most recent point in `[from, to)`, None when the range is empty.
pub fn latest_point_in_range(
    conn: &mut PooledConnection<ConnectionManager<PgConnection>>,
    series_symbol_id: Uuid,
    from: NaiveDateTime,
    to: NaiveDateTime,
) -> Result<Option<PricePointRecord>> {
    use crate::schema::symbol_price_points::dsl::*;

    let point = symbol_price_points
        .filter(
            symbol_id
                .eq(series_symbol_id)
                .and(point_time.ge(from).and(point_time.lt(to))),
        )
        .order(point_time.desc())
        .first::<PricePointRecord>(conn)
        .optional()?;

    Ok(point)
}
