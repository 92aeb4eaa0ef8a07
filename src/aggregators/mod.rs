pub mod buckets;
pub mod windows;

// Re-export commonly used types
pub use buckets::{fold_into_buckets, TimeBucket};
pub use windows::AggregationWindow;

use anyhow::Result;
use chrono::{DateTime, Utc};
use diesel::r2d2::{ConnectionManager, PooledConnection};
use diesel::PgConnection;
use uuid::Uuid;

use crate::market_symbol::operations;

/// Builds the aggregated bucket history for a symbol: looks up the window's
/// bucket width and lookback start, issues one ordered ranged read over
/// `[lookback_start, now)` and folds the points into buckets.
///
/// A symbol with no points in range yields an empty vector, not an error.
pub fn build_history(
    conn: &mut PooledConnection<ConnectionManager<PgConnection>>,
    series_symbol_id: Uuid,
    window: AggregationWindow,
    now: DateTime<Utc>,
) -> Result<Vec<TimeBucket>> {
    let lookback_start = window.lookback_start(now);

    let points = operations::get_points_in_range(
        conn,
        series_symbol_id,
        lookback_start.naive_utc(),
        now.naive_utc(),
    )?;

    fold_into_buckets(&points, lookback_start, window.bucket_width())
}
