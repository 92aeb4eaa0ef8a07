use anyhow::{anyhow, Result};
use bigdecimal::{BigDecimal, ToPrimitive};
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::market_symbol::db_types::PricePointRecord;

/// One aggregated interval of a symbol's history. Derived per request,
/// never stored. `timestamp` is the bucket's start instant.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TimeBucket {
    pub timestamp: DateTime<Utc>,
    pub opening_price: f64,
    pub closing_price: f64,
    pub highest_price: f64,
    pub lowest_price: f64,
}

/// Folds an ascending stream of raw points into fixed-width buckets
/// anchored at `lookback_start`: bucket `k` covers
/// `[lookback_start + k*width, lookback_start + (k+1)*width)`.
///
/// Each occupied bucket carries the open of its first point, the close of
/// its last, and the min/max across the group. Empty buckets are omitted,
/// never zero-filled. Points must already be ordered by ascending
/// timestamp; points before `lookback_start` are skipped.
pub fn fold_into_buckets(
    points: &[PricePointRecord],
    lookback_start: DateTime<Utc>,
    width: Duration,
) -> Result<Vec<TimeBucket>> {
    let width_ms = width.num_milliseconds();
    if width_ms <= 0 {
        return Err(anyhow!("Bucket width must be positive"));
    }

    let mut buckets = Vec::new();
    let mut current: Option<BucketAccumulator> = None;

    for point in points {
        let point_instant = Utc.from_utc_datetime(&point.point_time);
        let offset_ms = (point_instant - lookback_start).num_milliseconds();
        if offset_ms < 0 {
            continue;
        }

        let index = offset_ms / width_ms;
        match current.as_mut() {
            Some(group) if group.index == index => group.absorb(point),
            _ => {
                if let Some(finished) = current.take() {
                    buckets.push(finished.into_bucket(lookback_start, width_ms)?);
                }
                current = Some(BucketAccumulator::open_with(index, point));
            }
        }
    }

    if let Some(finished) = current.take() {
        buckets.push(finished.into_bucket(lookback_start, width_ms)?);
    }

    Ok(buckets)
}

struct BucketAccumulator {
    index: i64,
    open: BigDecimal,
    close: BigDecimal,
    high: BigDecimal,
    low: BigDecimal,
}

impl BucketAccumulator {
    fn open_with(index: i64, point: &PricePointRecord) -> Self {
        Self {
            index,
            open: point.open.clone(),
            close: point.close.clone(),
            high: point.high.clone(),
            low: point.low.clone(),
        }
    }

    fn absorb(&mut self, point: &PricePointRecord) {
        self.close = point.close.clone();
        if point.high > self.high {
            self.high = point.high.clone();
        }
        if point.low < self.low {
            self.low = point.low.clone();
        }
    }

    fn into_bucket(self, lookback_start: DateTime<Utc>, width_ms: i64) -> Result<TimeBucket> {
        let timestamp = lookback_start + Duration::milliseconds(self.index * width_ms);

        Ok(TimeBucket {
            timestamp,
            opening_price: to_price(&self.open)?,
            closing_price: to_price(&self.close)?,
            highest_price: to_price(&self.high)?,
            lowest_price: to_price(&self.low)?,
        })
    }
}

fn to_price(value: &BigDecimal) -> Result<f64> {
    value
        .to_f64()
        .ok_or_else(|| anyhow!("Failed to convert price to f64"))
}
