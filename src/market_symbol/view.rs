use anyhow::{anyhow, Result};
use bigdecimal::ToPrimitive;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::aggregators::{AggregationWindow, TimeBucket};
use crate::market_clock;
use crate::market_symbol::db_types::{MarketSymbolRecord, PricePointRecord};

/// The response shape the dashboard renders. Assembled per request, never
/// persisted. `history` ascends by bucket timestamp; `change_price` is
/// forced to zero while the market is pre-open.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MarketSymbolView {
    pub id: Uuid,
    pub symbol: String,
    pub last_price: f64,
    pub change_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
    pub aggregation: AggregationWindow,
    pub is_pre_market: bool,
    pub history: Vec<TimeBucket>,
}

/// Combines the latest raw point with the aggregated history into the
/// response view.
///
/// `last_price` falls back to 0 when no point exists in the last day.
/// `change_price` is measured against the first bucket's closing price, and
/// only once today's session has opened.
pub fn assemble_view(
    symbol: &MarketSymbolRecord,
    aggregation: AggregationWindow,
    now: DateTime<Utc>,
    latest: Option<&PricePointRecord>,
    history: Vec<TimeBucket>,
) -> Result<MarketSymbolView> {
    let last_price = match latest {
        Some(point) => point
            .close
            .to_f64()
            .ok_or_else(|| anyhow!("Failed to convert close price for {}", symbol.symbol))?,
        None => 0.0,
    };
    let last_updated = latest.map(|point| Utc.from_utc_datetime(&point.point_time));

    let (is_pre_market, change_price) = match history.first() {
        Some(first_bucket) => {
            let market_time = market_clock::resolve(now);

            if market_time.is_before_open {
                (true, 0.0)
            } else {
                (false, last_price - first_bucket.closing_price)
            }
        }
        None => (false, 0.0),
    };

    Ok(MarketSymbolView {
        id: symbol.id,
        symbol: symbol.symbol.clone(),
        last_price,
        change_price,
        last_updated,
        aggregation,
        is_pre_market,
        history,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;
    use chrono::NaiveDate;

    fn symbol_record() -> MarketSymbolRecord {
        MarketSymbolRecord {
            id: Uuid::nil(),
            symbol: "BTC-USDT".to_string(),
            created_at: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        }
    }

    fn latest_point(close: i64) -> PricePointRecord {
        let point_time = NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(12, 59, 0)
            .unwrap();

        PricePointRecord {
            id: Uuid::nil(),
            symbol_id: Uuid::nil(),
            point_time,
            open: BigDecimal::from(close),
            close: BigDecimal::from(close),
            high: BigDecimal::from(close),
            low: BigDecimal::from(close),
            created_at: point_time,
        }
    }

    fn bucket(closing_price: f64) -> TimeBucket {
        TimeBucket {
            timestamp: "2024-03-14T13:30:00Z".parse().unwrap(),
            opening_price: closing_price,
            closing_price,
            highest_price: closing_price,
            lowest_price: closing_price,
        }
    }

    #[test]
    fn test_change_price_forced_to_zero_before_open() {
        // 09:00 New York, before the 09:30 open
        let now = "2024-03-15T13:00:00Z".parse().unwrap();
        let point = latest_point(105);

        let view = assemble_view(
            &symbol_record(),
            AggregationWindow::OneDay,
            now,
            Some(&point),
            vec![bucket(90.0)],
        )
        .unwrap();

        assert!(view.is_pre_market);
        assert_eq!(view.change_price, 0.0);
        assert_eq!(view.last_price, 105.0);
    }

    #[test]
    fn test_change_price_measured_from_first_bucket_after_open() {
        let now = "2024-03-15T14:00:00Z".parse().unwrap();
        let point = latest_point(105);

        let view = assemble_view(
            &symbol_record(),
            AggregationWindow::OneDay,
            now,
            Some(&point),
            vec![bucket(90.0), bucket(95.0)],
        )
        .unwrap();

        assert!(!view.is_pre_market);
        assert_eq!(view.change_price, 15.0);
    }

    #[test]
    fn test_empty_history_zeroes_the_view() {
        let now = "2024-03-15T14:00:00Z".parse().unwrap();

        let view = assemble_view(
            &symbol_record(),
            AggregationWindow::OneWeek,
            now,
            None,
            Vec::new(),
        )
        .unwrap();

        assert!(!view.is_pre_market);
        assert_eq!(view.last_price, 0.0);
        assert_eq!(view.change_price, 0.0);
        assert!(view.last_updated.is_none());
        assert!(view.history.is_empty());
    }

    #[test]
    fn test_wire_field_names_are_camel_case() {
        let now = "2024-03-15T14:00:00Z".parse().unwrap();
        let point = latest_point(105);

        let view = assemble_view(
            &symbol_record(),
            AggregationWindow::OneDay,
            now,
            Some(&point),
            vec![bucket(90.0)],
        )
        .unwrap();

        let json = serde_json::to_value(&view).unwrap();
        for key in [
            "lastPrice",
            "changePrice",
            "lastUpdated",
            "isPreMarket",
            "history",
            "aggregation",
        ] {
            assert!(json.get(key).is_some(), "missing wire field {}", key);
        }
        assert_eq!(json["aggregation"], "OneDay");

        let bucket_json = &json["history"][0];
        for key in ["timestamp", "openingPrice", "closingPrice", "highestPrice", "lowestPrice"] {
            assert!(bucket_json.get(key).is_some(), "missing bucket field {}", key);
        }
    }
}
