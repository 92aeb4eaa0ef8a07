use anyhow::{anyhow, Result};
use bigdecimal::BigDecimal;
use chrono::{DateTime, TimeZone, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Wire envelope for KuCoin REST responses. `data` is null when the
/// requested range holds no candles; callers treat that as an empty set.
#[derive(Serialize, Deserialize, Debug)]
pub struct KucoinResponseWithData<T> {
    pub code: String,
    pub data: Option<T>,
}

/// One candle decoded from KuCoin's string-array row format.
#[derive(Debug, Clone)]
pub struct CandleBucket {
    pub point_time: DateTime<Utc>,
    pub open: BigDecimal,
    pub close: BigDecimal,
    pub high: BigDecimal,
    pub low: BigDecimal,
}

pub struct KucoinClient {
    base_url: String,
    client: Client,
}

impl KucoinClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            client: Client::new(),
        }
    }

    /// Fetches candles for `symbol` over `[start_at, end_at]` unix seconds.
    /// See: https://docs.kucoin.com/#get-klines
    pub async fn get_market_candles(
        &self,
        symbol: &str,
        candle_type: &str,
        start_at: i64,
        end_at: i64,
    ) -> Result<Vec<CandleBucket>> {
        let candle_url = format!(
            "{}/api/v1/market/candles?type={}&symbol={}&startAt={}&endAt={}",
            self.base_url, candle_type, symbol, start_at, end_at
        );
        tracing::debug!("Making GET request: {}", candle_url);

        let response = self.client.get(&candle_url).send().await?;
        let body = response
            .json::<KucoinResponseWithData<Vec<Vec<String>>>>()
            .await?;

        body.data
            .unwrap_or_default()
            .iter()
            .map(|row| parse_candle_row(row))
            .collect()
    }
}

/// Rows arrive as `[time, open, close, high, low, volume, turnover]`, all
/// strings. Trailing columns are ignored.
fn parse_candle_row(row: &[String]) -> Result<CandleBucket> {
    if row.len() < 5 {
        return Err(anyhow!(
            "Candle row has {} columns, expected at least 5",
            row.len()
        ));
    }

    let unix_secs = row[0].parse::<i64>()?;
    let point_time = Utc
        .timestamp_opt(unix_secs, 0)
        .single()
        .ok_or_else(|| anyhow!("Candle timestamp {} out of range", unix_secs))?;

    Ok(CandleBucket {
        point_time,
        open: BigDecimal::from_str(&row[1])?,
        close: BigDecimal::from_str(&row[2])?,
        high: BigDecimal::from_str(&row[3])?,
        low: BigDecimal::from_str(&row[4])?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_parse_candle_row() {
        let candle = parse_candle_row(&row(&[
            "1710510300",
            "67000.1",
            "67010.5",
            "67020.9",
            "66990.0",
            "12.5",
            "837512.3",
        ]))
        .unwrap();

        assert_eq!(
            candle.point_time,
            "2024-03-15T13:45:00Z".parse::<DateTime<Utc>>().unwrap()
        );
        assert_eq!(candle.open, BigDecimal::from_str("67000.1").unwrap());
        assert_eq!(candle.close, BigDecimal::from_str("67010.5").unwrap());
        assert_eq!(candle.high, BigDecimal::from_str("67020.9").unwrap());
        assert_eq!(candle.low, BigDecimal::from_str("66990.0").unwrap());
    }

    #[test]
    fn test_short_row_is_rejected() {
        assert!(parse_candle_row(&row(&["1710510300", "67000.1"])).is_err());
    }

    #[test]
    fn test_null_data_deserializes_to_none() {
        let body: KucoinResponseWithData<Vec<Vec<String>>> =
            serde_json::from_str(r#"{"code":"200000","data":null}"#).unwrap();

        assert_eq!(body.code, "200000");
        assert!(body.data.is_none());
    }

    #[test]
    fn test_envelope_with_rows_deserializes() {
        let body: KucoinResponseWithData<Vec<Vec<String>>> = serde_json::from_str(
            r#"{"code":"200000","data":[["1710510300","1","2","3","0.5","10","20"]]}"#,
        )
        .unwrap();

        let rows = body.data.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][0], "1710510300");
    }
}
