use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::America::New_York;

/// The exchange's trading day is anchored to New York wall-clock time; the
/// session opens at 09:30 local.
const OPEN_HOUR: u32 = 9;
const OPEN_MINUTE: u32 = 30;

/// Market reference instants derived from "now". Recomputed per request,
/// never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketTime {
    /// Today's session-open instant (09:30 America/New_York).
    pub current_trade_open: DateTime<Utc>,
    /// The session open used as the OneDay lookback start: today's open, or
    /// 24 hours earlier when "now" precedes today's open.
    pub last_trading_open: DateTime<Utc>,
    pub is_before_open: bool,
}

/// Resolves the market reference instants for `now`.
///
/// Total over any valid instant: 09:30 never falls inside New York's DST
/// transition window, so the local-to-absolute conversion is unambiguous.
pub fn resolve(now: DateTime<Utc>) -> MarketTime {
    let local_date = now.with_timezone(&New_York).date_naive();
    let open_time = NaiveTime::from_hms_opt(OPEN_HOUR, OPEN_MINUTE, 0).unwrap_or(NaiveTime::MIN);

    let current_trade_open = local_instant(local_date, open_time);
    let is_before_open = now < current_trade_open;
    let last_trading_open = if is_before_open {
        current_trade_open - Duration::hours(24)
    } else {
        current_trade_open
    };

    MarketTime {
        current_trade_open,
        last_trading_open,
        is_before_open,
    }
}

/// Bounds of the current exchange-local calendar day as UTC instants:
/// local midnight of today's date and local midnight of the next date.
/// Ingestion fetches candles over this range.
pub fn exchange_day_bounds(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let local_date = now.with_timezone(&New_York).date_naive();

    let start_of_day = local_instant(local_date, NaiveTime::MIN);
    let end_of_day = local_instant(local_date + Duration::days(1), NaiveTime::MIN);

    (start_of_day, end_of_day)
}

fn local_instant(date: NaiveDate, time: NaiveTime) -> DateTime<Utc> {
    let local = date.and_time(time);

    match New_York.from_local_datetime(&local) {
        LocalResult::Single(instant) => instant.with_timezone(&Utc),
        // The fall-back transition repeats an hour; take the earlier pass.
        LocalResult::Ambiguous(earlier, _) => earlier.with_timezone(&Utc),
        // Spring-forward gap; never hit for midnight or 09:30 in New York.
        LocalResult::None => Utc.from_utc_datetime(&local),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instant(s: &str) -> DateTime<Utc> {
        s.parse::<DateTime<Utc>>().unwrap()
    }

    #[test]
    fn test_before_open_uses_previous_session() {
        // 2024-03-15T13:00:00Z is 09:00 in New York (EDT), before the open
        let market_time = resolve(instant("2024-03-15T13:00:00Z"));

        assert!(market_time.is_before_open);
        assert_eq!(
            market_time.current_trade_open,
            instant("2024-03-15T13:30:00Z")
        );
        assert_eq!(
            market_time.last_trading_open,
            instant("2024-03-14T13:30:00Z")
        );
    }

    #[test]
    fn test_after_open_uses_todays_session() {
        // 2024-03-15T14:00:00Z is 10:00 in New York (EDT), after the open
        let market_time = resolve(instant("2024-03-15T14:00:00Z"));

        assert!(!market_time.is_before_open);
        assert_eq!(
            market_time.last_trading_open,
            instant("2024-03-15T13:30:00Z")
        );
    }

    #[test]
    fn test_exactly_at_open_is_not_before_open() {
        let market_time = resolve(instant("2024-03-15T13:30:00Z"));

        assert!(!market_time.is_before_open);
        assert_eq!(
            market_time.last_trading_open,
            market_time.current_trade_open
        );
    }

    #[test]
    fn test_winter_open_shifts_with_standard_time() {
        // January is EST (UTC-5), so 09:30 local is 14:30Z
        let market_time = resolve(instant("2024-01-10T15:00:00Z"));

        assert_eq!(
            market_time.current_trade_open,
            instant("2024-01-10T14:30:00Z")
        );
    }

    #[test]
    fn test_exchange_day_bounds_cover_local_day() {
        // EDT: local midnight is 04:00Z
        let (start_of_day, end_of_day) = exchange_day_bounds(instant("2024-03-15T13:00:00Z"));

        assert_eq!(start_of_day, instant("2024-03-15T04:00:00Z"));
        assert_eq!(end_of_day, instant("2024-03-16T04:00:00Z"));
    }
}
