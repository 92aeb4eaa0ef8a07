use chrono::{DateTime, Duration, Months, Utc};
use serde::{Deserialize, Serialize};

use crate::market_clock;

/// The closed set of history views the dashboard can request. Each window
/// pins a bucket width and a lookback-start rule; both matches are
/// exhaustive so adding a window fails to compile until the policy is
/// extended.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregationWindow {
    OneDay,
    OneWeek,
    OneMonth,
    ThreeMonths,
    OneYear,
    FiveYears,
}

impl AggregationWindow {
    pub const ALL: [AggregationWindow; 6] = [
        AggregationWindow::OneDay,
        AggregationWindow::OneWeek,
        AggregationWindow::OneMonth,
        AggregationWindow::ThreeMonths,
        AggregationWindow::OneYear,
        AggregationWindow::FiveYears,
    ];

    /// Width of a single aggregation bucket.
    pub fn bucket_width(&self) -> Duration {
        match self {
            AggregationWindow::OneDay => Duration::minutes(5),
            AggregationWindow::OneWeek => Duration::minutes(10),
            AggregationWindow::OneMonth => Duration::hours(1),
            AggregationWindow::ThreeMonths => Duration::hours(24),
            AggregationWindow::OneYear => Duration::hours(24),
            AggregationWindow::FiveYears => Duration::days(7),
        }
    }

    /// Start of the queried range. OneDay anchors at the last session open;
    /// the calendar windows subtract whole months so month-length drift
    /// matches the calendar, not a fixed day count.
    pub fn lookback_start(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            AggregationWindow::OneDay => market_clock::resolve(now).last_trading_open,
            AggregationWindow::OneWeek => now - Duration::days(7),
            AggregationWindow::OneMonth => now - Months::new(1),
            AggregationWindow::ThreeMonths => now - Months::new(3),
            AggregationWindow::OneYear => now - Months::new(12),
            AggregationWindow::FiveYears => now - Months::new(60),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_widths_match_policy_table() {
        assert_eq!(AggregationWindow::OneDay.bucket_width(), Duration::minutes(5));
        assert_eq!(AggregationWindow::OneWeek.bucket_width(), Duration::minutes(10));
        assert_eq!(AggregationWindow::OneMonth.bucket_width(), Duration::hours(1));
        assert_eq!(AggregationWindow::ThreeMonths.bucket_width(), Duration::hours(24));
        assert_eq!(AggregationWindow::OneYear.bucket_width(), Duration::hours(24));
        assert_eq!(AggregationWindow::FiveYears.bucket_width(), Duration::days(7));
    }

    #[test]
    fn test_every_window_has_a_positive_width() {
        for window in AggregationWindow::ALL {
            assert!(window.bucket_width() > Duration::zero(), "{:?}", window);
        }
    }

    #[test]
    fn test_one_day_anchors_at_last_session_open() {
        // Before the open the anchor is the previous day's 09:30 New York
        let now: DateTime<Utc> = "2024-03-15T13:00:00Z".parse().unwrap();

        assert_eq!(
            AggregationWindow::OneDay.lookback_start(now),
            "2024-03-14T13:30:00Z".parse::<DateTime<Utc>>().unwrap()
        );
    }

    #[test]
    fn test_fixed_span_lookbacks() {
        let now: DateTime<Utc> = "2024-03-15T14:00:00Z".parse().unwrap();

        assert_eq!(
            AggregationWindow::OneWeek.lookback_start(now),
            "2024-03-08T14:00:00Z".parse::<DateTime<Utc>>().unwrap()
        );
        assert_eq!(
            AggregationWindow::OneMonth.lookback_start(now),
            "2024-02-15T14:00:00Z".parse::<DateTime<Utc>>().unwrap()
        );
        assert_eq!(
            AggregationWindow::OneYear.lookback_start(now),
            "2023-03-15T14:00:00Z".parse::<DateTime<Utc>>().unwrap()
        );
        assert_eq!(
            AggregationWindow::FiveYears.lookback_start(now),
            "2019-03-15T14:00:00Z".parse::<DateTime<Utc>>().unwrap()
        );
    }
}
