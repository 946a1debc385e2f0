use std::str::FromStr;

use chrono::{DateTime, Datelike, Days, Duration, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use stockcast_core::{DomainError, DomainResult};

/// How event timestamps are truncated into buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BucketMode {
    #[default]
    Day,
    /// ISO week, starting on Monday.
    Week,
    /// Calendar month, starting on the 1st.
    Month,
}

impl BucketMode {
    /// Start date of the bucket containing `ts` (UTC).
    pub fn bucket_start(&self, ts: DateTime<Utc>) -> NaiveDate {
        let date = ts.date_naive();
        match self {
            BucketMode::Day => date,
            BucketMode::Week => date - Days::new(u64::from(date.weekday().num_days_from_monday())),
            BucketMode::Month => date - Days::new(u64::from(date.day0())),
        }
    }
}

impl FromStr for BucketMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" | "daily" => Ok(BucketMode::Day),
            "week" | "weekly" => Ok(BucketMode::Week),
            "month" | "monthly" => Ok(BucketMode::Month),
            other => Err(DomainError::validation(format!("unknown bucket mode: {other}"))),
        }
    }
}

/// Closed time interval `[start, end]` of events to consider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookbackWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl LookbackWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> DomainResult<Self> {
        if start > end {
            return Err(DomainError::validation(format!(
                "lookback window start {start} is after end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// The `days` days ending at `now`.
    pub fn last_days(now: DateTime<Utc>, days: u32) -> Self {
        let start = now
            .checked_sub_signed(Duration::days(i64::from(days)))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        Self { start, end: now }
    }

    /// The `months` calendar months ending at `now`.
    pub fn last_months(now: DateTime<Utc>, months: u32) -> Self {
        let start = now
            .checked_sub_months(Months::new(months))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        Self { start, end: now }
    }

    /// Everything up to `now`.
    pub fn unbounded(now: DateTime<Utc>) -> Self {
        Self {
            start: DateTime::<Utc>::MIN_UTC,
            end: now,
        }
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        self.start <= ts && ts <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 30, 0).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn day_bucket_drops_time_of_day() {
        assert_eq!(BucketMode::Day.bucket_start(at(2024, 5, 17, 23)), date(2024, 5, 17));
    }

    #[test]
    fn week_bucket_starts_on_monday() {
        // 2024-05-19 is a Sunday; its ISO week started Monday 2024-05-13.
        assert_eq!(BucketMode::Week.bucket_start(at(2024, 5, 19, 8)), date(2024, 5, 13));
        assert_eq!(BucketMode::Week.bucket_start(at(2024, 5, 13, 0)), date(2024, 5, 13));
        // Crosses a month boundary.
        assert_eq!(BucketMode::Week.bucket_start(at(2024, 6, 1, 12)), date(2024, 5, 27));
    }

    #[test]
    fn month_bucket_starts_on_the_first() {
        assert_eq!(BucketMode::Month.bucket_start(at(2024, 2, 29, 10)), date(2024, 2, 1));
    }

    #[test]
    fn parses_bucket_aliases() {
        assert_eq!("Weekly".parse::<BucketMode>().unwrap(), BucketMode::Week);
        assert_eq!("day".parse::<BucketMode>().unwrap(), BucketMode::Day);
        assert!("hourly".parse::<BucketMode>().is_err());
    }

    #[test]
    fn bucket_mode_json_form() {
        assert_eq!(serde_json::to_string(&BucketMode::Week).unwrap(), r#""week""#);
        let mode: BucketMode = serde_json::from_str(r#""month""#).unwrap();
        assert_eq!(mode, BucketMode::Month);
        assert!(serde_json::from_str::<BucketMode>(r#""weekly""#).is_err());
    }

    #[test]
    fn window_rejects_reversed_bounds() {
        let err = LookbackWindow::new(at(2024, 5, 2, 0), at(2024, 5, 1, 0)).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn month_window_uses_calendar_months() {
        let now = at(2024, 8, 31, 12);
        let window = LookbackWindow::last_months(now, 6);
        assert_eq!(window.start().date_naive(), date(2024, 2, 29));
        assert!(window.contains(now));
        assert!(!window.contains(at(2024, 2, 28, 12)));
    }

    #[test]
    fn day_window_is_inclusive() {
        let now = at(2024, 8, 31, 12);
        let window = LookbackWindow::last_days(now, 7);
        assert!(window.contains(window.start()));
        assert!(window.contains(now));
        assert!(!window.contains(at(2024, 9, 1, 0)));
    }
}
