//! Summary statistics over a demand series.
//!
//! All statistics index points by position, not by calendar date: a series
//! with gaps is treated as if its points were contiguous.

use serde::{Deserialize, Serialize};

use stockcast_core::SeriesPoint;

/// Ordinary-least-squares slope of quantity against the 0-based point index.
///
/// Returns 0 for fewer than two points.
pub fn trend_slope(points: &[SeriesPoint]) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }

    let n = points.len() as f64;
    let (mut sum_x, mut sum_y, mut sum_xy, mut sum_xx) = (0.0, 0.0, 0.0, 0.0);
    for (i, p) in points.iter().enumerate() {
        let x = i as f64;
        sum_x += x;
        sum_y += p.quantity;
        sum_xy += x * p.quantity;
        sum_xx += x * x;
    }

    let denominator = n * sum_xx - sum_x * sum_x;
    if denominator == 0.0 {
        return 0.0;
    }
    (n * sum_xy - sum_x * sum_y) / denominator
}

/// Coefficient of variation: population standard deviation over the mean.
///
/// Returns 0 for fewer than two points or a non-positive mean.
pub fn volatility(points: &[SeriesPoint]) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }

    let n = points.len() as f64;
    let mean = points.iter().map(|p| p.quantity).sum::<f64>() / n;
    if mean <= 0.0 {
        return 0.0;
    }
    let variance = points
        .iter()
        .map(|p| {
            let d = p.quantity - mean;
            d * d
        })
        .sum::<f64>()
        / n;
    variance.sqrt() / mean
}

/// Multiplicative demand factor per weekday, index 0 = Sunday.
///
/// A factor of 1 means the weekday sells exactly the series average.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeeklyPattern(pub [f64; 7]);

impl WeeklyPattern {
    pub const NEUTRAL: WeeklyPattern = WeeklyPattern([1.0; 7]);

    pub fn factor(&self, weekday: usize) -> f64 {
        self.0[weekday % 7]
    }
}

/// Average quantity per weekday divided by the overall average.
///
/// Weekdays never observed keep a divisor of 1 and so get a factor of 0.
/// A series with no demand at all (or no points) has a neutral pattern.
pub fn weekly_pattern(points: &[SeriesPoint]) -> WeeklyPattern {
    if points.is_empty() {
        return WeeklyPattern::NEUTRAL;
    }

    let mut totals = [0.0f64; 7];
    let mut counts = [0u32; 7];
    for p in points {
        let wd = p.weekday_index();
        totals[wd] += p.quantity;
        counts[wd] += 1;
    }

    let avg_daily = points.iter().map(|p| p.quantity).sum::<f64>() / points.len() as f64;
    if avg_daily <= 0.0 {
        return WeeklyPattern::NEUTRAL;
    }

    let mut factors = [0.0f64; 7];
    for (wd, factor) in factors.iter_mut().enumerate() {
        let count = f64::from(counts[wd].max(1));
        *factor = (totals[wd] / count) / avg_daily;
    }
    WeeklyPattern(factors)
}

/// Trend, volatility and weekday seasonality of one series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesStatistics {
    pub trend_slope: f64,
    pub volatility: f64,
    pub weekly_pattern: WeeklyPattern,
}

impl SeriesStatistics {
    pub fn of(points: &[SeriesPoint]) -> Self {
        Self {
            trend_slope: trend_slope(points),
            volatility: volatility(points),
            weekly_pattern: weekly_pattern(points),
        }
    }
}
