//! Base demand predictors.
//!
//! Every predictor is a pure function of (series, horizon, params) and has a
//! fallback for series too short for its model, so none of them can fail.

use serde::{Deserialize, Serialize};

use stockcast_core::{DailySeries, DomainError, DomainResult};

use crate::result::Forecast;
use crate::trend::{trend_slope, weekly_pattern};

/// Fewest points for which weekday seasonality is considered (one week).
pub const MIN_SEASONAL_POINTS: usize = 7;

/// Tunables shared by the predictors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelParams {
    /// Points averaged for the moving-average base level.
    pub window: usize,
    /// Trailing points used to estimate the moving-average trend.
    pub trend_lookback: usize,
    /// Exponential smoothing factor in (0, 1].
    pub alpha: f64,
}

impl Default for ModelParams {
    fn default() -> Self {
        Self {
            window: 7,
            trend_lookback: 14,
            alpha: 0.3,
        }
    }
}

impl ModelParams {
    pub fn validate(&self) -> DomainResult<()> {
        if self.window == 0 {
            return Err(DomainError::invalid_config("moving-average window must be >= 1"));
        }
        if self.trend_lookback < 2 {
            return Err(DomainError::invalid_config("trend lookback must be >= 2"));
        }
        if !(self.alpha.is_finite() && self.alpha > 0.0 && self.alpha <= 1.0) {
            return Err(DomainError::invalid_config("smoothing alpha must be in (0, 1]"));
        }
        Ok(())
    }
}

/// Recent average extrapolated with a capped, compounding trend.
///
/// With fewer than `window` points, every step is the whole-series mean.
/// Otherwise the base level is the mean of the last `window` points and the
/// per-step factor is `clamp(1 + slope * 0.1, 0.8, 1.2)`, with `slope` taken
/// over the last `trend_lookback` points. Step `i` (1-based) is
/// `base * factor^i`.
pub fn moving_average(series: &DailySeries, horizon: usize, params: &ModelParams) -> Forecast {
    let window = params.window.max(1);
    if series.len() < window {
        let mean = if series.is_empty() {
            0.0
        } else {
            series.total_quantity() / series.len() as f64
        };
        return Forecast::flat(mean, horizon);
    }

    let base = series.tail(window).iter().map(|p| p.quantity).sum::<f64>() / window as f64;
    let slope = trend_slope(series.tail(params.trend_lookback));
    let factor = (1.0 + slope * 0.1).clamp(0.8, 1.2);

    Forecast::from_values(
        std::iter::successors(Some(base * factor), |level| Some(level * factor)).take(horizon),
    )
}

/// Straight-line OLS fit over the whole series, extended forward.
///
/// With fewer than two points the first observed value (or 0) is repeated.
pub fn linear_regression(series: &DailySeries, horizon: usize) -> Forecast {
    let points = series.points();
    if points.len() < 2 {
        let level = points.first().map_or(0.0, |p| p.quantity);
        return Forecast::flat(level, horizon);
    }

    let n = points.len() as f64;
    let slope = trend_slope(points);
    let sum_x = n * (n - 1.0) / 2.0;
    let intercept = (series.total_quantity() - slope * sum_x) / n;

    Forecast::from_values((0..horizon).map(|i| slope * (n + i as f64) + intercept))
}

/// Single exponential smoothing; the final level is repeated for every step.
pub fn exponential_smoothing(series: &DailySeries, horizon: usize, params: &ModelParams) -> Forecast {
    let Some((first, rest)) = series.points().split_first() else {
        return Forecast::zeros(horizon);
    };

    let alpha = params.alpha;
    let level = rest
        .iter()
        .fold(first.quantity, |level, p| alpha * p.quantity + (1.0 - alpha) * level);

    Forecast::flat(level, horizon)
}

/// Moving-average baseline scaled by the weekday pattern.
///
/// Step `i` uses `pattern[i % 7]`: the step's position, not the calendar
/// weekday of the forecast day. A zero factor (weekday never observed, or
/// never sold on) leaves the baseline unscaled. Series shorter than a week
/// fall back to the moving average.
pub fn seasonal_adjustment(series: &DailySeries, horizon: usize, params: &ModelParams) -> Forecast {
    let baseline = moving_average(series, horizon, params);
    if series.len() < MIN_SEASONAL_POINTS {
        return baseline;
    }

    let pattern = weekly_pattern(series.points());
    Forecast::from_values(baseline.values().iter().enumerate().map(|(i, base)| {
        let factor = pattern.factor(i % 7);
        let factor = if factor == 0.0 || !factor.is_finite() { 1.0 } else { factor };
        base * factor
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn series(quantities: &[f64]) -> DailySeries {
        DailySeries::from_quantities(NaiveDate::from_ymd_opt(2024, 3, 3).unwrap(), quantities)
    }

    fn approx(a: &[f64], b: &[f64]) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(x, y)| (x - y).abs() < 1e-9)
    }

    #[test]
    fn moving_average_falls_back_to_mean_for_short_series() {
        let f = moving_average(&series(&[2.0, 4.0, 6.0]), 3, &ModelParams::default());
        assert_eq!(f.values(), &[4.0, 4.0, 4.0]);
    }

    #[test]
    fn moving_average_of_empty_series_is_zero() {
        let f = moving_average(&series(&[]), 4, &ModelParams::default());
        assert_eq!(f.values(), &[0.0; 4]);
    }

    #[test]
    fn moving_average_flat_series_has_no_trend() {
        let f = moving_average(&series(&[5.0; 10]), 3, &ModelParams::default());
        assert_eq!(f.values(), &[5.0, 5.0, 5.0]);
    }

    #[test]
    fn moving_average_compounds_trend_factor() {
        // Last 7 points average 7.0; slope over the last 14 is 1 → factor 1.1.
        let q: Vec<f64> = (1..=10).map(f64::from).collect();
        let f = moving_average(&series(&q), 3, &ModelParams::default());
        let base = (4.0 + 5.0 + 6.0 + 7.0 + 8.0 + 9.0 + 10.0) / 7.0;
        assert!(approx(f.values(), &[base * 1.1, base * 1.1 * 1.1, base * 1.1_f64.powi(3)]));
    }

    #[test]
    fn moving_average_trend_factor_is_capped() {
        // Slope 10 would give factor 2.0; capped at 1.2.
        let q: Vec<f64> = (0..10).map(|i| f64::from(i) * 10.0).collect();
        let f = moving_average(&series(&q), 2, &ModelParams::default());
        let base = (30.0 + 40.0 + 50.0 + 60.0 + 70.0 + 80.0 + 90.0) / 7.0;
        assert!(approx(f.values(), &[base * 1.2, base * 1.44]));

        let down: Vec<f64> = q.iter().rev().copied().collect();
        let f = moving_average(&series(&down), 1, &ModelParams::default());
        let base = (60.0 + 50.0 + 40.0 + 30.0 + 20.0 + 10.0 + 0.0) / 7.0;
        assert!(approx(f.values(), &[base * 0.8]));
    }

    #[test]
    fn moving_average_trend_compounds_over_long_horizons() {
        let q: Vec<f64> = (1..=10).map(f64::from).collect();
        let f = moving_average(&series(&q), 200, &ModelParams::default());
        assert_eq!(f.horizon(), 200);
        let base = 7.0;
        for (i, v) in f.values().iter().enumerate() {
            let expected = base * 1.1_f64.powi(i as i32 + 1);
            assert!((v / expected - 1.0).abs() < 1e-9, "step {i}: {v} vs {expected}");
        }
    }

    #[test]
    fn linear_regression_extends_perfect_line() {
        let f = linear_regression(&series(&[1.0, 2.0, 3.0, 4.0, 5.0]), 2);
        assert!(approx(f.values(), &[6.0, 7.0]));
    }

    #[test]
    fn linear_regression_clamps_at_zero() {
        let f = linear_regression(&series(&[4.0, 3.0, 2.0, 1.0]), 3);
        assert!(approx(f.values(), &[0.0, 0.0, 0.0]));
    }

    #[test]
    fn linear_regression_short_series_repeats_first_value() {
        assert_eq!(linear_regression(&series(&[3.0]), 2).values(), &[3.0, 3.0]);
        assert_eq!(linear_regression(&series(&[]), 2).values(), &[0.0, 0.0]);
    }

    #[test]
    fn exponential_smoothing_is_flat_final_level() {
        // 10 → 0.3*20 + 0.7*10 = 13 → 0.3*10 + 0.7*13 = 12.1
        let f = exponential_smoothing(&series(&[10.0, 20.0, 10.0]), 3, &ModelParams::default());
        assert!(approx(f.values(), &[12.1, 12.1, 12.1]));
        assert_eq!(exponential_smoothing(&series(&[]), 2, &ModelParams::default()).values(), &[0.0, 0.0]);
    }

    #[test]
    fn seasonal_short_series_delegates_to_moving_average() {
        let s = series(&[2.0, 4.0, 6.0]);
        let params = ModelParams::default();
        assert_eq!(seasonal_adjustment(&s, 5, &params), moving_average(&s, 5, &params));
    }

    #[test]
    fn seasonal_applies_pattern_from_one_week() {
        // Exactly seven points, one per weekday, starting on Sunday.
        let s = series(&[2.0, 9.0, 4.0, 8.0, 3.0, 10.0, 5.0]);
        let params = ModelParams::default();
        let base = moving_average(&s, 2, &params);
        let f = seasonal_adjustment(&s, 2, &params);
        let avg = 41.0 / 7.0;

        assert!((f.values()[0] - base.values()[0] * 2.0 / avg).abs() < 1e-9);
        assert!((f.values()[1] - base.values()[1] * 9.0 / avg).abs() < 1e-9);
        assert_ne!(f, base);
    }

    #[test]
    fn seasonal_scales_by_step_position() {
        // Two flat weeks where Sunday (index 0) sells double.
        let week = [14.0, 7.0, 7.0, 7.0, 7.0, 7.0, 7.0];
        let q: Vec<f64> = week.iter().chain(week.iter()).copied().collect();
        let s = series(&q);
        let params = ModelParams::default();

        let base = moving_average(&s, 8, &params);
        let f = seasonal_adjustment(&s, 8, &params);
        let pattern = weekly_pattern(s.points());

        assert!((f.values()[0] - base.values()[0] * pattern.factor(0)).abs() < 1e-9);
        assert!((f.values()[1] - base.values()[1] * pattern.factor(1)).abs() < 1e-9);
        assert!((f.values()[7] - base.values()[7] * pattern.factor(0)).abs() < 1e-9);
    }

    #[test]
    fn seasonal_treats_zero_factor_as_neutral() {
        // Never sells on Saturdays (index 6).
        let q = [3.0, 3.0, 3.0, 3.0, 3.0, 3.0, 0.0, 3.0];
        let s = series(&q);
        let params = ModelParams::default();
        let base = moving_average(&s, 7, &params);
        let f = seasonal_adjustment(&s, 7, &params);
        assert!((f.values()[6] - base.values()[6]).abs() < 1e-9);
    }

    #[test]
    fn params_validation() {
        assert!(ModelParams::default().validate().is_ok());
        assert!(ModelParams { window: 0, ..ModelParams::default() }.validate().is_err());
        assert!(ModelParams { alpha: 1.5, ..ModelParams::default() }.validate().is_err());
        assert!(ModelParams { trend_lookback: 1, ..ModelParams::default() }.validate().is_err());
    }
}
