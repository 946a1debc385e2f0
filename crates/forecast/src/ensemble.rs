//! Weighted combination of the four base predictors.

use serde::{Deserialize, Serialize};
use tracing::debug;

use stockcast_core::DailySeries;

use crate::models::{
    MIN_SEASONAL_POINTS, ModelParams, exponential_smoothing, linear_regression, moving_average,
    seasonal_adjustment,
};
use crate::result::Forecast;
use crate::trend::{trend_slope, volatility};

/// Absolute slope above which the series counts as trending.
pub const STRONG_TREND: f64 = 0.5;
/// Volatility above which the series counts as noisy.
pub const HIGH_VOLATILITY: f64 = 0.3;
/// Points from which two full weeks of seasonality are available.
pub const SEASONAL_HISTORY: usize = 14;

/// Blend weights per base predictor.
///
/// Adjustments are additive and the result is **not** renormalized; callers
/// relying on the weights summing to one must not assume it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnsembleWeights {
    pub moving_average: f64,
    pub linear_regression: f64,
    pub exponential_smoothing: f64,
    pub seasonal: f64,
}

impl EnsembleWeights {
    pub const BASE: EnsembleWeights = EnsembleWeights {
        moving_average: 0.3,
        linear_regression: 0.3,
        exponential_smoothing: 0.2,
        seasonal: 0.2,
    };

    /// Base weights shifted by the series' characteristics:
    /// - strong trend favours linear regression,
    /// - high volatility favours exponential smoothing,
    /// - two weeks of history favour seasonal adjustment.
    pub fn for_characteristics(trend_slope: f64, volatility: f64, len: usize) -> Self {
        let mut w = Self::BASE;

        if trend_slope.abs() > STRONG_TREND {
            w.linear_regression += 0.2;
            w.moving_average -= 0.1;
            w.exponential_smoothing -= 0.1;
        }

        if volatility > HIGH_VOLATILITY {
            w.exponential_smoothing += 0.2;
            w.linear_regression -= 0.1;
            w.moving_average -= 0.1;
        }

        if len >= SEASONAL_HISTORY {
            w.seasonal += 0.1;
            w.moving_average -= 0.05;
            w.linear_regression -= 0.05;
        }

        w
    }

    pub fn for_series(series: &DailySeries) -> Self {
        let points = series.points();
        Self::for_characteristics(trend_slope(points), volatility(points), points.len())
    }

    pub fn sum(&self) -> f64 {
        self.moving_average + self.linear_regression + self.exponential_smoothing + self.seasonal
    }
}

/// Adaptive blend of all four predictors; the default for product forecasts.
///
/// Series shorter than a week fall back to the moving average.
pub fn ensemble(series: &DailySeries, horizon: usize, params: &ModelParams) -> Forecast {
    if series.len() < MIN_SEASONAL_POINTS {
        return moving_average(series, horizon, params);
    }

    let ma = moving_average(series, horizon, params);
    let lr = linear_regression(series, horizon);
    let es = exponential_smoothing(series, horizon, params);
    let sa = seasonal_adjustment(series, horizon, params);
    let w = EnsembleWeights::for_series(series);

    debug!(
        points = series.len(),
        ma = w.moving_average,
        lr = w.linear_regression,
        es = w.exponential_smoothing,
        sa = w.seasonal,
        "ensemble weights"
    );

    Forecast::from_values((0..horizon).map(|i| {
        ma.values()[i] * w.moving_average
            + lr.values()[i] * w.linear_regression
            + es.values()[i] * w.exponential_smoothing
            + sa.values()[i] * w.seasonal
    }))
}
