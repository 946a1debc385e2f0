//! Forecasting method selection.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use stockcast_core::{DailySeries, DomainError};

use crate::ensemble::ensemble;
use crate::models::{
    ModelParams, exponential_smoothing, linear_regression, moving_average, seasonal_adjustment,
};
use crate::result::Forecast;

/// The closed set of predictors a caller can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForecastMethod {
    MovingAverage,
    LinearRegression,
    ExponentialSmoothing,
    Seasonal,
    Ensemble,
}

impl ForecastMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ForecastMethod::MovingAverage => "moving_average",
            ForecastMethod::LinearRegression => "linear_regression",
            ForecastMethod::ExponentialSmoothing => "exponential_smoothing",
            ForecastMethod::Seasonal => "seasonal",
            ForecastMethod::Ensemble => "ensemble",
        }
    }

    pub fn forecast(&self, series: &DailySeries, horizon: usize, params: &ModelParams) -> Forecast {
        match self {
            ForecastMethod::MovingAverage => moving_average(series, horizon, params),
            ForecastMethod::LinearRegression => linear_regression(series, horizon),
            ForecastMethod::ExponentialSmoothing => exponential_smoothing(series, horizon, params),
            ForecastMethod::Seasonal => seasonal_adjustment(series, horizon, params),
            ForecastMethod::Ensemble => ensemble(series, horizon, params),
        }
    }
}

impl core::fmt::Display for ForecastMethod {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive; `advanced` is accepted as an alias for `ensemble`.
impl FromStr for ForecastMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "moving_average" => Ok(ForecastMethod::MovingAverage),
            "linear_regression" => Ok(ForecastMethod::LinearRegression),
            "exponential_smoothing" => Ok(ForecastMethod::ExponentialSmoothing),
            "seasonal" => Ok(ForecastMethod::Seasonal),
            "ensemble" | "advanced" => Ok(ForecastMethod::Ensemble),
            other => Err(DomainError::validation(format!("unknown forecast method: {other}"))),
        }
    }
}

/// Where a forecast is requested from; each call site has its own default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallSite {
    /// Product forecasts default to the ensemble.
    Product,
    /// Category forecasts default to seasonal adjustment and do not offer
    /// the ensemble.
    Category,
}

impl CallSite {
    pub fn default_method(&self) -> ForecastMethod {
        match self {
            CallSite::Product => ForecastMethod::Ensemble,
            CallSite::Category => ForecastMethod::Seasonal,
        }
    }

    pub fn supports(&self, method: ForecastMethod) -> bool {
        match self {
            CallSite::Product => true,
            CallSite::Category => method != ForecastMethod::Ensemble,
        }
    }

    /// Resolves a requested method name; missing, unknown or unsupported
    /// names fall back to this call site's default.
    pub fn resolve(&self, requested: Option<&str>) -> ForecastMethod {
        requested
            .and_then(|name| name.parse::<ForecastMethod>().ok())
            .filter(|m| self.supports(*m))
            .unwrap_or_else(|| self.default_method())
    }
}

/// Forecasts `horizon` days with default model parameters.
pub fn forecast(series: &DailySeries, method: ForecastMethod, horizon: usize) -> Forecast {
    method.forecast(series, horizon, &ModelParams::default())
}
