use serde::{Deserialize, Serialize};
use thiserror::Error;

use stockcast_core::{DomainError, ValueObject};

/// Demand forecast for consecutive future days, index 0 = tomorrow.
///
/// Values are always finite and non-negative: negative or non-finite inputs
/// are clamped to zero on construction (including deserialization).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<f64>", into = "Vec<f64>")]
pub struct Forecast(Vec<f64>);

impl Forecast {
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Self {
        Self(values.into_iter().map(clamp_demand).collect())
    }

    /// The same level repeated for every step.
    pub fn flat(level: f64, horizon: usize) -> Self {
        Self(vec![clamp_demand(level); horizon])
    }

    pub fn zeros(horizon: usize) -> Self {
        Self(vec![0.0; horizon])
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }

    pub fn horizon(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, step: usize) -> Option<f64> {
        self.0.get(step).copied()
    }

    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }

    /// Each step rounded to whole units (half rounds up).
    pub fn rounded(&self) -> Vec<u64> {
        self.0.iter().map(|v| v.round() as u64).collect()
    }
}

impl ValueObject for Forecast {}

impl From<Vec<f64>> for Forecast {
    fn from(values: Vec<f64>) -> Self {
        Self::from_values(values)
    }
}

impl From<Forecast> for Vec<f64> {
    fn from(forecast: Forecast) -> Self {
        forecast.0
    }
}

fn clamp_demand(v: f64) -> f64 {
    if v.is_finite() { v.max(0.0) } else { 0.0 }
}

/// Failure of a forecasting job.
///
/// The numeric models never fail; errors come from the collaborators that
/// supply sale events and stock levels, or from an invalid configuration.
#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("data source failed: {0}")]
    Source(String),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl ForecastError {
    pub fn source_failed(msg: impl Into<String>) -> Self {
        Self::Source(msg.into())
    }
}
