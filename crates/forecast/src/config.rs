//! Forecasting configuration.
//!
//! Every value has a default; `from_env` overrides them from `STOCKCAST_*`
//! environment variables. Unparseable values are logged and ignored.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use stockcast_core::{DomainError, DomainResult};
use stockcast_sales::RealizedStatuses;

use crate::alert::AlertPolicy;
use crate::models::ModelParams;

pub const ENV_DEFAULT_HORIZON: &str = "STOCKCAST_DEFAULT_HORIZON";
pub const ENV_MAX_HORIZON: &str = "STOCKCAST_MAX_HORIZON";
pub const ENV_MA_WINDOW: &str = "STOCKCAST_MA_WINDOW";
pub const ENV_TREND_LOOKBACK: &str = "STOCKCAST_TREND_LOOKBACK";
pub const ENV_ES_ALPHA: &str = "STOCKCAST_ES_ALPHA";
pub const ENV_PRODUCT_LOOKBACK_MONTHS: &str = "STOCKCAST_PRODUCT_LOOKBACK_MONTHS";
pub const ENV_CATEGORY_LOOKBACK_MONTHS: &str = "STOCKCAST_CATEGORY_LOOKBACK_MONTHS";
pub const ENV_REALIZED_STATUSES: &str = "STOCKCAST_REALIZED_STATUSES";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Horizon used when a request does not name one.
    pub default_horizon: usize,
    /// Requests are clamped to `1..=max_horizon`.
    pub max_horizon: usize,
    pub model: ModelParams,
    /// Sales history considered for product forecasts.
    pub product_lookback_months: u32,
    /// Sales history considered for category forecasts.
    pub category_lookback_months: u32,
    pub realized_statuses: RealizedStatuses,
    pub alert: AlertPolicy,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            default_horizon: 7,
            max_horizon: 60,
            model: ModelParams::default(),
            product_lookback_months: 3,
            category_lookback_months: 6,
            realized_statuses: RealizedStatuses::default(),
            alert: AlertPolicy::default(),
        }
    }
}

impl ForecastConfig {
    /// Defaults overridden by `STOCKCAST_*` environment variables.
    pub fn from_env() -> DomainResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns per variable name.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> DomainResult<Self> {
        let mut cfg = Self::default();

        override_from(&lookup, ENV_DEFAULT_HORIZON, &mut cfg.default_horizon);
        override_from(&lookup, ENV_MAX_HORIZON, &mut cfg.max_horizon);
        override_from(&lookup, ENV_MA_WINDOW, &mut cfg.model.window);
        override_from(&lookup, ENV_TREND_LOOKBACK, &mut cfg.model.trend_lookback);
        override_from(&lookup, ENV_ES_ALPHA, &mut cfg.model.alpha);
        override_from(&lookup, ENV_PRODUCT_LOOKBACK_MONTHS, &mut cfg.product_lookback_months);
        override_from(&lookup, ENV_CATEGORY_LOOKBACK_MONTHS, &mut cfg.category_lookback_months);
        override_from(&lookup, ENV_REALIZED_STATUSES, &mut cfg.realized_statuses);

        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.max_horizon == 0 {
            return Err(DomainError::invalid_config("max_horizon must be >= 1"));
        }
        if self.default_horizon == 0 || self.default_horizon > self.max_horizon {
            return Err(DomainError::invalid_config(format!(
                "default_horizon must be in 1..={}",
                self.max_horizon
            )));
        }
        if self.product_lookback_months == 0 || self.category_lookback_months == 0 {
            return Err(DomainError::invalid_config("lookback months must be >= 1"));
        }
        if self.realized_statuses.is_empty() {
            return Err(DomainError::invalid_config("realized status set cannot be empty"));
        }
        if self.alert.warning_within_days < self.alert.critical_within_days {
            return Err(DomainError::invalid_config(
                "warning threshold must not be shorter than the critical threshold",
            ));
        }
        if self.alert.confidence_floor > self.alert.confidence_ceiling {
            return Err(DomainError::invalid_config("confidence floor exceeds ceiling"));
        }
        self.model.validate()
    }

    /// Requested horizon clamped to `1..=max_horizon`; `None` → default.
    pub fn horizon(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.default_horizon)
            .clamp(1, self.max_horizon.max(1))
    }
}

fn override_from<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, slot: &mut T)
where
    T: FromStr,
    T::Err: core::fmt::Display,
{
    let Some(raw) = lookup(key) else {
        return;
    };
    match raw.parse::<T>() {
        Ok(v) => *slot = v,
        Err(e) => warn!(key, value = %raw, error = %e, "ignoring invalid configuration value; using default"),
    }
}
