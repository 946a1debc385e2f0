//! Forecast reports handed to the presentation layer.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use stockcast_core::DailySeries;

use crate::alert::{AlertAssessment, AlertTier};
use crate::config::ForecastConfig;
use crate::method::{CallSite, ForecastMethod};
use crate::result::Forecast;
use crate::stock::{StockProjection, project_stock_out};
use crate::summary::{CategorySummary, ProductSummary};
use crate::trend::volatility;

/// What the caller asked for; both fields fall back to configured defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastRequest {
    pub method: Option<String>,
    pub horizon: Option<usize>,
}

impl ForecastRequest {
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn with_horizon(mut self, horizon: usize) -> Self {
        self.horizon = Some(horizon);
        self
    }
}

/// Whole-unit demand predicted for day `day` (1 = tomorrow).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyPrediction {
    pub day: u32,
    pub predicted_sales: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductForecastReport {
    pub summary: ProductSummary,
    pub method: ForecastMethod,
    pub avg_daily_sales: u64,
    pub days_of_stock: u64,
    pub alert: AlertAssessment,
    pub forecast: Forecast,
    pub predictions: Vec<DailyPrediction>,
    /// Projected against the whole-unit predictions, not the raw forecast.
    pub stock_out: StockProjection,
    /// Calendar day of the stock-out; `None` when stock lasts the horizon or
    /// the builder was not given a current date.
    pub stockout_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryForecastReport {
    pub summary: CategorySummary,
    pub method: ForecastMethod,
    pub avg_daily_sales: u64,
    /// Trend slope rounded to two decimals.
    pub trend: f64,
    pub forecast: Forecast,
    pub predictions: Vec<DailyPrediction>,
}

/// Builds reports from already-aggregated series.
#[derive(Debug, Clone, Copy)]
pub struct ReportBuilder<'a> {
    config: &'a ForecastConfig,
    today: Option<NaiveDate>,
}

impl<'a> ReportBuilder<'a> {
    pub fn new(config: &'a ForecastConfig) -> Self {
        Self { config, today: None }
    }

    /// Day the stock-out date is counted from.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn product(
        &self,
        summary: ProductSummary,
        series: &DailySeries,
        request: &ForecastRequest,
    ) -> ProductForecastReport {
        let method = CallSite::Product.resolve(request.method.as_deref());
        let horizon = self.config.horizon(request.horizon);
        let forecast = method.forecast(series, horizon, &self.config.model);
        let predictions = daily_predictions(&forecast);

        let whole_units: Vec<f64> = predictions.iter().map(|p| p.predicted_sales as f64).collect();
        let stock_out = project_stock_out(summary.current_stock, &whole_units);
        let stockout_date = self.today.and_then(|today| stock_out.stockout_date(today));
        let alert = self
            .config
            .alert
            .classify(&stock_out, &summary.position(), volatility(series.points()));

        debug!(
            product = %summary.product_id,
            %method,
            horizon,
            tier = ?alert.tier,
            days_until_stockout = ?stock_out.days_until_stockout,
            "built product forecast"
        );

        ProductForecastReport {
            method,
            avg_daily_sales: whole(summary.avg_daily_sales),
            days_of_stock: whole(summary.days_of_stock),
            alert,
            forecast,
            predictions,
            stock_out,
            stockout_date,
            summary,
        }
    }

    pub fn category(
        &self,
        summary: CategorySummary,
        series: &DailySeries,
        request: &ForecastRequest,
    ) -> CategoryForecastReport {
        let method = CallSite::Category.resolve(request.method.as_deref());
        let horizon = self.config.horizon(request.horizon);
        let forecast = method.forecast(series, horizon, &self.config.model);

        debug!(category = %summary.category, %method, horizon, "built category forecast");

        CategoryForecastReport {
            method,
            avg_daily_sales: whole(summary.avg_daily_sales),
            trend: round_to(summary.trend, 2),
            predictions: daily_predictions(&forecast),
            forecast,
            summary,
        }
    }
}

/// Keeps only reports whose tier is `Critical`.
pub fn critical_only(reports: Vec<ProductForecastReport>) -> Vec<ProductForecastReport> {
    reports
        .into_iter()
        .filter(|r| r.alert.tier == AlertTier::Critical)
        .collect()
}

fn daily_predictions(forecast: &Forecast) -> Vec<DailyPrediction> {
    forecast
        .rounded()
        .into_iter()
        .enumerate()
        .map(|(i, predicted_sales)| DailyPrediction {
            day: i as u32 + 1,
            predicted_sales,
        })
        .collect()
}

/// Rounded to whole units; negatives become zero.
fn whole(value: f64) -> u64 {
    value.round().max(0.0) as u64
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}
