//! `stockcast-forecast`
//!
//! **Responsibility:** demand forecasting and stock-risk assessment.
//!
//! - Series statistics (`trend`), base predictors (`models`) and their
//!   weighted blend (`ensemble`), selected through `method`.
//! - Stock-out projection (`stock`) and risk tiering (`alert`).
//! - Report assembly, dashboard roll-up and batch execution over many
//!   entities (`report`, `dashboard`, `job`, `scheduler`).
//!
//! Every computation is pure and recomputed from the full input series; this
//! crate never persists forecasts.

pub mod alert;
pub mod config;
pub mod dashboard;
pub mod ensemble;
pub mod in_memory;
pub mod job;
pub mod method;
pub mod models;
pub mod report;
pub mod result;
pub mod scheduler;
pub mod stock;
pub mod summary;
pub mod trend;

pub use alert::{AlertAssessment, AlertPolicy, AlertTier, StockPosition, classify_alert};
pub use config::ForecastConfig;
pub use dashboard::{CategoryHighlight, CriticalProduct, Dashboard, build_dashboard};
pub use ensemble::{EnsembleWeights, ensemble};
pub use in_memory::{InMemorySalesSource, InMemoryStockSource};
pub use job::{CategoryForecastJob, ForecastJob, ProductForecastJob, SalesSource, StockSource};
pub use method::{CallSite, ForecastMethod, forecast};
pub use models::{
    ModelParams, exponential_smoothing, linear_regression, moving_average, seasonal_adjustment,
};
pub use report::{
    CategoryForecastReport, DailyPrediction, ForecastRequest, ProductForecastReport, ReportBuilder,
    critical_only,
};
pub use result::{Forecast, ForecastError};
pub use scheduler::{JobOutcome, LocalScheduler};
pub use stock::{StockProjection, project_stock_out};
pub use summary::{CategorySummary, ProductSummary};
pub use trend::{SeriesStatistics, WeeklyPattern, trend_slope, volatility, weekly_pattern};
