use std::sync::Arc;

use chrono::{DateTime, Utc};

use stockcast_core::{CategoryId, DailySeries, EntityRef, ProductId};
use stockcast_sales::{Aggregator, BucketMode, LookbackWindow, SaleEvent};

use crate::config::ForecastConfig;
use crate::report::{CategoryForecastReport, ForecastRequest, ProductForecastReport, ReportBuilder};
use crate::result::ForecastError;
use crate::summary::{CategorySummary, ProductSummary};

/// Supplies sale events from the order system.
///
/// Implementations may pre-filter by entity, window and status; the jobs
/// re-apply all three filters, so returning a superset is fine.
pub trait SalesSource: Send + Sync {
    fn sale_events(
        &self,
        entity: &EntityRef,
        window: &LookbackWindow,
    ) -> Result<Vec<SaleEvent>, ForecastError>;
}

/// Supplies current on-hand stock per product.
pub trait StockSource: Send + Sync {
    fn current_stock(&self, product_id: ProductId) -> Result<i64, ForecastError>;
}

/// One entity's forecasting unit of work.
///
/// Jobs fetch their inputs from collaborators and recompute everything from
/// scratch; they hold no state between runs.
pub trait ForecastJob: Send + Sync {
    type Output: Send;

    fn entity(&self) -> EntityRef;

    fn run(&self) -> Result<Self::Output, ForecastError>;
}

/// Product forecast over the configured product lookback.
#[derive(Clone)]
pub struct ProductForecastJob {
    product_id: ProductId,
    sales: Arc<dyn SalesSource>,
    stock: Arc<dyn StockSource>,
    config: Arc<ForecastConfig>,
    request: ForecastRequest,
    now: DateTime<Utc>,
}

impl ProductForecastJob {
    pub fn new(
        product_id: ProductId,
        sales: Arc<dyn SalesSource>,
        stock: Arc<dyn StockSource>,
        config: Arc<ForecastConfig>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            product_id,
            sales,
            stock,
            config,
            request: ForecastRequest::default(),
            now,
        }
    }

    pub fn with_request(mut self, request: ForecastRequest) -> Self {
        self.request = request;
        self
    }

    /// Summary only, without running any predictor.
    pub fn summarize(&self) -> Result<ProductSummary, ForecastError> {
        let (summary, _) = self.load()?;
        Ok(summary)
    }

    fn load(&self) -> Result<(ProductSummary, DailySeries), ForecastError> {
        self.config.validate()?;
        let entity = self.entity();
        let window = LookbackWindow::last_months(self.now, self.config.product_lookback_months);
        let events = self.sales.sale_events(&entity, &window)?;
        let series = daily_aggregator(&self.config).aggregate_for(&entity, &events, &window);
        let current_stock = self.stock.current_stock(self.product_id)?;
        Ok((ProductSummary::from_series(self.product_id, current_stock, &series), series))
    }
}

impl ForecastJob for ProductForecastJob {
    type Output = ProductForecastReport;

    fn entity(&self) -> EntityRef {
        EntityRef::Product(self.product_id)
    }

    fn run(&self) -> Result<ProductForecastReport, ForecastError> {
        let (summary, series) = self.load()?;
        Ok(ReportBuilder::new(&self.config)
            .with_today(self.now.date_naive())
            .product(summary, &series, &self.request))
    }
}

/// Category forecast over the configured category lookback.
#[derive(Clone)]
pub struct CategoryForecastJob {
    category: CategoryId,
    sales: Arc<dyn SalesSource>,
    config: Arc<ForecastConfig>,
    request: ForecastRequest,
    now: DateTime<Utc>,
}

impl CategoryForecastJob {
    pub fn new(
        category: CategoryId,
        sales: Arc<dyn SalesSource>,
        config: Arc<ForecastConfig>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            category,
            sales,
            config,
            request: ForecastRequest::default(),
            now,
        }
    }

    pub fn with_request(mut self, request: ForecastRequest) -> Self {
        self.request = request;
        self
    }

    pub fn summarize(&self) -> Result<CategorySummary, ForecastError> {
        let (summary, _) = self.load()?;
        Ok(summary)
    }

    fn load(&self) -> Result<(CategorySummary, DailySeries), ForecastError> {
        self.config.validate()?;
        let entity = self.entity();
        let window = LookbackWindow::last_months(self.now, self.config.category_lookback_months);
        let events = self.sales.sale_events(&entity, &window)?;
        let series = daily_aggregator(&self.config).aggregate_for(&entity, &events, &window);
        Ok((CategorySummary::from_series(self.category.clone(), &series), series))
    }
}

impl ForecastJob for CategoryForecastJob {
    type Output = CategoryForecastReport;

    fn entity(&self) -> EntityRef {
        EntityRef::Category(self.category.clone())
    }

    fn run(&self) -> Result<CategoryForecastReport, ForecastError> {
        let (summary, series) = self.load()?;
        Ok(ReportBuilder::new(&self.config).category(summary, &series, &self.request))
    }
}

fn daily_aggregator(config: &ForecastConfig) -> Aggregator {
    Aggregator::new(BucketMode::Day).with_realized_statuses(config.realized_statuses.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use stockcast_sales::{RealizedStatuses, SaleStatus};

    use crate::in_memory::{InMemorySalesSource, InMemoryStockSource};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 12, 31, 12, 0, 0).unwrap()
    }

    fn event(product_id: ProductId, days_ago: i64, status: SaleStatus) -> SaleEvent {
        SaleEvent {
            product_id,
            category: CategoryId::new("Garden").unwrap(),
            status,
            occurred_at: now() - Duration::days(days_ago),
            quantity: 4,
            revenue: 20.0,
        }
    }

    fn sources(product_id: ProductId) -> (Arc<InMemorySalesSource>, Arc<InMemoryStockSource>) {
        let sales = Arc::new(InMemorySalesSource::new(vec![
            event(product_id, 1, SaleStatus::Delivered),
            event(product_id, 2, SaleStatus::Pending),
            // Outside the product lookback, inside the category one.
            event(product_id, 120, SaleStatus::Delivered),
        ]));
        let stock = Arc::new(InMemoryStockSource::new());
        stock.set(product_id, 40).unwrap();
        (sales, stock)
    }

    #[test]
    fn product_job_uses_product_lookback_and_realized_statuses() {
        let id = ProductId::new();
        let (sales, stock) = sources(id);
        let job = ProductForecastJob::new(id, sales, stock, Arc::new(ForecastConfig::default()), now());

        let summary = job.summarize().unwrap();
        assert_eq!(summary.total_sales, 4.0);
        assert_eq!(summary.current_stock, 40);
        assert_eq!(job.entity(), EntityRef::Product(id));
    }

    #[test]
    fn configured_statuses_widen_the_series() {
        let id = ProductId::new();
        let (sales, stock) = sources(id);
        let config = ForecastConfig {
            realized_statuses: RealizedStatuses::new([SaleStatus::Delivered, SaleStatus::Pending]),
            ..ForecastConfig::default()
        };
        let job = ProductForecastJob::new(id, sales, stock, Arc::new(config), now());

        assert_eq!(job.summarize().unwrap().total_sales, 8.0);
    }

    #[test]
    fn category_job_uses_category_lookback() {
        let id = ProductId::new();
        let (sales, _) = sources(id);
        let category = CategoryId::new("Garden").unwrap();
        let job = CategoryForecastJob::new(category, sales, Arc::new(ForecastConfig::default()), now());

        let summary = job.summarize().unwrap();
        assert_eq!(summary.total_sales, 8.0);
        assert_eq!(summary.total_revenue, 40.0);
    }

    #[test]
    fn source_errors_propagate() {
        let id = ProductId::new();
        let (sales, _) = sources(id);
        let empty_stock = Arc::new(InMemoryStockSource::new());
        let job = ProductForecastJob::new(id, sales, empty_stock, Arc::new(ForecastConfig::default()), now());

        assert!(matches!(job.run(), Err(ForecastError::Source(_))));
    }

    #[test]
    fn invalid_config_is_rejected_before_loading() {
        let id = ProductId::new();
        let (sales, stock) = sources(id);
        let mut config = ForecastConfig::default();
        config.model.window = 0;
        let job = ProductForecastJob::new(id, sales, stock, Arc::new(config), now());

        assert!(matches!(job.run(), Err(ForecastError::Domain(_))));
    }
}
