//! Per-entity sales summaries.

use serde::{Deserialize, Serialize};

use stockcast_core::{CategoryId, DailySeries, ProductId};
use stockcast_sales::SeriesSummary;

use crate::alert::StockPosition;
use crate::trend::trend_slope;

/// Stock and recent sales velocity of one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub product_id: ProductId,
    pub current_stock: i64,
    pub total_sales: f64,
    /// Total over the number of days with sales.
    pub avg_daily_sales: f64,
    pub days_of_stock: f64,
}

impl ProductSummary {
    pub fn from_series(product_id: ProductId, current_stock: i64, series: &DailySeries) -> Self {
        let totals = SeriesSummary::of(series);
        let position = StockPosition {
            current_stock,
            avg_daily_sales: totals.avg_quantity,
        };
        Self {
            product_id,
            current_stock,
            total_sales: totals.total_quantity,
            avg_daily_sales: totals.avg_quantity,
            days_of_stock: position.days_of_stock(),
        }
    }

    pub fn position(&self) -> StockPosition {
        StockPosition {
            current_stock: self.current_stock,
            avg_daily_sales: self.avg_daily_sales,
        }
    }
}

/// Sales totals and trend of one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: CategoryId,
    pub total_sales: f64,
    pub total_revenue: f64,
    pub avg_daily_sales: f64,
    pub trend: f64,
}

impl CategorySummary {
    pub fn from_series(category: CategoryId, series: &DailySeries) -> Self {
        let totals = SeriesSummary::of(series);
        Self {
            category,
            total_sales: totals.total_quantity,
            total_revenue: totals.total_revenue,
            avg_daily_sales: totals.avg_quantity,
            trend: trend_slope(series.points()),
        }
    }
}
