//! Inventory roll-up across products and categories.

use serde::{Deserialize, Serialize};

use stockcast_core::{CategoryId, ProductId};

use crate::report::round_to;
use crate::summary::{CategorySummary, ProductSummary};

/// Products with at most this many days of stock are critical.
pub const CRITICAL_DAYS_OF_STOCK: f64 = 7.0;
/// Products with at most this many days of stock (and more than the
/// critical bound) are counted as warnings.
pub const WARNING_DAYS_OF_STOCK: f64 = 14.0;
pub const TOP_CATEGORIES: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriticalProduct {
    pub product_id: ProductId,
    pub current_stock: i64,
    pub days_of_stock: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryHighlight {
    pub category: CategoryId,
    pub total_sales: f64,
    pub total_revenue: f64,
    pub trend: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub total_products: usize,
    pub critical_alerts: usize,
    pub warning_alerts: usize,
    pub total_categories: usize,
    /// Mean category trend slope, two decimals.
    pub sales_growth: f64,
    /// Mean product daily sales, one decimal.
    pub avg_daily_sales: f64,
    pub top_categories: Vec<CategoryHighlight>,
    pub critical_products: Vec<CriticalProduct>,
}

/// Tallies stock cover and category performance.
///
/// Alert counts here use plain days-of-stock cover rather than a forecast,
/// so the dashboard stays cheap to compute for the whole catalogue.
pub fn build_dashboard(products: &[ProductSummary], categories: &[CategorySummary]) -> Dashboard {
    let critical_products: Vec<CriticalProduct> = products
        .iter()
        .filter(|p| p.days_of_stock <= CRITICAL_DAYS_OF_STOCK)
        .map(|p| CriticalProduct {
            product_id: p.product_id,
            current_stock: p.current_stock,
            days_of_stock: p.days_of_stock.round().max(0.0) as u64,
        })
        .collect();

    let warning_alerts = products
        .iter()
        .filter(|p| p.days_of_stock > CRITICAL_DAYS_OF_STOCK && p.days_of_stock <= WARNING_DAYS_OF_STOCK)
        .count();

    let avg_daily_sales =
        products.iter().map(|p| p.avg_daily_sales).sum::<f64>() / products.len().max(1) as f64;
    let sales_growth = categories.iter().map(|c| c.trend).sum::<f64>() / categories.len().max(1) as f64;

    let mut ranked: Vec<&CategorySummary> = categories.iter().collect();
    ranked.sort_by(|a, b| b.total_sales.total_cmp(&a.total_sales));
    let top_categories = ranked
        .into_iter()
        .take(TOP_CATEGORIES)
        .map(|c| CategoryHighlight {
            category: c.category.clone(),
            total_sales: c.total_sales,
            total_revenue: c.total_revenue,
            trend: round_to(c.trend, 2),
        })
        .collect();

    Dashboard {
        total_products: products.len(),
        critical_alerts: critical_products.len(),
        warning_alerts,
        total_categories: categories.len(),
        sales_growth: round_to(sales_growth, 2),
        avg_daily_sales: round_to(avg_daily_sales, 1),
        top_categories,
        critical_products,
    }
}
