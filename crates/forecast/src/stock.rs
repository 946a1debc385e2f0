use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Days of demand covered by a restock recommendation.
pub const RESTOCK_COVER_DAYS: usize = 7;

/// Projected stock-out against a forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockProjection {
    /// 1-based day on which stock runs out; `None` if it lasts the horizon.
    pub days_until_stockout: Option<u32>,
    /// Units covering a week of demand (from the stock-out day, or from
    /// tomorrow when stock lasts).
    pub recommended_restock: u64,
}

impl StockProjection {
    /// Calendar date of the stock-out, counting from `today`.
    pub fn stockout_date(&self, today: NaiveDate) -> Option<NaiveDate> {
        self.days_until_stockout
            .and_then(|d| today.checked_add_days(Days::new(u64::from(d))))
    }

    pub fn runs_out_within(&self, days: u32) -> bool {
        self.days_until_stockout.is_some_and(|d| d <= days)
    }
}

/// Walks the forecast day by day, subtracting demand from `current_stock`.
///
/// The first day `i` (0-based) on which the running stock reaches zero or
/// below gives `days_until_stockout = i + 1`, and the restock covers the
/// `RESTOCK_COVER_DAYS` forecast days starting at `i` (fewer if the forecast
/// ends sooner). If stock never runs out, the restock covers the first week.
pub fn project_stock_out(current_stock: i64, forecast: &[f64]) -> StockProjection {
    let mut running = current_stock as f64;

    for (i, demand) in forecast.iter().enumerate() {
        running -= demand;
        if running <= 0.0 {
            return StockProjection {
                days_until_stockout: Some(i as u32 + 1),
                recommended_restock: restock_from(forecast, i),
            };
        }
    }

    StockProjection {
        days_until_stockout: None,
        recommended_restock: restock_from(forecast, 0),
    }
}

fn restock_from(forecast: &[f64], start: usize) -> u64 {
    let end = (start + RESTOCK_COVER_DAYS).min(forecast.len());
    let demand: f64 = forecast[start..end].iter().sum();
    demand.max(0.0).ceil() as u64
}
