//! Stock risk classification.

use serde::{Deserialize, Serialize};

use crate::stock::StockProjection;

/// Risk tier, ordered by severity (`Good < Info < Warning < Critical`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertTier {
    Good,
    Info,
    Warning,
    Critical,
}

/// Current stock and recent sales velocity of one product.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StockPosition {
    pub current_stock: i64,
    pub avg_daily_sales: f64,
}

impl StockPosition {
    /// Days the current stock lasts at the average daily rate.
    ///
    /// The rate is floored at one unit per day, so slow or unsold products
    /// report their stock count rather than dividing by zero. Any rate below
    /// one is floored too, not just zero: 5 units at 0.5/day give 5 days.
    pub fn days_of_stock(&self) -> f64 {
        self.current_stock as f64 / self.avg_daily_sales.max(1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertAssessment {
    pub tier: AlertTier,
    /// Heuristic 50..=95; not a statistical confidence interval.
    pub confidence: u8,
}

/// Thresholds for tiering and the confidence heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlertPolicy {
    pub critical_within_days: u32,
    pub warning_within_days: u32,
    /// Stock below this many days of average sales is flagged `Info`.
    pub info_cover_days: f64,
    pub confidence_base: f64,
    pub confidence_volatility_penalty: f64,
    pub confidence_floor: u8,
    pub confidence_ceiling: u8,
}

impl Default for AlertPolicy {
    fn default() -> Self {
        Self {
            critical_within_days: 7,
            warning_within_days: 14,
            info_cover_days: 15.0,
            confidence_base: 80.0,
            confidence_volatility_penalty: 30.0,
            confidence_floor: 50,
            confidence_ceiling: 95,
        }
    }
}

impl AlertPolicy {
    /// First matching rule wins: critical, warning, info, good.
    pub fn tier(&self, projection: &StockProjection, position: &StockPosition) -> AlertTier {
        if projection.runs_out_within(self.critical_within_days) {
            return AlertTier::Critical;
        }
        if projection.runs_out_within(self.warning_within_days) {
            return AlertTier::Warning;
        }
        if (position.current_stock as f64) < self.info_cover_days * position.avg_daily_sales {
            return AlertTier::Info;
        }
        AlertTier::Good
    }

    /// `clamp(round(base - volatility * penalty), floor, ceiling)`.
    ///
    /// Swapped bounds are taken in order rather than rejected; a NaN score
    /// maps to the lower bound.
    pub fn confidence(&self, volatility: f64) -> u8 {
        let low = self.confidence_floor.min(self.confidence_ceiling);
        let high = self.confidence_floor.max(self.confidence_ceiling);
        let raw = (self.confidence_base - volatility * self.confidence_volatility_penalty).round();
        if raw.is_nan() {
            return low;
        }
        raw.clamp(f64::from(low), f64::from(high)) as u8
    }

    pub fn classify(
        &self,
        projection: &StockProjection,
        position: &StockPosition,
        volatility: f64,
    ) -> AlertAssessment {
        AlertAssessment {
            tier: self.tier(projection, position),
            confidence: self.confidence(volatility),
        }
    }
}

/// Classifies with the default policy.
pub fn classify_alert(
    projection: &StockProjection,
    position: &StockPosition,
    volatility: f64,
) -> AlertAssessment {
    AlertPolicy::default().classify(projection, position, volatility)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn projection(days: Option<u32>) -> StockProjection {
        StockProjection {
            days_until_stockout: days,
            recommended_restock: 0,
        }
    }

    fn position(stock: i64, avg: f64) -> StockPosition {
        StockPosition {
            current_stock: stock,
            avg_daily_sales: avg,
        }
    }

    #[test]
    fn near_stockout_is_critical_regardless_of_stock() {
        let a = classify_alert(&projection(Some(5)), &position(10_000, 0.0), 0.0);
        assert_eq!(a.tier, AlertTier::Critical);
        assert_eq!(classify_alert(&projection(Some(7)), &position(0, 0.0), 0.0).tier, AlertTier::Critical);
    }

    #[test]
    fn two_week_stockout_is_warning() {
        assert_eq!(classify_alert(&projection(Some(8)), &position(0, 0.0), 0.0).tier, AlertTier::Warning);
        assert_eq!(classify_alert(&projection(Some(14)), &position(0, 0.0), 0.0).tier, AlertTier::Warning);
    }

    #[test]
    fn low_cover_without_stockout_is_info() {
        assert_eq!(classify_alert(&projection(None), &position(200, 20.0), 0.0).tier, AlertTier::Info);
        // A distant stock-out does not escalate past the cover rule.
        assert_eq!(classify_alert(&projection(Some(30)), &position(200, 20.0), 0.0).tier, AlertTier::Info);
    }

    #[test]
    fn ample_cover_is_good() {
        assert_eq!(classify_alert(&projection(None), &position(400, 20.0), 0.0).tier, AlertTier::Good);
        assert_eq!(classify_alert(&projection(None), &position(300, 20.0), 0.0).tier, AlertTier::Good);
    }

    #[test]
    fn tiers_are_ordered_by_severity() {
        assert!(AlertTier::Critical > AlertTier::Warning);
        assert!(AlertTier::Warning > AlertTier::Info);
        assert!(AlertTier::Info > AlertTier::Good);
    }

    #[test]
    fn confidence_is_clamped_heuristic() {
        let policy = AlertPolicy::default();
        assert_eq!(policy.confidence(0.0), 80);
        assert_eq!(policy.confidence(0.5), 65);
        assert_eq!(policy.confidence(2.0), 50);
        assert_eq!(policy.confidence(-1.0), 95);
    }

    #[test]
    fn swapped_confidence_bounds_do_not_panic() {
        let policy = AlertPolicy {
            confidence_floor: 96,
            confidence_ceiling: 95,
            ..AlertPolicy::default()
        };
        assert_eq!(policy.confidence(0.0), 95);
        assert_eq!(policy.confidence(-1.0), 96);
        assert_eq!(policy.confidence(f64::NAN), 95);
    }

    #[test]
    fn days_of_stock_floors_rate_at_one() {
        assert_eq!(position(30, 0.0).days_of_stock(), 30.0);
        assert_eq!(position(30, 0.5).days_of_stock(), 30.0);
        assert_eq!(position(30, 3.0).days_of_stock(), 10.0);
        // Sub-unit rates are floored as well.
        assert_eq!(position(5, 0.5).days_of_stock(), 5.0);
    }
}
