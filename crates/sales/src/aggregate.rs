//! Bucketing of sale events into demand series.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use stockcast_core::{DailySeries, EntityRef, SeriesPoint};

use crate::event::{RealizedStatuses, SaleEvent};
use crate::window::{BucketMode, LookbackWindow};

/// Sums realized sale events into one series point per bucket.
///
/// Model:
/// - Drop events outside the lookback window or with a non-realized status.
/// - Truncate each timestamp to its bucket start (UTC).
/// - Sum quantity and revenue per bucket; emit ascending by bucket start.
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    bucket: BucketMode,
    realized: RealizedStatuses,
}

impl Aggregator {
    pub fn new(bucket: BucketMode) -> Self {
        Self {
            bucket,
            realized: RealizedStatuses::default(),
        }
    }

    pub fn with_realized_statuses(mut self, realized: RealizedStatuses) -> Self {
        self.realized = realized;
        self
    }

    pub fn bucket(&self) -> BucketMode {
        self.bucket
    }

    pub fn realized_statuses(&self) -> &RealizedStatuses {
        &self.realized
    }

    pub fn aggregate<'a>(
        &self,
        events: impl IntoIterator<Item = &'a SaleEvent>,
        window: &LookbackWindow,
    ) -> DailySeries {
        self.accumulate(events, window, |_| true)
    }

    /// Like [`Aggregator::aggregate`], keeping only events of `entity`.
    pub fn aggregate_for<'a>(
        &self,
        entity: &EntityRef,
        events: impl IntoIterator<Item = &'a SaleEvent>,
        window: &LookbackWindow,
    ) -> DailySeries {
        self.accumulate(events, window, |e| e.belongs_to(entity))
    }

    fn accumulate<'a>(
        &self,
        events: impl IntoIterator<Item = &'a SaleEvent>,
        window: &LookbackWindow,
        keep: impl Fn(&SaleEvent) -> bool,
    ) -> DailySeries {
        let mut buckets: BTreeMap<NaiveDate, (f64, f64)> = BTreeMap::new();
        let mut seen = 0usize;
        let mut kept = 0usize;

        for event in events {
            seen += 1;
            if !self.realized.contains(event.status) || !window.contains(event.occurred_at) || !keep(event) {
                continue;
            }
            kept += 1;
            let slot = buckets
                .entry(self.bucket.bucket_start(event.occurred_at))
                .or_insert((0.0, 0.0));
            slot.0 += f64::from(event.quantity);
            slot.1 += event.revenue;
        }

        debug!(bucket = ?self.bucket, seen, kept, buckets = buckets.len(), "aggregated sale events");

        buckets
            .into_iter()
            .map(|(day, (quantity, revenue))| SeriesPoint { day, quantity, revenue })
            .collect()
    }
}

/// Aggregates with the default realized-status set.
pub fn aggregate(events: &[SaleEvent], bucket: BucketMode, window: &LookbackWindow) -> DailySeries {
    Aggregator::new(bucket).aggregate(events, window)
}

/// Trailing moving average of a series.
///
/// Each output point averages the `window` points ending at it and keeps that
/// point's date, so the result is `window - 1` points shorter. Series shorter
/// than the window are returned unchanged.
pub fn smoothed(series: &DailySeries, window: usize) -> DailySeries {
    let window = window.max(1);
    let points = series.points();
    if points.len() < window {
        return series.clone();
    }

    let n = window as f64;
    points
        .windows(window)
        .map(|w| {
            let quantity = w.iter().map(|p| p.quantity).sum::<f64>() / n;
            let revenue = w.iter().map(|p| p.revenue).sum::<f64>() / n;
            SeriesPoint::new(w[window - 1].day, quantity, revenue)
        })
        .collect()
}

/// Totals over a series.
///
/// `avg_quantity` divides by the number of observed buckets (not calendar
/// days): quiet days are absent from the series and do not dilute the
/// average.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesSummary {
    pub total_quantity: f64,
    pub total_revenue: f64,
    pub buckets: usize,
    pub avg_quantity: f64,
}

impl SeriesSummary {
    pub fn of(series: &DailySeries) -> Self {
        let total_quantity = series.total_quantity();
        let buckets = series.len();
        Self {
            total_quantity,
            total_revenue: series.total_revenue(),
            buckets,
            avg_quantity: total_quantity / buckets.max(1) as f64,
        }
    }
}
