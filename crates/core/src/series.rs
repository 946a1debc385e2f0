//! Daily (or weekly/monthly) demand series.
//!
//! A series is an ordered list of bucket totals. Days without sales are
//! simply absent: nothing is zero-filled, and downstream statistics index the
//! points by position rather than by elapsed calendar time.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::value_object::ValueObject;

/// One bucket of a series: the bucket start date and the summed demand.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub day: NaiveDate,
    pub quantity: f64,
    pub revenue: f64,
}

impl SeriesPoint {
    pub fn new(day: NaiveDate, quantity: f64, revenue: f64) -> Self {
        Self { day, quantity, revenue }
    }

    /// Weekday index with Sunday = 0 .. Saturday = 6.
    pub fn weekday_index(&self) -> usize {
        self.day.weekday().num_days_from_sunday() as usize
    }
}

impl ValueObject for SeriesPoint {}

/// Series sorted strictly ascending by `day`, one point per day.
///
/// The invariant holds by construction: [`DailySeries::from_points`] sorts its
/// input and sums points that share a day, so re-building a series from its
/// own points yields the same series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<SeriesPoint>", into = "Vec<SeriesPoint>")]
pub struct DailySeries {
    points: Vec<SeriesPoint>,
}

impl DailySeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_points(points: impl IntoIterator<Item = SeriesPoint>) -> Self {
        let mut buckets: BTreeMap<NaiveDate, (f64, f64)> = BTreeMap::new();
        for p in points {
            let slot = buckets.entry(p.day).or_insert((0.0, 0.0));
            slot.0 += p.quantity;
            slot.1 += p.revenue;
        }
        let points = buckets
            .into_iter()
            .map(|(day, (quantity, revenue))| SeriesPoint { day, quantity, revenue })
            .collect();
        Self { points }
    }

    /// Convenience for tests and fixtures: consecutive days starting at
    /// `start`, revenue left at zero.
    pub fn from_quantities(start: NaiveDate, quantities: &[f64]) -> Self {
        let points = quantities.iter().zip(start.iter_days()).map(|(&q, day)| SeriesPoint {
            day,
            quantity: q,
            revenue: 0.0,
        });
        Self::from_points(points)
    }

    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The last `n` points (all of them if the series is shorter).
    pub fn tail(&self, n: usize) -> &[SeriesPoint] {
        let start = self.points.len().saturating_sub(n);
        &self.points[start..]
    }

    pub fn quantities(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.quantity).collect()
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.day)
    }

    pub fn last_day(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.day)
    }

    pub fn total_quantity(&self) -> f64 {
        self.points.iter().map(|p| p.quantity).sum()
    }

    pub fn total_revenue(&self) -> f64 {
        self.points.iter().map(|p| p.revenue).sum()
    }
}

impl ValueObject for DailySeries {}

impl From<Vec<SeriesPoint>> for DailySeries {
    fn from(points: Vec<SeriesPoint>) -> Self {
        Self::from_points(points)
    }
}

impl From<DailySeries> for Vec<SeriesPoint> {
    fn from(series: DailySeries) -> Self {
        series.points
    }
}

impl FromIterator<SeriesPoint> for DailySeries {
    fn from_iter<I: IntoIterator<Item = SeriesPoint>>(iter: I) -> Self {
        Self::from_points(iter)
    }
}

impl AsRef<[SeriesPoint]> for DailySeries {
    fn as_ref(&self) -> &[SeriesPoint] {
        &self.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn same_day_points_are_summed() {
        let series = DailySeries::from_points(vec![
            SeriesPoint::new(day(1), 2.0, 10.0),
            SeriesPoint::new(day(1), 3.0, 15.0),
        ]);
        assert_eq!(series.points(), &[SeriesPoint::new(day(1), 5.0, 25.0)]);
    }

    #[test]
    fn out_of_order_points_are_sorted() {
        let series = DailySeries::from_points(vec![
            SeriesPoint::new(day(9), 1.0, 0.0),
            SeriesPoint::new(day(2), 4.0, 0.0),
            SeriesPoint::new(day(5), 2.0, 0.0),
        ]);
        let days: Vec<_> = series.points().iter().map(|p| p.day).collect();
        assert_eq!(days, vec![day(2), day(5), day(9)]);
    }

    #[test]
    fn gaps_are_not_zero_filled() {
        let series = DailySeries::from_points(vec![
            SeriesPoint::new(day(1), 1.0, 0.0),
            SeriesPoint::new(day(10), 1.0, 0.0),
        ]);
        assert_eq!(series.len(), 2);
    }

    #[test]
    fn tail_clamps_to_length() {
        let series = DailySeries::from_quantities(day(1), &[1.0, 2.0, 3.0]);
        assert_eq!(series.tail(2).len(), 2);
        assert_eq!(series.tail(10).len(), 3);
        assert_eq!(series.tail(2)[0].quantity, 2.0);
    }

    #[test]
    fn weekday_index_starts_on_sunday() {
        // 2024-03-03 was a Sunday.
        assert_eq!(SeriesPoint::new(day(3), 0.0, 0.0).weekday_index(), 0);
        assert_eq!(SeriesPoint::new(day(9), 0.0, 0.0).weekday_index(), 6);
    }

    #[test]
    fn deserialization_restores_invariant() {
        let json = r#"[
            {"day":"2024-03-02","quantity":1.0,"revenue":0.0},
            {"day":"2024-03-01","quantity":2.0,"revenue":0.0},
            {"day":"2024-03-02","quantity":3.0,"revenue":0.0}
        ]"#;
        let series: DailySeries = serde_json::from_str(json).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.points()[1].quantity, 4.0);
    }

    proptest! {
        /// Property: rebuilding a series from its own points is a no-op.
        #[test]
        fn from_points_is_idempotent(raw in proptest::collection::vec((1u32..=28, 0u32..50), 0..60)) {
            let points: Vec<_> = raw
                .iter()
                .map(|&(d, q)| SeriesPoint::new(day(d), q as f64, q as f64 * 2.0))
                .collect();
            let once = DailySeries::from_points(points);
            let twice = DailySeries::from_points(once.points().to_vec());
            prop_assert_eq!(&once, &twice);
            prop_assert!(once.points().windows(2).all(|w| w[0].day < w[1].day));
        }
    }
}
