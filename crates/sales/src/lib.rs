//! Sales history module.
//!
//! Turns realized sale events into bucketed demand series. Everything here is
//! deterministic: no IO, no clock reads (callers pass "now" explicitly).

pub mod aggregate;
pub mod event;
pub mod window;

pub use aggregate::{Aggregator, SeriesSummary, aggregate, smoothed};
pub use event::{RealizedStatuses, SaleEvent, SaleStatus};
pub use window::{BucketMode, LookbackWindow};
