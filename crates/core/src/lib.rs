//! `stockcast-core`: foundation building blocks for demand forecasting.
//!
//! This crate contains **pure** primitives (no IO, no clocks, no logging):
//! identifiers, the error model, and the daily time-series type every other
//! crate computes on.

pub mod error;
pub mod id;
pub mod series;
pub mod value_object;

pub use error::{DomainError, DomainResult};
pub use id::{CategoryId, EntityRef, ProductId};
pub use series::{DailySeries, SeriesPoint};
pub use value_object::ValueObject;
