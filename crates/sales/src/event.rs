use std::collections::BTreeSet;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockcast_core::{CategoryId, DomainError, EntityRef, ProductId, ValueObject};

/// Order status lifecycle, as reported by the order system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaleStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
    Returned,
}

impl SaleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SaleStatus::Pending => "pending",
            SaleStatus::Processing => "processing",
            SaleStatus::Shipped => "shipped",
            SaleStatus::Delivered => "delivered",
            SaleStatus::Cancelled => "cancelled",
            SaleStatus::Returned => "returned",
        }
    }
}

impl FromStr for SaleStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(SaleStatus::Pending),
            "processing" => Ok(SaleStatus::Processing),
            "shipped" => Ok(SaleStatus::Shipped),
            "delivered" => Ok(SaleStatus::Delivered),
            "cancelled" | "canceled" => Ok(SaleStatus::Cancelled),
            "returned" => Ok(SaleStatus::Returned),
            other => Err(DomainError::validation(format!("unknown sale status: {other}"))),
        }
    }
}

/// One sold order line.
///
/// Produced by the external order system; `revenue` is the line total
/// (unit price × quantity). Validation of negative or malformed values is the
/// caller's job, this crate trusts what it is given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleEvent {
    pub product_id: ProductId,
    pub category: CategoryId,
    pub status: SaleStatus,
    pub occurred_at: DateTime<Utc>,
    pub quantity: u32,
    pub revenue: f64,
}

impl SaleEvent {
    pub fn belongs_to(&self, entity: &EntityRef) -> bool {
        match entity {
            EntityRef::Product(id) => self.product_id == *id,
            EntityRef::Category(c) => self.category == *c,
        }
    }
}

impl ValueObject for SaleEvent {}

/// Statuses that count as a realized sale.
///
/// Defaults to delivered, shipped and processing orders. Pending, cancelled
/// and returned orders never consumed stock and are left out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RealizedStatuses(BTreeSet<SaleStatus>);

impl RealizedStatuses {
    pub fn new(statuses: impl IntoIterator<Item = SaleStatus>) -> Self {
        Self(statuses.into_iter().collect())
    }

    pub fn contains(&self, status: SaleStatus) -> bool {
        self.0.contains(&status)
    }

    pub fn iter(&self) -> impl Iterator<Item = SaleStatus> + '_ {
        self.0.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for RealizedStatuses {
    fn default() -> Self {
        Self::new([SaleStatus::Delivered, SaleStatus::Shipped, SaleStatus::Processing])
    }
}

/// Parses a comma-separated list, e.g. `"delivered,shipped"`.
impl FromStr for RealizedStatuses {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let statuses = s
            .split(',')
            .filter(|part| !part.trim().is_empty())
            .map(SaleStatus::from_str)
            .collect::<Result<BTreeSet<_>, _>>()?;
        if statuses.is_empty() {
            return Err(DomainError::validation("realized status list cannot be empty"));
        }
        Ok(Self(statuses))
    }
}
