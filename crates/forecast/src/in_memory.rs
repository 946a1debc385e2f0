//! In-memory collaborators for tests and local tooling.

use std::collections::HashMap;
use std::sync::RwLock;

use stockcast_core::{EntityRef, ProductId};
use stockcast_sales::{LookbackWindow, SaleEvent};

use crate::job::{SalesSource, StockSource};
use crate::result::ForecastError;

#[derive(Debug, Default)]
pub struct InMemorySalesSource {
    events: RwLock<Vec<SaleEvent>>,
}

impl InMemorySalesSource {
    pub fn new(events: Vec<SaleEvent>) -> Self {
        Self {
            events: RwLock::new(events),
        }
    }

    pub fn record(&self, event: SaleEvent) -> Result<(), ForecastError> {
        self.events
            .write()
            .map_err(|_| ForecastError::source_failed("sales store lock poisoned"))?
            .push(event);
        Ok(())
    }
}

impl SalesSource for InMemorySalesSource {
    fn sale_events(
        &self,
        entity: &EntityRef,
        window: &LookbackWindow,
    ) -> Result<Vec<SaleEvent>, ForecastError> {
        let events = self
            .events
            .read()
            .map_err(|_| ForecastError::source_failed("sales store lock poisoned"))?;
        Ok(events
            .iter()
            .filter(|e| e.belongs_to(entity) && window.contains(e.occurred_at))
            .cloned()
            .collect())
    }
}

/// Stock levels keyed by product; unknown products are an error.
#[derive(Debug, Default)]
pub struct InMemoryStockSource {
    levels: RwLock<HashMap<ProductId, i64>>,
}

impl InMemoryStockSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, product_id: ProductId, stock: i64) -> Result<(), ForecastError> {
        self.levels
            .write()
            .map_err(|_| ForecastError::source_failed("stock store lock poisoned"))?
            .insert(product_id, stock);
        Ok(())
    }
}

impl StockSource for InMemoryStockSource {
    fn current_stock(&self, product_id: ProductId) -> Result<i64, ForecastError> {
        let levels = self
            .levels
            .read()
            .map_err(|_| ForecastError::source_failed("stock store lock poisoned"))?;
        levels
            .get(&product_id)
            .copied()
            .ok_or_else(|| ForecastError::source_failed(format!("no stock level for product {product_id}")))
    }
}
