use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::metrics;
use models::{warehouse, Warehouse};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::errors::ServiceError;
use super::domain::{CreateWarehouseInput, WarehouseRecord, Withdrawal};
use super::repository::WarehouseRepository;

const ENTITY: &str = "Warehouse";

struct Inner {
    next_id: u64,
    items: BTreeMap<u64, WarehouseRecord>,
}

/// In-memory warehouse collection.
///
/// A single mutex covers the whole map and the id counter, so every
/// operation is one atomic read-modify-write.
pub struct InMemoryWarehouseStore {
    inner: Mutex<Inner>,
}

impl InMemoryWarehouseStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: Mutex::new(Inner { next_id: 1, items: BTreeMap::new() }),
        })
    }
}

#[async_trait]
impl WarehouseRepository for InMemoryWarehouseStore {
    async fn list(&self) -> Vec<WarehouseRecord> {
        let inner = self.inner.lock().await;
        inner.items.values().cloned().collect()
    }

    async fn get(&self, id: u64) -> Result<WarehouseRecord, ServiceError> {
        let inner = self.inner.lock().await;
        inner.items.get(&id).cloned().ok_or_else(|| ServiceError::not_found(ENTITY))
    }

    async fn create(&self, input: CreateWarehouseInput) -> Result<WarehouseRecord, ServiceError> {
        let name = input.validate()?;
        let mut inner = self.inner.lock().await;
        let id = inner.next_id;
        inner.next_id += 1;
        let rec = WarehouseRecord {
            id,
            name,
            warehouse: Warehouse::new(input.capacity, input.initial_balance),
        };
        inner.items.insert(id, rec.clone());
        drop(inner);

        metrics::WAREHOUSES_CREATED_TOTAL.inc();
        info!(event = "warehouse_created", id, name = %rec.name, state = %rec.warehouse, "warehouse created");
        Ok(rec)
    }

    async fn rename(&self, id: u64, name: &str) -> Result<WarehouseRecord, ServiceError> {
        let mut inner = self.inner.lock().await;
        let rec = inner.items.get_mut(&id).ok_or_else(|| ServiceError::not_found(ENTITY))?;
        rec.name = warehouse::validate_name(name)?;
        debug!(event = "warehouse_renamed", id, name = %rec.name);
        Ok(rec.clone())
    }

    async fn deposit(&self, id: u64, amount: f64) -> Result<WarehouseRecord, ServiceError> {
        let mut inner = self.inner.lock().await;
        let rec = inner.items.get_mut(&id).ok_or_else(|| ServiceError::not_found(ENTITY))?;
        let amount = warehouse::validate_amount(amount)?;
        rec.warehouse.deposit(amount);
        metrics::DEPOSITS_TOTAL.inc();
        debug!(event = "warehouse_deposit", id, amount, state = %rec.warehouse);
        Ok(rec.clone())
    }

    async fn withdraw(&self, id: u64, amount: f64) -> Result<Withdrawal, ServiceError> {
        let mut inner = self.inner.lock().await;
        let rec = inner.items.get_mut(&id).ok_or_else(|| ServiceError::not_found(ENTITY))?;
        let amount = warehouse::validate_amount(amount)?;
        let taken = rec.warehouse.withdraw(amount);
        metrics::WITHDRAWALS_TOTAL.inc();
        debug!(event = "warehouse_withdraw", id, requested = amount, taken, state = %rec.warehouse);
        Ok(Withdrawal { record: rec.clone(), taken })
    }

    async fn delete(&self, id: u64) -> Result<WarehouseRecord, ServiceError> {
        let mut inner = self.inner.lock().await;
        let rec = inner.items.remove(&id).ok_or_else(|| ServiceError::not_found(ENTITY))?;
        drop(inner);

        metrics::WAREHOUSES_DELETED_TOTAL.inc();
        info!(event = "warehouse_deleted", id, name = %rec.name, "warehouse deleted");
        Ok(rec)
    }
}
