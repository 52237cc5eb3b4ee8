use async_trait::async_trait;

use crate::errors::ServiceError;
use super::domain::{CreateWarehouseInput, WarehouseRecord, Withdrawal};

/// Trait abstraction for the warehouse collection.
/// Implementations own the id counter; ids start at 1 and are never reused.
#[async_trait]
pub trait WarehouseRepository: Send + Sync {
    /// All records in ascending id order.
    async fn list(&self) -> Vec<WarehouseRecord>;
    async fn get(&self, id: u64) -> Result<WarehouseRecord, ServiceError>;
    async fn create(&self, input: CreateWarehouseInput) -> Result<WarehouseRecord, ServiceError>;
    async fn rename(&self, id: u64, name: &str) -> Result<WarehouseRecord, ServiceError>;
    /// `amount` must be positive; the warehouse clamps anything that does not fit.
    async fn deposit(&self, id: u64, amount: f64) -> Result<WarehouseRecord, ServiceError>;
    /// `amount` must be positive; reports how much was actually taken.
    async fn withdraw(&self, id: u64, amount: f64) -> Result<Withdrawal, ServiceError>;
    /// Returns the removed record.
    async fn delete(&self, id: u64) -> Result<WarehouseRecord, ServiceError>;
}
