use models::{warehouse, Warehouse};

use crate::errors::ServiceError;

pub const INVALID_CREATE_NUMBERS: &str =
    "Invalid capacity or initial balance. Please enter valid numbers";
pub const INVALID_AMOUNT: &str = "Invalid amount. Please enter a valid number";

/// A named warehouse held in the collection.
#[derive(Clone, Debug, PartialEq)]
pub struct WarehouseRecord {
    pub id: u64,
    pub name: String,
    pub warehouse: Warehouse,
}

/// Creation input; `capacity` and `initial_balance` already parsed.
#[derive(Clone, Debug, PartialEq)]
pub struct CreateWarehouseInput {
    pub name: String,
    pub capacity: f64,
    pub initial_balance: f64,
}

impl CreateWarehouseInput {
    /// Name is checked before capacity, matching the order messages are shown in.
    /// Returns the trimmed name.
    pub fn validate(&self) -> Result<String, ServiceError> {
        let name = warehouse::validate_name(&self.name)?;
        warehouse::validate_capacity(self.capacity)?;
        Ok(name)
    }
}

/// Result of taking stock out of a warehouse.
#[derive(Clone, Debug, PartialEq)]
pub struct Withdrawal {
    pub record: WarehouseRecord,
    pub taken: f64,
}

/// Parse a numeric form field.
///
/// A missing field counts as `0`. Present values are trimmed; anything that
/// is not a finite number yields `ServiceError::Validation(invalid)`.
pub fn parse_quantity(raw: Option<&str>, invalid: &str) -> Result<f64, ServiceError> {
    let Some(raw) = raw else { return Ok(0.0) };
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ServiceError::Validation(invalid.to_string())),
    }
}
