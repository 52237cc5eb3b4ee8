//! Domain models for the warehouse service.
//!
//! Holds the capacity-bounded [`warehouse::Warehouse`] and the field-level
//! validation helpers shared by the service layer.

pub mod errors;
pub mod warehouse;

pub use warehouse::Warehouse;
