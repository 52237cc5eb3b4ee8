//! Warehouse collection: domain records, the repository seam, and the
//! in-memory implementation used by the server.

pub mod domain;
pub mod memory;
pub mod repository;

pub use domain::{CreateWarehouseInput, WarehouseRecord, Withdrawal};
pub use memory::InMemoryWarehouseStore;
pub use repository::WarehouseRepository;
