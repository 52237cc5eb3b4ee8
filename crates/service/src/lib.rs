//! Service layer for the warehouse collection.
//! - Owns the id -> warehouse mapping behind a repository trait.
//! - Validates user input before any mutation, reusing helpers from `models`.
//! - Reports failures through [`errors::ServiceError`].

pub mod errors;
pub mod warehouses;
