use std::fmt;

use crate::errors::ModelError;

/// Capacity-bounded quantity store.
///
/// `capacity` is fixed at construction and never negative; `balance` always
/// stays within `[0, capacity]`. Out-of-range input is clamped silently
/// instead of being reported as an error.
#[derive(Clone, Debug, PartialEq)]
pub struct Warehouse {
    capacity: f64,
    balance: f64,
}

impl Warehouse {
    /// Create a warehouse with the given capacity and starting balance.
    /// - `capacity <= 0` becomes `0`
    /// - negative `initial_balance` becomes `0`
    /// - `initial_balance > capacity` is cut down to `capacity`, the excess is lost
    pub fn new(capacity: f64, initial_balance: f64) -> Self {
        let capacity = if capacity > 0.0 { capacity } else { 0.0 };
        let balance = if initial_balance < 0.0 {
            0.0
        } else if initial_balance <= capacity {
            initial_balance
        } else {
            capacity
        };
        Self { capacity, balance }
    }

    /// Empty warehouse.
    pub fn with_capacity(capacity: f64) -> Self {
        Self::new(capacity, 0.0)
    }

    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    /// Remaining room: `capacity - balance`.
    pub fn available(&self) -> f64 {
        self.capacity - self.balance
    }

    /// Add `amount`. Negative amounts are ignored; anything that does not fit
    /// fills the warehouse and the rest is discarded.
    pub fn deposit(&mut self, amount: f64) {
        if amount < 0.0 {
            return;
        }
        if amount <= self.available() {
            self.balance += amount;
        } else {
            self.balance = self.capacity;
        }
    }

    /// Remove up to `amount` and return what was actually taken.
    pub fn withdraw(&mut self, amount: f64) -> f64 {
        if amount < 0.0 {
            return 0.0;
        }
        if amount > self.balance {
            let everything = self.balance;
            self.balance = 0.0;
            return everything;
        }
        self.balance -= amount;
        amount
    }

    /// Fill level in percent, `0` for a zero-capacity warehouse.
    pub fn fill_percent(&self) -> f64 {
        if self.capacity > 0.0 {
            self.balance / self.capacity * 100.0
        } else {
            0.0
        }
    }
}

impl fmt::Display for Warehouse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "balance = {}, space = {}", self.balance, self.available())
    }
}

/// Trimmed, non-empty display name.
pub fn validate_name(name: &str) -> Result<String, ModelError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ModelError::Validation("Warehouse name is required".into()));
    }
    Ok(trimmed.to_string())
}

/// Capacity accepted from user input must be strictly positive.
pub fn validate_capacity(capacity: f64) -> Result<f64, ModelError> {
    if capacity <= 0.0 {
        return Err(ModelError::Validation("Capacity must be greater than 0".into()));
    }
    Ok(capacity)
}

/// Deposit/withdraw amounts accepted from user input must be strictly positive.
pub fn validate_amount(amount: f64) -> Result<f64, ModelError> {
    if amount <= 0.0 {
        return Err(ModelError::Validation("Amount must be greater than 0".into()));
    }
    Ok(amount)
}
