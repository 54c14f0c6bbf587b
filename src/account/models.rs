use serde::{Deserialize, Serialize};

/// Account model
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Account {
    pub account_number: String,
    pub holder_name: String,
    pub balance: f64,
}

impl Account {
    pub fn new(account_number: String, holder_name: String, balance: f64) -> Self {
        Self {
            account_number,
            holder_name,
            balance,
        }
    }

    /// Amount that can leave the account without breaching the reserve floor.
    /// Negative when the balance is already below the floor.
    pub fn available(&self, reserve_floor: f64) -> f64 {
        self.balance - reserve_floor
    }
}
