use log::{debug, info, warn};
use std::collections::HashMap;

use super::models::Account;
use super::{ACCOUNT_NUMBER_CAPACITY, ACCOUNT_NUMBER_DIGITS, ACCOUNT_NUMBER_PREFIX};

/// Account store errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    #[error("No more account numbers are available ({} accounts issued)", ACCOUNT_NUMBER_CAPACITY)]
    NumbersExhausted,
}

/// Build the account number issued after `current_count` earlier accounts.
///
/// No collision check happens here; callers pass a count that only grows.
pub fn generate_account_number(current_count: usize) -> String {
    format!(
        "{}{:0width$}",
        ACCOUNT_NUMBER_PREFIX,
        current_count + 1,
        width = ACCOUNT_NUMBER_DIGITS
    )
}

/// In-memory account table.
///
/// Lookups go through a map keyed by account number while `order` keeps the
/// insertion order of the surviving accounts.
#[derive(Debug, Default)]
pub struct AccountStore {
    accounts: HashMap<String, Account>,
    order: Vec<String>,
    issued: usize,
}

impl AccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number the next call to [`AccountStore::create`] will assign.
    pub fn next_account_number(&self) -> String {
        generate_account_number(self.issued)
    }

    /// Whether every account number has already been issued
    pub fn is_full(&self) -> bool {
        self.issued >= ACCOUNT_NUMBER_CAPACITY
    }

    /// Open a new account and return it
    pub fn create(&mut self, holder_name: &str, initial_deposit: f64) -> Result<&Account, StoreError> {
        if self.is_full() {
            warn!("Refusing to open an account for {}: numbers exhausted", holder_name);
            return Err(StoreError::NumbersExhausted);
        }

        let account_number = self.next_account_number();
        self.issued += 1;

        info!(
            "Account {} opened for {} with balance {:.2}",
            account_number, holder_name, initial_deposit
        );

        self.order.push(account_number.clone());
        Ok(self
            .accounts
            .entry(account_number.clone())
            .or_insert_with(|| Account::new(account_number, holder_name.to_string(), initial_deposit)))
    }

    /// Find an account by its normalised number
    pub fn find(&self, account_number: &str) -> Option<&Account> {
        self.accounts.get(account_number)
    }

    pub fn contains(&self, account_number: &str) -> bool {
        self.accounts.contains_key(account_number)
    }

    /// Overwrite the balance of an account. Unknown numbers are ignored.
    pub fn update_balance(&mut self, account_number: &str, new_balance: f64) {
        match self.accounts.get_mut(account_number) {
            Some(account) => {
                debug!(
                    "Balance of {} changed from {:.2} to {:.2}",
                    account_number, account.balance, new_balance
                );
                account.balance = new_balance;
            }
            None => debug!("Ignoring balance update for unknown account {}", account_number),
        }
    }

    /// Remove an account, keeping the relative order of the others
    pub fn delete(&mut self, account_number: &str) -> Option<Account> {
        let removed = self.accounts.remove(account_number)?;
        self.order.retain(|number| number != account_number);
        info!("Account {} deleted", account_number);
        Some(removed)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Accounts in the order they were opened
    pub fn iter(&self) -> impl Iterator<Item = &Account> {
        self.order.iter().filter_map(|number| self.accounts.get(number))
    }
}
