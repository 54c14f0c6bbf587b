// Account management module
// This module provides the in-memory account store, input validation
// and the balance-changing transactions.

mod models;
mod store;
pub mod transactions;
pub mod validation;

pub use models::Account;
pub use store::{generate_account_number, AccountStore, StoreError};
pub use transactions::{deposit, transfer_funds, withdraw, TransactionError, TransferReceipt};
pub use validation::ValidationError;

/// Prefix shared by every issued account number
pub const ACCOUNT_NUMBER_PREFIX: &str = "SDB-S";

/// Number of zero-padded digits after the prefix
pub const ACCOUNT_NUMBER_DIGITS: usize = 5;

/// Accounts one session can issue before the digits run out
pub const ACCOUNT_NUMBER_CAPACITY: usize = 10usize.pow(ACCOUNT_NUMBER_DIGITS as u32) - 1;

/// Total length of a well-formed account number
pub const ACCOUNT_NUMBER_LENGTH: usize = ACCOUNT_NUMBER_PREFIX.len() + ACCOUNT_NUMBER_DIGITS;

/// Smallest deposit accepted when opening an account
pub const MIN_INITIAL_DEPOSIT: f64 = 5000.0;

/// Smallest deposit accepted into an existing account
pub const MIN_DEPOSIT: f64 = 500.0;

/// Smallest withdrawal or transfer amount
pub const MIN_WITHDRAWAL: f64 = 100.0;

/// Balance an account must keep after a withdrawal or outgoing transfer
pub const RESERVE_FLOOR: f64 = 500.0;

/// Fee charged to the sender of a transfer, as a fraction of the amount
pub const TRANSFER_FEE_RATE: f64 = 0.02;
