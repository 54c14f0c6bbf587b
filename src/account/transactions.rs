use log::{debug, info, warn};
use std::fmt;

use super::store::AccountStore;
use super::validation::{check_deposit, check_transfer, check_withdrawal, ValidationError};
use crate::config::RulesConfig;

/// Transaction processing errors
#[derive(Debug, Clone, PartialEq)]
pub enum TransactionError {
    /// Account not found
    AccountNotFound(String),
    /// Source and destination of a transfer are the same account
    SameAccount,
    /// Amount rejected by the deposit, withdrawal or transfer rules
    Rejected(ValidationError),
}

impl fmt::Display for TransactionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionError::AccountNotFound(number) => write!(f, "Account {} not found", number),
            TransactionError::SameAccount => {
                write!(f, "Source and destination accounts must be different")
            }
            TransactionError::Rejected(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for TransactionError {}

impl From<ValidationError> for TransactionError {
    fn from(error: ValidationError) -> Self {
        match error {
            ValidationError::AccountNotFound(number) => TransactionError::AccountNotFound(number),
            other => TransactionError::Rejected(other),
        }
    }
}

/// Balances after a completed transfer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransferReceipt {
    pub from_balance: f64,
    pub to_balance: f64,
    /// Charged to the sender on top of the amount and credited to nobody
    pub fee: f64,
}

fn balance_of(store: &AccountStore, account_number: &str) -> Result<f64, TransactionError> {
    store
        .find(account_number)
        .map(|account| account.balance)
        .ok_or_else(|| TransactionError::AccountNotFound(account_number.to_string()))
}

/// Credit an account and return its new balance
pub fn deposit(
    store: &mut AccountStore,
    account_number: &str,
    amount: f64,
    rules: &RulesConfig,
) -> Result<f64, TransactionError> {
    debug!("Processing deposit of {:.2} into {}", amount, account_number);

    let balance = balance_of(store, account_number)?;
    if let Err(err) = check_deposit(amount, balance, rules) {
        warn!("Deposit of {:.2} into {} rejected: {}", amount, account_number, err);
        return Err(err.into());
    }

    let new_balance = balance + amount;
    store.update_balance(account_number, new_balance);

    info!("Deposited {:.2} into {}", amount, account_number);
    Ok(new_balance)
}

/// Debit an account, keeping the reserve floor, and return its new balance
pub fn withdraw(
    store: &mut AccountStore,
    account_number: &str,
    amount: f64,
    rules: &RulesConfig,
) -> Result<f64, TransactionError> {
    debug!("Processing withdrawal of {:.2} from {}", amount, account_number);

    let balance = balance_of(store, account_number)?;
    if let Err(err) = check_withdrawal(amount, balance, "Withdraw amount", rules) {
        warn!("Withdrawal of {:.2} from {} rejected: {}", amount, account_number, err);
        return Err(err.into());
    }

    let new_balance = balance - amount;
    store.update_balance(account_number, new_balance);

    info!("Withdrew {:.2} from {}", amount, account_number);
    Ok(new_balance)
}

/// Move `amount` between two accounts.
///
/// The sender pays the amount plus the transfer fee; the receiver gets the
/// amount. The reserve floor is checked against the amount alone, so the fee
/// may take the sender slightly below the floor. Neither balance may overflow.
pub fn transfer_funds(
    store: &mut AccountStore,
    from_account: &str,
    to_account: &str,
    amount: f64,
    rules: &RulesConfig,
) -> Result<TransferReceipt, TransactionError> {
    debug!(
        "Processing transfer of {:.2} from {} to {}",
        amount, from_account, to_account
    );

    if from_account == to_account {
        return Err(TransactionError::SameAccount);
    }

    let from_balance = balance_of(store, from_account)?;
    let to_balance = balance_of(store, to_account)?;

    if let Err(err) = check_transfer(amount, from_balance, to_balance, rules) {
        warn!("Transfer of {:.2} from {} rejected: {}", amount, from_account, err);
        return Err(err.into());
    }

    let fee = amount * rules.transfer_fee_rate;
    let receipt = TransferReceipt {
        from_balance: from_balance - amount * (1.0 + rules.transfer_fee_rate),
        to_balance: to_balance + amount,
        fee,
    };

    store.update_balance(from_account, receipt.from_balance);
    store.update_balance(to_account, receipt.to_balance);

    info!(
        "Transferred {:.2} from {} to {} (fee {:.2})",
        amount, from_account, to_account, fee
    );
    Ok(receipt)
}
