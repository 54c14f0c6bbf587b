use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use super::store::AccountStore;
use super::{ACCOUNT_NUMBER_LENGTH, ACCOUNT_NUMBER_PREFIX};
use crate::config::RulesConfig;

lazy_static! {
    // Anything that is neither a letter nor a space separator, in any script
    static ref NOT_NAME_CHAR: Regex = Regex::new(r"[^\p{L}\p{Z}]").expect("holder name pattern");
}

/// Input validation error
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Name can't be empty")]
    EmptyInput,

    #[error("Invalid name: '{0}' is not a letter or a space")]
    InvalidCharacter(char),

    #[error("Invalid input. Please enter a valid amount")]
    NotANumber,

    #[error("{what} must be at least {minimum}")]
    BelowMinimum { what: &'static str, minimum: f64 },

    #[error("Insufficient funds")]
    InsufficientFunds { available: f64 },

    #[error("Amount is too large for this account")]
    AmountTooLarge,

    #[error("Invalid account number format. Please use {}XXXXX format.", ACCOUNT_NUMBER_PREFIX)]
    BadFormat,

    #[error("Account not found")]
    AccountNotFound(String),
}

/// Parse a user-supplied amount. Non-finite values are not amounts.
pub fn parse_amount(input: &str) -> Result<f64, ValidationError> {
    match input.trim().parse::<f64>() {
        Ok(amount) if amount.is_finite() => Ok(amount),
        _ => Err(ValidationError::NotANumber),
    }
}

/// Validate an account holder name and return it trimmed
pub fn validate_name(input: &str) -> Result<String, ValidationError> {
    let name = input.trim();

    if name.is_empty() {
        return Err(ValidationError::EmptyInput);
    }

    if let Some(offending) = NOT_NAME_CHAR.find(name).and_then(|m| m.as_str().chars().next()) {
        debug!("Rejected holder name containing {:?}", offending);
        return Err(ValidationError::InvalidCharacter(offending));
    }

    Ok(name.to_string())
}

pub fn validate_initial_deposit(input: &str, rules: &RulesConfig) -> Result<f64, ValidationError> {
    let amount = parse_amount(input)?;
    check_minimum(amount, rules.min_initial_deposit, "Initial deposit")?;
    Ok(amount)
}

/// Normalise an account number (trim, uppercase) and check its shape.
///
/// Only the prefix and the total length are checked; the digits are not.
pub fn validate_account_number_format(input: &str) -> Result<String, ValidationError> {
    let normalized = input.trim().to_uppercase();

    if !normalized.starts_with(ACCOUNT_NUMBER_PREFIX)
        || normalized.chars().count() != ACCOUNT_NUMBER_LENGTH
    {
        return Err(ValidationError::BadFormat);
    }

    Ok(normalized)
}

/// Format check followed by an existence check against the store
pub fn validate_existing_account(
    input: &str,
    store: &AccountStore,
) -> Result<String, ValidationError> {
    let normalized = validate_account_number_format(input)?;

    if !store.contains(&normalized) {
        return Err(ValidationError::AccountNotFound(normalized));
    }

    Ok(normalized)
}

pub fn validate_deposit_amount(
    input: &str,
    current_balance: f64,
    rules: &RulesConfig,
) -> Result<f64, ValidationError> {
    let amount = parse_amount(input)?;
    check_deposit(amount, current_balance, rules)?;
    Ok(amount)
}

pub fn validate_withdraw_amount(
    input: &str,
    current_balance: f64,
    rules: &RulesConfig,
) -> Result<f64, ValidationError> {
    let amount = parse_amount(input)?;
    check_withdrawal(amount, current_balance, "Withdraw amount", rules)?;
    Ok(amount)
}

/// Same minimum and reserve rules as a withdrawal, applied to the source account
pub fn validate_transfer_amount(
    input: &str,
    from_balance: f64,
    to_balance: f64,
    rules: &RulesConfig,
) -> Result<f64, ValidationError> {
    let amount = parse_amount(input)?;
    check_transfer(amount, from_balance, to_balance, rules)?;
    Ok(amount)
}

pub(crate) fn check_minimum(
    amount: f64,
    minimum: f64,
    what: &'static str,
) -> Result<(), ValidationError> {
    if amount < minimum {
        return Err(ValidationError::BelowMinimum { what, minimum });
    }
    Ok(())
}

/// A balance that would leave the range of `f64` is refused outright
pub(crate) fn check_finite(new_balance: f64) -> Result<(), ValidationError> {
    if !new_balance.is_finite() {
        debug!("Rejected operation resulting in balance {}", new_balance);
        return Err(ValidationError::AmountTooLarge);
    }
    Ok(())
}

pub(crate) fn check_deposit(
    amount: f64,
    balance: f64,
    rules: &RulesConfig,
) -> Result<(), ValidationError> {
    check_minimum(amount, rules.min_deposit, "Deposit amount")?;
    check_finite(balance + amount)
}

/// Minimum amount first, then the reserve floor on what remains
pub(crate) fn check_withdrawal(
    amount: f64,
    balance: f64,
    what: &'static str,
    rules: &RulesConfig,
) -> Result<(), ValidationError> {
    check_minimum(amount, rules.min_withdrawal, what)?;

    if balance - amount < rules.reserve_floor {
        return Err(ValidationError::InsufficientFunds {
            available: balance - rules.reserve_floor,
        });
    }

    Ok(())
}

/// Withdrawal rules on the sender, then both resulting balances including the fee
pub(crate) fn check_transfer(
    amount: f64,
    from_balance: f64,
    to_balance: f64,
    rules: &RulesConfig,
) -> Result<(), ValidationError> {
    check_withdrawal(amount, from_balance, "Transfer amount", rules)?;
    check_finite(from_balance - amount * (1.0 + rules.transfer_fee_rate))?;
    check_finite(to_balance + amount)
}
