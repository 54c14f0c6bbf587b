use anyhow::Result;
use log::debug;

use crate::account::validation::{
    validate_deposit_amount, validate_existing_account, validate_initial_deposit, validate_name,
    validate_transfer_amount, validate_withdraw_amount, ValidationError,
};
use crate::account::{
    deposit, transfer_funds, withdraw, Account, AccountStore, StoreError, TransactionError,
};
use crate::cli::console::Console;
use crate::cli::interactive::Screen;
use crate::cli::utils::{Outcome, Session, Step};
use crate::step;

/// Ask whether to run the operation again and redraw its screen if so
fn another<C: Console>(session: &mut Session<C>, question: &str, screen: Screen) -> Result<Step<bool>> {
    let answer = session.confirm(question)?;
    if answer == Step::Value(true) {
        let title = screen.title(&session.config().app_name);
        session.print_screen(&title)?;
    }
    Ok(answer)
}

fn read_account<C: Console>(session: &mut Session<C>, store: &AccountStore) -> Result<Step<String>> {
    session.read_valid("Enter Account Number: ", |input| {
        validate_existing_account(input, store)
    })
}

/// Open new accounts until the user stops
pub fn open_account<C: Console>(session: &mut Session<C>, store: &mut AccountStore) -> Result<Outcome> {
    let rules = session.rules().clone();

    loop {
        if store.is_full() {
            session.print_error(&StoreError::NumbersExhausted.to_string())?;
            return Ok(Outcome::Dashboard);
        }

        let account_number = store.next_account_number();
        session.println(&format!("New Account Number: {}", account_number))?;

        let name = step!(session.read_valid("Enter Account Holder Name: ", validate_name));
        let label = format!("Enter Initial Deposit (minimum {}): ", rules.min_initial_deposit);
        let initial_deposit = step!(session.read_valid(&label, |input| {
            validate_initial_deposit(input, &rules)
        }));

        let account = store.create(&name, initial_deposit)?;
        let message = format!(
            "{} Account number for {} added successfully.",
            account.account_number, account.holder_name
        );
        session.print_success(&message)?;

        if !step!(another(session, "Do you want to open another account (Y/n)? ", Screen::OpenAccount)) {
            return Ok(Outcome::Dashboard);
        }
    }
}

/// Credit existing accounts until the user stops
pub fn deposit_funds<C: Console>(session: &mut Session<C>, store: &mut AccountStore) -> Result<Outcome> {
    let rules = session.rules().clone();

    loop {
        let account_number = step!(read_account(session, store));
        let account = find_account(store, &account_number)?;
        session.println(&format!("Account Holder Name: {}", account.holder_name))?;
        session.println(&format!("Current Balance: {}\n", session.money(account.balance)))?;

        let label = format!("Enter Deposit Amount (minimum {}): ", rules.min_deposit);
        let amount = step!(session.read_valid(&label, |input| {
            validate_deposit_amount(input, account.balance, &rules)
        }));

        let new_balance = deposit(store, &account_number, amount, &rules)?;
        let message = format!("Deposit Successful!\nNew Account Balance: {}", session.money(new_balance));
        session.print_success(&message)?;

        if !step!(another(session, "Do you want to make another deposit (Y/n)? ", Screen::Deposit)) {
            return Ok(Outcome::Dashboard);
        }
    }
}

/// Debit existing accounts until the user stops.
///
/// An amount that would breach the reserve floor ends the operation
/// instead of asking again.
pub fn withdraw_funds<C: Console>(session: &mut Session<C>, store: &mut AccountStore) -> Result<Outcome> {
    let rules = session.rules().clone();

    loop {
        let account_number = step!(read_account(session, store));
        let account = find_account(store, &account_number)?;
        session.println(&format!("Account Holder Name: {}", account.holder_name))?;
        session.println(&format!("Current Balance: {}", session.money(account.balance)))?;
        session.println(&format!(
            "Available Balance for Withdraw: {}\n",
            session.money(account.available(rules.reserve_floor))
        ))?;

        if !step!(session.confirm("Do you want to make a withdrawal (Y/n)? ")) {
            return Ok(Outcome::Dashboard);
        }

        let label = format!("Enter Withdraw Amount (minimum {}): ", rules.min_withdrawal);
        let amount = loop {
            let input = step!(session.prompt_text(&label));
            match validate_withdraw_amount(&input, account.balance, &rules) {
                Ok(amount) => break amount,
                Err(err @ ValidationError::InsufficientFunds { .. }) => {
                    debug!("Withdrawal from {} abandoned: {}", account_number, err);
                    session.flash_error(err);
                    return Ok(Outcome::Dashboard);
                }
                Err(err) => session.print_error(&err.to_string())?,
            }
        };

        let new_balance = withdraw(store, &account_number, amount, &rules)?;
        let message = format!("Withdrawal Successful!\nNew Balance: {}", session.money(new_balance));
        session.print_success(&message)?;

        if !step!(another(session, "Do you want to make another withdrawal (Y/n)? ", Screen::Withdraw)) {
            return Ok(Outcome::Dashboard);
        }
    }
}

/// Move money between two existing accounts until the user stops
pub fn transfer<C: Console>(session: &mut Session<C>, store: &mut AccountStore) -> Result<Outcome> {
    let rules = session.rules().clone();

    loop {
        session.println("From Account:")?;
        let from_account = step!(read_account(session, store));
        let source = find_account(store, &from_account)?;
        session.println(&format!("From Account Holder Name: {}", source.holder_name))?;
        session.println(&format!("From Account Number: {}", from_account))?;
        session.println(&format!("Current Balance: {}\n", session.money(source.balance)))?;

        session.println("To Account:")?;
        let to_account = step!(session.read_valid("Enter Account Number: ", |input| {
            let number = validate_existing_account(input, store)?;
            if number == from_account {
                return Err(TransactionError::SameAccount);
            }
            Ok(number)
        }));
        let destination = find_account(store, &to_account)?;
        session.println(&format!("To Account Holder Name: {}", destination.holder_name))?;
        session.println(&format!("To Account Number: {}", to_account))?;
        session.println(&format!("Current Balance: {}\n", session.money(destination.balance)))?;

        let label = format!("Enter Transfer Amount (minimum {}): ", rules.min_withdrawal);
        let amount = step!(session.read_valid(&label, |input| {
            validate_transfer_amount(input, source.balance, destination.balance, &rules)
        }));

        let receipt = transfer_funds(store, &from_account, &to_account, amount, &rules)?;

        session.print_success("Transfer successful!")?;
        session.print_error(&format!(
            "{}% fee is deducted from the account",
            percent(rules.transfer_fee_rate)
        ))?;
        session.println(&format!(
            "New Balance of {} (From Account): {}",
            from_account,
            session.money(receipt.from_balance)
        ))?;
        session.println(&format!(
            "New Balance of {} (To Account): {}\n",
            to_account,
            session.money(receipt.to_balance)
        ))?;

        if !step!(another(session, "Do you want to make another transfer (Y/n)? ", Screen::Transfer)) {
            return Ok(Outcome::Dashboard);
        }
    }
}

/// Show balances until the user stops
pub fn check_balance<C: Console>(session: &mut Session<C>, store: &mut AccountStore) -> Result<Outcome> {
    let reserve_floor = session.rules().reserve_floor;

    loop {
        let account_number = step!(read_account(session, store));
        let account = find_account(store, &account_number)?;
        session.println(&format!("Account Holder Name: {}", account.holder_name))?;
        session.println(&format!("Current Account Balance: {}", session.money(account.balance)))?;
        session.println(&format!(
            "Available Balance for Withdraw: {}\n",
            session.money(account.available(reserve_floor))
        ))?;

        if !step!(another(
            session,
            "Do you want to check another account balance (Y/n)? ",
            Screen::CheckBalance
        )) {
            return Ok(Outcome::Dashboard);
        }
    }
}

/// Delete accounts until the user stops; each deletion is confirmed first
pub fn delete_account<C: Console>(session: &mut Session<C>, store: &mut AccountStore) -> Result<Outcome> {
    loop {
        let account_number = step!(read_account(session, store));
        let account = find_account(store, &account_number)?;
        session.println(&format!("Account Holder Name: {}", account.holder_name))?;
        session.println(&format!("Current Account Balance: {}\n", session.money(account.balance)))?;

        if step!(session.confirm("Are you sure you want to delete this account (Y/n)? ")) {
            store.delete(&account_number);
            session.print_success(&format!(
                "The account with number {} and name {} has been successfully deleted.",
                account_number, account.holder_name
            ))?;
        } else {
            session.print_error("Account deletion cancelled.")?;
        }

        if !step!(another(session, "Do you want to delete another account (Y/n)? ", Screen::DeleteAccount)) {
            return Ok(Outcome::Dashboard);
        }
    }
}

/// Render a rate as a percentage with at most two decimals and no trailing zeros
fn percent(rate: f64) -> String {
    let text = format!("{:.2}", rate * 100.0);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Snapshot of a validated account, taken before any balance changes
fn find_account(store: &AccountStore, account_number: &str) -> Result<Account, TransactionError> {
    store
        .find(account_number)
        .cloned()
        .ok_or_else(|| TransactionError::AccountNotFound(account_number.to_string()))
}
