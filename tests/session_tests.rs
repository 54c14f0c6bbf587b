use smart_bank::{
    account::AccountStore,
    cli::{console::Console, interactive::run_menu, utils::Session},
    config::Config,
};
use std::collections::VecDeque;
use std::io;

/// Console fed from a fixed script that records everything written to it
struct ScriptedConsole {
    input: VecDeque<String>,
    output: String,
}

impl ScriptedConsole {
    fn new(lines: &[&str]) -> Self {
        Self {
            input: lines.iter().map(|line| line.to_string()).collect(),
            output: String::new(),
        }
    }
}

impl Console for ScriptedConsole {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        Ok(self.input.pop_front())
    }

    fn write(&mut self, text: &str) -> io::Result<()> {
        self.output.push_str(text);
        Ok(())
    }
}

fn plain_config() -> Config {
    let mut config = Config::default();
    config.display.color = false;
    config.display.clear_screen = false;
    config
}

/// Run a whole session and return the final store and the transcript
fn run_session(store: AccountStore, lines: &[&str]) -> (AccountStore, String) {
    let mut store = store;
    let mut session = Session::new(ScriptedConsole::new(lines), plain_config());
    run_menu(&mut session, &mut store).unwrap();

    let console = session.into_console();
    assert!(
        console.input.is_empty(),
        "session ended with unread input: {:?}",
        console.input
    );
    (store, console.output)
}

fn balance(store: &AccountStore, number: &str) -> f64 {
    store.find(number).unwrap().balance
}

#[test]
fn test_banking_scenario() {
    let (store, output) = run_session(
        AccountStore::new(),
        &[
            // Open Alice with 10000, then Bob with 6000
            "1", "Alice", "10000", "Y", "Bob", "6000", "n",
            // Deposit 500 into Alice
            "2", "sdb-s00001", "500", "n",
            // Withdraw 100 from Alice
            "3", "SDB-S00001", "Y", "100", "n",
            // Transfer 1000 from Alice to Bob
            "4", "SDB-S00001", "SDB-S00002", "1000", "n",
            "7",
        ],
    );

    assert!(output.contains("SDB-S00001 Account number for Alice added successfully."));
    assert!(output.contains("SDB-S00002 Account number for Bob added successfully."));
    assert!(output.contains("New Account Balance: LKR 10500.00"));
    assert!(output.contains("New Balance: LKR 10400.00"));
    assert!(output.contains("Available Balance for Withdraw: LKR 10000.00"));
    assert!(output.contains("2% fee is deducted from the account"));
    assert!(output.contains("New Balance of SDB-S00001 (From Account): LKR 9380.00"));
    assert!(output.contains("New Balance of SDB-S00002 (To Account): LKR 7000.00"));

    assert_eq!(balance(&store, "SDB-S00001"), 9380.0);
    assert_eq!(balance(&store, "SDB-S00002"), 7000.0);
}

#[test]
fn test_open_account_reprompts_invalid_input() {
    let (store, output) = run_session(
        AccountStore::new(),
        &["1", "", "R2D2", "Dinuka Perera", "abc", "4999", "5000", "", "7"],
    );

    assert!(output.contains("Name can't be empty"));
    assert!(output.contains("Invalid name: '2' is not a letter or a space"));
    assert!(output.contains("Invalid input. Please enter a valid amount"));
    assert!(output.contains("Initial deposit must be at least 5000"));

    let account = store.find("SDB-S00001").unwrap();
    assert_eq!(account.holder_name, "Dinuka Perera");
    assert_eq!(account.balance, 5000.0);
}

#[test]
fn test_withdraw_insufficient_funds_aborts_to_dashboard() {
    let mut store = AccountStore::new();
    store.create("Alice", 6000.0).unwrap();

    let (store, output) = run_session(
        store,
        &["3", "SDB-S00001", "Y", "5600", "7"],
    );

    assert!(output.contains("Insufficient funds"));
    assert!(!output.contains("Do you want to make another withdrawal"));
    assert_eq!(output.matches("Welcome to Smart Banking App").count(), 2);
    assert_eq!(balance(&store, "SDB-S00001"), 6000.0);
}

#[test]
fn test_withdraw_below_minimum_reprompts() {
    let mut store = AccountStore::new();
    store.create("Alice", 6000.0).unwrap();

    let (store, output) = run_session(
        store,
        &["3", "SDB-S00001", "y", "50", "200", "n", "7"],
    );

    assert!(output.contains("Withdraw amount must be at least 100"));
    assert_eq!(balance(&store, "SDB-S00001"), 5800.0);
}

#[test]
fn test_withdraw_not_confirmed_returns_to_dashboard() {
    let mut store = AccountStore::new();
    store.create("Alice", 6000.0).unwrap();

    let (store, output) = run_session(store, &["3", "SDB-S00001", "n", "7"]);

    assert!(!output.contains("Enter Withdraw Amount"));
    assert_eq!(balance(&store, "SDB-S00001"), 6000.0);
}

#[test]
fn test_transfer_reprompts_on_insufficient_funds_and_same_account() {
    let mut store = AccountStore::new();
    store.create("Alice", 6000.0).unwrap();
    store.create("Bob", 5000.0).unwrap();

    let (store, output) = run_session(
        store,
        &["4", "SDB-S00001", "SDB-S00001", "SDB-S00002", "5501", "1000", "n", "7"],
    );

    assert!(output.contains("Source and destination accounts must be different"));
    assert!(output.contains("Insufficient funds"));
    assert_eq!(balance(&store, "SDB-S00001"), 6000.0 - 1020.0);
    assert_eq!(balance(&store, "SDB-S00002"), 6000.0);
}

#[test]
fn test_account_number_validation_messages() {
    let mut store = AccountStore::new();
    store.create("Alice", 6000.0).unwrap();

    let (_, output) = run_session(
        store,
        &["5", "12345", "SDB-S00002", "SDB-S00001", "n", "7"],
    );

    assert!(output.contains("Invalid account number format. Please use SDB-SXXXXX format."));
    assert!(output.contains("Account not found"));
    assert!(output.contains("Current Account Balance: LKR 6000.00"));
    assert!(output.contains("Available Balance for Withdraw: LKR 5500.00"));
}

#[test]
fn test_delete_account_confirm_and_cancel() {
    let mut store = AccountStore::new();
    store.create("Alice", 6000.0).unwrap();
    store.create("Bob", 7000.0).unwrap();

    let (store, output) = run_session(
        store,
        &["6", "SDB-S00002", "n", "Y", "SDB-S00001", "Y", "n", "7"],
    );

    assert!(output.contains("Account deletion cancelled."));
    assert!(output.contains(
        "The account with number SDB-S00001 and name Alice has been successfully deleted."
    ));
    assert!(store.find("SDB-S00001").is_none());
    assert_eq!(balance(&store, "SDB-S00002"), 7000.0);
}

#[test]
fn test_numbers_keep_increasing_after_delete() {
    let (store, output) = run_session(
        AccountStore::new(),
        &[
            "1", "Alice", "5000", "y", "Bob", "5000", "n",
            "6", "SDB-S00002", "y", "n",
            "1", "Carol", "5000", "n",
            "7",
        ],
    );

    assert!(output.contains("New Account Number: SDB-S00003"));
    assert!(store.find("SDB-S00002").is_none());
    assert_eq!(store.find("SDB-S00003").unwrap().holder_name, "Carol");
    assert_eq!(store.len(), 2);
}

#[test]
fn test_dashboard_shortcut_keeps_store() {
    let (store, output) = run_session(
        AccountStore::new(),
        &[
            "1", "Alice", "8000", "n",
            // Abandon a second account half way through
            "1", "Bob", "d",
            // The first account is still there
            "5", "SDB-S00001", "n",
            "7",
        ],
    );

    assert_eq!(store.len(), 1);
    assert!(store.find("SDB-S00002").is_none());
    assert!(output.contains("Current Account Balance: LKR 8000.00"));
}

#[test]
fn test_exit_shortcut_ends_session() {
    let (store, output) = run_session(AccountStore::new(), &["2", "Z"]);

    assert!(store.is_empty());
    assert!(!output.contains("Exiting the Smart Banking App..."));
}

#[test]
fn test_end_of_input_ends_session() {
    let mut store = AccountStore::new();
    store.create("Alice", 6000.0).unwrap();

    let (store, _) = run_session(store, &["2", "SDB-S00001"]);
    assert_eq!(balance(&store, "SDB-S00001"), 6000.0);
}

#[test]
fn test_deposit_that_would_overflow_reprompts() {
    let mut store = AccountStore::new();
    store.create("Alice", 1e308).unwrap();

    let (store, output) = run_session(store, &["2", "SDB-S00001", "1e308", "500", "n", "7"]);

    assert!(output.contains("Amount is too large for this account"));
    assert!(output.contains("Deposit Successful!"));
    assert!(balance(&store, "SDB-S00001").is_finite());
}

#[test]
fn test_transfer_that_would_overflow_reprompts() {
    let mut store = AccountStore::new();
    store.create("Alice", 1.79e308).unwrap();
    store.create("Bob", 1e308).unwrap();

    let (store, output) = run_session(
        store,
        &["4", "SDB-S00001", "SDB-S00002", "1.7e308", "1000", "n", "7"],
    );

    assert!(output.contains("Amount is too large for this account"));
    assert!(output.contains("Transfer successful!"));
    assert!(store.iter().all(|account| account.balance.is_finite()));
    assert_eq!(balance(&store, "SDB-S00002"), 1e308 + 1000.0);
}
