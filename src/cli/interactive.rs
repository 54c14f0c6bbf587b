use anyhow::Result;
use log::{debug, info};

use crate::account::AccountStore;
use crate::cli::account::{
    check_balance, delete_account, deposit_funds, open_account, transfer, withdraw_funds,
};
use crate::cli::console::Console;
use crate::cli::utils::{Outcome, Session};

/// Screens of the menu state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    OpenAccount,
    Deposit,
    Withdraw,
    Transfer,
    CheckBalance,
    DeleteAccount,
    Exit,
}

const MENU: [(&str, Screen); 7] = [
    ("Open New Account", Screen::OpenAccount),
    ("Deposit", Screen::Deposit),
    ("Withdraw", Screen::Withdraw),
    ("Transfer", Screen::Transfer),
    ("Check Account Balance", Screen::CheckBalance),
    ("Delete Account", Screen::DeleteAccount),
    ("Exit", Screen::Exit),
];

impl Screen {
    /// Map a dashboard choice (1-7) to its screen
    pub fn from_choice(choice: i64) -> Option<Screen> {
        let index = usize::try_from(choice).ok()?.checked_sub(1)?;
        MENU.get(index).map(|(_, screen)| *screen)
    }

    pub fn title(&self, app_name: &str) -> String {
        match self {
            Screen::Dashboard => format!("Welcome to {}", app_name),
            Screen::OpenAccount => "Open New Account".to_string(),
            Screen::Deposit => "Deposit".to_string(),
            Screen::Withdraw => "Withdraw".to_string(),
            Screen::Transfer => "Transfer".to_string(),
            Screen::CheckBalance => "Check Account Balance".to_string(),
            Screen::DeleteAccount => "Delete Account".to_string(),
            Screen::Exit => format!("Exiting {}", app_name),
        }
    }
}

/// Print the dashboard options and read a choice.
/// Anything that is not one of the listed numbers leads back to the dashboard.
fn read_menu_choice<C: Console>(session: &mut Session<C>) -> Result<Screen> {
    for (number, (label, _)) in MENU.iter().enumerate() {
        session.println(&format!("[{}]. {}", number + 1, label))?;
    }

    let line = match session.read_plain("Enter an option to continue > ")? {
        Some(line) => line,
        None => return Ok(Screen::Exit),
    };

    let choice = line.trim().parse::<i64>().ok().and_then(Screen::from_choice);
    match choice {
        Some(screen) => Ok(screen),
        None => {
            debug!("Rejected menu choice {:?}", line);
            session.flash_error(format!(
                "Invalid option '{}'. Please enter a number between 1 and {}",
                line.trim(),
                MENU.len()
            ));
            Ok(Screen::Dashboard)
        }
    }
}

/// Run the dashboard until the user exits.
///
/// The store outlives every navigation reset; only the current screen is
/// thrown away when an operation returns to the dashboard.
pub fn run_menu<C: Console>(session: &mut Session<C>, store: &mut AccountStore) -> Result<()> {
    let mut screen = Screen::Dashboard;
    info!("Session started");

    loop {
        let title = screen.title(&session.config().app_name);
        session.print_screen(&title)?;

        let outcome = match screen {
            Screen::Dashboard => {
                screen = read_menu_choice(session)?;
                continue;
            }
            Screen::OpenAccount => open_account(session, store)?,
            Screen::Deposit => deposit_funds(session, store)?,
            Screen::Withdraw => withdraw_funds(session, store)?,
            Screen::Transfer => transfer(session, store)?,
            Screen::CheckBalance => check_balance(session, store)?,
            Screen::DeleteAccount => delete_account(session, store)?,
            Screen::Exit => {
                session.println(&format!("Exiting the {}...", session.config().app_name))?;
                Outcome::Exit
            }
        };

        match outcome {
            Outcome::Dashboard => screen = Screen::Dashboard,
            Outcome::Exit => {
                info!("Session ended with {} open account(s)", store.len());
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::console::MockConsole;
    use crate::config::Config;
    use mockall::Sequence;
    use rstest::rstest;
    use std::sync::{Arc, Mutex};

    fn plain_config() -> Config {
        let mut config = Config::default();
        config.display.color = false;
        config.display.clear_screen = false;
        config
    }

    /// Mock console that answers with `lines` and records everything written
    fn recording_console(lines: &[&str], output: Arc<Mutex<String>>) -> MockConsole {
        let mut console = MockConsole::new();
        let mut seq = Sequence::new();
        for line in lines {
            let line = line.to_string();
            console
                .expect_read_line()
                .times(1)
                .in_sequence(&mut seq)
                .returning(move || Ok(Some(line.clone())));
        }
        console
            .expect_write()
            .returning(move |text| {
                output.lock().unwrap().push_str(text);
                Ok(())
            });
        console
    }

    #[rstest]
    #[case(1, Some(Screen::OpenAccount))]
    #[case(2, Some(Screen::Deposit))]
    #[case(3, Some(Screen::Withdraw))]
    #[case(4, Some(Screen::Transfer))]
    #[case(5, Some(Screen::CheckBalance))]
    #[case(6, Some(Screen::DeleteAccount))]
    #[case(7, Some(Screen::Exit))]
    #[case(0, None)]
    #[case(8, None)]
    #[case(-1, None)]
    fn test_from_choice(#[case] choice: i64, #[case] expected: Option<Screen>) {
        assert_eq!(Screen::from_choice(choice), expected);
    }

    #[test]
    fn test_exit_choice() {
        let output = Arc::new(Mutex::new(String::new()));
        let console = recording_console(&["7"], output.clone());
        let mut session = Session::new(console, plain_config());
        let mut store = AccountStore::new();

        run_menu(&mut session, &mut store).unwrap();

        let output = output.lock().unwrap();
        assert!(output.contains("Welcome to Smart Banking App"));
        assert!(output.contains("[7]. Exit"));
        assert!(output.ends_with("Exiting the Smart Banking App...\n"));
    }

    #[rstest]
    #[case("abc")]
    #[case("9")]
    #[case("")]
    fn test_invalid_choice_is_reported_and_dashboard_redrawn(#[case] choice: &str) {
        let output = Arc::new(Mutex::new(String::new()));
        let console = recording_console(&[choice, "7"], output.clone());
        let mut session = Session::new(console, plain_config());
        let mut store = AccountStore::new();

        run_menu(&mut session, &mut store).unwrap();

        let output = output.lock().unwrap();
        assert!(output.contains("Please enter a number between 1 and 7"));
        assert_eq!(output.matches("Welcome to Smart Banking App").count(), 2);
    }

    #[test]
    fn test_end_of_input_on_dashboard_exits() {
        let mut console = MockConsole::new();
        console.expect_write().returning(|_| Ok(()));
        console.expect_read_line().times(1).returning(|| Ok(None));

        let mut session = Session::new(console, plain_config());
        let mut store = AccountStore::new();
        assert!(run_menu(&mut session, &mut store).is_ok());
    }

    #[test]
    fn test_exit_shortcut_inside_operation() {
        let output = Arc::new(Mutex::new(String::new()));
        let console = recording_console(&["1", "Z"], output.clone());
        let mut session = Session::new(console, plain_config());
        let mut store = AccountStore::new();

        run_menu(&mut session, &mut store).unwrap();

        let output = output.lock().unwrap();
        assert!(output.contains("New Account Number: SDB-S00001"));
        assert!(!output.contains("Exiting"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_write_failure_propagates() {
        let mut console = MockConsole::new();
        console
            .expect_write()
            .returning(|_| Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed")));

        let mut session = Session::new(console, plain_config());
        let mut store = AccountStore::new();
        let err = run_menu(&mut session, &mut store).unwrap_err();
        assert!(err.to_string().contains("Failed to write to the terminal"));
    }
}
