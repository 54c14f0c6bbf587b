// Terminal front end
// The console abstraction, the prompt primitives, the six banking
// operations and the dashboard loop that dispatches to them.

pub mod account;
pub mod console;
pub mod interactive;
pub mod utils;

use anyhow::Result;

use crate::account::AccountStore;
use crate::config::Config;
use console::StdConsole;
use utils::Session;

/// Run the dashboard on the process terminal with a fresh, empty store
pub fn run_interactive(config: Config) -> Result<()> {
    let mut session = Session::new(StdConsole::new(), config);
    let mut store = AccountStore::new();
    interactive::run_menu(&mut session, &mut store)
}
