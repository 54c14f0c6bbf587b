//! In-memory bank account record keeping behind a terminal menu.
//!
//! [`account`] holds the store, the input validators and the
//! balance-changing transactions; [`cli`] draws the dashboard and runs the
//! interactive operations against any [`cli::console::Console`].

pub mod account;
pub mod cli;
pub mod config;
