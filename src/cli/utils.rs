use anyhow::{Context, Result};
use crossterm::cursor::MoveTo;
use crossterm::style::Stylize;
use crossterm::terminal::{Clear, ClearType};
use crossterm::Command;
use std::fmt;

use crate::cli::console::Console;
use crate::config::{Config, RulesConfig};

const HEADER_WIDTH: usize = 50;

/// A line read at a free-text prompt, after shortcut handling
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Text(String),
    /// `Z`: leave the application
    ExitRequested,
    /// `D`: abandon the current operation and redraw the dashboard
    DashboardRequested,
}

impl Input {
    /// Classify a raw line. Shortcuts match case-insensitively after trimming.
    pub fn classify(line: &str) -> Self {
        match line.trim() {
            s if s.eq_ignore_ascii_case("Z") => Input::ExitRequested,
            s if s.eq_ignore_ascii_case("D") => Input::DashboardRequested,
            s => Input::Text(s.to_string()),
        }
    }
}

/// Where the menu goes once an operation hands control back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Dashboard,
    Exit,
}

/// Either the value a prompt asked for, or the navigation that interrupted it
#[derive(Debug, Clone, PartialEq)]
pub enum Step<T> {
    Value(T),
    Leave(Outcome),
}

/// Unwrap a [`Step`], returning the navigation outcome from the enclosing function
#[macro_export]
macro_rules! step {
    ($e:expr) => {
        match $e? {
            $crate::cli::utils::Step::Value(value) => value,
            $crate::cli::utils::Step::Leave(outcome) => return Ok(outcome),
        }
    };
}

/// One interactive run: the console plus the configuration it is drawn with
pub struct Session<C: Console> {
    console: C,
    config: Config,
    flash: Option<String>,
}

impl<C: Console> Session<C> {
    pub fn new(console: C, config: Config) -> Self {
        Self {
            console,
            config,
            flash: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn rules(&self) -> &RulesConfig {
        &self.config.rules
    }

    pub fn into_console(self) -> C {
        self.console
    }

    /// Format an amount with the configured currency label
    pub fn money(&self, amount: f64) -> String {
        format!("{} {:.2}", self.config.currency, amount)
    }

    pub fn write(&mut self, text: &str) -> Result<()> {
        self.console
            .write(text)
            .context("Failed to write to the terminal")
    }

    pub fn println(&mut self, line: &str) -> Result<()> {
        self.write(&format!("{}\n", line))
    }

    /// Clear the terminal (when enabled) and draw a screen header.
    ///
    /// An error queued with [`Session::flash_error`] is shown right below it.
    pub fn print_screen(&mut self, title: &str) -> Result<()> {
        if self.config.display.clear_screen {
            let mut ansi = String::new();
            Clear(ClearType::All).write_ansi(&mut ansi)?;
            MoveTo(0, 0).write_ansi(&mut ansi)?;
            self.write(&ansi)?;
        }

        self.print_header(title)?;

        if let Some(message) = self.flash.take() {
            self.print_error(&message)?;
        }
        Ok(())
    }

    /// Format and print a title between two rules
    pub fn print_header(&mut self, title: &str) -> Result<()> {
        let rule = "-".repeat(HEADER_WIDTH);
        let padding = " ".repeat(HEADER_WIDTH.saturating_sub(title.chars().count()) / 2);
        let title = self.paint(title, |t| t.blue().bold().to_string());
        self.write(&format!("{rule}\n{padding}{title}\n{rule}\n"))
    }

    pub fn print_error(&mut self, message: &str) -> Result<()> {
        let message = self.paint(message, |m| m.red().bold().to_string());
        self.write(&format!("{}\n\n", message))
    }

    pub fn print_success(&mut self, message: &str) -> Result<()> {
        let message = self.paint(message, |m| m.green().bold().to_string());
        self.write(&format!("{}\n\n", message))
    }

    /// Queue an error to be shown under the next screen header
    pub fn flash_error(&mut self, message: impl fmt::Display) {
        self.flash = Some(message.to_string());
    }

    fn paint(&self, text: &str, style: impl Fn(&str) -> String) -> String {
        if self.config.display.color {
            style(text)
        } else {
            text.to_string()
        }
    }

    /// Print a prompt and read the answer without shortcut handling.
    /// `None` means the input has ended.
    pub fn read_plain(&mut self, label: &str) -> Result<Option<String>> {
        self.write(label)?;
        self.console
            .read_line()
            .context("Failed to read from the terminal")
    }

    /// Print a prompt and read a free-text answer, honouring the `Z`/`D` shortcuts.
    /// End of input counts as an exit request.
    pub fn prompt(&mut self, label: &str) -> Result<Input> {
        Ok(match self.read_plain(label)? {
            Some(line) => Input::classify(&line),
            None => Input::ExitRequested,
        })
    }

    /// [`Session::prompt`] with the shortcuts turned into navigation
    pub fn prompt_text(&mut self, label: &str) -> Result<Step<String>> {
        Ok(match self.prompt(label)? {
            Input::Text(text) => Step::Value(text),
            Input::ExitRequested => Step::Leave(Outcome::Exit),
            Input::DashboardRequested => Step::Leave(Outcome::Dashboard),
        })
    }

    /// Re-prompt until `validate` accepts the answer, printing each rejection
    pub fn read_valid<T, E, F>(&mut self, label: &str, mut validate: F) -> Result<Step<T>>
    where
        E: fmt::Display,
        F: FnMut(&str) -> Result<T, E>,
    {
        loop {
            let text = match self.prompt_text(label)? {
                Step::Value(text) => text,
                Step::Leave(outcome) => return Ok(Step::Leave(outcome)),
            };

            match validate(&text) {
                Ok(value) => return Ok(Step::Value(value)),
                Err(err) => self.print_error(&err.to_string())?,
            }
        }
    }

    /// Ask a Y/n question. Only `Y` (any case, surrounding blanks ignored) is a yes.
    pub fn confirm(&mut self, question: &str) -> Result<Step<bool>> {
        Ok(match self.read_plain(question)? {
            Some(answer) => Step::Value(answer.trim().eq_ignore_ascii_case("Y")),
            None => Step::Leave(Outcome::Exit),
        })
    }
}
