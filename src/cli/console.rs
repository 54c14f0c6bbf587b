use std::io::{self, BufRead, Write};

/// Line-oriented terminal the menus talk to
#[cfg_attr(test, mockall::automock)]
pub trait Console {
    /// Next line of input without its line terminator, or `None` at end of input
    fn read_line(&mut self) -> io::Result<Option<String>>;

    /// Write text as-is and flush it
    fn write(&mut self, text: &str) -> io::Result<()>;
}

/// Console backed by the process's standard input and output
pub struct StdConsole {
    stdin: io::StdinLock<'static>,
    stdout: io::Stdout,
}

impl StdConsole {
    pub fn new() -> Self {
        Self {
            stdin: io::stdin().lock(),
            stdout: io::stdout(),
        }
    }
}

impl Default for StdConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for StdConsole {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut input = String::new();
        if self.stdin.read_line(&mut input)? == 0 {
            return Ok(None);
        }

        let line = input.trim_end_matches(['\r', '\n']);
        Ok(Some(line.to_string()))
    }

    fn write(&mut self, text: &str) -> io::Result<()> {
        self.stdout.write_all(text.as_bytes())?;
        self.stdout.flush()
    }
}
