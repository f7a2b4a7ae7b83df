//! Terminal output for the CLI.
//!
//! Status lines go to stderr as a right-aligned verb and a message:
//!
//! ```text
//!      Removed github.com/old/dep
//!      Rewrote 3 files
//!        Saved 2 dependencies to Deps/Deps.json
//! ```
//!
//! While `save` runs, an indicatif spinner is shown if stderr is a terminal
//! and debug logging is off.

use std::fmt::{self, Display};
use std::io::{self, IsTerminal};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Verb of a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Saved,
    Rewrote,
    Removed,
    Warning,
}

impl Status {
    fn style(self) -> &'static str {
        match self {
            Status::Saved | Status::Rewrote => "\x1b[1;32m",
            Status::Removed => "\x1b[1;36m",
            Status::Warning => "\x1b[1;33m",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            Status::Saved => "Saved",
            Status::Rewrote => "Rewrote",
            Status::Removed => "Removed",
            Status::Warning => "warning",
        };
        f.pad(verb)
    }
}

const VERB_WIDTH: usize = 12;

#[derive(Debug, Clone, Copy)]
pub struct Shell {
    verbose: bool,
    color: bool,
}

impl Shell {
    /// Colors follow `--no-color` and whether stderr is a terminal.
    pub fn from_flags(verbose: bool, no_color: bool) -> Self {
        Shell {
            verbose,
            color: !no_color && io::stderr().is_terminal(),
        }
    }

    pub fn use_color(&self) -> bool {
        self.color
    }

    pub fn status(&self, status: Status, msg: impl Display) {
        eprintln!("{} {}", self.verb(status), msg);
    }

    pub fn warn(&self, msg: impl Display) {
        self.status(Status::Warning, msg);
    }

    fn verb(&self, status: Status) -> String {
        let padded = format!("{:>width$}", status, width = VERB_WIDTH);
        if self.color {
            format!("{}{}\x1b[0m", status.style(), padded)
        } else {
            padded
        }
    }

    /// A spinner for a long phase; hidden when it would garble the output.
    pub fn spinner(&self, msg: impl Display) -> ProgressBar {
        if self.verbose || !io::stderr().is_terminal() {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verb_alignment() {
        let shell = Shell::from_flags(false, true);
        assert_eq!(shell.verb(Status::Saved), "       Saved");
        assert_eq!(shell.verb(Status::Warning), "     warning");
    }

    #[test]
    fn test_no_color_and_verbose() {
        let shell = Shell::from_flags(true, true);
        assert!(!shell.use_color());
        assert!(shell.spinner("resolving").is_hidden());
    }
}
