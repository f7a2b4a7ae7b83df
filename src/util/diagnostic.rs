//! Actionable error reports.
//!
//! A report names what went wrong, where, and what to do about it:
//!
//! ```text
//! error: github.com/x/y/sub: revision is abc, want def
//!   --> /gopath/src/github.com/x/y
//!   = note: github.com/x/y is pinned at def
//! help: Check out the pinned revision ...
//! ```

use std::fmt::{self, Write};
use std::path::PathBuf;

/// Help lines shared between errors.
pub mod suggestions {
    pub const DIRTY_TREE: &str = "Commit or revert the local changes, then run `deppy save` again";

    pub const REV_MISMATCH: &str =
        "Check out the pinned revision in the dependency's repository, or remove the stale entry from Deps/Deps.json";

    pub const UNSUPPORTED_VCS: &str = "Mirror the dependency into a git or Mercurial repository";

    pub const NO_REPOSITORY: &str =
        "Make sure the package was fetched with `go get` into a VCS checkout";
}

const RED: &str = "\x1b[1;31m";
const GREEN: &str = "\x1b[1;32m";
const RESET: &str = "\x1b[0m";

/// An error report with an optional location, notes and help lines.
#[derive(Debug, Clone, Default)]
pub struct Diagnostic {
    pub message: String,
    pub location: Option<PathBuf>,
    pub notes: Vec<String>,
    pub help: Vec<String>,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            ..Default::default()
        }
    }

    pub fn with_location(mut self, path: impl Into<PathBuf>) -> Self {
        self.location = Some(path.into());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help.push(help.into());
        self
    }

    /// Render for a terminal, with ANSI colors if `color` is set.
    pub fn render(&self, color: bool) -> String {
        let paint = |style: &str, text: &str| {
            if color {
                format!("{style}{text}{RESET}")
            } else {
                text.to_string()
            }
        };

        let mut out = String::new();
        let _ = writeln!(out, "{}: {}", paint(RED, "error"), self.message);
        if let Some(path) = &self.location {
            let _ = writeln!(out, "  --> {}", path.display());
        }
        for note in &self.notes {
            let _ = writeln!(out, "  = note: {}", note);
        }
        for help in &self.help {
            let _ = writeln!(out, "{}: {}", paint(GREEN, "help"), help);
        }
        out
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(false))
    }
}

/// Print a report to stderr.
pub fn emit(diagnostic: &Diagnostic, color: bool) {
    eprint!("{}", diagnostic.render(color));
}
