//! Terminal output formatting for the advent CLI.
//!
//! Provides Cargo-style status output with right-aligned coloured verbs.
//! All status output goes to stderr; stdout is reserved for describe output.

use std::io::{self, IsTerminal, Write};
use std::path::Path;

use crate::error::AdventError;
use crate::loader::{EntityKind, Loaded};

/// ANSI escape codes.
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";

/// Width for right-aligned verb column.
const VERB_WIDTH: usize = 12;

/// Terminal-aware status printer.
///
/// Colour is enabled when stderr is a terminal.
pub struct Printer {
    color: bool,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

impl Printer {
    pub fn new() -> Self {
        Self {
            color: io::stderr().is_terminal(),
        }
    }

    /// A printer that never emits escape codes.
    pub fn plain() -> Self {
        Self { color: false }
    }

    /// Print a status line with a green bold verb.
    /// e.g. "      Loaded map Overworld data/map0.txt"
    pub fn status(&self, verb: &str, message: &str) {
        self.print_line(GREEN, verb, message);
    }

    /// Print a success/completion line with a green bold verb.
    pub fn success(&self, verb: &str, message: &str) {
        self.print_line(GREEN, verb, message);
    }

    /// Print a warning line with a yellow bold verb.
    pub fn warning(&self, verb: &str, message: &str) {
        self.print_line(YELLOW, verb, message);
    }

    /// Print an error line with a red bold verb.
    pub fn error(&self, verb: &str, message: &str) {
        self.print_line(RED, verb, message);
    }

    /// Report a loaded definition.
    /// e.g. "      Loaded map Overworld data/map0.txt"
    pub fn loaded(&self, loaded: &Loaded, path: &Path) {
        self.status("Loaded", &self.loaded_message(loaded.kind(), loaded.name(), path));
    }

    /// Report a failed load, followed by the references it went through and
    /// the innermost error.
    pub fn failed(&self, err: &AdventError) {
        self.error("Failed", &err.to_string());
        for line in self.failure_trail(err) {
            self.error("", &line);
        }
    }

    fn loaded_message(&self, kind: EntityKind, name: &str, path: &Path) -> String {
        let name = if name.is_empty() { "(unnamed)" } else { name };
        format!("{} {} {}", kind, name, self.dim(&display_path(path)))
    }

    fn failure_trail(&self, err: &AdventError) -> Vec<String> {
        let mut lines = Vec::new();
        let mut current = err;
        while let AdventError::Reference { source, .. } = current {
            current = source.as_ref();
            let line = match current {
                AdventError::Reference { key, target, .. } => {
                    format!("via {}={}", key, display_path(target))
                }
                cause => format!("caused by: {}", cause),
            };
            lines.push(self.dim(&line));
        }
        lines
    }

    /// Format a string as dim/grey.
    pub fn dim(&self, text: &str) -> String {
        if self.color {
            format!("{DIM}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn print_line(&self, color: &str, verb: &str, message: &str) {
        let mut stderr = io::stderr().lock();
        if self.color {
            let _ = writeln!(stderr, "{BOLD}{color}{verb:>VERB_WIDTH$}{RESET} {message}");
        } else {
            let _ = writeln!(stderr, "{verb:>VERB_WIDTH$} {message}");
        }
    }
}

/// Pluralize a count: `plural(1, "file", "files")` → "1 file".
pub fn plural(n: usize, singular: &str, pluralized: &str) -> String {
    if n == 1 {
        format!("{} {}", n, singular)
    } else {
        format!("{} {}", n, pluralized)
    }
}

/// Return a relative display path when possible, absolute otherwise.
pub fn display_path(path: &Path) -> String {
    if let Ok(cwd) = std::env::current_dir() {
        if let Ok(relative) = path.strip_prefix(&cwd) {
            let s = relative.display().to_string();
            if s.is_empty() {
                return ".".to_string();
            }
            return s;
        }
    }
    path.display().to_string()
}
