//! Standard stream UI.

use console::Term;
use std::io::Write;

use super::{Theme, UserInterface};

/// Writes content and status lines to stdout, and problems to stderr.
///
/// Status lines are colored only when their stream is a terminal and
/// `NO_COLOR` is unset. Content is always written verbatim.
#[derive(Debug)]
pub struct TerminalUI {
    out: Term,
    err: Term,
    out_theme: Theme,
    err_theme: Theme,
}

impl Default for TerminalUI {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalUI {
    /// Create a new terminal UI.
    pub fn new() -> Self {
        let out = Term::stdout();
        let err = Term::stderr();

        Self {
            out_theme: Theme::for_term(&out),
            err_theme: Theme::for_term(&err),
            out,
            err,
        }
    }
}

impl UserInterface for TerminalUI {
    fn content(&mut self, body: &str) {
        if let Err(e) = self.out.write_all(body.as_bytes()).and_then(|_| self.out.flush()) {
            tracing::debug!("Failed to write content to stdout: {}", e);
        }
    }

    fn message(&mut self, msg: &str) {
        writeln!(self.out, "{}", msg).ok();
    }

    fn success(&mut self, msg: &str) {
        writeln!(self.out, "{}", self.out_theme.format_success(msg)).ok();
    }

    fn warning(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.err_theme.format_warning(msg)).ok();
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.err_theme.format_error(msg)).ok();
    }
}
