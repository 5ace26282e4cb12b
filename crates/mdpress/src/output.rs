//! Styled status lines on stderr.

use console::{Style, Term};

/// Writes user-facing build status to the terminal.
pub(crate) struct Output {
    term: Term,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
        }
    }

    /// Build finished (green).
    pub(crate) fn success(&self, msg: &str) {
        self.write_styled(&Style::new().green(), msg);
    }

    /// Fatal error (bold red).
    pub(crate) fn error(&self, msg: &str) {
        self.write_styled(&Style::new().red().bold(), msg);
    }

    fn write_styled(&self, style: &Style, msg: &str) {
        let _ = self.term.write_line(&style.apply_to(msg).to_string());
    }
}
