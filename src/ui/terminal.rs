//! Terminal UI.

use console::Term;
use std::io::Write;

use super::{should_use_colors, GooseTheme, OutputMode, UserInterface};

/// Terminal UI writing status to stdout and problems to stderr.
pub struct TerminalUI {
    out: Term,
    err: Term,
    theme: GooseTheme,
    mode: OutputMode,
}

impl TerminalUI {
    /// Create a new terminal UI.
    ///
    /// `color` is `false` for `--no-color`; colors are also off when
    /// `NO_COLOR` is set or stdout is not a terminal.
    pub fn new(mode: OutputMode, color: bool) -> Self {
        let theme = if color && should_use_colors() {
            GooseTheme::new()
        } else {
            GooseTheme::plain()
        };

        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            theme,
            mode,
        }
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.out, "{}", msg).ok();
        }
    }

    fn detail(&mut self, msg: &str) {
        if self.mode.shows_details() {
            writeln!(self.out, "{}", self.theme.format_detail(msg)).ok();
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.out, "{}", self.theme.format_success(msg)).ok();
        }
    }

    fn skipped(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.out, "{}", self.theme.format_skipped(msg)).ok();
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.err, "{}", self.theme.format_warning(msg)).ok();
        }
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.theme.format_error(msg)).ok();
    }
}

/// Create the UI used by the binary.
pub fn create_ui(mode: OutputMode, color: bool) -> Box<dyn UserInterface> {
    Box::new(TerminalUI::new(mode, color))
}
