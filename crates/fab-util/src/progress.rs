//! Cargo-style status lines on stderr.

use console::{Style, Term};

/// Labels are right-aligned to this width.
const LABEL_WIDTH: usize = 12;

fn print_status(style: Style, label: &str, message: &str) {
    let line = format!(
        "{:>width$} {message}",
        style.apply_to(label),
        width = LABEL_WIDTH
    );
    let _ = Term::stderr().write_line(&line);
}

/// Print an action line with a bold green label, e.g. `    Resolved 3 import clause(s)`.
pub fn status(label: &str, message: &str) {
    print_status(Style::new().green().bold(), label, message);
}

/// Print a warning line with a bold yellow label.
pub fn status_warn(label: &str, message: &str) {
    print_status(Style::new().yellow().bold(), label, message);
}
