//! Terminal output support: color gating, column layout, spinners.
//!
//! Implements the NO_COLOR standard (https://no-color.org/) and traditional
//! CLICOLOR conventions for disabling terminal colors.
//!
//! **Environment Variables**:
//! - `NO_COLOR`: If set (to any value), disable colors
//! - `CLICOLOR`: If set to 0, disable colors
//! - `CLICOLOR_FORCE`: If set to non-zero, force colors even when not a TTY

use std::io::IsTerminal;
use std::time::Duration;

use colored::control;
use indicatif::{ProgressBar, ProgressStyle};

/// Initialize color support by checking environment variables and TTY status.
/// Call this early in main() to configure color output for the entire program.
pub fn init_colors() {
    // NO_COLOR takes precedence over everything (https://no-color.org/)
    if std::env::var("NO_COLOR").is_ok() {
        control::set_override(false);
        return;
    }

    // CLICOLOR_FORCE overrides both CLICOLOR and TTY detection
    if std::env::var("CLICOLOR_FORCE")
        .map(|v| v != "0")
        .unwrap_or(false)
    {
        control::set_override(true);
        return;
    }

    // CLICOLOR=0 disables colors
    if std::env::var("CLICOLOR").map(|v| v == "0").unwrap_or(false) {
        control::set_override(false);
        return;
    }

    // Default: use colors only if stdout is a TTY
    control::set_override(std::io::stdout().is_terminal());
}

pub fn stdout_is_tty() -> bool {
    std::io::stdout().is_terminal()
}

/// TTY-gated spinner for phases that talk to the network or walk large trees.
/// Hidden when piped, so quiet output stays machine-readable.
pub fn spinner(message: impl Into<String>) -> ProgressBar {
    if stdout_is_tty() {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap(),
        );
        pb.set_message(message.into());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    } else {
        ProgressBar::hidden()
    }
}

/// Lay items out ls-style: column-major, padded to the widest item, fitted to
/// the terminal width (80 when width is unknown). Returns the block with a
/// trailing newline; empty input yields an empty string.
pub fn format_columns(items: &[String]) -> String {
    if items.is_empty() {
        return String::new();
    }

    let width = term_size::dimensions().map(|(w, _)| w).unwrap_or(80);
    let longest = items.iter().map(|item| item.len()).max().unwrap_or(0);
    let col_width = longest + 2;
    let columns = (width / col_width).max(1);
    let rows = items.len().div_ceil(columns);

    let mut out = String::new();
    for row in 0..rows {
        let mut line = String::new();
        for col in 0..columns {
            if let Some(item) = items.get(col * rows + row) {
                line.push_str(item);
                // Pad unless this is the last cell on the line
                if (col + 1) * rows + row < items.len() {
                    for _ in item.len()..col_width {
                        line.push(' ');
                    }
                }
            }
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}
