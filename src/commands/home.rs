//! `home`: open homepages in the default browser.
//!
//! The browser hand-off is best-effort: a failed opener degrades to printing
//! the URL and the verb still exits 0. Unlike `edit` and `log`, whose
//! subprocess is the command itself, the opener's status is deliberately not
//! forwarded.

use colored::Colorize;

use crate::args::Args;
use crate::commands::Context;
use crate::error::{Flow, Result};

/// Where `home` without arguments lands: the upstream project page for the
/// formula ecosystem this tool fronts.
const PROJECT_HOMEPAGE: &str = "https://brew.sh";

pub fn run(ctx: &Context, args: &Args) -> Result<Flow> {
    if args.is_empty() {
        open_url(PROJECT_HOMEPAGE);
        return Ok(Flow::Done);
    }

    for name in &args.named {
        let formula = ctx.repo.resolve(name)?;
        match formula.homepage.as_deref() {
            Some(url) if !url.is_empty() => {
                println!("Opening homepage for {}...", name.cyan());
                open_url(url);
            }
            _ => println!("{} No homepage available for {}", "⚠".yellow(), name.bold()),
        }
    }

    Ok(Flow::Done)
}

/// Hand the URL to the platform opener and wait. When that fails for any
/// reason, print the URL so the user still gets somewhere.
fn open_url(url: &str) {
    let opener = if cfg!(target_os = "macos") {
        "open"
    } else {
        "xdg-open"
    };

    match std::process::Command::new(opener).arg(url).status() {
        Ok(status) if status.success() => {}
        _ => {
            println!("{} Could not open browser automatically", "⚠".yellow());
            println!("Please visit: {}", url.cyan());
        }
    }
}
