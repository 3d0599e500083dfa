//! `update`: pull the formula repository forward and say what changed.

use colored::Colorize;

use crate::args::Args;
use crate::cache;
use crate::commands::Context;
use crate::error::{Flow, Result};
use crate::output;
use crate::update::{self, UpdateOutcome};

pub fn run(ctx: &Context, _args: &Args) -> Result<Flow> {
    let spinner = output::spinner("Updating formulae...");
    let outcome = update::run(ctx.vcs);
    spinner.finish_and_clear();

    match outcome? {
        UpdateOutcome::AlreadyUpToDate => {
            println!("Already up-to-date.");
        }
        UpdateOutcome::Updated(report) => {
            // Stale listings would contradict the fresh checkout
            if let Err(err) = cache::clear(&ctx.config.cache) {
                tracing::debug!("cache clear failed: {err}");
            }

            println!(
                "Updated formulae from {} to {}.",
                report.old.short().yellow(),
                report.new.short().green()
            );
            if report.has_formula_changes() {
                println!("\nThe following formulae were updated:");
                print!("{}", output::format_columns(&report.changed));
            } else {
                println!("No formulae were updated.");
            }
        }
    }

    Ok(Flow::Done)
}
