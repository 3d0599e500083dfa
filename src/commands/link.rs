//! `link`: fan a keg's linkable directories out into the prefix.

use colored::Colorize;

use crate::args::Args;
use crate::commands::Context;
use crate::error::{Flow, Result, WortError};
use crate::keg;

pub fn run(ctx: &Context, args: &Args) -> Result<Flow> {
    for name in &args.named {
        let kegs = keg::installed_versions(&ctx.config.cellar, name)?;
        let Some(current) = kegs.into_iter().next() else {
            return Err(WortError::Execution(format!(
                "No such keg: {}/{}",
                ctx.config.cellar.display(),
                name
            )));
        };

        let linked = keg::link(&ctx.config.prefix, &ctx.config.cellar, &current)?;
        println!(
            "{} Linked {} symlinks for {} {}",
            "✓".green(),
            linked.len(),
            current.name.bold(),
            current.version.dimmed()
        );
        if ctx.config.verbose {
            for path in linked {
                println!("  {}", path.display());
            }
        }
    }

    Ok(Flow::Done)
}
