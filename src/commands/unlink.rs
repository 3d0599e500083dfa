//! `unlink`: withdraw a keg's symlinks from the prefix, leaving the keg
//! itself in place.

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

        let unlinked = keg::unlink(&ctx.config.prefix, &current)?;
        println!(
            "{} Unlinked {} symlinks for {} {}",
            "✓".green(),
            unlinked.len(),
            current.name.bold(),
            current.version.dimmed()
        );
        if ctx.config.verbose {
            for path in unlinked {
                println!("  {}", path.display());
            }
        }
    }

    Ok(Flow::Done)
}
