//! `prune`: sweep dead cellar-pointing symlinks out of the prefix.

use colored::Colorize;

use crate::args::Args;
use crate::commands::Context;
use crate::error::{Flow, Result};
use crate::keg;

pub fn run(ctx: &Context, _args: &Args) -> Result<Flow> {
    let pruned = keg::prune(&ctx.config.prefix, &ctx.config.cellar)?;
    if pruned == 0 {
        println!("Nothing pruned");
    } else {
        println!("{} Pruned {} dead symlinks", "✓".green(), pruned);
    }
    Ok(Flow::Done)
}
