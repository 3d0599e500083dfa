//! `deps`: everything that must be present for the named formulae to work.

use crate::args::Args;
use crate::commands::Context;
use crate::error::{Flow, Result};
use crate::output;
use crate::resolver;

pub fn run(ctx: &Context, args: &Args) -> Result<Flow> {
    let spinner = output::spinner("Resolving dependencies...");
    let closure = resolver::closure(ctx.repo, &args.named, ctx.config.verbose)?;
    spinner.finish_and_clear();

    if closure.is_empty() {
        println!("{} has no dependencies", args.named.join(" "));
    } else {
        println!("{}", closure.join(", "));
    }

    Ok(Flow::Done)
}
