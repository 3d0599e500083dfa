//! `uninstall`: unlink and delete the current keg of each named formula.

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

        let size = keg::tree_size(&current.path);
        keg::unlink(&ctx.config.prefix, &current)?;
        keg::remove(&current)?;
        println!(
            "Uninstalling {}... ({})",
            current.path.display(),
            keg::format_size(size)
        );
    }

    Ok(Flow::Done)
}
