//! `cleanup`: delete kegs superseded by a newer installed version.

use colored::Colorize;

use crate::args::Args;
use crate::commands::Context;
use crate::error::{Flow, Result, WortError};
use crate::keg;

pub fn run(ctx: &Context, args: &Args) -> Result<Flow> {
    let dry_run = args.flag("--dry-run") || args.flag("-n");

    let names = if args.is_empty() {
        keg::installed_names(&ctx.config.cellar)?
    } else {
        args.named.clone()
    };

    let mut removed = 0usize;
    let mut freed = 0u64;

    for name in &names {
        let kegs = keg::installed_versions(&ctx.config.cellar, name)?;
        if kegs.is_empty() {
            if !args.is_empty() {
                return Err(WortError::Execution(format!(
                    "No such keg: {}/{}",
                    ctx.config.cellar.display(),
                    name
                )));
            }
            continue;
        }

        // Newest first; everything after it is a candidate
        for old in kegs.iter().skip(1) {
            if keg::is_linked(&ctx.config.prefix, old) {
                println!(
                    "{} Skipping {} {} (still linked)",
                    "⚠".yellow(),
                    old.name.bold(),
                    old.version
                );
                continue;
            }

            let size = keg::tree_size(&old.path);
            if dry_run {
                println!(
                    "Would remove: {} {} ({})",
                    old.name,
                    old.version,
                    keg::format_size(size)
                );
            } else {
                keg::remove(old)?;
                println!(
                    "Removing: {} {} ({})",
                    old.name,
                    old.version,
                    keg::format_size(size)
                );
            }
            removed += 1;
            freed += size;
        }
    }

    if removed == 0 {
        println!("Nothing to clean up");
    } else if dry_run {
        println!(
            "Would free {} across {} kegs",
            keg::format_size(freed),
            removed
        );
    } else {
        println!(
            "{} Freed {} across {} kegs",
            "✓".green(),
            keg::format_size(freed),
            removed
        );
    }

    Ok(Flow::Done)
}
