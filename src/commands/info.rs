//! `info`: a per-formula detail block, or a cellar summary with no arguments.

use colored::Colorize;

use crate::args::Args;
use crate::commands::Context;
use crate::error::{Flow, Result};
use crate::keg;

pub fn run(ctx: &Context, args: &Args) -> Result<Flow> {
    if args.is_empty() {
        return summary(ctx);
    }

    for (i, name) in args.named.iter().enumerate() {
        if i > 0 {
            println!();
        }
        formula_block(ctx, name)?;
    }

    Ok(Flow::Done)
}

/// One formula: upstream metadata first, installed state after.
fn formula_block(ctx: &Context, name: &str) -> Result<()> {
    let formula = ctx.repo.resolve(name)?;

    println!(
        "{}",
        format!("==> {}: {}", formula.name, formula.version())
            .bold()
            .green()
    );
    if let Some(desc) = &formula.desc {
        println!("{desc}");
    }
    if let Some(homepage) = &formula.homepage {
        println!("{}: {}", "Homepage".bold(), homepage);
    }
    if !formula.dependencies.is_empty() {
        println!(
            "{}: {}",
            "Dependencies".bold(),
            formula.dependencies.join(", ")
        );
    }

    let kegs = keg::installed_versions(&ctx.config.cellar, name)?;
    if kegs.is_empty() {
        println!("Not installed");
    } else {
        println!("{}:", "Installed".bold());
        for keg in &kegs {
            let size = keg::format_size(keg::tree_size(&keg.path));
            println!("  {} ({})", keg.version, size.dimmed());
        }
    }

    Ok(())
}

/// The no-argument form: how much is in the cellar and how big it is.
fn summary(ctx: &Context) -> Result<Flow> {
    let names = keg::installed_names(&ctx.config.cellar)?;
    let mut keg_count = 0;
    let mut total = 0u64;
    for name in &names {
        for keg in keg::installed_versions(&ctx.config.cellar, name)? {
            keg_count += 1;
            total += keg::tree_size(&keg.path);
        }
    }

    println!(
        "{} kegs, {} formulae, {}",
        keg_count,
        names.len(),
        keg::format_size(total)
    );
    Ok(Flow::Done)
}
