//! `install`: resolve, close over dependencies, order, and drive the build
//! helper for whatever is missing.

use std::collections::HashMap;

use colored::Colorize;

use crate::args::Args;
use crate::commands::Context;
use crate::error::{Flow, Result};
use crate::formula::Formula;
use crate::output;
use crate::resolver;

pub fn run(ctx: &Context, args: &Args) -> Result<Flow> {
    // Every requested name must resolve before anything is touched
    let mut roots = Vec::new();
    for name in &args.named {
        roots.push(ctx.repo.resolve(name)?);
    }

    let pending: Vec<Formula> = roots
        .into_iter()
        .filter(|formula| {
            if ctx.installer.is_installed(&formula.name) {
                println!(
                    "{} {} {} is already installed",
                    "✓".green(),
                    formula.name.bold(),
                    formula.version().dimmed()
                );
                false
            } else {
                true
            }
        })
        .collect();

    if pending.is_empty() {
        return Ok(Flow::Done);
    }

    let spinner = output::spinner("Resolving dependencies...");
    let root_names: Vec<String> = pending.iter().map(|f| f.name.clone()).collect();
    let closure = resolver::closure(ctx.repo, &root_names, ctx.config.verbose)?;

    // A root that another root depends on is already in the batch
    let mut batch = pending;
    for dep in closure {
        if root_names.contains(&dep) || ctx.installer.is_installed(&dep) {
            continue;
        }
        batch.push(ctx.repo.resolve(&dep)?);
    }
    let order = resolver::install_order(&batch)?;
    spinner.finish_and_clear();

    if order.len() > root_names.len() {
        println!(
            "Installing {} formulae: {}",
            order.len(),
            order.join(", ").dimmed()
        );
    }

    let mut by_name: HashMap<String, Formula> = batch
        .into_iter()
        .map(|formula| (formula.name.clone(), formula))
        .collect();
    for name in &order {
        let Some(formula) = by_name.remove(name) else {
            continue;
        };
        println!(
            "{} Installing {} {}",
            "==>".blue().bold(),
            formula.name.bold(),
            formula.version().dimmed()
        );
        ctx.installer.install(&formula)?;
        println!("{} Installed {}", "✓".green(), formula.name.bold());
    }

    Ok(Flow::Done)
}
