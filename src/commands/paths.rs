//! Path-reporting verbs: `--cache`, `--prefix`, `--repository`, `--cellar`,
//! and the `--config` system snapshot.
//!
//! These print exactly one thing and nothing else, so shell substitutions
//! like `$(wort --prefix)/bin` stay clean.

use crate::args::Args;
use crate::commands::Context;
use crate::diagnostics;
use crate::error::{Flow, Result};

pub fn cache(ctx: &Context, _args: &Args) -> Result<Flow> {
    println!("{}", ctx.config.cache.display());
    Ok(Flow::Done)
}

pub fn prefix(ctx: &Context, _args: &Args) -> Result<Flow> {
    println!("{}", ctx.config.prefix.display());
    Ok(Flow::Done)
}

pub fn repository(ctx: &Context, _args: &Args) -> Result<Flow> {
    println!("{}", ctx.config.repository.display());
    Ok(Flow::Done)
}

pub fn cellar(ctx: &Context, _args: &Args) -> Result<Flow> {
    println!("{}", ctx.config.cellar.display());
    Ok(Flow::Done)
}

/// The same snapshot block the build-failure report embeds, on demand.
pub fn config(ctx: &Context, _args: &Args) -> Result<Flow> {
    print!("{}", diagnostics::snapshot(ctx.config, ctx.vcs));
    Ok(Flow::Done)
}
