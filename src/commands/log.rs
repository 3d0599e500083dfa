//! `log`: `git log` over the checkout, optionally scoped to one formula's
//! definition file.

use std::process::Command;

use crate::args::Args;
use crate::commands::Context;
use crate::error::{Flow, Result, WortError};

pub fn run(ctx: &Context, args: &Args) -> Result<Flow> {
    let mut command = Command::new("git");
    command
        .arg("-C")
        .arg(&ctx.config.repository)
        .arg("log")
        .args(&args.flags);

    if let Some(name) = args.first() {
        let path = ctx
            .config
            .existing_formula_path(name)
            .ok_or_else(|| WortError::UnknownFormula(name.to_string()))?;
        command.arg("--follow").arg("--").arg(path);
    }

    let status = command
        .status()
        .map_err(|e| WortError::Execution(format!("Failed to run git: {e}")))?;

    // git may have paged to the terminal; pass its verdict through untouched.
    Ok(Flow::Exit(status.code().unwrap_or(1)))
}
