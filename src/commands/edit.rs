//! `edit`: hand the named formula files (or the whole checkout) to the
//! user's editor and forward its exit status.

use std::path::PathBuf;
use std::process::Command;

use crate::args::Args;
use crate::commands::Context;
use crate::error::{Flow, Result, WortError};

pub fn run(ctx: &Context, args: &Args) -> Result<Flow> {
    let targets: Vec<PathBuf> = if args.is_empty() {
        vec![ctx.config.repository.clone()]
    } else {
        args.named
            .iter()
            .map(|name| {
                ctx.config
                    .existing_formula_path(name)
                    .ok_or_else(|| WortError::UnknownFormula(name.clone()))
            })
            .collect::<Result<_>>()?
    };

    let editor = editor();
    let status = Command::new(&editor)
        .args(&targets)
        .status()
        .map_err(|e| WortError::Execution(format!("Failed to run {editor}: {e}")))?;

    // The editor owned the terminal; its status is the command's status.
    Ok(Flow::Exit(status.code().unwrap_or(1)))
}

fn editor() -> String {
    std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| "vi".to_string())
}
