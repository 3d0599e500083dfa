use std::io::Write;

use crate::args::Args;
use crate::commands::Context;
use crate::error::{Flow, Result, WortError};

/// Print each named formula's definition file verbatim.
pub fn run(ctx: &Context, args: &Args) -> Result<Flow> {
    let mut stdout = std::io::stdout().lock();
    for name in &args.named {
        let path = ctx
            .config
            .existing_formula_path(name)
            .ok_or_else(|| WortError::UnknownFormula(name.clone()))?;
        let contents = std::fs::read(&path)?;
        stdout.write_all(&contents)?;
    }
    Ok(Flow::Done)
}
