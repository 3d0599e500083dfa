use crate::args::Args;
use crate::commands::Context;
use crate::error::{Flow, Result};
use crate::registry;

pub fn run(_ctx: &Context, _args: &Args) -> Result<Flow> {
    print!("{}", registry::usage_text());
    Ok(Flow::Done)
}
