//! `outdated`: installed formulae the repository has moved past.

use colored::Colorize;

use crate::args::Args;
use crate::commands::Context;
use crate::error::{Flow, Result};
use crate::keg;
use crate::output;

pub fn run(ctx: &Context, _args: &Args) -> Result<Flow> {
    let spinner = output::spinner("Checking for outdated formulae...");

    let mut outdated = Vec::new();
    for name in keg::installed_names(&ctx.config.cellar)? {
        let Some(newest) = keg::installed_versions(&ctx.config.cellar, &name)?.into_iter().next()
        else {
            continue;
        };
        // Formulae the repository no longer carries cannot be outdated
        let Ok(formula) = ctx.repo.resolve(&name) else {
            continue;
        };
        let current = formula.version().to_string();
        if current != "HEAD" && current != newest.version {
            outdated.push((name, newest.version, current));
        }
    }
    spinner.finish_and_clear();

    if output::stdout_is_tty() {
        if outdated.is_empty() {
            println!("{} All formulae are up to date", "✓".green());
            return Ok(Flow::Done);
        }
        for (name, installed, current) in outdated {
            println!(
                "{} {} {}",
                name.bold(),
                format!("({installed})").dimmed(),
                format!("< {current}").cyan()
            );
        }
    } else {
        // Piped consumers want bare names
        for (name, _, _) in outdated {
            println!("{name}");
        }
    }

    Ok(Flow::Done)
}
