//! `uses`: which formulae name this one as a direct dependency.
//!
//! Deliberately one level deep, the inverse of a single edge rather than of
//! the whole closure `deps` computes.

use crate::args::Args;
use crate::commands::Context;
use crate::error::{Flow, Result};
use crate::output;
use crate::resolver;

pub fn run(ctx: &Context, args: &Args) -> Result<Flow> {
    let spinner = output::spinner("Scanning dependents...");
    let mut report = Vec::new();
    for name in &args.named {
        report.push((name, resolver::direct_dependents(ctx.repo, name)?));
    }
    spinner.finish_and_clear();

    let labeled = report.len() > 1;
    for (name, dependents) in &report {
        print!("{}", render(name, dependents, labeled));
    }

    Ok(Flow::Done)
}

/// One report line. Multi-formula queries label each line so the lists stay
/// attributable to the name that was asked about.
fn render(name: &str, dependents: &[String], labeled: bool) -> String {
    if dependents.is_empty() {
        format!("{name} is not used by any formula\n")
    } else if labeled {
        format!("{name}: {}\n", dependents.join(", "))
    } else {
        format!("{}\n", dependents.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_query_lines_stay_bare() {
        let dependents = vec!["curl".to_string(), "wget".to_string()];
        assert_eq!(render("openssl", &dependents, false), "curl, wget\n");
    }

    #[test]
    fn test_multi_query_lines_carry_the_queried_name() {
        let dependents = vec!["wget".to_string()];
        assert_eq!(render("openssl", &dependents, true), "openssl: wget\n");
        assert_eq!(render("idle", &[], true), "idle is not used by any formula\n");
    }
}
