//! `search`: substring match over the formula universe, with a nearest-name
//! fallback when nothing matches.

use colored::Colorize;

use crate::args::Args;
use crate::commands::Context;
use crate::error::{Flow, Result};
use crate::output;

pub fn run(ctx: &Context, args: &Args) -> Result<Flow> {
    let spinner = output::spinner("Searching formulae...");
    let names = ctx.repo.all_names()?;
    spinner.finish_and_clear();

    let Some(query) = args.first() else {
        print!("{}", output::format_columns(&names));
        return Ok(Flow::Done);
    };

    let needle = query.to_lowercase();
    let matches: Vec<String> = names
        .iter()
        .filter(|name| name.to_lowercase().contains(&needle))
        .cloned()
        .collect();

    if !matches.is_empty() {
        print!("{}", output::format_columns(&matches));
        return Ok(Flow::Done);
    }

    println!(
        "{} No formulae found matching '{}'",
        "✗".red(),
        query.cyan()
    );
    let nearby = closest_names(query, &names);
    if !nearby.is_empty() {
        println!("\nDid you mean:");
        for name in nearby {
            println!("  {name}");
        }
    }

    Ok(Flow::Done)
}

/// Up to three names close enough to the query to be plausible typos,
/// best first.
fn closest_names(query: &str, names: &[String]) -> Vec<String> {
    let mut scored: Vec<(&String, f64)> = names
        .iter()
        .map(|name| (name, strsim::jaro_winkler(query, name)))
        .filter(|(_, score)| *score > 0.7)
        .collect();
    scored.sort_by(|(_, a), (_, b)| b.total_cmp(a));
    scored.into_iter().take(3).map(|(name, _)| name.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_suggestions_rank_the_closest_first() {
        let universe = names(&["wget", "widget", "curl", "ripgrep"]);
        let nearby = closest_names("wgte", &universe);
        assert_eq!(nearby.first().map(String::as_str), Some("wget"));
        assert!(nearby.len() <= 3);
    }

    #[test]
    fn test_nothing_close_means_no_suggestions() {
        let universe = names(&["zlib", "openssl"]);
        assert!(closest_names("qqqqqqqq", &universe).is_empty());
    }
}
