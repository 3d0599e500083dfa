//! The command registry: one table naming every verb, its aliases, the
//! argument shape it insists on, and the handler that runs it.
//!
//! Dispatch is table-driven: canonicalize the verb, validate the argument
//! shape, run the handler. Adding a command means adding one row here and one
//! module under `commands/`.

use crate::args::Args;
use crate::commands::{self, Context};
use crate::error::{ArgKind, Flow, Result, WortError};

/// Argument shape validated before a handler runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Anything, including nothing.
    Any,
    /// At least one formula name.
    Formula,
    /// At least one installed keg name.
    Keg,
}

type Handler = fn(&Context, &Args) -> Result<Flow>;

pub struct Command {
    pub verb: &'static str,
    pub aliases: &'static [&'static str],
    pub arity: Arity,
    pub usage: &'static str,
    pub summary: &'static str,
    run: Handler,
}

/// Verbs people reach for out of git habit; they get a pointed hint instead
/// of a generic unknown-command report.
const GIT_VERBS: &[&str] = &["branch", "checkout", "pull", "push", "rebase", "reset"];

pub const COMMANDS: &[Command] = &[
    Command {
        verb: "--cache",
        aliases: &[],
        arity: Arity::Any,
        usage: "--cache",
        summary: "Print the cache directory",
        run: commands::paths::cache,
    },
    Command {
        verb: "--prefix",
        aliases: &[],
        arity: Arity::Any,
        usage: "--prefix",
        summary: "Print the installation prefix",
        run: commands::paths::prefix,
    },
    Command {
        verb: "--repository",
        aliases: &[],
        arity: Arity::Any,
        usage: "--repository",
        summary: "Print the formula repository checkout",
        run: commands::paths::repository,
    },
    Command {
        verb: "--cellar",
        aliases: &[],
        arity: Arity::Any,
        usage: "--cellar",
        summary: "Print the Cellar directory",
        run: commands::paths::cellar,
    },
    Command {
        verb: "--config",
        aliases: &[],
        arity: Arity::Any,
        usage: "--config",
        summary: "Show system configuration",
        run: commands::paths::config,
    },
    Command {
        verb: "help",
        aliases: &[],
        arity: Arity::Any,
        usage: "help",
        summary: "Print this help text",
        run: commands::help::run,
    },
    Command {
        verb: "install",
        aliases: &[],
        arity: Arity::Formula,
        usage: "install FORMULA...",
        summary: "Install a formula and its dependencies",
        run: commands::install::run,
    },
    Command {
        verb: "uninstall",
        aliases: &["remove", "rm"],
        arity: Arity::Keg,
        usage: "uninstall KEG...",
        summary: "Remove an installed keg",
        run: commands::uninstall::run,
    },
    Command {
        verb: "list",
        aliases: &["ls"],
        arity: Arity::Any,
        usage: "list [--unbrewed] [KEG...]",
        summary: "List installed formulae, or a keg's files",
        run: commands::list::run,
    },
    Command {
        verb: "search",
        aliases: &[],
        arity: Arity::Any,
        usage: "search [TEXT]",
        summary: "Search formula names",
        run: commands::search::run,
    },
    Command {
        verb: "info",
        aliases: &["abv"],
        arity: Arity::Any,
        usage: "info [FORMULA...]",
        summary: "Show formula information",
        run: commands::info::run,
    },
    Command {
        verb: "deps",
        aliases: &[],
        arity: Arity::Formula,
        usage: "deps FORMULA...",
        summary: "Show a formula's transitive dependencies",
        run: commands::deps::run,
    },
    Command {
        verb: "uses",
        aliases: &[],
        arity: Arity::Formula,
        usage: "uses FORMULA...",
        summary: "Show formulae that directly depend on a formula",
        run: commands::uses::run,
    },
    Command {
        verb: "update",
        aliases: &["up"],
        arity: Arity::Any,
        usage: "update",
        summary: "Fetch the newest formulae from upstream",
        run: commands::update_cmd::run,
    },
    Command {
        verb: "outdated",
        aliases: &[],
        arity: Arity::Any,
        usage: "outdated",
        summary: "List installed formulae with newer versions available",
        run: commands::outdated::run,
    },
    Command {
        verb: "link",
        aliases: &["ln"],
        arity: Arity::Keg,
        usage: "link KEG...",
        summary: "Symlink a keg into the prefix",
        run: commands::link::run,
    },
    Command {
        verb: "unlink",
        aliases: &[],
        arity: Arity::Keg,
        usage: "unlink KEG...",
        summary: "Remove a keg's symlinks from the prefix",
        run: commands::unlink::run,
    },
    Command {
        verb: "prune",
        aliases: &[],
        arity: Arity::Any,
        usage: "prune",
        summary: "Remove dead symlinks from the prefix",
        run: commands::prune::run,
    },
    Command {
        verb: "cleanup",
        aliases: &[],
        arity: Arity::Any,
        usage: "cleanup [FORMULA...]",
        summary: "Remove old versions of installed formulae",
        run: commands::cleanup::run,
    },
    Command {
        verb: "home",
        aliases: &["homepage"],
        arity: Arity::Any,
        usage: "home [FORMULA...]",
        summary: "Open the project or a formula's homepage",
        run: commands::home::run,
    },
    Command {
        verb: "edit",
        aliases: &[],
        arity: Arity::Any,
        usage: "edit [FORMULA...]",
        summary: "Open formula definitions in your editor",
        run: commands::edit::run,
    },
    Command {
        verb: "cat",
        aliases: &[],
        arity: Arity::Formula,
        usage: "cat FORMULA...",
        summary: "Print a formula's definition",
        run: commands::cat::run,
    },
    Command {
        verb: "log",
        aliases: &[],
        arity: Arity::Any,
        usage: "log [FORMULA]",
        summary: "Show the repository's history, or one formula's",
        run: commands::log::run,
    },
    Command {
        verb: "create",
        aliases: &[],
        arity: Arity::Any,
        usage: "create URL",
        summary: "Write a formula template for a source archive",
        run: commands::create::run,
    },
    Command {
        verb: "configure",
        aliases: &["diy"],
        arity: Arity::Any,
        usage: "configure",
        summary: "Print configure arguments for a DIY build",
        run: commands::configure::run,
    },
];

/// Canonicalize a verb or alias to its registry row.
pub fn find(verb: &str) -> Option<&'static Command> {
    COMMANDS
        .iter()
        .find(|command| command.verb == verb || command.aliases.contains(&verb))
}

/// Validate a command's argument shape against the split tokens.
fn check_arity(arity: Arity, args: &Args) -> Result<()> {
    match arity {
        Arity::Any => Ok(()),
        Arity::Formula if args.named.is_empty() => {
            Err(WortError::MissingArgument(ArgKind::Formula))
        }
        Arity::Keg if args.named.is_empty() => Err(WortError::MissingArgument(ArgKind::Keg)),
        _ => Ok(()),
    }
}

/// Route one parsed invocation: canonicalize, validate shape, run.
pub fn dispatch(ctx: &Context, verb: &str, args: &Args) -> Result<Flow> {
    let Some(command) = find(verb) else {
        return Err(unknown_verb(verb));
    };

    check_arity(command.arity, args)?;
    (command.run)(ctx, args)
}

fn unknown_verb(verb: &str) -> WortError {
    if GIT_VERBS.contains(&verb) {
        return WortError::Execution(format!(
            "Unknown command: {verb}\nDid you mean `git {verb}`?"
        ));
    }

    match closest_verb(verb) {
        Some(suggestion) => WortError::Execution(format!(
            "Unknown command: {verb}\nDid you mean `wort {suggestion}`?"
        )),
        None => WortError::Execution(format!("Unknown command: {verb}")),
    }
}

/// Closest known verb or alias, when it is close enough to be a plausible
/// typo rather than noise.
pub fn closest_verb(verb: &str) -> Option<&'static str> {
    COMMANDS
        .iter()
        .flat_map(|command| std::iter::once(command.verb).chain(command.aliases.iter().copied()))
        .map(|candidate| (candidate, strsim::jaro_winkler(verb, candidate)))
        .filter(|(_, score)| *score > 0.8)
        .max_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(candidate, _)| candidate)
}

/// Help text assembled from the table, so it can never drift from it.
pub fn usage_text() -> String {
    let mut out = String::new();
    out.push_str("Example usage:\n");
    out.push_str("  wort [-v|--verbose] COMMAND [FORMULA...]\n\n");
    out.push_str("Commands:\n");

    let width = COMMANDS
        .iter()
        .map(|command| command.usage.len())
        .max()
        .unwrap_or(0);
    for command in COMMANDS {
        out.push_str(&format!(
            "  {:width$}  {}\n",
            command.usage, command.summary
        ));
    }

    out.push_str("\nTroubleshooting:\n");
    out.push_str("  wort --config\n");
    out.push_str("  wort deps FORMULA\n");
    out
}
