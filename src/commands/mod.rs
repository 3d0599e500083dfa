//! Command implementations for the wort CLI, one module per verb (or small
//! verb family). Every handler has the same shape:
//!
//! ```text
//! fn run(ctx: &Context, args: &Args) -> Result<Flow>
//! ```
//!
//! Handlers return [`Flow::Done`] on success. When a verb hands the terminal
//! to a subprocess (an editor, a pager, `git log`), it returns
//! [`Flow::Exit`] carrying that process's status so it reaches the shell
//! verbatim. Everything else is an error for the classifier.
//!
//! [`Flow::Done`]: crate::error::Flow::Done
//! [`Flow::Exit`]: crate::error::Flow::Exit

pub mod cat;
pub mod cleanup;
pub mod configure;
pub mod create;
pub mod deps;
pub mod edit;
pub mod help;
pub mod home;
pub mod info;
pub mod install;
pub mod link;
pub mod list;
pub mod log;
pub mod outdated;
pub mod paths;
pub mod prune;
pub mod search;
pub mod uninstall;
pub mod unlink;
pub mod update_cmd;
pub mod uses;

use crate::config::Config;
use crate::formula::FormulaRepository;
use crate::installer::Installer;
use crate::issues::IssueLookup;
use crate::update::VersionControl;

/// Everything a handler may touch, borrowed for the length of one dispatch.
///
/// Handlers talk to the outside world only through these trait objects, so
/// tests can run any verb against in-memory stand-ins.
pub struct Context<'a> {
    pub config: &'a Config,
    pub repo: &'a dyn FormulaRepository,
    pub vcs: &'a dyn VersionControl,
    pub issues: &'a dyn IssueLookup,
    pub installer: &'a dyn Installer,
}
