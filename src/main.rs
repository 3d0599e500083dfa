use clap::Parser;

use wort::api::ApiRepository;
use wort::args::Args;
use wort::commands::Context;
use wort::config::Config;
use wort::diagnostics;
use wort::error::{Flow, Result};
use wort::git::GitRepository;
use wort::installer::ProcessInstaller;
use wort::issues::GitHubIssues;
use wort::output;
use wort::registry;

#[derive(Parser)]
#[command(name = "wort")]
#[command(author, version, about = "A small Homebrew-style package manager front end", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Command and its arguments
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    tokens: Vec<String>,
}

fn main() {
    // Initialize logging
    if std::env::var("RUST_LOG").is_err() {
        unsafe {
            std::env::set_var("RUST_LOG", "warn");
        }
    }
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();
    output::init_colors();

    let cli = Cli::parse();
    // `--verbose` counts wherever it lands, including after the verb
    let verbose = cli.verbose
        || cli
            .tokens
            .iter()
            .any(|token| token == "--verbose" || token == "-v");

    let config = Config::from_env(verbose);
    let vcs = GitRepository::new(config.repository.clone());
    let issues = GitHubIssues::new();

    let outcome = dispatch(&config, &vcs, &issues, &cli.tokens);
    std::process::exit(diagnostics::conclude(outcome, &config, &vcs, &issues));
}

/// Assemble the production collaborators and route one invocation. An empty
/// command line is a request for help, not a mistake.
fn dispatch(
    config: &Config,
    vcs: &GitRepository,
    issues: &GitHubIssues,
    tokens: &[String],
) -> Result<Flow> {
    let Some((verb, rest)) = tokens.split_first() else {
        print!("{}", registry::usage_text());
        return Ok(Flow::Done);
    };

    let repo = ApiRepository::new(config)?;
    let installer = ProcessInstaller::new(config);
    let ctx = Context {
        config,
        repo: &repo,
        vcs,
        issues,
        installer: &installer,
    };

    registry::dispatch(&ctx, verb, &Args::split(rest))
}
