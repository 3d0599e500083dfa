//! Failure classification and reporting.
//!
//! Every command outcome funnels through [`conclude`], the one place that
//! turns a result into a process exit code: 0 for success, 130 for an
//! interrupt, 1 for everything classified, and forwarded subprocess statuses
//! untouched. Build failures get the full bundle: source location scanned
//! from the captured trace, exit detail, environment snapshot, set build
//! flags, and a courtesy issue search.

use std::process::Command;

use colored::Colorize;

use crate::config::Config;
use crate::error::{BuildFailure, Flow, Result, WortError};
use crate::issues::IssueLookup;
use crate::registry;
use crate::update::VersionControl;

/// Environment variables worth echoing in a build-failure report. Only the
/// ones actually set are printed.
pub const BUILD_ENV_VARS: &[&str] = &[
    "CC",
    "CXX",
    "LD",
    "CFLAGS",
    "CXXFLAGS",
    "CPPFLAGS",
    "LDFLAGS",
    "MAKEFLAGS",
    "PKG_CONFIG_PATH",
    "MACOSX_DEPLOYMENT_TARGET",
];

const FORMULA_ISSUES_URL: &str = "https://github.com/Homebrew/homebrew-core/issues";

/// Map a finished command to its exit code, reporting any failure on the way.
pub fn conclude(
    outcome: Result<Flow>,
    config: &Config,
    vcs: &dyn VersionControl,
    issues: &dyn IssueLookup,
) -> i32 {
    match outcome {
        Ok(Flow::Done) => 0,
        // A forwarded subprocess status is already the answer
        Ok(Flow::Exit(code)) => code,
        Err(error) => report(&error, config, vcs, issues),
    }
}

fn report(
    error: &WortError,
    config: &Config,
    vcs: &dyn VersionControl,
    issues: &dyn IssueLookup,
) -> i32 {
    match error {
        WortError::Interrupted => {
            // Leave the line the ^C landed on
            eprintln!();
            130
        }
        WortError::Usage => {
            eprintln!("{} Invalid usage", "✗".red());
            eprintln!();
            eprintln!("{}", registry::usage_text());
            1
        }
        WortError::Build(failure) => {
            report_build_failure(failure, config, vcs, issues);
            1
        }
        WortError::Other(inner) => {
            eprintln!("{} {inner}", "✗".red());
            if config.verbose {
                for cause in inner.chain().skip(1) {
                    eprintln!("  caused by: {cause}");
                }
            }
            eprintln!("This is likely a bug. Copy the above output when reporting it.");
            1
        }
        other => {
            eprintln!("{} {other}", "✗".red());
            if config.verbose {
                let mut source = std::error::Error::source(other);
                while let Some(cause) = source {
                    eprintln!("  caused by: {cause}");
                    source = cause.source();
                }
            }
            1
        }
    }
}

fn report_build_failure(
    failure: &BuildFailure,
    config: &Config,
    vcs: &dyn VersionControl,
    issues: &dyn IssueLookup,
) {
    eprintln!("{} {} did not build", "✗".red(), failure.formula.bold());
    eprintln!("Exit status: {}", failure.status);

    if let Some((name, line)) = scan_location(&failure.trace) {
        eprintln!("Source: Formula/{name}.rb:{line}");
    }

    eprintln!();
    eprintln!("{}", "==> Environment".bold());
    eprint!("{}", snapshot(config, vcs));

    let flags = collect_build_flags(|name| std::env::var(name).ok());
    if !flags.is_empty() {
        eprintln!();
        eprintln!("{}", "==> Build flags".bold());
        for (name, value) in flags {
            eprintln!("{name}: {value}");
        }
    }

    // Courtesy only: a failed search must not get in the way of the report
    match issues.search(&failure.formula) {
        Ok(urls) if !urls.is_empty() => {
            eprintln!();
            eprintln!("These open issues may also help:");
            for url in urls {
                eprintln!("  {url}");
            }
        }
        Ok(_) => {}
        Err(e) => tracing::debug!("issue lookup failed: {e}"),
    }

    eprintln!();
    eprintln!("If reporting this issue please do so at:");
    eprintln!("  {FORMULA_ISSUES_URL}");
}

/// First `Formula/<name>.rb:<line>` reference in the trace. Sharded paths
/// (`Formula/w/wget.rb`) reduce to the formula name.
fn scan_location(trace: &[String]) -> Option<(String, u32)> {
    trace.iter().find_map(|line| parse_location(line))
}

fn parse_location(line: &str) -> Option<(String, u32)> {
    let start = line.find("Formula/")?;
    let rest = &line[start + "Formula/".len()..];
    let rb = rest.find(".rb:")?;

    let name = rest[..rb].rsplit('/').next().unwrap_or("");
    if name.is_empty() {
        return None;
    }

    let digits: String = rest[rb + ".rb:".len()..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    let line_no: u32 = digits.parse().ok()?;
    Some((name.to_string(), line_no))
}

/// The fixed-format environment block shared by `--config` and the
/// build-failure report.
pub fn snapshot(config: &Config, vcs: &dyn VersionControl) -> String {
    let mut out = String::new();
    out.push_str(&format!("wort version: {}\n", env!("CARGO_PKG_VERSION")));

    let revision = vcs
        .current_revision()
        .map(|rev| rev.short().to_string())
        .unwrap_or_else(|_| "(none)".to_string());
    out.push_str(&format!("Upstream revision: {revision}\n"));

    out.push_str(&format!("Prefix: {}\n", config.prefix.display()));
    out.push_str(&format!("Cellar: {}\n", config.cellar.display()));
    out.push_str(&format!("Repository: {}\n", config.repository.display()));
    out.push_str(&format!("Cache: {}\n", config.cache.display()));
    out.push_str(&format!("OS: {}\n", os_version()));
    out.push_str(&format!(
        "Hardware: {}-core {}\n",
        core_count(),
        word_size()
    ));

    for tool in ["clang", "gcc", "cc"] {
        out.push_str(&format!("{tool}: {}\n", tool_version(tool)));
    }

    out
}

fn word_size() -> &'static str {
    #[cfg(target_pointer_width = "64")]
    {
        "64-bit"
    }
    #[cfg(target_pointer_width = "32")]
    {
        "32-bit"
    }
}

fn core_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// First line of `<tool> --version`, or "N/A" when the tool is missing.
fn tool_version(tool: &str) -> String {
    Command::new(tool)
        .arg("--version")
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| {
            String::from_utf8_lossy(&output.stdout)
                .lines()
                .next()
                .map(str::to_string)
        })
        .unwrap_or_else(|| "N/A".to_string())
}

#[cfg(target_os = "macos")]
fn os_version() -> String {
    Command::new("sw_vers")
        .arg("-productVersion")
        .output()
        .ok()
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|version| format!("macOS {}", version.trim()))
        .unwrap_or_else(|| "macOS".to_string())
}

#[cfg(target_os = "linux")]
fn os_version() -> String {
    std::fs::read_to_string("/etc/os-release")
        .ok()
        .and_then(|content| {
            content.lines().find_map(|line| {
                line.strip_prefix("PRETTY_NAME=")
                    .map(|value| value.trim_matches('"').to_string())
            })
        })
        .unwrap_or_else(|| "Linux".to_string())
}

#[cfg(not(any(target_os = "macos", target_os = "linux")))]
fn os_version() -> String {
    std::env::consts::OS.to_string()
}

fn collect_build_flags(
    lookup: impl Fn(&str) -> Option<String>,
) -> Vec<(&'static str, String)> {
    BUILD_ENV_VARS
        .iter()
        .filter_map(|name| lookup(name).map(|value| (*name, value)))
        .collect()
}
