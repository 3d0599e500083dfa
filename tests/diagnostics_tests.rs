// Exit-code contract of the failure classifier.

use tempfile::TempDir;

use wort::config::Config;
use wort::diagnostics;
use wort::error::{ArgKind, BuildFailure, ExitDetail, Flow, WortError};
use wort::issues::IssueLookup;
use wort::update::{Revision, VersionControl};

struct StubVcs;

impl VersionControl for StubVcs {
    fn available(&self) -> bool {
        true
    }

    fn current_revision(&self) -> wort::Result<Revision> {
        Ok(Revision("0123456789abcdef0123456789abcdef01234567".to_string()))
    }

    fn fetch_and_merge(&self) -> wort::Result<bool> {
        Ok(false)
    }

    fn changed_files(&self, _old: &Revision, _new: &Revision) -> wort::Result<Vec<String>> {
        Ok(vec![])
    }
}

struct CannedIssues {
    urls: Vec<String>,
}

impl IssueLookup for CannedIssues {
    fn search(&self, _formula: &str) -> wort::Result<Vec<String>> {
        Ok(self.urls.clone())
    }
}

struct BrokenIssues;

impl IssueLookup for BrokenIssues {
    fn search(&self, _formula: &str) -> wort::Result<Vec<String>> {
        Err(WortError::Execution("offline".to_string()))
    }
}

fn config() -> (TempDir, Config) {
    let temp = TempDir::new().unwrap();
    let config = Config::rooted(temp.path(), false);
    (temp, config)
}

#[test]
fn test_success_and_forwarded_statuses() {
    let (_temp, config) = config();
    assert_eq!(
        diagnostics::conclude(Ok(Flow::Done), &config, &StubVcs, &CannedIssues { urls: vec![] }),
        0
    );
    // A subprocess's status passes through untouched, whatever it is
    for code in [0, 1, 2, 7, 77, 130] {
        assert_eq!(
            diagnostics::conclude(
                Ok(Flow::Exit(code)),
                &config,
                &StubVcs,
                &CannedIssues { urls: vec![] }
            ),
            code
        );
    }
}

#[test]
fn test_interrupt_exits_130() {
    let (_temp, config) = config();
    assert_eq!(
        diagnostics::conclude(
            Err(WortError::Interrupted),
            &config,
            &StubVcs,
            &CannedIssues { urls: vec![] }
        ),
        130
    );
}

#[test]
fn test_classified_failures_exit_1() {
    let (_temp, config) = config();
    let failures = [
        WortError::Usage,
        WortError::MissingArgument(ArgKind::Formula),
        WortError::MissingArgument(ArgKind::Keg),
        WortError::UnknownFormula("ghost".to_string()),
        WortError::Execution("something went sideways".to_string()),
    ];
    for failure in failures {
        assert_eq!(
            diagnostics::conclude(
                Err(failure),
                &config,
                &StubVcs,
                &CannedIssues { urls: vec![] }
            ),
            1
        );
    }
}

#[test]
fn test_build_failure_reports_and_exits_1() {
    let (_temp, config) = config();
    let failure = WortError::Build(BuildFailure {
        formula: "wget".to_string(),
        status: ExitDetail::Code(2),
        trace: vec!["Formula/wget.rb:13: in `install'".to_string()],
    });
    let issues = CannedIssues {
        urls: vec!["https://github.com/Homebrew/homebrew-core/issues/1".to_string()],
    };
    assert_eq!(
        diagnostics::conclude(Err(failure), &config, &StubVcs, &issues),
        1
    );
}

#[test]
fn test_build_failure_survives_a_broken_issue_lookup() {
    let (_temp, config) = config();
    let failure = WortError::Build(BuildFailure {
        formula: "wget".to_string(),
        status: ExitDetail::Signal(11),
        trace: vec![],
    });
    assert_eq!(
        diagnostics::conclude(Err(failure), &config, &StubVcs, &BrokenIssues),
        1
    );
}

#[test]
fn test_snapshot_is_the_fixed_block() {
    let (_temp, config) = config();
    let block = diagnostics::snapshot(&config, &StubVcs);

    assert!(block.contains("wort version:"));
    assert!(block.contains("Upstream revision: 01234567"));
    assert!(block.contains(&format!("Prefix: {}", config.prefix.display())));
    assert!(block.contains(&format!("Cellar: {}", config.cellar.display())));
    assert!(block.contains("OS: "));
    assert!(block.contains("-core "));
    // Toolchain probes always appear, present or not
    assert!(block.contains("clang: "));
    assert!(block.contains("gcc: "));
    assert!(block.contains("cc: "));
}

#[test]
fn test_snapshot_without_a_checkout_says_none() {
    struct NoRepo;
    impl VersionControl for NoRepo {
        fn available(&self) -> bool {
            false
        }
        fn current_revision(&self) -> wort::Result<Revision> {
            Err(WortError::Execution("no checkout".to_string()))
        }
        fn fetch_and_merge(&self) -> wort::Result<bool> {
            Err(WortError::Execution("no checkout".to_string()))
        }
        fn changed_files(&self, _old: &Revision, _new: &Revision) -> wort::Result<Vec<String>> {
            Err(WortError::Execution("no checkout".to_string()))
        }
    }

    let (_temp, config) = config();
    let block = diagnostics::snapshot(&config, &NoRepo);
    assert!(block.contains("Upstream revision: (none)"));
}
