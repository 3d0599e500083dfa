// End-to-end update flow against real git repositories in a scratch
// directory. Every test bails out quietly when git is not on the PATH.

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

use wort::git::GitRepository;
use wort::update::{self, UpdateOutcome, VersionControl};

fn git(dir: &Path, args: &[&str]) {
    let status = Command::new("git")
        .arg("-C")
        .arg(dir)
        .args([
            "-c",
            "user.name=wort-tests",
            "-c",
            "user.email=wort-tests@localhost",
        ])
        .args(args)
        .status()
        .expect("failed to spawn git");
    assert!(status.success(), "git {args:?} failed in {dir:?}");
}

fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|out| out.status.success())
        .unwrap_or(false)
}

/// Upstream repo with one formula committed, and a clone of it.
fn upstream_and_clone(temp: &TempDir) -> (std::path::PathBuf, std::path::PathBuf) {
    let upstream = temp.path().join("upstream");
    let clone = temp.path().join("clone");
    std::fs::create_dir_all(upstream.join("Formula")).unwrap();

    git(&upstream, &["init", "--quiet"]);
    std::fs::write(upstream.join("Formula/wget.rb"), "class Wget\nend\n").unwrap();
    git(&upstream, &["add", "."]);
    git(&upstream, &["commit", "--quiet", "-m", "add wget"]);

    let status = Command::new("git")
        .args(["clone", "--quiet"])
        .arg(&upstream)
        .arg(&clone)
        .status()
        .expect("failed to spawn git clone");
    assert!(status.success());

    (upstream, clone)
}

#[test]
fn test_update_flow_against_a_real_checkout() {
    if !git_available() {
        return;
    }

    let temp = TempDir::new().unwrap();
    let (upstream, clone) = upstream_and_clone(&temp);
    let vcs = GitRepository::new(clone.clone());

    // Nothing new upstream yet
    assert_eq!(update::run(&vcs).unwrap(), UpdateOutcome::AlreadyUpToDate);

    // Upstream moves: one formula changed, one added, one unrelated file
    std::fs::write(upstream.join("Formula/wget.rb"), "class Wget\n  # v2\nend\n").unwrap();
    std::fs::write(upstream.join("Formula/zsh.rb"), "class Zsh\nend\n").unwrap();
    std::fs::write(upstream.join("README.md"), "docs\n").unwrap();
    git(&upstream, &["add", "."]);
    git(&upstream, &["commit", "--quiet", "-m", "update formulae"]);

    let before = vcs.current_revision().unwrap();
    match update::run(&vcs).unwrap() {
        UpdateOutcome::Updated(report) => {
            assert_eq!(report.old, before);
            assert_ne!(report.new, report.old);
            assert_eq!(report.changed, vec!["wget", "zsh"]);
        }
        other => panic!("expected Updated, got {other:?}"),
    }

    // And the pass after that is current again
    assert_eq!(update::run(&vcs).unwrap(), UpdateOutcome::AlreadyUpToDate);
}

#[test]
fn test_changed_files_lists_paths_between_revisions() {
    if !git_available() {
        return;
    }

    let temp = TempDir::new().unwrap();
    let (upstream, clone) = upstream_and_clone(&temp);
    let vcs = GitRepository::new(clone);

    let old = vcs.current_revision().unwrap();

    std::fs::write(upstream.join("Formula/jq.rb"), "class Jq\nend\n").unwrap();
    git(&upstream, &["add", "."]);
    git(&upstream, &["commit", "--quiet", "-m", "add jq"]);

    assert!(vcs.fetch_and_merge().unwrap());
    let new = vcs.current_revision().unwrap();
    assert_ne!(new, old);

    let files = vcs.changed_files(&old, &new).unwrap();
    assert_eq!(files, vec!["Formula/jq.rb"]);
}

#[test]
fn test_revision_is_a_full_hash() {
    if !git_available() {
        return;
    }

    let temp = TempDir::new().unwrap();
    let (_upstream, clone) = upstream_and_clone(&temp);
    let vcs = GitRepository::new(clone);

    let revision = vcs.current_revision().unwrap();
    assert_eq!(revision.0.len(), 40);
    assert!(revision.0.chars().all(|c| c.is_ascii_hexdigit()));
    assert_eq!(revision.short().len(), 8);
}
