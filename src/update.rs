//! Self-update orchestration over the formula repository checkout.
//!
//! The flow is fixed: record the current revision, fetch and merge upstream,
//! diff the two revisions, and report which formula definitions changed.
//! Everything version-control-shaped goes through [`VersionControl`] so the
//! flow can be driven without a real checkout.

use std::fmt;

use crate::error::{Result, WortError};

/// Opaque pointer to one upstream state. Equal revisions mean equal trees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Revision(pub String);

impl Revision {
    /// Truncated form used in summaries.
    pub fn short(&self) -> &str {
        let end = self
            .0
            .char_indices()
            .nth(8)
            .map(|(i, _)| i)
            .unwrap_or(self.0.len());
        &self.0[..end]
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What one update pass did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    AlreadyUpToDate,
    Updated(UpdateReport),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateReport {
    pub old: Revision,
    pub new: Revision,
    /// Formula names whose definitions changed between the revisions, sorted.
    pub changed: Vec<String>,
}

impl UpdateReport {
    pub fn has_formula_changes(&self) -> bool {
        !self.changed.is_empty()
    }
}

/// The version-control operations the orchestrator needs from the checkout.
pub trait VersionControl {
    /// Whether the underlying tool exists on this host at all.
    fn available(&self) -> bool;

    fn current_revision(&self) -> Result<Revision>;

    /// Fetch upstream and merge it in. `false` means nothing new arrived.
    fn fetch_and_merge(&self) -> Result<bool>;

    /// Paths (repository-relative) that differ between two revisions.
    fn changed_files(&self, old: &Revision, new: &Revision) -> Result<Vec<String>>;
}

/// Drive one update pass. Fails fast when the version-control tool is
/// missing; treats an unchanged revision after the merge as already current.
pub fn run(vcs: &dyn VersionControl) -> Result<UpdateOutcome> {
    if !vcs.available() {
        return Err(WortError::Execution(
            "git is required to update; install git and try again".to_string(),
        ));
    }

    let old = vcs.current_revision()?;
    tracing::debug!("updating from revision {old}");

    if !vcs.fetch_and_merge()? {
        return Ok(UpdateOutcome::AlreadyUpToDate);
    }

    let new = vcs.current_revision()?;
    if new == old {
        return Ok(UpdateOutcome::AlreadyUpToDate);
    }

    let changed = changed_formulae(&vcs.changed_files(&old, &new)?);
    Ok(UpdateOutcome::Updated(UpdateReport { old, new, changed }))
}

/// Map changed repository paths to formula names: keep paths under `Formula/`
/// ending in `.rb`, take the file stem, sort, dedupe. Anything else in the
/// diff (docs, sharded subdirectories' parents, rename noise) falls away.
pub fn changed_formulae(paths: &[String]) -> Vec<String> {
    let mut names: Vec<String> = paths
        .iter()
        .filter(|path| path.starts_with("Formula/"))
        .filter_map(|path| {
            path.rsplit('/')
                .next()
                .and_then(|file| file.strip_suffix(".rb"))
        })
        .filter(|stem| !stem.is_empty())
        .map(|stem| stem.to_string())
        .collect();
    names.sort();
    names.dedup();
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct ScriptedVcs {
        available: bool,
        revisions: RefCell<Vec<Revision>>,
        merged: bool,
        changed: Vec<String>,
    }

    impl ScriptedVcs {
        fn new(revisions: &[&str], merged: bool, changed: &[&str]) -> Self {
            Self {
                available: true,
                revisions: RefCell::new(
                    revisions
                        .iter()
                        .rev()
                        .map(|r| Revision(r.to_string()))
                        .collect(),
                ),
                merged,
                changed: changed.iter().map(|s| s.to_string()).collect(),
            }
        }
    }

    impl VersionControl for ScriptedVcs {
        fn available(&self) -> bool {
            self.available
        }

        fn current_revision(&self) -> Result<Revision> {
            Ok(self
                .revisions
                .borrow_mut()
                .pop()
                .unwrap_or_else(|| Revision("deadbeef".to_string())))
        }

        fn fetch_and_merge(&self) -> Result<bool> {
            Ok(self.merged)
        }

        fn changed_files(&self, _old: &Revision, _new: &Revision) -> Result<Vec<String>> {
            Ok(self.changed.clone())
        }
    }

    #[test]
    fn test_revision_short_is_eight_chars() {
        let rev = Revision("0123456789abcdef".to_string());
        assert_eq!(rev.short(), "01234567");
        let tiny = Revision("abc".to_string());
        assert_eq!(tiny.short(), "abc");
    }

    #[test]
    fn test_changed_paths_map_to_sorted_stems() {
        let paths: Vec<String> = [
            "Formula/foo.rb",
            "Formula/bar.rb",
            "README.md",
            "Library/Homebrew/brew.rb",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        assert_eq!(changed_formulae(&paths), vec!["bar", "foo"]);
    }

    #[test]
    fn test_sharded_formula_paths_still_map() {
        let paths: Vec<String> = ["Formula/w/wget.rb", "Formula/lib/libxml2.rb"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(changed_formulae(&paths), vec!["libxml2", "wget"]);
    }

    #[test]
    fn test_non_formula_and_non_rb_paths_fall_away() {
        let paths: Vec<String> = ["Formula/notes.txt", "docs/Formula/fake.rb", "Formula/.rb"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert!(changed_formulae(&paths).is_empty());
    }

    #[test]
    fn test_duplicate_paths_report_once() {
        let paths: Vec<String> = ["Formula/foo.rb", "Formula/foo.rb"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(changed_formulae(&paths), vec!["foo"]);
    }

    #[test]
    fn test_no_upstream_changes_short_circuits() {
        let vcs = ScriptedVcs::new(&["aaaa"], false, &[]);
        assert_eq!(run(&vcs).unwrap(), UpdateOutcome::AlreadyUpToDate);
    }

    #[test]
    fn test_merge_that_lands_nothing_counts_as_current() {
        // fetch_and_merge reported movement but the revision stayed put
        let vcs = ScriptedVcs::new(&["aaaa", "aaaa"], true, &["Formula/foo.rb"]);
        assert_eq!(run(&vcs).unwrap(), UpdateOutcome::AlreadyUpToDate);
    }

    #[test]
    fn test_update_reports_revisions_and_changed_formulae() {
        let vcs = ScriptedVcs::new(
            &["0123456789abcdef", "fedcba9876543210"],
            true,
            &["Formula/zsh.rb", "Formula/bash.rb", "README.md"],
        );
        match run(&vcs).unwrap() {
            UpdateOutcome::Updated(report) => {
                assert_eq!(report.old.short(), "01234567");
                assert_eq!(report.new.short(), "fedcba98");
                assert_eq!(report.changed, vec!["bash", "zsh"]);
                assert!(report.has_formula_changes());
            }
            other => panic!("expected Updated, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_git_fails_fast_with_guidance() {
        let vcs = ScriptedVcs {
            available: false,
            revisions: RefCell::new(vec![]),
            merged: false,
            changed: vec![],
        };
        match run(&vcs).unwrap_err() {
            WortError::Execution(msg) => assert!(msg.contains("git")),
            other => panic!("expected Execution, got {other:?}"),
        }
    }
}
