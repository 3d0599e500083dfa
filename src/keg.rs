//! Keg store - reading the cellar and maintaining its symlink farm.
//!
//! A keg is one installed version directory, `<cellar>/<name>/<version>`.
//! Everything here works from explicit paths handed down from [`Config`];
//! nothing consults the environment.
//!
//! [`Config`]: crate::config::Config

use std::cmp::Ordering;
use std::fs;
use std::os::unix::fs as unix_fs;
use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};
use walkdir::WalkDir;

/// Directories fanned out from kegs into the prefix.
pub const LINKABLE_DIRS: &[&str] = &[
    "bin",
    "sbin",
    "lib",
    "include",
    "share",
    "etc",
    "Frameworks",
];

/// An installed version directory under the cellar.
#[derive(Debug, Clone)]
pub struct Keg {
    pub name: String,
    pub version: String,
    pub path: PathBuf,
}

/// Names of everything with at least one keg, sorted.
pub fn installed_names(cellar: &Path) -> Result<Vec<String>> {
    if !cellar.exists() {
        return Ok(vec![]);
    }

    let mut names = Vec::new();
    for entry in fs::read_dir(cellar)
        .with_context(|| format!("Failed to read cellar: {}", cellar.display()))?
    {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().to_string();
        if name.starts_with('.') || !entry.path().is_dir() {
            continue;
        }
        if !installed_versions(cellar, &name)?.is_empty() {
            names.push(name);
        }
    }

    names.sort();
    Ok(names)
}

pub fn is_installed(cellar: &Path, name: &str) -> bool {
    installed_versions(cellar, name)
        .map(|kegs| !kegs.is_empty())
        .unwrap_or(false)
}

/// All kegs of one formula, newest version first.
pub fn installed_versions(cellar: &Path, name: &str) -> Result<Vec<Keg>> {
    let formula_dir = cellar.join(name);
    if !formula_dir.exists() {
        return Ok(vec![]);
    }

    let mut kegs = Vec::new();
    for entry in fs::read_dir(&formula_dir)? {
        let entry = entry?;
        let version = entry.file_name().to_string_lossy().to_string();
        if version.starts_with('.') || !entry.path().is_dir() {
            continue;
        }
        kegs.push(Keg {
            name: name.to_string(),
            version,
            path: entry.path(),
        });
    }

    kegs.sort_by(|a, b| compare_versions(&a.version, &b.version));
    kegs.reverse();
    Ok(kegs)
}

/// Compare two version strings semantically: numeric dot-parts first,
/// lexicographic tie-break.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let a_parts: Vec<u32> = a.split('.').filter_map(|s| s.parse::<u32>().ok()).collect();
    let b_parts: Vec<u32> = b.split('.').filter_map(|s| s.parse::<u32>().ok()).collect();

    for i in 0..a_parts.len().max(b_parts.len()) {
        let a_part = a_parts.get(i).unwrap_or(&0);
        let b_part = b_parts.get(i).unwrap_or(&0);
        match a_part.cmp(b_part) {
            Ordering::Equal => continue,
            other => return other,
        }
    }

    a.cmp(b)
}

/// Every file inside a keg, sorted, for `list <name>`.
pub fn keg_files(keg: &Keg) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(&keg.path)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file() || entry.file_type().is_symlink())
        .map(|entry| entry.into_path())
        .collect();
    files.sort();
    files
}

/// Total on-disk size of a tree, in bytes.
pub fn tree_size(path: &Path) -> u64 {
    WalkDir::new(path)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| entry.metadata().ok())
        .map(|meta| meta.len())
        .sum()
}

pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}

/// Delete a keg, and its formula directory once no versions remain.
pub fn remove(keg: &Keg) -> Result<()> {
    fs::remove_dir_all(&keg.path)
        .with_context(|| format!("Failed to remove keg: {}", keg.path.display()))?;

    if let Some(formula_dir) = keg.path.parent() {
        let empty = fs::read_dir(formula_dir)
            .map(|mut entries| entries.next().is_none())
            .unwrap_or(false);
        if empty {
            fs::remove_dir(formula_dir)?;
        }
    }
    Ok(())
}

/// Fan a keg's linkable directories out into the prefix as relative symlinks.
/// Existing entries that point elsewhere are left alone.
pub fn link(prefix: &Path, cellar: &Path, keg: &Keg) -> Result<Vec<PathBuf>> {
    let mut linked = Vec::new();

    for dir_name in LINKABLE_DIRS {
        let source_dir = keg.path.join(dir_name);
        if !source_dir.is_dir() {
            continue;
        }

        let target_dir = prefix.join(dir_name);
        if !target_dir.exists() {
            fs::create_dir_all(&target_dir)
                .with_context(|| format!("Failed to create directory: {}", target_dir.display()))?;
        }

        link_directory(&source_dir, &target_dir, cellar, &mut linked)?;
    }

    Ok(linked)
}

fn link_directory(
    source: &Path,
    target: &Path,
    cellar: &Path,
    linked: &mut Vec<PathBuf>,
) -> Result<()> {
    for entry in fs::read_dir(source)? {
        let entry = entry?;
        let source_path = entry.path();
        let target_path = target.join(entry.file_name());

        if source_path.is_dir() {
            if !target_path.exists() {
                fs::create_dir_all(&target_path)?;
            }
            link_directory(&source_path, &target_path, cellar, linked)?;
        } else {
            if create_relative_symlink(&source_path, &target_path, cellar)? {
                linked.push(target_path);
            }
        }
    }

    Ok(())
}

/// Returns true when a new link was made. An existing entry pointing at the
/// same source counts as already linked; anything else is left untouched.
fn create_relative_symlink(source: &Path, target: &Path, cellar: &Path) -> Result<bool> {
    let relative_source = relative_link_target(source, cellar);

    if target.symlink_metadata().is_ok() {
        if let Ok(existing) = fs::read_link(target) {
            if existing == relative_source {
                return Ok(false);
            }
        }
        // Target exists but points elsewhere - not ours to overwrite
        return Ok(false);
    }

    unix_fs::symlink(&relative_source, target).with_context(|| {
        format!(
            "Failed to create symlink: {} -> {}",
            target.display(),
            relative_source.display()
        )
    })?;
    Ok(true)
}

/// Path stored inside the link: `../Cellar/<name>/<version>/...` when the
/// source lives under the cellar, absolute otherwise.
fn relative_link_target(source: &Path, cellar: &Path) -> PathBuf {
    if source.starts_with(cellar) {
        let root = cellar.parent().unwrap_or(cellar);
        if let Ok(rel) = source.strip_prefix(root) {
            return PathBuf::from("..").join(rel);
        }
    }
    source.to_path_buf()
}

/// Remove the prefix symlinks that point into a keg.
pub fn unlink(prefix: &Path, keg: &Keg) -> Result<Vec<PathBuf>> {
    let mut unlinked = Vec::new();

    for dir_name in LINKABLE_DIRS {
        let source_dir = keg.path.join(dir_name);
        let target_dir = prefix.join(dir_name);
        if !source_dir.exists() || !target_dir.exists() {
            continue;
        }

        unlink_directory(&source_dir, &target_dir, &keg.path, &mut unlinked)?;
    }

    Ok(unlinked)
}

fn unlink_directory(
    source: &Path,
    target: &Path,
    keg_path: &Path,
    unlinked: &mut Vec<PathBuf>,
) -> Result<()> {
    for entry in fs::read_dir(source)? {
        let entry = entry?;
        let source_path = entry.path();
        let target_path = target.join(entry.file_name());

        if source_path.is_dir() {
            if target_path.is_dir() {
                unlink_directory(&source_path, &target_path, keg_path, unlinked)?;
            }
        } else if target_path.symlink_metadata().is_ok() {
            if let Ok(link_target) = fs::read_link(&target_path) {
                if resolve_link(&target_path, &link_target).starts_with(keg_path) {
                    fs::remove_file(&target_path)?;
                    unlinked.push(target_path);
                }
            }
        }
    }

    Ok(())
}

/// Whether any prefix symlink currently resolves into this keg.
pub fn is_linked(prefix: &Path, keg: &Keg) -> bool {
    for dir_name in LINKABLE_DIRS {
        let dir = prefix.join(dir_name);
        if !dir.exists() {
            continue;
        }
        for entry in WalkDir::new(&dir).into_iter().filter_map(|e| e.ok()) {
            if !entry.path_is_symlink() {
                continue;
            }
            if let Ok(stored) = fs::read_link(entry.path()) {
                if resolve_link(entry.path(), &stored).starts_with(&keg.path) {
                    return true;
                }
            }
        }
    }
    false
}

/// Remove dangling symlinks in the prefix's linkable directories that point
/// into the cellar. Returns how many were removed.
pub fn prune(prefix: &Path, cellar: &Path) -> Result<usize> {
    let mut pruned = 0;

    for dir_name in LINKABLE_DIRS {
        let dir = prefix.join(dir_name);
        if !dir.exists() {
            continue;
        }

        for entry in WalkDir::new(&dir).into_iter().filter_map(|e| e.ok()) {
            if !entry.path_is_symlink() {
                continue;
            }
            let path = entry.path();
            let Ok(link_target) = fs::read_link(path) else {
                continue;
            };
            let resolved = resolve_link(path, &link_target);
            if resolved.starts_with(cellar) && !resolved.exists() {
                fs::remove_file(path)?;
                pruned += 1;
            }
        }
    }

    Ok(pruned)
}

/// Resolve a link's stored target against the link's own directory and fold
/// away `.`/`..` components, without touching the filesystem.
fn resolve_link(link: &Path, stored: &Path) -> PathBuf {
    let joined = if stored.is_relative() {
        match link.parent() {
            Some(parent) => parent.join(stored),
            None => stored.to_path_buf(),
        }
    } else {
        stored.to_path_buf()
    };

    let mut resolved = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::ParentDir => {
                resolved.pop();
            }
            Component::CurDir => {}
            other => resolved.push(other.as_os_str()),
        }
    }
    resolved
}
