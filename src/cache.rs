//! On-disk cache of the full formula list.
//!
//! The full list is a large download; it is kept as JSON under the configured
//! cache directory and trusted for 24 hours. Staleness is judged from the
//! file's mtime, so `update` can invalidate by deleting the files.

use std::path::Path;
use std::time::{Duration, SystemTime};

use crate::error::Result;
use crate::formula::Formula;

const CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60); // 24 hours

/// Check if a cached file is still fresh (less than TTL old).
fn is_fresh(path: &Path) -> bool {
    if !path.exists() {
        return false;
    }

    let metadata = match std::fs::metadata(path) {
        Ok(m) => m,
        Err(_) => return false,
    };

    let modified = match metadata.modified() {
        Ok(t) => t,
        Err(_) => return false,
    };

    let age = match SystemTime::now().duration_since(modified) {
        Ok(d) => d,
        Err(_) => return false,
    };

    age < CACHE_TTL
}

/// Cached formula list, or None if stale/missing/unreadable.
pub fn cached_formulae(dir: &Path) -> Option<Vec<Formula>> {
    let path = dir.join("formulae.json");
    if !is_fresh(&path) {
        return None;
    }

    let content = std::fs::read_to_string(&path).ok()?;
    serde_json::from_str(&content).ok()
}

/// Store the formula list in the cache.
pub fn store_formulae(dir: &Path, formulae: &[Formula]) -> Result<()> {
    let path = dir.join("formulae.json");
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string(formulae)?;
    std::fs::write(&path, json)?;
    Ok(())
}

/// Drop every cached JSON file.
pub fn clear(dir: &Path) -> Result<()> {
    if dir.exists() {
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.is_file() && path.extension().and_then(|e| e.to_str()) == Some("json") {
                std::fs::remove_file(&path)?;
            }
        }
    }

    Ok(())
}
