//! Runtime configuration - prefix, cellar, repository and cache locations.
//!
//! Built once from the environment in `main` and passed by reference; nothing
//! here mutates after construction.

use std::path::{Path, PathBuf};

/// Where everything lives for one invocation.
#[derive(Debug, Clone)]
pub struct Config {
    pub prefix: PathBuf,
    pub cellar: PathBuf,
    pub repository: PathBuf,
    pub cache: PathBuf,
    pub verbose: bool,
}

impl Config {
    /// Assemble from the environment.
    pub fn from_env(verbose: bool) -> Self {
        let prefix = detect_prefix();
        let repository = match std::env::var_os("WORT_REPOSITORY") {
            Some(repo) => PathBuf::from(repo),
            None => prefix.join("Library/Taps/homebrew/homebrew-core"),
        };
        let cache = match std::env::var_os("WORT_CACHE") {
            Some(dir) => PathBuf::from(dir),
            None => default_cache_dir(),
        };
        Self {
            cellar: prefix.join("Cellar"),
            prefix,
            repository,
            cache,
            verbose,
        }
    }

    /// Fixed rooted layout, for tests and tools that point at a scratch tree.
    pub fn rooted(prefix: &Path, verbose: bool) -> Self {
        Self {
            cellar: prefix.join("Cellar"),
            repository: prefix.join("Library/Taps/homebrew/homebrew-core"),
            cache: prefix.join("cache"),
            prefix: prefix.to_path_buf(),
            verbose,
        }
    }

    /// Directory holding the formula definition files.
    pub fn formula_dir(&self) -> PathBuf {
        self.repository.join("Formula")
    }

    /// Repository-convention path of one formula's definition file.
    pub fn formula_path(&self, name: &str) -> PathBuf {
        self.formula_dir().join(format!("{name}.rb"))
    }

    /// Locate a formula file that actually exists in the checkout, trying the
    /// flat layout first and the sharded `Formula/<letter>/` layout second.
    pub fn existing_formula_path(&self, name: &str) -> Option<PathBuf> {
        let flat = self.formula_path(name);
        if flat.exists() {
            return Some(flat);
        }

        let shard = name.chars().next()?.to_lowercase().to_string();
        let sharded = self.formula_dir().join(shard).join(format!("{name}.rb"));
        sharded.exists().then_some(sharded)
    }
}

/// Detect the installation prefix on this system.
fn detect_prefix() -> PathBuf {
    // First check environment variable
    if let Ok(prefix) = std::env::var("WORT_PREFIX") {
        return PathBuf::from(prefix);
    }

    // Detect by architecture
    #[cfg(target_arch = "aarch64")]
    {
        PathBuf::from("/opt/homebrew")
    }
    #[cfg(target_arch = "x86_64")]
    {
        PathBuf::from("/usr/local")
    }
    #[cfg(not(any(target_arch = "aarch64", target_arch = "x86_64")))]
    {
        PathBuf::from("/usr/local")
    }
}

/// Cache directory (~/.cache/wort/ or equivalent).
fn default_cache_dir() -> PathBuf {
    if let Some(cache_home) = std::env::var_os("XDG_CACHE_HOME") {
        PathBuf::from(cache_home).join("wort")
    } else if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home).join(".cache/wort")
    } else {
        PathBuf::from(".cache/wort")
    }
}
