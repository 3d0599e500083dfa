//! Formula metadata - the read-only snapshot every command operates over.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One formula as the repository describes it. Fetched on demand, never
/// mutated; installed state lives in the keg store, not here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Formula {
    pub name: String,
    #[serde(default)]
    pub desc: Option<String>,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub versions: Versions,
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub build_dependencies: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Versions {
    #[serde(default)]
    pub stable: Option<String>,
    #[serde(default)]
    pub head: Option<String>,
}

impl Formula {
    /// Stable version string, or "HEAD" when the formula only builds from tip.
    pub fn version(&self) -> &str {
        self.versions.stable.as_deref().unwrap_or("HEAD")
    }
}

/// Read access to the formula universe. Lookups are by exact, case-sensitive
/// name; `resolve` fails with [`WortError::UnknownFormula`] for names the
/// repository does not carry.
///
/// [`WortError::UnknownFormula`]: crate::error::WortError::UnknownFormula
pub trait FormulaRepository {
    fn resolve(&self, name: &str) -> Result<Formula>;

    /// Every formula name the repository knows, sorted.
    fn all_names(&self) -> Result<Vec<String>>;

    /// Reverse edges of the dependency graph: name -> direct dependents,
    /// each dependent list sorted.
    fn used_by_index(&self) -> Result<BTreeMap<String, Vec<String>>>;
}
