//! Formula repository backed by the Homebrew JSON API.
//!
//! [`ApiRepository`] is the production [`FormulaRepository`]: it answers
//! lookups from the public JSON API, keeps an in-memory cache for the life of
//! one invocation, and leans on the 24-hour disk cache for the full formula
//! list. A 404 from the API is the typed not-found; everything else surfaces
//! as a request error.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::cache;
use crate::config::Config;
use crate::error::{Result, WortError};
use crate::formula::{Formula, FormulaRepository};

const API_BASE: &str = "https://formulae.brew.sh/api";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub struct ApiRepository {
    client: reqwest::blocking::Client,
    formula_cache: moka::sync::Cache<String, Formula>,
    cache_dir: PathBuf,
}

impl ApiRepository {
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(format!("wort/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        // In-memory cache lasts for the duration of one command
        let formula_cache = moka::sync::Cache::new(1000);

        Ok(Self {
            client,
            formula_cache,
            cache_dir: config.cache.clone(),
        })
    }

    /// The complete formula list, from the disk cache when fresh.
    ///
    /// First call without a cache downloads the full catalog; subsequent
    /// calls within the TTL read it back locally.
    pub fn fetch_all(&self) -> Result<Vec<Formula>> {
        if let Some(cached) = cache::cached_formulae(&self.cache_dir) {
            return Ok(cached);
        }

        let url = format!("{API_BASE}/formula.json");
        let formulae: Vec<Formula> = self.client.get(&url).send()?.json()?;

        // Store in cache (ignore errors)
        let _ = cache::store_formulae(&self.cache_dir, &formulae);

        Ok(formulae)
    }
}

impl FormulaRepository for ApiRepository {
    fn resolve(&self, name: &str) -> Result<Formula> {
        if let Some(cached) = self.formula_cache.get(name) {
            return Ok(cached);
        }

        let url = format!("{API_BASE}/formula/{name}.json");
        let response = self.client.get(&url).send()?;

        if response.status() == 404 {
            return Err(WortError::UnknownFormula(name.to_string()));
        }

        let formula: Formula = response.json()?;
        self.formula_cache.insert(name.to_string(), formula.clone());
        Ok(formula)
    }

    fn all_names(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = self.fetch_all()?.into_iter().map(|f| f.name).collect();
        names.sort();
        Ok(names)
    }

    fn used_by_index(&self) -> Result<BTreeMap<String, Vec<String>>> {
        let mut index: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for formula in self.fetch_all()? {
            // Build-time edges count as uses too
            for dep in formula
                .dependencies
                .iter()
                .chain(formula.build_dependencies.iter())
            {
                index
                    .entry(dep.clone())
                    .or_default()
                    .push(formula.name.clone());
            }
        }

        for dependents in index.values_mut() {
            dependents.sort();
            dependents.dedup();
        }
        Ok(index)
    }
}
