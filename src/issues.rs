//! Courtesy lookup of known issues mentioning a formula.

use std::time::Duration;

use serde::Deserialize;

use crate::error::{Result, WortError};

const ISSUE_API: &str = "https://api.github.com/search/issues";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Issue search used when reporting build failures. Callers treat any error
/// as "no suggestions"; a failed lookup must never block the report itself.
pub trait IssueLookup {
    fn search(&self, formula: &str) -> Result<Vec<String>>;
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<Issue>,
}

#[derive(Debug, Deserialize)]
struct Issue {
    html_url: String,
}

/// GitHub issue search scoped to the upstream formula repository.
///
/// Construction swallows client-build failures; `search` then reports them,
/// which the caller already treats as "no suggestions".
pub struct GitHubIssues {
    client: Option<reqwest::blocking::Client>,
}

impl GitHubIssues {
    pub fn new() -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(format!("wort/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .ok();
        Self { client }
    }
}

impl Default for GitHubIssues {
    fn default() -> Self {
        Self::new()
    }
}

impl IssueLookup for GitHubIssues {
    fn search(&self, formula: &str) -> Result<Vec<String>> {
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| WortError::Execution("HTTP client unavailable".to_string()))?;

        let response = client
            .get(ISSUE_API)
            .query(&[(
                "q",
                format!("repo:Homebrew/homebrew-core in:title {formula}"),
            )])
            .header("Accept", "application/vnd.github+json")
            .send()?;

        let payload: SearchResponse = response.json()?;
        Ok(payload
            .items
            .into_iter()
            .map(|issue| issue.html_url)
            .collect())
    }
}
