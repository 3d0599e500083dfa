use std::fmt;

use thiserror::Error;

/// Which argument shape a command insisted on and did not get.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    Formula,
    Keg,
}

impl ArgKind {
    pub fn noun(self) -> &'static str {
        match self {
            ArgKind::Formula => "formula",
            ArgKind::Keg => "keg",
        }
    }
}

/// How an external build helper came to a stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitDetail {
    Code(i32),
    Signal(i32),
}

impl fmt::Display for ExitDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitDetail::Code(code) => write!(f, "exited with {code}"),
            ExitDetail::Signal(sig) => write!(f, "terminated by signal {sig}"),
        }
    }
}

/// Everything the failure report needs about a broken build: which formula,
/// how the helper ended, and the output lines captured from it.
#[derive(Debug, Clone)]
pub struct BuildFailure {
    pub formula: String,
    pub status: ExitDetail,
    pub trace: Vec<String>,
}

#[derive(Error, Debug)]
pub enum WortError {
    #[error("Invalid usage")]
    Usage,

    #[error("This command requires a {} argument", .0.noun())]
    MissingArgument(ArgKind),

    #[error("No available formula for {0}")]
    UnknownFormula(String),

    #[error("{} did not build", .0.formula)]
    Build(BuildFailure),

    #[error("Interrupted")]
    Interrupted,

    #[error("{0}")]
    Execution(String),

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Error: {0}")]
    Other(#[from] anyhow::Error),
}

/// What a command hands back on success. `Exit` carries a subprocess status
/// that must reach the shell verbatim, bypassing classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Done,
    Exit(i32),
}

pub type Result<T> = std::result::Result<T, WortError>;
