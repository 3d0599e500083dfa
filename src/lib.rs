//! Library interface for the wort package manager front end.
//!
//! The binary in `main.rs` is a thin shell over this crate; everything it
//! does is reachable here so integration tests can drive commands in-process
//! against stand-in collaborators.

pub mod api;
pub mod args;
pub mod cache;
pub mod commands;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod formula;
pub mod git;
pub mod installer;
pub mod issues;
pub mod keg;
pub mod output;
pub mod registry;
pub mod resolver;
pub mod update;

// Re-export the types nearly every caller touches
pub use config::Config;
pub use error::{Flow, Result, WortError};
pub use formula::{Formula, FormulaRepository};
