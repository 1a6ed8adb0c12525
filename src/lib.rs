//! snipvault - Code Snippet Manager
//!
//! Keeps a personal collection of code snippets in a single JSON file keyed by
//! title. The [`models::SnippetStore`] owns the data and persists every change;
//! the [`cli`] module is the console front end, and [`format`] and
//! [`highlight`] provide the optional presentation strategies it applies.

pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod highlight;
pub mod models;

pub use config::Settings;
pub use error::{StoreError, StoreResult};
pub use models::{ContributionStats, Snippet, SnippetStore};
