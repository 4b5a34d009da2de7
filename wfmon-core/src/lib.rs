//! wfmon core - issue/pull request correlation for workflow-monitor
//!
//! This crate holds the data model shared by the tracker adapters, the
//! branch-name matcher, the insight classification rules, and the fetch
//! orchestrator that ties them together.

pub mod config;
pub mod error;
pub mod fetcher;
pub mod insights;
pub mod matcher;
pub mod model;
pub mod source;

pub use config::{Config, FetchConfig, GitHubConfig, JiraConfig, MatchingConfig};
pub use error::{Error, Result};
pub use fetcher::{FetchError, FetchStage, Fetcher};
pub use insights::{
    generate_insights, DoneNotMergedPr, InsightSettings, Insights, ReviewNeededPr,
    ReviewedNotInQaPr,
};
pub use matcher::{IssueIdToPrs, Matcher};
pub use model::{Issue, PullRequest};
pub use source::{CodeHost, IssueTracker, SourceError, SourceResult};
