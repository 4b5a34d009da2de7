//! Traits implemented by the issue tracker and code host adapters

use async_trait::async_trait;

use crate::{Issue, PullRequest};

/// Error returned by an adapter; each adapter keeps its own error type
pub type SourceError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type for adapter calls
pub type SourceResult<T> = std::result::Result<T, SourceError>;

/// Issue tracker queries used by the fetcher
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Issues assigned to the current user in the review or done status,
    /// updated within the last 14 days, newest first
    async fn fetch_my_issues_in_review_or_done(&self) -> SourceResult<Vec<Issue>>;
}

/// Code host queries used by the fetcher
#[async_trait]
pub trait CodeHost: Send + Sync {
    /// Open PRs across the configured repositories, with approvers filled in
    async fn fetch_open_prs(&self) -> SourceResult<Vec<PullRequest>>;

    /// PRs where the current user is a requested reviewer
    ///
    /// These records carry no branch name and no approvers.
    async fn fetch_prs_needing_my_review(&self) -> SourceResult<Vec<PullRequest>>;
}
