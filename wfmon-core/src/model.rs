//! Issue and pull request snapshots shared by every adapter

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An issue from the issue tracker
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Issue {
    /// Issue key, unique within the tracker (e.g. "AB-123")
    pub key: String,
    /// Issue summary line
    #[serde(default)]
    pub summary: String,
    /// Workflow status name; `None` when the tracker omitted it
    pub status: Option<String>,
    /// When the issue was last updated
    pub updated: Option<DateTime<Utc>>,
}

impl Issue {
    /// Create an issue with a key and status
    pub fn new(key: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            status: Some(status.into()),
            ..Default::default()
        }
    }

    /// Whether the issue is in exactly the given status
    pub fn has_status(&self, status: &str) -> bool {
        self.status.as_deref() == Some(status)
    }
}

/// Pull request representation
///
/// Records built from a search result have an empty `branch_name` and no
/// `approvers`; consumers must tolerate both.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PullRequest {
    /// Browser URL of the PR
    pub url: String,
    /// PR number within its repository
    pub number: u64,
    /// PR title
    pub title: String,
    /// State as reported by the code host (open, closed)
    pub state: String,
    /// Head branch name
    pub branch_name: String,
    /// Author login
    pub author: String,
    /// Repository in `owner/name` form
    pub repo: String,
    /// Logins that approved the PR, each at most once
    pub approvers: Vec<String>,
}

impl PullRequest {
    /// Number of distinct approvers
    pub fn approval_count(&self) -> usize {
        self.approvers.len()
    }
}
