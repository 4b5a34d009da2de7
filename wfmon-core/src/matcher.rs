//! Correlates pull requests to issues by their branch names

use std::collections::HashMap;

use regex::Regex;
use tracing::debug;

use crate::{PullRequest, Result};

/// Issue key to the PRs whose branch names carry it, in discovery order
pub type IssueIdToPrs = HashMap<String, Vec<PullRequest>>;

/// Extracts issue keys from branch names with a configured pattern
#[derive(Debug, Clone)]
pub struct Matcher {
    issue_pattern: Regex,
}

impl Matcher {
    /// Compile the issue pattern once for reuse across a run
    pub fn new(pattern: &str) -> Result<Self> {
        Ok(Self {
            issue_pattern: Regex::new(pattern)?,
        })
    }

    /// Whether the pattern accepts the empty string
    pub fn matches_empty(&self) -> bool {
        self.issue_pattern.is_match("")
    }

    /// Extract the issue key from a branch name
    ///
    /// Returns the leftmost match of the whole pattern. Capture groups are
    /// ignored. Empty branch names and zero-width matches never produce a key.
    /// Only the leftmost match is considered: if it is zero-width, later keys
    /// in the branch name are not searched for, so `(AB-\d+)?` yields `None`
    /// for `x-AB-1`. [`Config::validate`](crate::Config::validate) rejects
    /// such patterns.
    pub fn issue_id<'a>(&self, branch_name: &'a str) -> Option<&'a str> {
        if branch_name.is_empty() {
            return None;
        }

        self.issue_pattern
            .find(branch_name)
            .map(|m| m.as_str())
            .filter(|id| !id.is_empty())
    }

    /// Group PRs by the issue key found in their branch names
    ///
    /// PRs without a match are skipped.
    pub fn issue_id_to_prs(&self, prs: impl IntoIterator<Item = PullRequest>) -> IssueIdToPrs {
        let mut issue_id_to_prs = IssueIdToPrs::new();

        for pr in prs {
            let Some(issue_id) = self.issue_id(&pr.branch_name) else {
                debug!(
                    branch = %pr.branch_name,
                    repo = %pr.repo,
                    number = pr.number,
                    "No issue ID found in branch name"
                );
                continue;
            };

            issue_id_to_prs
                .entry(issue_id.to_string())
                .or_default()
                .push(pr);
        }

        issue_id_to_prs
    }
}
