//! Search for pull requests awaiting the current user's review

use tracing::{debug, info, warn};
use wfmon_core::PullRequest;

use crate::{parse_repo, pull_request_from_search_result, Error, GitHubClient, Result};

/// Build the search query for open PRs requesting `username`'s review in
/// the given repositories
///
/// Malformed repository identifiers are left out of the query. Returns
/// `None` when no well-formed repository remains, since an unscoped query
/// would search every repository on GitHub.
pub fn review_requested_query(username: &str, repos: &[String]) -> Option<String> {
    let mut query = format!("is:pr is:open review-requested:{}", username);
    let mut scoped = false;
    for repo in repos.iter().filter(|r| parse_repo(r).is_ok()) {
        query.push_str(&format!(" repo:{}", repo));
        scoped = true;
    }
    scoped.then_some(query)
}

impl GitHubClient {
    /// Search for open PRs where the current user is a requested reviewer
    ///
    /// The pull request list endpoint cannot filter by requested reviewer,
    /// so this goes through issue search. Nothing is searched when no
    /// configured repository is well-formed.
    pub async fn search_prs_needing_my_review(&self) -> Result<Vec<PullRequest>> {
        let Some(query) = review_requested_query(self.username(), self.repos()) else {
            warn!("No well-formed repository configured, skipping review search");
            return Ok(Vec::new());
        };
        debug!(query = %query, "Searching pull requests needing review");

        let page = self
            .client()
            .search()
            .issues_and_pull_requests(&query)
            .send()
            .await
            .map_err(Error::Api)?;

        let prs: Vec<PullRequest> = page
            .items
            .into_iter()
            .map(pull_request_from_search_result)
            .collect();

        info!(count = prs.len(), "Fetched pull requests needing my review");

        Ok(prs)
    }
}
