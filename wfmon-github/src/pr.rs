//! Open pull request listing and conversion into the shared model

use std::future::Future;

use octocrab::models::issues::Issue as OctocrabIssue;
use octocrab::models::pulls::PullRequest as OctocrabPR;
use octocrab::models::IssueState;
use octocrab::params;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};
use wfmon_core::PullRequest;

use crate::review::fetch_approvers;
use crate::{parse_repo, Error, GitHubClient, Result};

/// Build a PullRequest from a full pull request record
///
/// `repo` is the `owner/name` the record was listed from; `approvers` must
/// already be deduplicated.
pub fn pull_request_from_full(pr: OctocrabPR, repo: &str, approvers: Vec<String>) -> PullRequest {
    PullRequest {
        url: pr.html_url.map(|u| u.to_string()).unwrap_or_default(),
        number: pr.number,
        title: pr.title.unwrap_or_default(),
        state: pr.state.map(state_name).unwrap_or_default(),
        branch_name: pr.head.ref_field,
        author: pr.user.map(|u| u.login).unwrap_or_default(),
        repo: repo.to_string(),
        approvers,
    }
}

/// Build a PullRequest from a search result
///
/// Search results carry neither the head branch nor reviews, so
/// `branch_name` is empty and `approvers` is empty.
pub fn pull_request_from_search_result(issue: OctocrabIssue) -> PullRequest {
    PullRequest {
        url: issue.html_url.to_string(),
        number: issue.number,
        title: issue.title,
        state: state_name(issue.state),
        branch_name: String::new(),
        author: issue.user.login,
        repo: repo_from_api_path(issue.repository_url.path()).unwrap_or_default(),
        approvers: Vec::new(),
    }
}

fn state_name(state: IssueState) -> String {
    match state {
        IssueState::Open => "open",
        IssueState::Closed => "closed",
        _ => "unknown",
    }
    .to_string()
}

/// Extract `owner/name` from an API path like `/repos/owner/name`
pub(crate) fn repo_from_api_path(path: &str) -> Option<String> {
    let rest = path.trim_end_matches('/').split("/repos/").nth(1)?;
    parse_repo(rest)
        .ok()
        .map(|(owner, name)| format!("{}/{}", owner, name))
}

impl GitHubClient {
    /// List open PRs across all watched repositories, approvers included
    ///
    /// Malformed repository identifiers are skipped. A failure to list a
    /// repository's PRs fails the whole call; a failure to fetch one PR's
    /// reviews drops only that PR.
    pub async fn list_open_prs(&self) -> Result<Vec<PullRequest>> {
        let mut all_open_prs = Vec::new();

        for repo_spec in self.repos() {
            let (owner, repo) = match parse_repo(repo_spec) {
                Ok(parts) => parts,
                Err(e) => {
                    warn!(repo = %repo_spec, error = %e, "Skipping repository");
                    continue;
                }
            };

            let page = self
                .client()
                .pulls(&owner, &repo)
                .list()
                .state(params::State::Open)
                .per_page(100)
                .send()
                .await
                .map_err(Error::Api)?;

            debug!(repo = %repo_spec, count = page.items.len(), "Listed open pull requests");

            if page.items.is_empty() {
                continue;
            }

            let prs = fan_out(page.items, |pr| {
                let client = self.client().clone();
                let owner = owner.clone();
                let repo = repo.clone();
                async move {
                    let number = pr.number;
                    match fetch_approvers(&client, &owner, &repo, number).await {
                        Ok(approvers) => Some(pull_request_from_full(
                            pr,
                            &format!("{}/{}", owner, repo),
                            approvers,
                        )),
                        Err(e) => {
                            warn!(owner = %owner, repo = %repo, number, error = %e, "Error fetching approvers");
                            None
                        }
                    }
                }
            })
            .await;

            all_open_prs.extend(prs);
        }

        info!(count = all_open_prs.len(), "Fetched open pull requests");

        Ok(all_open_prs)
    }
}

/// Run `task` for every item in its own tokio task and collect the `Some`
/// results once all tasks have finished
///
/// Results are merged by this collector only, so tasks share no mutable
/// state. Completion order decides the output order.
pub(crate) async fn fan_out<T, R, F, Fut>(items: Vec<T>, task: F) -> Vec<R>
where
    T: Send + 'static,
    R: Send + 'static,
    F: Fn(T) -> Fut,
    Fut: Future<Output = Option<R>> + Send + 'static,
{
    let mut set = JoinSet::new();
    for item in items {
        set.spawn(task(item));
    }

    let mut results = Vec::with_capacity(set.len());
    while let Some(joined) = set.join_next().await {
        match joined {
            Ok(Some(result)) => results.push(result),
            Ok(None) => {}
            Err(e) => warn!(error = %e, "Pull request task did not complete"),
        }
    }

    results
}
