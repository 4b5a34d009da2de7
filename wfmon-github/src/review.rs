//! Pull request approvals

use octocrab::models::pulls::ReviewState;
use octocrab::Octocrab;
use tracing::debug;

use crate::{Error, Result};

/// Fetch the deduplicated approver logins of a pull request
pub(crate) async fn fetch_approvers(
    client: &Octocrab,
    owner: &str,
    repo: &str,
    pr_number: u64,
) -> Result<Vec<String>> {
    let reviews = client
        .pulls(owner, repo)
        .list_reviews(pr_number)
        .send()
        .await
        .map_err(Error::Api)?;

    let approvers = collect_approvers(reviews.items.into_iter().map(|r| {
        (
            matches!(r.state, Some(ReviewState::Approved)),
            r.user.map(|u| u.login).unwrap_or_default(),
        )
    }));

    debug!(owner, repo, pr_number, approvers = approvers.len(), "Fetched approvers");

    Ok(approvers)
}

/// Reduce `(approved, login)` review pairs to distinct approver logins
///
/// A reviewer who approved several times is listed once, at the position
/// of their first approval.
pub fn collect_approvers(reviews: impl IntoIterator<Item = (bool, String)>) -> Vec<String> {
    let mut approvers: Vec<String> = Vec::new();

    for (approved, login) in reviews {
        if approved && !login.is_empty() && !approvers.contains(&login) {
            approvers.push(login);
        }
    }

    approvers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use wiremock::MockServer;

    fn review(approved: bool, login: &str) -> (bool, String) {
        (approved, login.to_string())
    }

    #[test]
    fn test_repeated_approvals_counted_once() {
        let approvers = collect_approvers(vec![
            review(true, "alice"),
            review(true, "alice"),
            review(true, "alice"),
        ]);
        assert_eq!(approvers, vec!["alice"]);
    }

    #[test]
    fn test_only_approvals_count() {
        let approvers = collect_approvers(vec![
            review(false, "bob"),
            review(true, "alice"),
            review(false, "carol"),
            review(true, "bob"),
        ]);
        assert_eq!(approvers, vec!["alice", "bob"]);
    }

    #[test]
    fn test_anonymous_reviews_ignored() {
        let approvers = collect_approvers(vec![review(true, ""), review(true, "dave")]);
        assert_eq!(approvers, vec!["dave"]);
    }

    #[test]
    fn test_no_reviews() {
        assert!(collect_approvers(Vec::new()).is_empty());
    }

    #[tokio::test]
    async fn test_fetch_approvers_from_review_payloads() {
        let server = MockServer::start().await;
        fixtures::mount_reviews(
            &server,
            "acme/api",
            5,
            vec![
                fixtures::review(1, "alice", "CHANGES_REQUESTED"),
                fixtures::review(2, "alice", "APPROVED"),
                fixtures::review(3, "bob", "COMMENTED"),
                fixtures::review(4, "alice", "APPROVED"),
            ],
        )
        .await;

        let client = fixtures::client(&server, &["acme/api"]);
        let approvers = fetch_approvers(client.client(), "acme", "api", 5)
            .await
            .unwrap();

        assert_eq!(approvers, vec!["alice"]);
    }

    #[tokio::test]
    async fn test_fetch_approvers_error() {
        let server = MockServer::start().await;
        fixtures::mount_server_error(&server, "/repos/acme/api/pulls/5/reviews".to_string())
            .await;

        let client = fixtures::client(&server, &["acme/api"]);
        let result = fetch_approvers(client.client(), "acme", "api", 5).await;

        assert!(matches!(result, Err(Error::Api(_))));
    }
}
