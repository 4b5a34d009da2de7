//! GitHub API payloads for tests

use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::GitHubClient;

pub(crate) fn user(login: &str) -> Value {
    let api = format!("https://api.github.com/users/{}", login);
    json!({
        "login": login,
        "id": 583231,
        "node_id": "MDQ6VXNlcjU4MzIzMQ==",
        "avatar_url": "https://avatars.githubusercontent.com/u/583231?v=4",
        "gravatar_id": "",
        "url": api,
        "html_url": format!("https://github.com/{}", login),
        "followers_url": format!("{}/followers", api),
        "following_url": format!("{}/following", api),
        "gists_url": format!("{}/gists", api),
        "starred_url": format!("{}/starred", api),
        "subscriptions_url": format!("{}/subscriptions", api),
        "organizations_url": format!("{}/orgs", api),
        "repos_url": format!("{}/repos", api),
        "events_url": format!("{}/events", api),
        "received_events_url": format!("{}/received_events", api),
        "type": "User",
        "site_admin": false
    })
}

/// A pull request as returned by `GET /repos/{owner}/{repo}/pulls`
pub(crate) fn pull(repo: &str, number: u64, branch: &str, author: &str) -> Value {
    let api = format!("https://api.github.com/repos/{}", repo);
    let html = format!("https://github.com/{}/pull/{}", repo, number);
    json!({
        "url": format!("{}/pulls/{}", api, number),
        "id": 1_000_000 + number,
        "node_id": format!("PR_kwDO{}", number),
        "html_url": html,
        "diff_url": format!("{}.diff", html),
        "patch_url": format!("{}.patch", html),
        "issue_url": format!("{}/issues/{}", api, number),
        "commits_url": format!("{}/pulls/{}/commits", api, number),
        "review_comments_url": format!("{}/pulls/{}/comments", api, number),
        "review_comment_url": format!("{}/pulls/comments", api),
        "comments_url": format!("{}/issues/{}/comments", api, number),
        "statuses_url": format!("{}/statuses/6dcb09b5b57875f334f61aebed695e2e4193db5e", api),
        "number": number,
        "state": "open",
        "locked": false,
        "maintainer_can_modify": false,
        "title": format!("Change {}", number),
        "user": user(author),
        "body": null,
        "labels": [],
        "milestone": null,
        "created_at": "2024-01-15T10:30:00Z",
        "updated_at": "2024-01-16T08:00:00Z",
        "closed_at": null,
        "merged_at": null,
        "merge_commit_sha": null,
        "assignee": null,
        "assignees": [],
        "requested_reviewers": [],
        "draft": false,
        "head": {
            "label": format!("{}:{}", author, branch),
            "ref": branch,
            "sha": "6dcb09b5b57875f334f61aebed695e2e4193db5e",
            "user": user(author)
        },
        "base": {
            "label": "acme:main",
            "ref": "main",
            "sha": "9049f1265b7d61be4a8904a9a27120d2064dab3b",
            "user": user("acme")
        }
    })
}

/// A pull request as it appears in issue search results
pub(crate) fn search_item(repo: &str, number: u64, author: &str) -> Value {
    let api = format!("https://api.github.com/repos/{}", repo);
    json!({
        "id": 2_000_000 + number,
        "node_id": format!("I_kwDO{}", number),
        "url": format!("{}/issues/{}", api, number),
        "repository_url": api,
        "labels_url": format!("{}/issues/{}/labels", api, number),
        "comments_url": format!("{}/issues/{}/comments", api, number),
        "events_url": format!("{}/issues/{}/events", api, number),
        "html_url": format!("https://github.com/{}/pull/{}", repo, number),
        "number": number,
        "state": "open",
        "title": format!("Change {}", number),
        "body": null,
        "user": user(author),
        "labels": [],
        "assignee": null,
        "assignees": [],
        "author_association": "MEMBER",
        "milestone": null,
        "locked": false,
        "active_lock_reason": null,
        "comments": 0,
        "closed_at": null,
        "created_at": "2024-01-15T10:30:00Z",
        "updated_at": "2024-01-16T08:00:00Z"
    })
}

pub(crate) fn search_results(items: Vec<Value>) -> Value {
    json!({
        "total_count": items.len(),
        "incomplete_results": false,
        "items": items
    })
}

pub(crate) fn review(id: u64, login: &str, state: &str) -> Value {
    json!({
        "id": id,
        "node_id": format!("PRR_kwDO{}", id),
        "user": user(login),
        "body": "",
        "state": state,
        "html_url": format!("https://github.com/acme/api/pull/1#pullrequestreview-{}", id),
        "pull_request_url": "https://api.github.com/repos/acme/api/pulls/1",
        "commit_id": "6dcb09b5b57875f334f61aebed695e2e4193db5e",
        "submitted_at": "2024-01-16T09:00:00Z"
    })
}

pub(crate) async fn mount_reviews(server: &MockServer, repo: &str, number: u64, reviews: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path(format!("/repos/{}/pulls/{}/reviews", repo, number)))
        .respond_with(ResponseTemplate::new(200).set_body_json(Value::Array(reviews)))
        .mount(server)
        .await;
}

pub(crate) async fn mount_server_error(server: &MockServer, api_path: String) {
    Mock::given(method("GET"))
        .and(path(api_path))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "message": "Server Error",
            "documentation_url": "https://docs.github.com/rest"
        })))
        .mount(server)
        .await;
}

pub(crate) fn client(server: &MockServer, repos: &[&str]) -> GitHubClient {
    GitHubClient::with_base_uri(
        "ghp_test",
        "octocat",
        repos.iter().map(|r| r.to_string()).collect(),
        &server.uri(),
    )
    .unwrap()
}
