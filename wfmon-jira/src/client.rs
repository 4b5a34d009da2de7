//! Jira REST client using reqwest

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::{debug, info};
use url::Url;
use wfmon_core::{Issue, IssueTracker, JiraConfig, SourceResult};

use crate::types::SearchResponse;
use crate::{Error, Result};

const SEARCH_PATH: &str = "rest/api/2/search";
const SEARCH_FIELDS: &str = "summary,status,updated";

/// Jira client scoped to the current user's issues
#[derive(Clone)]
pub struct JiraClient {
    http: reqwest::Client,
    base_url: Url,
    email: String,
    token: String,
    status_review: String,
    status_done: String,
    project_keys: Vec<String>,
}

impl JiraClient {
    /// Create a client from the `[jira]` config section
    pub fn from_config(config: &JiraConfig) -> Result<Self> {
        let mut base_url = Url::parse(&config.url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        info!(url = %base_url, "Created Jira client");

        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
            email: config.email.clone(),
            token: config.token.clone(),
            status_review: config.status_review.clone(),
            status_done: config.status_done.clone(),
            project_keys: config.project_keys.clone(),
        })
    }

    /// The JQL this client searches with
    pub fn jql(&self) -> String {
        build_jql(&self.status_review, &self.status_done, &self.project_keys)
    }

    /// Issues assigned to the current user in review or done, updated in the
    /// last 14 days, newest first
    ///
    /// Only the first page of results is read.
    pub async fn search_my_issues_in_review_or_done(&self) -> Result<Vec<Issue>> {
        let jql = self.jql();
        let url = self.base_url.join(SEARCH_PATH)?;
        debug!(jql = %jql, "Searching Jira issues");

        let response = self
            .http
            .get(url)
            .basic_auth(&self.email, Some(&self.token))
            .query(&[("jql", jql.as_str()), ("fields", SEARCH_FIELDS)])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(Error::Auth(format!(
                "Jira rejected the credentials for {} ({})",
                self.email, status
            )));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Status {
                status: status.as_u16(),
                body,
            });
        }

        let search: SearchResponse = response.json().await?;
        let issues: Vec<Issue> = search.issues.into_iter().map(Issue::from).collect();

        info!(count = issues.len(), "Fetched Jira issues");

        Ok(issues)
    }
}

impl std::fmt::Debug for JiraClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JiraClient")
            .field("base_url", &self.base_url.as_str())
            .field("email", &self.email)
            .field("project_keys", &self.project_keys)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl IssueTracker for JiraClient {
    async fn fetch_my_issues_in_review_or_done(&self) -> SourceResult<Vec<Issue>> {
        Ok(self.search_my_issues_in_review_or_done().await?)
    }
}

/// Build the JQL for the current user's recently updated issues in the
/// review or done status, optionally limited to some projects
pub fn build_jql(status_review: &str, status_done: &str, project_keys: &[String]) -> String {
    let mut jql = format!(
        "assignee = currentUser() AND updated >= -14d AND status IN ({}, {})",
        quote(status_review),
        quote(status_done)
    );

    if !project_keys.is_empty() {
        jql.push_str(&format!(" AND project IN ({})", project_keys.join(", ")));
    }

    jql.push_str(" ORDER BY updated DESC");
    jql
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}
