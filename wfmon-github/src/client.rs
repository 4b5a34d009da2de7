//! GitHub API client using octocrab

use async_trait::async_trait;
use octocrab::Octocrab;
use tracing::info;
use wfmon_core::{CodeHost, GitHubConfig, PullRequest, SourceResult};

use crate::{Error, Result};

/// GitHub API client for the watched repositories
#[derive(Clone)]
pub struct GitHubClient {
    client: Octocrab,
    username: String,
    repos: Vec<String>,
}

impl GitHubClient {
    /// Create a new GitHub client acting as `username`
    pub fn new(
        token: impl Into<String>,
        username: impl Into<String>,
        repos: Vec<String>,
    ) -> Result<Self> {
        Self::build(token.into(), username.into(), repos, None)
    }

    /// Create a client that talks to the API at `base_uri` instead of
    /// api.github.com
    pub fn with_base_uri(
        token: impl Into<String>,
        username: impl Into<String>,
        repos: Vec<String>,
        base_uri: &str,
    ) -> Result<Self> {
        Self::build(token.into(), username.into(), repos, Some(base_uri))
    }

    fn build(
        token: String,
        username: String,
        repos: Vec<String>,
        base_uri: Option<&str>,
    ) -> Result<Self> {
        if token.is_empty() {
            return Err(Error::Auth("GitHub token is empty".to_string()));
        }

        let mut builder = Octocrab::builder();
        if let Some(uri) = base_uri {
            builder = builder
                .base_uri(uri)
                .map_err(|e| Error::Parse(format!("Invalid GitHub API URL {}: {}", uri, e)))?;
        }

        let client = builder
            .personal_token(token)
            .build()
            .map_err(|e| Error::Auth(format!("Failed to create GitHub client: {}", e)))?;

        info!(username = %username, repos = repos.len(), "Created GitHub client");

        Ok(Self {
            client,
            username,
            repos,
        })
    }

    /// Create a client from the `[github]` config section
    pub fn from_config(config: &GitHubConfig) -> Result<Self> {
        Self::new(
            config.token.clone(),
            config.username.clone(),
            config.repos.clone(),
        )
    }

    /// Login of the current user
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Watched repositories as configured
    pub fn repos(&self) -> &[String] {
        &self.repos
    }

    /// Get the underlying octocrab client
    pub fn client(&self) -> &Octocrab {
        &self.client
    }
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("username", &self.username)
            .field("repos", &self.repos)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl CodeHost for GitHubClient {
    async fn fetch_open_prs(&self) -> SourceResult<Vec<PullRequest>> {
        Ok(self.list_open_prs().await?)
    }

    async fn fetch_prs_needing_my_review(&self) -> SourceResult<Vec<PullRequest>> {
        Ok(self.search_prs_needing_my_review().await?)
    }
}

/// Split an `owner/name` repository identifier
pub fn parse_repo(repo: &str) -> Result<(String, String)> {
    match repo.split('/').collect::<Vec<_>>().as_slice() {
        [owner, name] if !owner.is_empty() && !name.is_empty() => {
            Ok((owner.to_string(), name.to_string()))
        }
        _ => Err(Error::Parse(format!(
            "Invalid repository format: {}. Expected owner/repo",
            repo
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_repo() {
        let (owner, repo) = parse_repo("owner/repo").unwrap();
        assert_eq!(owner, "owner");
        assert_eq!(repo, "repo");
    }

    #[test]
    fn test_parse_repo_missing_slash() {
        assert!(parse_repo("ownerrepo").is_err());
    }

    #[test]
    fn test_parse_repo_too_many_parts() {
        assert!(parse_repo("owner/repo/extra").is_err());
    }

    #[test]
    fn test_parse_repo_empty() {
        assert!(parse_repo("").is_err());
        assert!(parse_repo("/repo").is_err());
        assert!(parse_repo("owner/").is_err());
    }

    #[test]
    fn test_empty_token_rejected() {
        let result = GitHubClient::new("", "octocat", vec!["acme/app".to_string()]);
        assert!(matches!(result, Err(Error::Auth(_))));
    }
}
