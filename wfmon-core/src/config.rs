//! Configuration management for wfmon
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (JIRA_API_TOKEN, GITHUB_TOKEN)
//! 3. Config file (~/.config/wfmon/config.toml), with `${VAR}` references
//!    expanded from the environment
//! 4. Default values

use std::path::{Path, PathBuf};
use std::time::Duration;

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Error, InsightSettings, Matcher, Result};

/// Issue tracker (Jira) configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct JiraConfig {
    /// Base URL of the Jira site
    pub url: String,

    /// Account email used for basic auth
    pub email: String,

    /// API token used for basic auth
    pub token: String,

    /// Status name meaning "in review"
    pub status_review: String,

    /// Status name meaning "done"
    pub status_done: String,

    /// Restrict issues to these project keys (empty means all)
    pub project_keys: Vec<String>,
}

impl Default for JiraConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            email: String::new(),
            token: String::new(),
            status_review: "In Review".to_string(),
            status_done: "Done".to_string(),
            project_keys: Vec::new(),
        }
    }
}

/// Code host (GitHub) configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// Login of the current user
    pub username: String,

    /// Personal access token
    pub token: String,

    /// Approvals a PR needs to count as reviewed
    pub required_approvers: usize,

    /// Repositories to watch, as `owner/name`
    pub repos: Vec<String>,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            username: String::new(),
            token: String::new(),
            required_approvers: 1,
            repos: Vec::new(),
        }
    }
}

/// Branch-name matching configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Regular expression locating the issue key in a branch name
    pub issue_pattern: String,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            issue_pattern: r"[A-Z]+-\d+".to_string(),
        }
    }
}

/// Fetch cycle configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Upper bound on one fetch cycle
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub jira: JiraConfig,
    pub github: GitHubConfig,
    pub matching: MatchingConfig,
    pub fetch: FetchConfig,
}

impl Config {
    /// Load configuration from the default config file location
    ///
    /// Returns default config if file doesn't exist
    pub fn load() -> Result<Self> {
        if let Some(path) = Self::default_config_path() {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(Error::Io)?;
        debug!(path = %path.display(), "Loaded config file");
        Self::from_toml(&contents)
    }

    /// Parse configuration text, expanding environment references first
    pub fn from_toml(contents: &str) -> Result<Self> {
        let expanded = expand_env(contents)?;
        toml::from_str(&expanded)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Get the default config file path
    ///
    /// Returns `~/.config/wfmon/config.toml` on Unix
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("wfmon").join("config.toml"))
    }

    /// Apply environment variable overrides
    ///
    /// Supported variables:
    /// - JIRA_API_TOKEN: Jira API token
    /// - GITHUB_TOKEN: GitHub personal access token
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(token) = non_empty_env("JIRA_API_TOKEN") {
            self.jira.token = token;
        }

        if let Some(token) = non_empty_env("GITHUB_TOKEN") {
            self.github.token = token;
        }

        self
    }

    /// Apply CLI flag overrides
    pub fn with_cli_overrides(mut self, timeout: Option<Duration>) -> Self {
        if let Some(timeout) = timeout {
            self.fetch.timeout = timeout;
        }

        self
    }

    /// Load configuration with all overrides applied
    ///
    /// Priority: CLI > env > config file > defaults
    pub fn load_with_overrides(path: Option<&Path>, timeout: Option<Duration>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => Self::load()?,
        };

        Ok(config.with_env_overrides().with_cli_overrides(timeout))
    }

    /// Check that every required value is present
    pub fn validate(&self) -> Result<()> {
        let required = [
            (self.jira.url.is_empty(), "jira.url is required"),
            (self.jira.email.is_empty(), "jira.email is required"),
            (self.jira.token.is_empty(), "jira.token is required"),
            (self.github.username.is_empty(), "github.username is required"),
            (self.github.token.is_empty(), "github.token is required"),
            (
                self.matching.issue_pattern.is_empty(),
                "matching.issue_pattern is required",
            ),
            (
                self.github.repos.is_empty(),
                "at least one github repo is required",
            ),
        ];

        if let Some((_, message)) = required.iter().find(|(missing, _)| *missing) {
            return Err(Error::Config(message.to_string()));
        }

        if Matcher::new(&self.matching.issue_pattern)?.matches_empty() {
            return Err(Error::Config(format!(
                "matching.issue_pattern {:?} must not match an empty string",
                self.matching.issue_pattern
            )));
        }

        Ok(())
    }

    /// Settings for insight classification
    pub fn insight_settings(&self) -> InsightSettings {
        InsightSettings {
            status_done: self.jira.status_done.clone(),
            required_approvers: self.github.required_approvers,
        }
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Replace `${VAR}` and `$VAR` with environment values; unset variables
/// become empty strings
fn expand_env(contents: &str) -> Result<String> {
    let env_ref = Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}|\$([A-Za-z_][A-Za-z0-9_]*)")?;

    let expanded = env_ref
        .replace_all(contents, |caps: &Captures<'_>| {
            let name = caps
                .get(1)
                .or_else(|| caps.get(2))
                .map(|m| m.as_str())
                .unwrap_or_default();
            std::env::var(name).unwrap_or_default()
        })
        .into_owned();

    Ok(expanded)
}
