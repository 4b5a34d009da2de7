//! Jira REST API types

use chrono::{DateTime, Utc};
use serde::Deserialize;
use wfmon_core::Issue;

/// Response of the issue search endpoint
#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub issues: Vec<JiraIssue>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct JiraIssue {
    pub key: String,
    #[serde(default)]
    pub fields: Option<JiraFields>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct JiraFields {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub status: Option<JiraStatus>,
    #[serde(default)]
    pub updated: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct JiraStatus {
    pub name: String,
}

impl From<JiraIssue> for Issue {
    fn from(issue: JiraIssue) -> Self {
        let fields = issue.fields.unwrap_or_default();

        Issue {
            key: issue.key,
            summary: fields.summary.unwrap_or_default(),
            status: fields.status.map(|s| s.name),
            updated: fields.updated.as_deref().and_then(parse_timestamp),
        }
    }
}

/// Parse Jira timestamps such as `2024-01-15T10:30:00.000+0000`
fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f%z")
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
