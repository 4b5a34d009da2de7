//! Fetch command - one fetch cycle rendered as text or JSON

use std::fmt::Write as _;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::Args;
use wfmon_core::{Config, Fetcher, Insights, Matcher};
use wfmon_github::GitHubClient;
use wfmon_jira::JiraClient;

/// Arguments for the fetch command
#[derive(Args, Debug, Default)]
pub struct FetchArgs {
    /// Print insights as JSON
    #[arg(long)]
    pub json: bool,

    /// Upper bound on the fetch (e.g. "30s", "1m"); overrides config
    #[arg(short, long, value_parser = humantime::parse_duration)]
    pub timeout: Option<Duration>,
}

impl FetchArgs {
    /// Execute the fetch command
    pub async fn execute(&self, config_path: Option<&Path>) -> anyhow::Result<()> {
        let config = Config::load_with_overrides(config_path, self.timeout)?;
        config.validate()?;

        tracing::debug!(
            jira_url = %config.jira.url,
            project_keys = ?config.jira.project_keys,
            repos = ?config.github.repos,
            "Configuration loaded"
        );

        let jira = JiraClient::from_config(&config.jira)?;
        let github = GitHubClient::from_config(&config.github)?;
        let matcher = Matcher::new(&config.matching.issue_pattern)?;
        let fetcher = Fetcher::new(
            Arc::new(jira),
            Arc::new(github),
            matcher,
            config.insight_settings(),
        );

        let started = Instant::now();
        let insights = fetcher.fetch_all_within(config.fetch.timeout).await?;
        let elapsed = started.elapsed();

        if self.json {
            println!("{}", serde_json::to_string_pretty(&insights)?);
        } else {
            print!("{}", render(&insights, elapsed));
        }

        Ok(())
    }
}

/// Render all three insight sections as plain text
pub fn render(insights: &Insights, elapsed: Duration) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Data loaded in {:.2}s", elapsed.as_secs_f64());
    out.push('\n');

    let _ = writeln!(
        out,
        "Ticket done, PRs not merged ({})",
        insights.done_not_merged_prs.len()
    );
    if insights.done_not_merged_prs.is_empty() {
        out.push_str(NO_ITEMS);
    }
    for item in &insights.done_not_merged_prs {
        let pr = &item.pull_request;
        let _ = writeln!(out, "  {} {}", item.issue_id, pr.title);
        let _ = writeln!(out, "    PR #{} by {} ({}) {}", pr.number, pr.author, pr.state, pr.url);
    }
    out.push('\n');

    let _ = writeln!(out, "Need review ({})", insights.need_review_prs.len());
    if insights.need_review_prs.is_empty() {
        out.push_str(NO_ITEMS);
    }
    for pr in &insights.need_review_prs {
        let _ = writeln!(out, "  #{} {}", pr.number, pr.title);
        let _ = writeln!(out, "    PR by {} in {} {}", pr.author, pr.repo, pr.url);
    }
    out.push('\n');

    let _ = writeln!(
        out,
        "Ready for QA ({})",
        insights.reviewed_not_in_qa_prs.len()
    );
    if insights.reviewed_not_in_qa_prs.is_empty() {
        out.push_str(NO_ITEMS);
    }
    for item in &insights.reviewed_not_in_qa_prs {
        let pr = &item.pull_request;
        let _ = writeln!(out, "  {} {}", item.issue_id, pr.title);
        if item.approvers.is_empty() {
            let _ = writeln!(out, "    PR #{} - no approvals yet {}", pr.number, pr.url);
        } else {
            let _ = writeln!(
                out,
                "    PR #{} approved by: {} {}",
                pr.number,
                item.approvers.join(", "),
                pr.url
            );
        }
    }

    out
}

const NO_ITEMS: &str = "  No items found!\n";
