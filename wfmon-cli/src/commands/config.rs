//! Config command - show the effective configuration

use std::path::Path;

use clap::Args;
use wfmon_core::Config;

/// Arguments for the config command
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Also validate the configuration
    #[arg(long)]
    pub check: bool,
}

impl ConfigArgs {
    /// Execute the config command
    pub fn execute(&self, config_path: Option<&Path>) -> anyhow::Result<()> {
        let config = Config::load_with_overrides(config_path, None)?;

        print!("{}", describe(&config));

        let path = config_path
            .map(Path::to_path_buf)
            .or_else(Config::default_config_path);
        if let Some(path) = path {
            println!();
            println!("Config file: {}", path.display());
            if path.exists() {
                println!("  (exists)");
            } else {
                println!("  (not found - using defaults)");
            }
        }

        if self.check {
            config.validate()?;
            println!();
            println!("Configuration is valid");
        }

        Ok(())
    }
}

/// Describe the configuration with secrets redacted
fn describe(config: &Config) -> String {
    format!(
        "wfmon Configuration\n\
         ===================\n\
         \n\
         Jira:\n  \
         url: {}\n  \
         email: {}\n  \
         token: {}\n  \
         status_review: {}\n  \
         status_done: {}\n  \
         project_keys: {}\n\
         \n\
         GitHub:\n  \
         username: {}\n  \
         token: {}\n  \
         required_approvers: {}\n  \
         repos: {}\n\
         \n\
         Matching:\n  \
         issue_pattern: {}\n\
         \n\
         Fetch:\n  \
         timeout: {}\n",
        config.jira.url,
        config.jira.email,
        redact(&config.jira.token),
        config.jira.status_review,
        config.jira.status_done,
        list(&config.jira.project_keys),
        config.github.username,
        redact(&config.github.token),
        config.github.required_approvers,
        list(&config.github.repos),
        config.matching.issue_pattern,
        humantime::format_duration(config.fetch.timeout),
    )
}

fn list(items: &[String]) -> String {
    if items.is_empty() {
        "(none)".to_string()
    } else {
        items.join(", ")
    }
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() {
        "(not set)"
    } else {
        "********"
    }
}
