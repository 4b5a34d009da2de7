//! wfmon Jira - issue tracker adapter for workflow-monitor
//!
//! This crate queries Jira for the current user's issues that are in review
//! or done and were updated recently.

mod client;
mod error;
mod types;

pub use client::{build_jql, JiraClient};
pub use error::{Error, Result};
