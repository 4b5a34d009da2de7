//! wfmon GitHub - code host adapter for workflow-monitor
//!
//! This crate lists open pull requests with their approvers and searches
//! for pull requests awaiting the current user's review.

mod client;
mod error;
#[cfg(test)]
mod fixtures;
mod pr;
mod review;
mod search;

pub use client::{parse_repo, GitHubClient};
pub use error::{Error, Result};
pub use pr::{pull_request_from_full, pull_request_from_search_result};
pub use review::collect_approvers;
pub use search::review_requested_query;
