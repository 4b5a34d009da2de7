//! Classification of issues and pull requests into actionable insights

use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::{Issue, IssueIdToPrs, PullRequest};

/// Thresholds and status names the classification depends on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsightSettings {
    /// Status name that marks an issue as done
    pub status_done: String,
    /// Approvals a PR needs before it counts as reviewed
    pub required_approvers: usize,
}

/// A done issue whose PR is still open
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoneNotMergedPr {
    pub issue_id: String,
    pub pull_request: PullRequest,
}

/// A PR waiting on the current user's review
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReviewNeededPr(pub PullRequest);

impl Deref for ReviewNeededPr {
    type Target = PullRequest;

    fn deref(&self) -> &PullRequest {
        &self.0
    }
}

impl From<PullRequest> for ReviewNeededPr {
    fn from(pr: PullRequest) -> Self {
        Self(pr)
    }
}

/// A PR with enough approvals whose issue has not reached QA
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewedNotInQaPr {
    pub issue_id: String,
    pub pull_request: PullRequest,
    pub approvers: Vec<String>,
}

/// The three insight categories produced by one fetch cycle
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insights {
    pub done_not_merged_prs: Vec<DoneNotMergedPr>,
    pub need_review_prs: Vec<ReviewNeededPr>,
    pub reviewed_not_in_qa_prs: Vec<ReviewedNotInQaPr>,
}

impl Insights {
    /// True when every category is empty
    pub fn is_empty(&self) -> bool {
        self.done_not_merged_prs.is_empty()
            && self.need_review_prs.is_empty()
            && self.reviewed_not_in_qa_prs.is_empty()
    }
}

/// Build all three insight categories
///
/// Output order follows the input issue order, then each issue's mapped PR
/// order.
pub fn generate_insights(
    issues: &[Issue],
    issue_id_to_open_prs: &IssueIdToPrs,
    prs_needing_my_review: Vec<PullRequest>,
    settings: &InsightSettings,
) -> Insights {
    Insights {
        done_not_merged_prs: done_not_merged_prs(
            issues,
            issue_id_to_open_prs,
            &settings.status_done,
        ),
        need_review_prs: review_needed_prs(prs_needing_my_review),
        reviewed_not_in_qa_prs: reviewed_not_in_qa_prs(
            issues,
            issue_id_to_open_prs,
            settings.required_approvers,
        ),
    }
}

/// One entry per (done issue, open PR) pair
pub fn done_not_merged_prs(
    issues: &[Issue],
    issue_id_to_open_prs: &IssueIdToPrs,
    status_done: &str,
) -> Vec<DoneNotMergedPr> {
    issues
        .iter()
        .filter(|issue| issue.has_status(status_done))
        .flat_map(|issue| {
            mapped_prs(issue_id_to_open_prs, &issue.key).map(move |pr| DoneNotMergedPr {
                issue_id: issue.key.clone(),
                pull_request: pr.clone(),
            })
        })
        .collect()
}

pub fn review_needed_prs(prs_needing_my_review: Vec<PullRequest>) -> Vec<ReviewNeededPr> {
    prs_needing_my_review
        .into_iter()
        .map(ReviewNeededPr::from)
        .collect()
}

/// Mapped PRs with at least `required_approvers` approvals
pub fn reviewed_not_in_qa_prs(
    issues: &[Issue],
    issue_id_to_open_prs: &IssueIdToPrs,
    required_approvers: usize,
) -> Vec<ReviewedNotInQaPr> {
    issues
        .iter()
        .flat_map(|issue| {
            mapped_prs(issue_id_to_open_prs, &issue.key)
                .filter(move |pr| pr.approval_count() >= required_approvers)
                .map(move |pr| ReviewedNotInQaPr {
                    issue_id: issue.key.clone(),
                    pull_request: pr.clone(),
                    approvers: pr.approvers.clone(),
                })
        })
        .collect()
}

fn mapped_prs<'a>(
    issue_id_to_open_prs: &'a IssueIdToPrs,
    issue_id: &str,
) -> impl Iterator<Item = &'a PullRequest> {
    issue_id_to_open_prs
        .get(issue_id)
        .map(Vec::as_slice)
        .unwrap_or_default()
        .iter()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pr(number: u64, approvers: &[&str]) -> PullRequest {
        PullRequest {
            number,
            url: format!("https://github.com/acme/app/pull/{}", number),
            approvers: approvers.iter().map(|a| a.to_string()).collect(),
            ..Default::default()
        }
    }

    fn settings(required_approvers: usize) -> InsightSettings {
        InsightSettings {
            status_done: "Done".to_string(),
            required_approvers,
        }
    }

    #[test]
    fn test_done_issue_with_open_pr() {
        let issues = vec![Issue::new("AB-1", "Done")];
        let mapping = IssueIdToPrs::from([("AB-1".to_string(), vec![pr(5, &[])])]);

        let result = done_not_merged_prs(&issues, &mapping, "Done");

        assert_eq!(
            result,
            vec![DoneNotMergedPr {
                issue_id: "AB-1".to_string(),
                pull_request: pr(5, &[]),
            }]
        );
    }

    #[test]
    fn test_done_issue_with_two_prs_yields_two_entries() {
        let issues = vec![Issue::new("AB-1", "Done"), Issue::new("AB-2", "In Review")];
        let mapping = IssueIdToPrs::from([
            ("AB-1".to_string(), vec![pr(1, &[]), pr(2, &[])]),
            ("AB-2".to_string(), vec![pr(3, &[])]),
        ]);

        let result = done_not_merged_prs(&issues, &mapping, "Done");
        let numbers: Vec<u64> = result.iter().map(|r| r.pull_request.number).collect();
        assert_eq!(numbers, vec![1, 2]);
        assert!(result.iter().all(|r| r.issue_id == "AB-1"));
    }

    #[test]
    fn test_status_match_is_exact() {
        let issues = vec![Issue::new("AB-1", "done"), Issue::new("AB-2", "Done ")];
        let mapping = IssueIdToPrs::from([
            ("AB-1".to_string(), vec![pr(1, &[])]),
            ("AB-2".to_string(), vec![pr(2, &[])]),
        ]);

        assert!(done_not_merged_prs(&issues, &mapping, "Done").is_empty());
    }

    #[test]
    fn test_issue_without_status_or_prs_contributes_nothing() {
        let issues = vec![
            Issue {
                key: "AB-1".to_string(),
                ..Default::default()
            },
            Issue::new("AB-2", "Done"),
        ];
        let mapping = IssueIdToPrs::from([
            ("AB-1".to_string(), vec![pr(1, &[])]),
            ("AB-2".to_string(), vec![]),
        ]);

        assert!(done_not_merged_prs(&issues, &mapping, "Done").is_empty());
    }

    #[test]
    fn test_review_needed_is_identity() {
        let prs = vec![pr(9, &[]), pr(3, &[])];
        let result = review_needed_prs(prs.clone());
        let back: Vec<PullRequest> = result.into_iter().map(|r| r.0).collect();
        assert_eq!(back, prs);
    }

    #[test]
    fn test_approval_threshold_is_inclusive() {
        let issues = vec![Issue::new("AB-1", "In Review")];
        let mapping = IssueIdToPrs::from([(
            "AB-1".to_string(),
            vec![pr(1, &["alice", "bob"]), pr(2, &["alice"])],
        )]);

        let result = reviewed_not_in_qa_prs(&issues, &mapping, 2);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].issue_id, "AB-1");
        assert_eq!(result[0].pull_request.number, 1);
        assert_eq!(result[0].approvers, vec!["alice", "bob"]);
    }

    #[test]
    fn test_zero_threshold_includes_unapproved_prs() {
        let issues = vec![Issue::new("AB-1", "Done")];
        let mapping = IssueIdToPrs::from([("AB-1".to_string(), vec![pr(1, &[])])]);

        let result = reviewed_not_in_qa_prs(&issues, &mapping, 0);
        assert_eq!(result.len(), 1);
        assert!(result[0].approvers.is_empty());
    }

    #[test]
    fn test_reviewed_ignores_unlisted_issues() {
        let issues = vec![Issue::new("AB-1", "Done")];
        let mapping = IssueIdToPrs::from([("ZZ-1".to_string(), vec![pr(1, &["alice"])])]);

        assert!(reviewed_not_in_qa_prs(&issues, &mapping, 1).is_empty());
    }

    #[test]
    fn test_output_follows_issue_order() {
        let issues = vec![Issue::new("AB-2", "Done"), Issue::new("AB-1", "Done")];
        let mapping = IssueIdToPrs::from([
            ("AB-1".to_string(), vec![pr(1, &["a"])]),
            ("AB-2".to_string(), vec![pr(2, &["a"])]),
        ]);

        let insights = generate_insights(&issues, &mapping, Vec::new(), &settings(1));
        let done: Vec<&str> = insights
            .done_not_merged_prs
            .iter()
            .map(|r| r.issue_id.as_str())
            .collect();
        let reviewed: Vec<&str> = insights
            .reviewed_not_in_qa_prs
            .iter()
            .map(|r| r.issue_id.as_str())
            .collect();
        assert_eq!(done, vec!["AB-2", "AB-1"]);
        assert_eq!(reviewed, vec!["AB-2", "AB-1"]);
    }

    #[test]
    fn test_empty_inputs_yield_empty_insights() {
        let insights = generate_insights(&[], &IssueIdToPrs::new(), Vec::new(), &settings(1));

        assert!(insights.is_empty());
        assert_eq!(insights, Insights::default());

        let json = serde_json::to_value(&insights).unwrap();
        assert_eq!(json["done_not_merged_prs"], serde_json::json!([]));
        assert_eq!(json["need_review_prs"], serde_json::json!([]));
        assert_eq!(json["reviewed_not_in_qa_prs"], serde_json::json!([]));
    }
}
