//! Concurrent retrieval of issues and pull requests, followed by
//! correlation and classification

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, info};

use crate::{
    generate_insights, CodeHost, InsightSettings, Insights, IssueTracker, Matcher, SourceError,
    SourceResult,
};

/// The three independent retrieval stages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStage {
    MyIssues,
    OpenPrs,
    PrsNeedingMyReview,
}

impl fmt::Display for FetchStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FetchStage::MyIssues => "my issues",
            FetchStage::OpenPrs => "open PRs",
            FetchStage::PrsNeedingMyReview => "PRs needing my review",
        };
        f.write_str(name)
    }
}

/// Failure of a whole fetch cycle
#[derive(Error, Debug)]
pub enum FetchError {
    /// A retrieval stage failed
    #[error("failed to fetch {stage}: {source}")]
    Stage {
        stage: FetchStage,
        #[source]
        source: SourceError,
    },

    /// The caller's deadline passed before all stages finished
    #[error("fetch timed out after {0:?}")]
    TimedOut(Duration),
}

impl FetchError {
    /// The failing stage, if the error came from one
    pub fn stage(&self) -> Option<FetchStage> {
        match self {
            FetchError::Stage { stage, .. } => Some(*stage),
            FetchError::TimedOut(_) => None,
        }
    }
}

/// Runs the three retrieval stages concurrently and classifies the results
pub struct Fetcher {
    issue_tracker: Arc<dyn IssueTracker>,
    code_host: Arc<dyn CodeHost>,
    matcher: Matcher,
    settings: InsightSettings,
}

impl Fetcher {
    pub fn new(
        issue_tracker: Arc<dyn IssueTracker>,
        code_host: Arc<dyn CodeHost>,
        matcher: Matcher,
        settings: InsightSettings,
    ) -> Self {
        Self {
            issue_tracker,
            code_host,
            matcher,
            settings,
        }
    }

    /// Fetch everything and build insights
    ///
    /// Each stage runs in its own task and is allowed to finish even when a
    /// sibling fails. Results are only inspected once all three are done;
    /// any failure discards the whole cycle.
    ///
    /// Dropping the returned future aborts every stage still running.
    pub async fn fetch_all(&self) -> Result<Insights, FetchError> {
        let issue_tracker = Arc::clone(&self.issue_tracker);
        let mut my_issues = StageTask::spawn(async move {
            issue_tracker.fetch_my_issues_in_review_or_done().await
        });

        let code_host = Arc::clone(&self.code_host);
        let mut open_prs = StageTask::spawn(async move { code_host.fetch_open_prs().await });

        let code_host = Arc::clone(&self.code_host);
        let mut prs_needing_my_review =
            StageTask::spawn(async move { code_host.fetch_prs_needing_my_review().await });

        let (my_issues, open_prs, prs_needing_my_review) = tokio::join!(
            &mut my_issues.0,
            &mut open_prs.0,
            &mut prs_needing_my_review.0
        );

        let my_issues = stage_result(FetchStage::MyIssues, my_issues)?;
        debug!(count = my_issues.len(), "Fetched my issues");

        let open_prs = stage_result(FetchStage::OpenPrs, open_prs)?;
        debug!(count = open_prs.len(), "Fetched open PRs");

        let prs_needing_my_review =
            stage_result(FetchStage::PrsNeedingMyReview, prs_needing_my_review)?;
        debug!(
            count = prs_needing_my_review.len(),
            "Fetched PRs needing my review"
        );

        let issue_id_to_open_prs = self.matcher.issue_id_to_prs(open_prs);
        debug!(
            issues = issue_id_to_open_prs.len(),
            "Matched open PRs to issues"
        );

        let insights = generate_insights(
            &my_issues,
            &issue_id_to_open_prs,
            prs_needing_my_review,
            &self.settings,
        );

        info!(
            done_not_merged = insights.done_not_merged_prs.len(),
            need_review = insights.need_review_prs.len(),
            reviewed_not_in_qa = insights.reviewed_not_in_qa_prs.len(),
            "Generated insights"
        );

        Ok(insights)
    }

    /// Like [`Fetcher::fetch_all`], bounded by a deadline
    ///
    /// Stages still running at the deadline are aborted along with any
    /// requests they have in flight.
    pub async fn fetch_all_within(&self, timeout: Duration) -> Result<Insights, FetchError> {
        tokio::time::timeout(timeout, self.fetch_all())
            .await
            .map_err(|_| FetchError::TimedOut(timeout))?
    }
}

impl fmt::Debug for Fetcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fetcher")
            .field("matcher", &self.matcher)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

/// A spawned stage that is aborted when dropped
struct StageTask<T>(JoinHandle<T>);

impl<T: Send + 'static> StageTask<T> {
    fn spawn<F>(stage: F) -> Self
    where
        F: std::future::Future<Output = T> + Send + 'static,
    {
        Self(tokio::spawn(stage))
    }
}

impl<T> Drop for StageTask<T> {
    fn drop(&mut self) {
        self.0.abort();
    }
}

fn stage_result<T>(
    stage: FetchStage,
    joined: Result<SourceResult<T>, JoinError>,
) -> Result<T, FetchError> {
    match joined {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(source)) => Err(FetchError::Stage { stage, source }),
        Err(join_error) => Err(FetchError::Stage {
            stage,
            source: Box::new(join_error),
        }),
    }
}
