//! Aggregator — fans a search out to every registered board and merges the results.
//!
//! Each adapter runs in its own task under a timeout. The merged list follows
//! registration order, never completion order.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use serde::Serialize;
use tracing::{info, warn};

use crate::models::job::{JobBoard, JobRecord};
use crate::sources::{JobSource, SourceOutcome, SourceStatus};

/// Per-board summary returned alongside the merged listings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceReport {
    pub source: JobBoard,
    pub status: SourceStatus,
    pub count: usize,
}

#[derive(Debug, Clone)]
pub struct Aggregation {
    pub jobs: Vec<JobRecord>,
    pub reports: Vec<SourceReport>,
}

/// Queries every source concurrently and waits for all of them to settle.
pub async fn aggregate(sources: &[Arc<dyn JobSource>], timeout: Duration) -> Aggregation {
    let handles = sources.iter().map(|source| {
        let source = Arc::clone(source);
        let board = source.board();
        let handle = tokio::spawn(async move {
            match tokio::time::timeout(timeout, source.fetch_jobs()).await {
                Ok(outcome) => outcome,
                Err(_) => {
                    warn!("{board} did not answer within {}s", timeout.as_secs_f32());
                    SourceOutcome::empty(board, SourceStatus::TimedOut)
                }
            }
        });
        (board, handle)
    });

    let outcomes = join_all(handles.map(|(board, handle)| async move {
        match handle.await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("{board} task aborted: {e}");
                SourceOutcome::empty(board, SourceStatus::Failed)
            }
        }
    }))
    .await;

    let mut jobs = Vec::new();
    let mut reports = Vec::with_capacity(outcomes.len());
    for outcome in outcomes {
        reports.push(SourceReport {
            source: outcome.board,
            status: outcome.status,
            count: outcome.jobs.len(),
        });
        jobs.extend(outcome.jobs);
    }

    info!(
        "Aggregated {} listings from {} sources ({} healthy)",
        jobs.len(),
        reports.len(),
        reports.iter().filter(|r| r.status == SourceStatus::Ok).count()
    );

    Aggregation { jobs, reports }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::testing::{job, FakeSource};

    fn ids(jobs: &[JobRecord]) -> Vec<&str> {
        jobs.iter().map(|j| j.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_concatenates_in_registration_order() {
        let sources: Vec<Arc<dyn JobSource>> = vec![
            Arc::new(FakeSource::ok(
                JobBoard::RemoteOk,
                vec![job(JobBoard::RemoteOk, "r1", "a"), job(JobBoard::RemoteOk, "r2", "b")],
            )),
            Arc::new(FakeSource::ok(JobBoard::Arbeitnow, vec![job(JobBoard::Arbeitnow, "a1", "c")])),
            Arc::new(FakeSource::ok(JobBoard::Remotive, vec![job(JobBoard::Remotive, "m1", "d")])),
        ];

        let result = aggregate(&sources, Duration::from_secs(5)).await;
        assert_eq!(ids(&result.jobs), vec!["r1", "r2", "a1", "m1"]);
        assert!(result.reports.iter().all(|r| r.status == SourceStatus::Ok));
        assert_eq!(result.reports[0].count, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_completion_order_does_not_change_output_order() {
        let mut slow = FakeSource::ok(JobBoard::RemoteOk, vec![job(JobBoard::RemoteOk, "slow", "a")]);
        slow.delay = Some(Duration::from_secs(2));
        let sources: Vec<Arc<dyn JobSource>> = vec![
            Arc::new(slow),
            Arc::new(FakeSource::ok(JobBoard::Remotive, vec![job(JobBoard::Remotive, "fast", "b")])),
        ];

        let result = aggregate(&sources, Duration::from_secs(10)).await;
        assert_eq!(ids(&result.jobs), vec!["slow", "fast"]);
    }

    #[tokio::test]
    async fn test_one_failing_source_does_not_sink_the_rest() {
        let sources: Vec<Arc<dyn JobSource>> = vec![
            Arc::new(FakeSource::ok(JobBoard::RemoteOk, vec![job(JobBoard::RemoteOk, "r1", "a")])),
            Arc::new(FakeSource::failing(JobBoard::Arbeitnow)),
            Arc::new(FakeSource::ok(JobBoard::Remotive, vec![job(JobBoard::Remotive, "m1", "b")])),
        ];

        let result = aggregate(&sources, Duration::from_secs(5)).await;
        assert_eq!(ids(&result.jobs), vec!["r1", "m1"]);
        assert_eq!(result.reports[1].status, SourceStatus::Failed);
        assert_eq!(result.reports[1].count, 0);
    }

    #[tokio::test]
    async fn test_all_sources_failing_yields_empty() {
        let sources: Vec<Arc<dyn JobSource>> = vec![
            Arc::new(FakeSource::failing(JobBoard::RemoteOk)),
            Arc::new(FakeSource::failing(JobBoard::Arbeitnow)),
            Arc::new(FakeSource::failing(JobBoard::Remotive)),
        ];

        let result = aggregate(&sources, Duration::from_secs(5)).await;
        assert!(result.jobs.is_empty());
        assert_eq!(result.reports.len(), 3);
    }

    #[tokio::test]
    async fn test_panicking_source_is_isolated() {
        let mut broken = FakeSource::ok(JobBoard::Arbeitnow, vec![]);
        broken.panics = true;
        let sources: Vec<Arc<dyn JobSource>> = vec![
            Arc::new(broken),
            Arc::new(FakeSource::ok(JobBoard::Remotive, vec![job(JobBoard::Remotive, "m1", "a")])),
        ];

        let result = aggregate(&sources, Duration::from_secs(5)).await;
        assert_eq!(ids(&result.jobs), vec!["m1"]);
        assert_eq!(result.reports[0].status, SourceStatus::Failed);
    }

    // Upstream calls are bounded; an unresponsive board is reported as timed out.
    #[tokio::test(start_paused = true)]
    async fn test_unresponsive_source_times_out() {
        let mut hung = FakeSource::ok(JobBoard::RemoteOk, vec![job(JobBoard::RemoteOk, "late", "a")]);
        hung.delay = Some(Duration::from_secs(3600));
        let sources: Vec<Arc<dyn JobSource>> = vec![
            Arc::new(hung),
            Arc::new(FakeSource::ok(JobBoard::Remotive, vec![job(JobBoard::Remotive, "m1", "b")])),
        ];

        let result = aggregate(&sources, Duration::from_secs(15)).await;
        assert_eq!(ids(&result.jobs), vec!["m1"]);
        assert_eq!(result.reports[0].status, SourceStatus::TimedOut);
        assert_eq!(result.reports[1].status, SourceStatus::Ok);
    }
}
