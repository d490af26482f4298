//! Bounded wait loop over snapshot polls.

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

use crate::error::{BrightDataError, Result};
use crate::types::{JobHandle, JobStatus};

/// Anything that can report the status of a snapshot.
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    async fn poll(&self, handle: &JobHandle) -> Result<JobStatus>;
}

/// Fixed-interval wait policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    pub max_wait: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            max_wait: Duration::from_secs(90),
        }
    }
}

impl PollPolicy {
    pub fn new(interval: Duration, max_wait: Duration) -> Self {
        Self { interval, max_wait }
    }

    /// Upper bound on poll attempts: `max_wait / interval`, never less than one.
    pub fn max_attempts(&self) -> u32 {
        let interval_ms = self.interval.as_millis().max(1);
        let attempts = (self.max_wait.as_millis() / interval_ms).max(1);
        u32::try_from(attempts).unwrap_or(u32::MAX)
    }
}

/// Terminal, non-error result of waiting on a snapshot.
#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    Ready(Vec<serde_json::Value>),
    /// Budget exhausted and the last poll saw an empty result set.
    Empty,
}

/// Poll `handle` until it is ready, fails, or the policy's budget runs out.
///
/// Sleeps one interval before every attempt. Empty results are treated as
/// still processing until the budget is gone. Upstream errors end the wait
/// immediately. Blocks the caller for at most `policy.max_wait` plus the
/// latency of the final poll.
pub async fn wait_for_results<S>(
    source: &S,
    handle: &JobHandle,
    policy: &PollPolicy,
) -> Result<PollOutcome>
where
    S: SnapshotSource + ?Sized,
{
    let started = Instant::now();
    let max_attempts = policy.max_attempts();
    let mut attempts = 0u32;
    let mut last_empty = false;

    while attempts < max_attempts {
        tokio::time::sleep(policy.interval).await;
        attempts += 1;

        match source.poll(handle).await {
            Ok(JobStatus::Ready(records)) => {
                tracing::info!(
                    handle = %handle,
                    attempts,
                    count = records.len(),
                    "Snapshot ready"
                );
                return Ok(PollOutcome::Ready(records));
            }
            Ok(JobStatus::Empty) => {
                last_empty = true;
                tracing::debug!(handle = %handle, attempts, "Snapshot empty, still waiting");
            }
            Ok(JobStatus::Pending) => {
                last_empty = false;
                tracing::debug!(handle = %handle, attempts, "Snapshot still processing");
            }
            Err(e) => {
                tracing::warn!(handle = %handle, attempts, error = %e, "Snapshot poll failed");
                return Err(e);
            }
        }

        if started.elapsed() >= policy.max_wait {
            break;
        }
    }

    let waited = started.elapsed();
    if last_empty {
        tracing::info!(handle = %handle, attempts, "Snapshot finished empty");
        return Ok(PollOutcome::Empty);
    }

    tracing::warn!(
        handle = %handle,
        attempts,
        waited_secs = waited.as_secs(),
        "Gave up waiting for snapshot"
    );
    Err(BrightDataError::Timeout {
        handle: handle.to_string(),
        attempts,
        waited_secs: waited.as_secs(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    /// Replays a script of statuses, then repeats `fallback` forever.
    struct ScriptedSource {
        script: Mutex<VecDeque<Result<JobStatus>>>,
        fallback: JobStatus,
        calls: AtomicU32,
    }

    impl ScriptedSource {
        fn new(script: Vec<Result<JobStatus>>, fallback: JobStatus) -> Self {
            Self {
                script: Mutex::new(script.into()),
                fallback,
                calls: AtomicU32::new(0),
            }
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl SnapshotSource for ScriptedSource {
        async fn poll(&self, _handle: &JobHandle) -> Result<JobStatus> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(self.fallback.clone()))
        }
    }

    fn handle() -> JobHandle {
        JobHandle::new("s_test")
    }

    #[test]
    fn test_max_attempts() {
        assert_eq!(PollPolicy::default().max_attempts(), 18);
        assert_eq!(
            PollPolicy::new(Duration::from_secs(10), Duration::from_secs(5)).max_attempts(),
            1
        );
        assert_eq!(
            PollPolicy::new(Duration::ZERO, Duration::from_millis(3)).max_attempts(),
            3
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_never_ready_times_out_after_budget() {
        let source = ScriptedSource::new(vec![], JobStatus::Pending);
        let started = Instant::now();

        let err = wait_for_results(&source, &handle(), &PollPolicy::default())
            .await
            .unwrap_err();

        assert!(matches!(err, BrightDataError::Timeout { attempts: 18, .. }));
        assert_eq!(source.calls(), 18);
        assert!(started.elapsed() >= Duration::from_secs(90));
        assert!(started.elapsed() < Duration::from_secs(91));
    }

    #[tokio::test(start_paused = true)]
    async fn test_ready_after_pending_returns_records() {
        let source = ScriptedSource::new(
            vec![
                Ok(JobStatus::Pending),
                Ok(JobStatus::Empty),
                Ok(JobStatus::Ready(vec![json!({"name": "A"})])),
            ],
            JobStatus::Pending,
        );
        let started = Instant::now();

        let outcome = wait_for_results(&source, &handle(), &PollPolicy::default())
            .await
            .unwrap();

        assert_eq!(outcome, PollOutcome::Ready(vec![json!({"name": "A"})]));
        assert_eq!(source.calls(), 3);
        assert!(started.elapsed() >= Duration::from_secs(15));
        assert!(started.elapsed() < Duration::from_secs(16));
    }

    #[tokio::test(start_paused = true)]
    async fn test_error_stops_polling_immediately() {
        let source = ScriptedSource::new(
            vec![
                Ok(JobStatus::Pending),
                Err(BrightDataError::Rejected {
                    status: 404,
                    body: "snapshot not found".into(),
                }),
            ],
            JobStatus::Pending,
        );

        let err = wait_for_results(&source, &handle(), &PollPolicy::default())
            .await
            .unwrap_err();

        assert!(matches!(err, BrightDataError::Rejected { status: 404, .. }));
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_persistently_empty_surfaces_empty() {
        let source = ScriptedSource::new(vec![Ok(JobStatus::Pending)], JobStatus::Empty);
        let policy = PollPolicy::new(Duration::from_secs(1), Duration::from_secs(4));

        let outcome = wait_for_results(&source, &handle(), &policy).await.unwrap();

        assert_eq!(outcome, PollOutcome::Empty);
        assert_eq!(source.calls(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_then_pending_is_a_timeout() {
        let source = ScriptedSource::new(vec![Ok(JobStatus::Empty)], JobStatus::Pending);
        let policy = PollPolicy::new(Duration::from_secs(1), Duration::from_secs(3));

        let err = wait_for_results(&source, &handle(), &policy).await.unwrap_err();

        assert!(matches!(err, BrightDataError::Timeout { attempts: 3, .. }));
    }
}
