//! Result-source trait.
//!
//! A [`Backend`] stands in for the external compile-and-simulate service.
//! The relay only ever needs the job lifecycle:
//!
//! ```text
//!   submit() ──→ status() ──→ result() / metadata()
//! ```
//!
//! | Method | Kind | Required | Returns |
//! |--------|------|----------|---------|
//! | `name()` | sync | yes | `&str` |
//! | `submit()` | async | yes | `HalResult<JobId>` |
//! | `status()` | async | yes | `HalResult<JobStatus>` |
//! | `result()` | async | yes | `HalResult<JobResult>` |
//! | `metadata()` | async | yes | `HalResult<JobMetadata>` |
//! | `cancel()` | async | yes | `HalResult<()>` |
//! | `wait()` | async | provided | `HalResult<JobResult>` |

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::error::{HalError, HalResult};
use crate::job::{JobId, JobStatus};
use crate::metadata::JobMetadata;
use crate::result::JobResult;

/// Interval between status polls in [`Backend::wait`].
pub const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Maximum number of polls before [`Backend::wait`] gives up (5 minutes).
pub const MAX_POLLS: u32 = 600;

/// A source of job results.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Get the name of this backend.
    fn name(&self) -> &str;

    /// Submit a circuit description for `shots` samples.
    ///
    /// The job MUST start in `Queued` status.
    async fn submit(&self, circuit: &str, shots: u64) -> HalResult<JobId>;

    /// Get the status of a job.
    async fn status(&self, job_id: &JobId) -> HalResult<JobStatus>;

    /// Get the result of a completed job.
    async fn result(&self, job_id: &JobId) -> HalResult<JobResult>;

    /// Get the descriptive metadata recorded for a job.
    async fn metadata(&self, job_id: &JobId) -> HalResult<JobMetadata>;

    /// Cancel a pending job.
    async fn cancel(&self, job_id: &JobId) -> HalResult<()>;

    /// Wait for a job to complete and return its result.
    async fn wait(&self, job_id: &JobId) -> HalResult<JobResult> {
        for poll in 0..MAX_POLLS {
            match self.status(job_id).await? {
                JobStatus::Completed => {
                    debug!("Job {} completed after {} polls", job_id, poll + 1);
                    return self.result(job_id).await;
                }
                JobStatus::Failed(msg) => return Err(HalError::JobFailed(msg)),
                JobStatus::Cancelled => return Err(HalError::JobCancelled),
                JobStatus::Queued | JobStatus::Running => {
                    tokio::time::sleep(POLL_INTERVAL).await;
                }
            }
        }

        Err(HalError::Timeout(job_id.0.clone()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    /// Reports `Running` a fixed number of times before completing.
    struct SlowBackend {
        polls_until_done: u32,
        polls: AtomicU32,
    }

    #[async_trait]
    impl Backend for SlowBackend {
        fn name(&self) -> &str {
            "slow"
        }

        async fn submit(&self, _circuit: &str, _shots: u64) -> HalResult<JobId> {
            Ok(JobId::new("slow-1"))
        }

        async fn status(&self, _job_id: &JobId) -> HalResult<JobStatus> {
            let seen = self.polls.fetch_add(1, Ordering::SeqCst);
            if seen >= self.polls_until_done {
                Ok(JobStatus::Completed)
            } else {
                Ok(JobStatus::Running)
            }
        }

        async fn result(&self, _job_id: &JobId) -> HalResult<JobResult> {
            Ok(JobResult::default().with_circuit("slow"))
        }

        async fn metadata(&self, _job_id: &JobId) -> HalResult<JobMetadata> {
            Ok(JobMetadata::default())
        }

        async fn cancel(&self, _job_id: &JobId) -> HalResult<()> {
            Ok(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_polls_until_completed() {
        let backend = SlowBackend {
            polls_until_done: 3,
            polls: AtomicU32::new(0),
        };
        let id = backend.submit("bell", 10).await.unwrap();
        let result = backend.wait(&id).await.unwrap();

        assert_eq!(result.circuit.as_deref(), Some("slow"));
        assert_eq!(backend.polls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_times_out() {
        let backend = SlowBackend {
            polls_until_done: u32::MAX,
            polls: AtomicU32::new(0),
        };
        let err = backend.wait(&JobId::new("slow-1")).await.unwrap_err();
        assert!(matches!(err, HalError::Timeout(id) if id == "slow-1"));
    }
}
