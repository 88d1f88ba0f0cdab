//! Mock backend implementation.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use rustc_hash::FxHashMap;
use tracing::{debug, instrument};
use uuid::Uuid;

use krump_hal::{Backend, HalError, HalResult, Job, JobId, JobMetadata, JobResult, JobStatus};

/// Name reported by the mock backend.
pub const MOCK_BACKEND_NAME: &str = "mock-simulator";

/// Job data for the mock backend.
struct MockJob {
    job: Job,
    result: JobResult,
    /// Status polls left before the job reports completion.
    pending_polls: u32,
}

/// Bell-state result source.
///
/// Every job yields `{"00": ⌈shots/2⌉, "11": ⌊shots/2⌋}`. By default jobs
/// complete during `submit`; [`MockBackend::with_pending_polls`] keeps them
/// running for a number of status polls first.
pub struct MockBackend {
    /// Active jobs.
    jobs: Arc<Mutex<FxHashMap<String, MockJob>>>,
    pending_polls: u32,
}

impl MockBackend {
    /// Create a mock backend whose jobs finish immediately.
    pub fn new() -> Self {
        Self {
            jobs: Arc::new(Mutex::new(FxHashMap::default())),
            pending_polls: 0,
        }
    }

    /// Keep each job `Running` for `polls` calls to `status`.
    pub fn with_pending_polls(polls: u32) -> Self {
        Self {
            pending_polls: polls,
            ..Self::new()
        }
    }

    /// Number of jobs submitted so far.
    pub fn job_count(&self) -> usize {
        self.jobs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Ideal Bell-state distribution over `shots`.
    fn bell_result(circuit: &str, shots: u64) -> JobResult {
        let zeros = shots.div_ceil(2);
        let ones = shots / 2;
        let measurements = BTreeMap::from([("00".to_string(), zeros), ("11".to_string(), ones)]);

        let mut result = JobResult::from_counts(measurements)
            .with_circuit(circuit)
            .with_backend(MOCK_BACKEND_NAME);
        result.n_qubits = Some(2);
        result
    }

    fn with_job<T>(&self, job_id: &JobId, f: impl FnOnce(&mut MockJob) -> T) -> HalResult<T> {
        let mut jobs = self.jobs.lock().unwrap_or_else(PoisonError::into_inner);
        jobs.get_mut(&job_id.0)
            .map(f)
            .ok_or_else(|| HalError::JobNotFound(job_id.0.clone()))
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Backend for MockBackend {
    fn name(&self) -> &str {
        MOCK_BACKEND_NAME
    }

    #[instrument(skip(self))]
    async fn submit(&self, circuit: &str, shots: u64) -> HalResult<JobId> {
        if shots == 0 {
            return Err(HalError::InvalidShots(
                "shots must be greater than 0".to_string(),
            ));
        }

        let job_id = JobId::new(Uuid::new_v4().to_string());
        let mut job = Job::new(job_id.clone(), circuit, shots).with_backend(MOCK_BACKEND_NAME);
        job = if self.pending_polls == 0 {
            job.with_status(JobStatus::Completed)
        } else {
            job.with_status(JobStatus::Running)
        };

        let mock_job = MockJob {
            job,
            result: Self::bell_result(circuit, shots),
            pending_polls: self.pending_polls,
        };

        {
            let mut jobs = self.jobs.lock().unwrap_or_else(PoisonError::into_inner);
            jobs.insert(job_id.0.clone(), mock_job);
        }

        debug!("Submitted job: {}", job_id);
        Ok(job_id)
    }

    async fn status(&self, job_id: &JobId) -> HalResult<JobStatus> {
        self.with_job(job_id, |mock| {
            if mock.job.status.is_pending() {
                if mock.pending_polls == 0 {
                    mock.job = mock.job.clone().with_status(JobStatus::Completed);
                } else {
                    mock.pending_polls -= 1;
                }
            }
            mock.job.status.clone()
        })
    }

    async fn result(&self, job_id: &JobId) -> HalResult<JobResult> {
        self.with_job(job_id, |mock| match &mock.job.status {
            JobStatus::Completed => Ok(mock.result.clone()),
            JobStatus::Cancelled => Err(HalError::JobCancelled),
            JobStatus::Failed(msg) => Err(HalError::JobFailed(msg.clone())),
            status => Err(HalError::IncompleteResult(format!(
                "job {} is still {status}",
                job_id.0
            ))),
        })?
    }

    async fn metadata(&self, job_id: &JobId) -> HalResult<JobMetadata> {
        self.with_job(job_id, |mock| JobMetadata {
            circuit: Some(mock.job.circuit.clone()),
            shots: Some(mock.job.shots),
            created_at: Some(mock.job.created_at.to_rfc3339()),
            backend_type: Some(MOCK_BACKEND_NAME.to_string()),
        })
    }

    async fn cancel(&self, job_id: &JobId) -> HalResult<()> {
        self.with_job(job_id, |mock| {
            mock.job = mock.job.clone().with_status(JobStatus::Cancelled);
        })
    }
}
