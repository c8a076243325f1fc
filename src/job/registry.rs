use std::collections::HashMap;
use std::fmt;
use std::sync::{PoisonError, RwLock};

use crate::foundation::error::{AudiogramError, AudiogramResult};

/// Identifier of one render job.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JobId(pub String);

impl JobId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle state reported for a job.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum JobStatus {
    Running,
    Finished,
    Cancelled,
    Failed,
}

impl JobStatus {
    /// `true` once the job can no longer change state.
    pub fn is_terminal(self) -> bool {
        !matches!(self, JobStatus::Running)
    }
}

/// Answers whether a job should keep rendering. Polled once per frame.
pub trait CancellationQuery: Send + Sync {
    fn is_active(&self, job: &JobId) -> bool;
}

/// Receives whole-percent progress updates.
pub trait ProgressSink: Send + Sync {
    fn set_progress(&self, job: &JobId, percent: u8);
}

/// Receives lifecycle transitions.
pub trait StatusSink: Send + Sync {
    fn set_status(&self, job: &JobId, status: JobStatus);
}

/// Snapshot of one registry entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct JobState {
    pub status: JobStatus,
    pub progress: u8,
    pub cancel_requested: bool,
}

/// Process-wide table of jobs shared between the renderer and whoever manages jobs.
///
/// Readers (the per-frame cancellation poll) never block each other.
#[derive(Debug, Default)]
pub struct TaskRegistry {
    jobs: RwLock<HashMap<JobId, JobState>>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a job in the running state. A job id that is still running cannot be reused.
    pub fn register(&self, job: JobId) -> AudiogramResult<()> {
        let mut jobs = self.jobs.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = jobs.get(&job)
            && !existing.status.is_terminal()
        {
            return Err(AudiogramError::config(format!("job '{job}' is already running")));
        }
        jobs.insert(
            job,
            JobState {
                status: JobStatus::Running,
                progress: 0,
                cancel_requested: false,
            },
        );
        Ok(())
    }

    /// Ask a running job to stop at its next frame boundary. Returns `false` for unknown or
    /// already terminal jobs.
    pub fn cancel(&self, job: &JobId) -> bool {
        let mut jobs = self.jobs.write().unwrap_or_else(PoisonError::into_inner);
        match jobs.get_mut(job) {
            Some(state) if !state.status.is_terminal() => {
                state.cancel_requested = true;
                true
            }
            _ => false,
        }
    }

    pub fn state(&self, job: &JobId) -> Option<JobState> {
        self.jobs
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(job)
            .copied()
    }

    pub fn status(&self, job: &JobId) -> Option<JobStatus> {
        self.state(job).map(|s| s.status)
    }

    pub fn progress(&self, job: &JobId) -> Option<u8> {
        self.state(job).map(|s| s.progress)
    }

    /// Drop a job's entry, returning its last state.
    pub fn remove(&self, job: &JobId) -> Option<JobState> {
        self.jobs
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(job)
    }
}

impl CancellationQuery for TaskRegistry {
    fn is_active(&self, job: &JobId) -> bool {
        self.state(job)
            .is_some_and(|s| s.status == JobStatus::Running && !s.cancel_requested)
    }
}

impl ProgressSink for TaskRegistry {
    fn set_progress(&self, job: &JobId, percent: u8) {
        let mut jobs = self.jobs.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(state) = jobs.get_mut(job) {
            state.progress = percent.min(100);
        }
    }
}

impl StatusSink for TaskRegistry {
    fn set_status(&self, job: &JobId, status: JobStatus) {
        let mut jobs = self.jobs.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(state) = jobs.get_mut(job) {
            state.status = status;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/job/registry.rs"]
mod tests;
