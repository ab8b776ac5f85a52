//! In-memory [`JobsBackend`] that records every call.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use store::Job;

use crate::backend::JobsBackend;
use crate::error::{Operation, RequestError};
use crate::payloads::ImageFile;

/// A call received by [`MemoryBackend`], in arrival order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BackendCall {
    GetJobs,
    UpdateJob(i64),
    DeleteJob(i64),
    UploadJobImage(i64),
}

#[derive(Debug, Default)]
struct State {
    jobs: Vec<Job>,
    calls: Vec<BackendCall>,
    failing: HashSet<Operation>,
}

/// Job list held in memory. Clones share state.
#[derive(Clone, Debug, Default)]
pub struct MemoryBackend {
    state: Arc<Mutex<State>>,
}

impl MemoryBackend {
    pub fn new(jobs: Vec<Job>) -> Self {
        Self {
            state: Arc::new(Mutex::new(State {
                jobs,
                ..State::default()
            })),
        }
    }

    /// Make every later call of `operation` fail until [`heal`](Self::heal).
    pub fn fail(&self, operation: Operation) {
        self.state.lock().unwrap().failing.insert(operation);
    }

    pub fn heal(&self, operation: Operation) {
        self.state.lock().unwrap().failing.remove(&operation);
    }

    pub fn calls(&self) -> Vec<BackendCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn jobs(&self) -> Vec<Job> {
        self.state.lock().unwrap().jobs.clone()
    }

    /// Record `call` and report whether `operation` is set to fail.
    fn record(&self, call: BackendCall, operation: Operation) -> Result<(), RequestError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        if state.failing.contains(&operation) {
            return Err(RequestError::from_response(operation, 500, ""));
        }
        Ok(())
    }

    fn not_found(operation: Operation) -> RequestError {
        RequestError::from_response(operation, 404, "")
    }
}

impl JobsBackend for MemoryBackend {
    async fn get_jobs(&self) -> Result<Vec<Job>, RequestError> {
        self.record(BackendCall::GetJobs, Operation::GetJobs)?;
        Ok(self.jobs())
    }

    async fn update_job(&self, id: i64, job: &Job) -> Result<Job, RequestError> {
        self.record(BackendCall::UpdateJob(id), Operation::UpdateJob)?;
        let mut state = self.state.lock().unwrap();
        let slot = state
            .jobs
            .iter_mut()
            .find(|existing| existing.id == id)
            .ok_or_else(|| Self::not_found(Operation::UpdateJob))?;
        *slot = Job { id, ..job.clone() };
        Ok(slot.clone())
    }

    async fn delete_job(&self, id: i64) -> Result<(), RequestError> {
        self.record(BackendCall::DeleteJob(id), Operation::DeleteJob)?;
        let mut state = self.state.lock().unwrap();
        let before = state.jobs.len();
        state.jobs.retain(|job| job.id != id);
        if state.jobs.len() == before {
            return Err(Self::not_found(Operation::DeleteJob));
        }
        Ok(())
    }

    async fn upload_job_image(&self, id: i64, file: &ImageFile) -> Result<String, RequestError> {
        self.record(BackendCall::UploadJobImage(id), Operation::UploadJobImage)?;
        let mut state = self.state.lock().unwrap();
        let job = state
            .jobs
            .iter_mut()
            .find(|job| job.id == id)
            .ok_or_else(|| Self::not_found(Operation::UploadJobImage))?;
        let reference = format!("{}_{}", id, file.name);
        job.image = Some(reference.clone());
        Ok(reference)
    }
}
