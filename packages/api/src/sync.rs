//! # Job list synchronizer
//!
//! The dashboard never edits its list in place. Every change is sent to the
//! backend and, once the backend accepts it, the whole list is fetched again
//! ([`mutate_and_resync`]). The displayed list is therefore always a copy of
//! what the backend last returned.
//!
//! ## Flow
//!
//! | Step | Where | On failure |
//! |------|-------|------------|
//! | 1. Build the change from the current row | [`JobBoard`] prep methods | transient error, no request sent |
//! | 2. Enter loading | [`JobBoard::begin`] | |
//! | 3. Send the change, then re-fetch | [`mutate_and_resync`] | re-fetch skipped |
//! | 4. Leave loading with the new list or an error | [`JobBoard::finish`] | list unchanged, transient error |
//!
//! Steps 2 to 4 are split so a UI can release its state between the await
//! points. Deletion adds a confirmation step through [`PendingDelete`].

use store::models::MaterialNotOrdered;
use store::{Job, JobFilter, JobStatus, Notice, NoticeKind, Session};

use crate::backend::JobsBackend;
use crate::error::RequestError;
use crate::payloads::ImageFile;
use crate::validation::{check_image_type, ValidationError};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SyncError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Request(#[from] RequestError),
    #[error(transparent)]
    MaterialNotOrdered(#[from] MaterialNotOrdered),
    #[error("Job {0} is no longer on the board.")]
    UnknownJob(i64),
    #[error("You do not have permission to delete this job.")]
    NotPermitted,
}

/// A change to one job, checked and ready to send.
#[derive(Clone, Debug, PartialEq)]
pub enum JobMutation {
    /// Replace the job with this full body.
    Update(Job),
    Delete(i64),
    AttachImage { id: i64, file: ImageFile },
}

impl JobMutation {
    pub fn job_id(&self) -> i64 {
        match self {
            JobMutation::Update(job) => job.id,
            JobMutation::Delete(id) | JobMutation::AttachImage { id, .. } => *id,
        }
    }

    async fn send<B: JobsBackend>(&self, backend: &B) -> Result<(), RequestError> {
        match self {
            JobMutation::Update(job) => backend.update_job(job.id, job).await.map(|_| ()),
            JobMutation::Delete(id) => backend.delete_job(*id).await,
            JobMutation::AttachImage { id, file } => {
                backend.upload_job_image(*id, file).await.map(|_| ())
            }
        }
    }
}

/// Send `mutation`, then fetch the full list. The fetch is only issued after
/// the mutation has succeeded.
pub async fn mutate_and_resync<B: JobsBackend>(
    backend: &B,
    mutation: &JobMutation,
) -> Result<Vec<Job>, SyncError> {
    tracing::debug!("Applying {} to job {}", mutation_kind(mutation), mutation.job_id());
    mutation.send(backend).await?;
    resync(backend).await
}

/// Fetch the full list.
pub async fn resync<B: JobsBackend>(backend: &B) -> Result<Vec<Job>, SyncError> {
    Ok(backend.get_jobs().await?)
}

fn mutation_kind(mutation: &JobMutation) -> &'static str {
    match mutation {
        JobMutation::Update(_) => "update",
        JobMutation::Delete(_) => "delete",
        JobMutation::AttachImage { .. } => "image upload",
    }
}

/// A deletion the user has asked for but not yet confirmed.
#[derive(Clone, Debug, PartialEq, Eq)]
#[must_use = "a deletion only happens once confirmed"]
pub struct PendingDelete {
    id: i64,
    job_name: String,
}

impl PendingDelete {
    pub const PROMPT: &'static str = "Are you sure you want to delete this job?";

    pub fn job_id(&self) -> i64 {
        self.id
    }

    pub fn job_name(&self) -> &str {
        &self.job_name
    }

    pub fn confirm(self) -> JobMutation {
        JobMutation::Delete(self.id)
    }
}

/// Dashboard state: the last fetched list, whether a fetch is in flight, and
/// the current transient message.
#[derive(Clone, Debug, PartialEq)]
pub struct JobBoard {
    jobs: Vec<Job>,
    loading: bool,
    notice: Notice,
}

impl Default for JobBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl JobBoard {
    /// A board that has not loaded yet.
    pub fn new() -> Self {
        Self {
            jobs: Vec::new(),
            loading: true,
            notice: Notice::default(),
        }
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn notice(&self) -> &Notice {
        &self.notice
    }

    /// Rows to display under `filter`.
    pub fn visible(&self, filter: &JobFilter) -> Vec<&Job> {
        filter.apply(&self.jobs)
    }

    fn job(&self, id: i64) -> Result<&Job, SyncError> {
        self.jobs
            .iter()
            .find(|job| job.id == id)
            .ok_or(SyncError::UnknownJob(id))
    }

    pub fn status_change(&self, id: i64, status: JobStatus) -> Result<JobMutation, SyncError> {
        Ok(JobMutation::Update(self.job(id)?.with_status(status)))
    }

    /// Withdrawing the order clears the arrival flag in the same update.
    pub fn material_ordered(&self, id: i64, ordered: bool) -> Result<JobMutation, SyncError> {
        Ok(JobMutation::Update(self.job(id)?.with_material_ordered(ordered)))
    }

    /// Rejected locally unless the material is already ordered.
    pub fn material_arrived(&self, id: i64, arrived: bool) -> Result<JobMutation, SyncError> {
        Ok(JobMutation::Update(self.job(id)?.with_material_arrived(arrived)?))
    }

    pub fn upload_image(&self, id: i64, file: ImageFile) -> Result<JobMutation, SyncError> {
        self.job(id)?;
        check_image_type(&file.mime)?;
        Ok(JobMutation::AttachImage { id, file })
    }

    /// First half of a deletion. Only admins get a [`PendingDelete`].
    pub fn request_delete(&self, id: i64, actor: &Session) -> Result<PendingDelete, SyncError> {
        if !actor.is_admin() {
            return Err(SyncError::NotPermitted);
        }
        let job = self.job(id)?;
        Ok(PendingDelete {
            id,
            job_name: job.job_name.clone(),
        })
    }

    /// Enter the loading state ahead of a fetch.
    pub fn begin(&mut self) {
        self.loading = true;
    }

    /// Leave the loading state. A new list replaces the old one; an error
    /// keeps the old list and becomes a transient message.
    pub fn finish(&mut self, result: Result<Vec<Job>, SyncError>, now: u64, ttl_millis: u64) {
        self.loading = false;
        match result {
            Ok(jobs) => {
                tracing::debug!("Job list refreshed with {} jobs", jobs.len());
                self.jobs = jobs;
            }
            Err(e) => self.reject(&e, now, ttl_millis),
        }
    }

    /// Show `error` without touching the list.
    pub fn reject(&mut self, error: &SyncError, now: u64, ttl_millis: u64) {
        tracing::warn!("Job board error: {}", error);
        self.notice
            .show(NoticeKind::Error, error.to_string(), now, ttl_millis);
    }

    /// Drop the message once it has expired.
    pub fn expire_notice(&mut self, now: u64) -> bool {
        self.notice.expire(now)
    }
}

#[cfg(test)]
mod tests {
    use store::{Clock, ManualClock, MaterialArrival, MaterialOrder, Office, Role, User};

    use super::*;
    use crate::error::Operation;
    use crate::memory::{BackendCall, MemoryBackend};

    const TTL: u64 = 3_000;

    fn job(id: i64, name: &str) -> Job {
        Job {
            id,
            job_name: name.into(),
            installer_name: Some("Dana Reyes".into()),
            office: Some(Office::Office400),
            ..Job::default()
        }
    }

    fn backend() -> MemoryBackend {
        let mut ordered = job(2, "Walnut bath");
        ordered.material_order_status = Some(MaterialOrder::Ordered);
        ordered.material_arrival_status = Some(MaterialArrival::Arrived);
        MemoryBackend::new(vec![job(1, "Maple kitchen"), ordered])
    }

    fn session(role: Role) -> Session {
        Session {
            token: Some("t".into()),
            user: Some(User {
                id: 9,
                role: Some(role),
                ..User::default()
            }),
        }
    }

    async fn loaded(backend: &MemoryBackend, clock: &ManualClock) -> JobBoard {
        let mut board = JobBoard::new();
        assert!(board.is_loading());
        let result = resync(backend).await;
        board.finish(result, clock.now_millis(), TTL);
        board
    }

    /// The same sequence the dashboard runs for a row action.
    async fn run(
        board: &mut JobBoard,
        backend: &MemoryBackend,
        clock: &ManualClock,
        prepared: Result<JobMutation, SyncError>,
    ) {
        match prepared {
            Ok(mutation) => {
                board.begin();
                let result = mutate_and_resync(backend, &mutation).await;
                board.finish(result, clock.now_millis(), TTL);
            }
            Err(e) => board.reject(&e, clock.now_millis(), TTL),
        }
    }

    #[tokio::test]
    async fn test_status_change_resyncs_after_update() {
        let backend = backend();
        let clock = ManualClock::new(0);
        let mut board = loaded(&backend, &clock).await;
        assert!(!board.is_loading());

        let prepared = board.status_change(1, JobStatus::InProgress);
        run(&mut board, &backend, &clock, prepared).await;

        assert_eq!(
            backend.calls(),
            vec![BackendCall::GetJobs, BackendCall::UpdateJob(1), BackendCall::GetJobs]
        );
        assert_eq!(board.jobs()[0].status, JobStatus::InProgress);
        assert!(board.notice().message().is_none());
    }

    #[tokio::test]
    async fn test_failed_update_keeps_list_and_skips_resync() {
        let backend = backend();
        let clock = ManualClock::new(0);
        let mut board = loaded(&backend, &clock).await;
        let before = board.jobs().to_vec();

        backend.fail(Operation::UpdateJob);
        let prepared = board.status_change(1, JobStatus::Completed);
        run(&mut board, &backend, &clock, prepared).await;

        assert_eq!(board.jobs(), before.as_slice());
        assert!(!board.is_loading());
        assert_eq!(
            backend.calls(),
            vec![BackendCall::GetJobs, BackendCall::UpdateJob(1)]
        );
        assert_eq!(
            board.notice().visible(clock.now_millis()),
            Some((NoticeKind::Error, "Failed to update job"))
        );

        clock.advance(TTL);
        assert!(board.expire_notice(clock.now_millis()));
        assert!(board.notice().message().is_none());
    }

    #[tokio::test]
    async fn test_withdrawing_order_clears_arrival() {
        let backend = backend();
        let clock = ManualClock::new(0);
        let mut board = loaded(&backend, &clock).await;

        let prepared = board.material_ordered(2, false);
        run(&mut board, &backend, &clock, prepared).await;

        let job = &board.jobs()[1];
        assert_eq!(job.material_order_status, None);
        assert_eq!(job.material_arrival_status, None);
    }

    #[tokio::test]
    async fn test_arrival_without_order_makes_no_request() {
        let backend = backend();
        let clock = ManualClock::new(0);
        let mut board = loaded(&backend, &clock).await;

        let prepared = board.material_arrived(1, true);
        assert_eq!(prepared, Err(SyncError::MaterialNotOrdered(MaterialNotOrdered)));
        run(&mut board, &backend, &clock, prepared).await;

        assert_eq!(backend.calls(), vec![BackendCall::GetJobs]);
        assert_eq!(
            board.notice().message(),
            Some("Can't set material as arrived if not ordered")
        );
        assert!(!board.jobs()[0].is_material_arrived());
    }

    #[tokio::test]
    async fn test_unsupported_image_makes_no_request() {
        let backend = backend();
        let clock = ManualClock::new(0);
        let mut board = loaded(&backend, &clock).await;

        let gif = ImageFile {
            name: "site.gif".into(),
            mime: "image/gif".into(),
            bytes: vec![1, 2, 3],
        };
        let prepared = board.upload_image(1, gif);
        run(&mut board, &backend, &clock, prepared).await;

        assert_eq!(backend.calls(), vec![BackendCall::GetJobs]);
        assert_eq!(
            board.notice().message(),
            Some("Only png, jpg and svg images are allowed")
        );
    }

    #[tokio::test]
    async fn test_image_upload_resyncs() {
        let backend = backend();
        let clock = ManualClock::new(0);
        let mut board = loaded(&backend, &clock).await;

        let png = ImageFile {
            name: "site.png".into(),
            mime: "image/png".into(),
            bytes: vec![1],
        };
        let prepared = board.upload_image(1, png);
        run(&mut board, &backend, &clock, prepared).await;

        assert_eq!(board.jobs()[0].image.as_deref(), Some("1_site.png"));
        assert_eq!(backend.calls().last(), Some(&BackendCall::GetJobs));
    }

    #[tokio::test]
    async fn test_admin_delete_confirms_then_resyncs() {
        let backend = backend();
        let clock = ManualClock::new(0);
        let mut board = loaded(&backend, &clock).await;

        let pending = board.request_delete(1, &session(Role::Admin)).unwrap();
        assert_eq!(pending.job_name(), "Maple kitchen");
        // Nothing is sent until the deletion is confirmed.
        assert_eq!(backend.calls(), vec![BackendCall::GetJobs]);

        run(&mut board, &backend, &clock, Ok(pending.confirm())).await;
        assert_eq!(
            backend.calls(),
            vec![BackendCall::GetJobs, BackendCall::DeleteJob(1), BackendCall::GetJobs]
        );
        assert_eq!(board.jobs().iter().map(|j| j.id).collect::<Vec<_>>(), vec![2]);
    }

    #[tokio::test]
    async fn test_non_admin_cannot_start_delete() {
        let backend = backend();
        let clock = ManualClock::new(0);
        let board = loaded(&backend, &clock).await;

        for role in [Role::Installer, Role::CabinetMaker] {
            assert_eq!(
                board.request_delete(1, &session(role)),
                Err(SyncError::NotPermitted)
            );
        }
        assert_eq!(backend.calls(), vec![BackendCall::GetJobs]);
    }

    #[tokio::test]
    async fn test_failed_resync_keeps_old_list() {
        let backend = backend();
        let clock = ManualClock::new(0);
        let mut board = loaded(&backend, &clock).await;

        backend.fail(Operation::GetJobs);
        let prepared = board.status_change(2, JobStatus::Completed);
        run(&mut board, &backend, &clock, prepared).await;

        assert_eq!(board.jobs()[1].status, JobStatus::ToDo);
        assert_eq!(board.notice().message(), Some("Failed to fetch jobs"));

        backend.heal(Operation::GetJobs);
        board.begin();
        let result = resync(&backend).await;
        board.finish(result, clock.now_millis(), TTL);
        assert_eq!(board.jobs()[1].status, JobStatus::Completed);
    }

    #[test]
    fn test_unknown_job_is_rejected() {
        let board = JobBoard::new();
        assert_eq!(
            board.status_change(5, JobStatus::Completed),
            Err(SyncError::UnknownJob(5))
        );
    }

    #[test]
    fn test_visible_applies_filter() {
        let mut board = JobBoard::new();
        let mut other = job(3, "Oak pantry");
        other.installer_name = Some("Sam Whitfield".into());
        board.finish(Ok(vec![job(1, "Maple kitchen"), other]), 0, TTL);

        let filter = JobFilter {
            installer_name: "sam".into(),
            ..JobFilter::default()
        };
        let ids: Vec<i64> = board.visible(&filter).iter().map(|j| j.id).collect();
        assert_eq!(ids, vec![3]);
        assert_eq!(board.visible(&JobFilter::default()).len(), 2);
    }
}
