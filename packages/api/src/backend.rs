//! The backend calls the job dashboard depends on.
//!
//! [`JobsBackend`] is the seam between the job list synchronizer and the
//! network: [`RestClient`] implements it for real, [`crate::MemoryBackend`]
//! for tests.

use std::future::Future;

use store::{Job, KeyValueStorage};

use crate::client::RestClient;
use crate::error::RequestError;
use crate::payloads::ImageFile;

pub trait JobsBackend {
    fn get_jobs(&self) -> impl Future<Output = Result<Vec<Job>, RequestError>>;
    fn update_job(&self, id: i64, job: &Job) -> impl Future<Output = Result<Job, RequestError>>;
    fn delete_job(&self, id: i64) -> impl Future<Output = Result<(), RequestError>>;
    /// Upload and attach a photo, returning the stored reference.
    fn upload_job_image(
        &self,
        id: i64,
        file: &ImageFile,
    ) -> impl Future<Output = Result<String, RequestError>>;
}

impl<S: KeyValueStorage> JobsBackend for RestClient<S> {
    async fn get_jobs(&self) -> Result<Vec<Job>, RequestError> {
        RestClient::get_jobs(self).await
    }

    async fn update_job(&self, id: i64, job: &Job) -> Result<Job, RequestError> {
        RestClient::update_job(self, id, job).await
    }

    async fn delete_job(&self, id: i64) -> Result<(), RequestError> {
        RestClient::delete_job(self, id).await
    }

    async fn upload_job_image(&self, id: i64, file: &ImageFile) -> Result<String, RequestError> {
        RestClient::upload_job_image(self, id, file).await
    }
}
