//! # REST client
//!
//! [`RestClient`] is the only place that talks HTTP. It owns a
//! [`SessionStore`] so it can sign requests and persist the session after a
//! login, registration or profile update.
//!
//! ## Operations
//!
//! | Method | Request | Signed | Session write |
//! |--------|---------|--------|---------------|
//! | [`login`](RestClient::login) | `POST /user/login` | no | token + user |
//! | [`register`](RestClient::register) | `POST /user/register` | no | token + user |
//! | [`get_self`](RestClient::get_self) | `GET /user/getSelf` | yes | |
//! | [`update_profile`](RestClient::update_profile) | `PATCH /user/updateProfile` | yes | user |
//! | [`create_employee`](RestClient::create_employee) | `POST /user/createEmployee` | yes | |
//! | [`update_employee`](RestClient::update_employee) | `PATCH /user/updateEmployee` | yes | |
//! | [`get_all_employees`](RestClient::get_all_employees) | `GET /user/getAllEmployees` | yes | |
//! | [`delete_user`](RestClient::delete_user) | `DELETE /user/delete/:id` | yes | |
//! | [`create_job`](RestClient::create_job) | `POST /jobs` | yes | |
//! | [`get_jobs`](RestClient::get_jobs) | `GET /jobs` | yes | |
//! | [`update_job`](RestClient::update_job) | `PUT /jobs/:id` | yes | |
//! | [`delete_job`](RestClient::delete_job) | `DELETE /jobs/:id` | yes | |
//! | [`upload_job_image`](RestClient::upload_job_image) | `POST /upload`, then `POST /jobs/:id/uploadImage` | yes | |
//!
//! Every failure, whether transport, non-2xx status or an unexpected body,
//! comes back as a [`RequestError`] with a display message.

use reqwest::header::AUTHORIZATION;
use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use store::{ClientConfig, Job, KeyValueStorage, SessionStore, User};

use crate::error::{Operation, RequestError};
use crate::payloads::{
    AccountResponse, EmployeeRequest, ImageFile, ImageUrlRequest, LoginRequest, NewJob,
    RegisterRequest, SignedIn, UpdateProfileRequest,
};

#[derive(Clone, Debug)]
pub struct RestClient<S: KeyValueStorage> {
    http: reqwest::Client,
    api_root: String,
    session: SessionStore<S>,
}

impl<S: KeyValueStorage> RestClient<S> {
    pub fn new(config: &ClientConfig, storage: S) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_root: config.api_root(),
            session: SessionStore::new(storage),
        }
    }

    pub fn session(&self) -> &SessionStore<S> {
        &self.session
    }

    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    /// Link to a stored job photo.
    pub fn file_url(&self, image: &str) -> String {
        format!("{}/files/{}", self.api_root, image)
    }

    fn request(&self, method: Method, path: &str, signed: bool) -> RequestBuilder {
        tracing::debug!("{} {}", method, path);
        let builder = self.http.request(method, format!("{}{}", self.api_root, path));
        match self.session.token().filter(|_| signed) {
            Some(token) => builder.header(AUTHORIZATION, format!("Bearer {token}")),
            None => builder,
        }
    }

    /// Send and return the body of a 2xx response.
    async fn send(&self, operation: Operation, builder: RequestBuilder) -> Result<String, RequestError> {
        let response = builder.send().await.map_err(|e| {
            tracing::warn!("{} request failed: {}", operation, e);
            RequestError::fallback(operation)
        })?;
        let status = response.status();
        let body = response.text().await.map_err(|e| {
            tracing::warn!("{} response unreadable: {}", operation, e);
            RequestError::fallback(operation)
        })?;
        if status.is_success() {
            return Ok(body);
        }
        let err = RequestError::from_response(operation, status.as_u16(), &body);
        tracing::warn!("{} rejected with {}: {}", operation, status, err);
        Err(err)
    }

    fn decode<T: DeserializeOwned>(operation: Operation, body: &str) -> Result<T, RequestError> {
        serde_json::from_str(body).map_err(|e| {
            tracing::warn!("{} returned a malformed payload: {}", operation, e);
            RequestError::fallback(operation)
        })
    }

    /// Accept a login or registration response and persist it.
    fn sign_in(&self, operation: Operation, body: &str) -> Result<SignedIn, RequestError> {
        let response: AccountResponse = Self::decode(operation, body)?;
        let (Some(token), Some(user)) = (response.token.filter(|t| !t.is_empty()), response.user)
        else {
            tracing::warn!("{} response is missing the token or user", operation);
            return Err(RequestError::fallback(operation));
        };
        self.session.set(Some(&token), Some(&user)).map_err(|e| {
            tracing::error!("Could not persist session: {}", e);
            RequestError::fallback(operation)
        })?;
        tracing::info!("Signed in as {}", user.username);
        Ok(SignedIn { token, user })
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<SignedIn, RequestError> {
        let builder = self.request(Method::POST, "/user/login", false).json(request);
        let body = self.send(Operation::Login, builder).await?;
        self.sign_in(Operation::Login, &body)
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<SignedIn, RequestError> {
        let builder = self.request(Method::POST, "/user/register", false).json(request);
        let body = self.send(Operation::Register, builder).await?;
        self.sign_in(Operation::Register, &body)
    }

    pub async fn get_self(&self) -> Result<User, RequestError> {
        let builder = self.request(Method::GET, "/user/getSelf", true);
        let body = self.send(Operation::GetSelf, builder).await?;
        let response: AccountResponse = Self::decode(Operation::GetSelf, &body)?;
        response
            .user
            .ok_or_else(|| RequestError::fallback(Operation::GetSelf))
    }

    /// Update the signed-in user's profile and refresh the cached user. The
    /// token is left as it is.
    pub async fn update_profile(&self, request: &UpdateProfileRequest) -> Result<User, RequestError> {
        let op = Operation::UpdateProfile;
        let builder = self.request(Method::PATCH, "/user/updateProfile", true).json(request);
        let body = self.send(op, builder).await?;
        let response: AccountResponse = Self::decode(op, &body)?;
        let user = response.user.ok_or_else(|| RequestError::fallback(op))?;
        self.session.set(None, Some(&user)).map_err(|e| {
            tracing::error!("Could not persist updated user: {}", e);
            RequestError::fallback(op)
        })?;
        Ok(user)
    }

    pub async fn create_employee(&self, request: &EmployeeRequest) -> Result<AccountResponse, RequestError> {
        let builder = self.request(Method::POST, "/user/createEmployee", true).json(request);
        let body = self.send(Operation::CreateEmployee, builder).await?;
        Self::decode(Operation::CreateEmployee, &body)
    }

    /// `request.id` names the employee to change.
    pub async fn update_employee(&self, request: &EmployeeRequest) -> Result<AccountResponse, RequestError> {
        if request.id.is_none() {
            tracing::warn!("Employee update without an id");
            return Err(RequestError::fallback(Operation::UpdateEmployee));
        }
        let builder = self.request(Method::PATCH, "/user/updateEmployee", true).json(request);
        let body = self.send(Operation::UpdateEmployee, builder).await?;
        Self::decode(Operation::UpdateEmployee, &body)
    }

    pub async fn get_all_employees(&self) -> Result<Vec<User>, RequestError> {
        let builder = self.request(Method::GET, "/user/getAllEmployees", true);
        let body = self.send(Operation::GetAllEmployees, builder).await?;
        Self::decode(Operation::GetAllEmployees, &body)
    }

    pub async fn delete_user(&self, id: i64) -> Result<(), RequestError> {
        let builder = self.request(Method::DELETE, &format!("/user/delete/{id}"), true);
        self.send(Operation::DeleteUser, builder).await?;
        Ok(())
    }

    pub async fn create_job(&self, job: &NewJob) -> Result<Job, RequestError> {
        let builder = self.request(Method::POST, "/jobs", true).json(job);
        let body = self.send(Operation::CreateJob, builder).await?;
        Self::decode(Operation::CreateJob, &body)
    }

    pub async fn get_jobs(&self) -> Result<Vec<Job>, RequestError> {
        let builder = self.request(Method::GET, "/jobs", true);
        let body = self.send(Operation::GetJobs, builder).await?;
        Self::decode(Operation::GetJobs, &body)
    }

    /// Replace job `id` with the full `job` body.
    pub async fn update_job(&self, id: i64, job: &Job) -> Result<Job, RequestError> {
        let builder = self.request(Method::PUT, &format!("/jobs/{id}"), true).json(job);
        let body = self.send(Operation::UpdateJob, builder).await?;
        Self::decode(Operation::UpdateJob, &body)
    }

    pub async fn delete_job(&self, id: i64) -> Result<(), RequestError> {
        let builder = self.request(Method::DELETE, &format!("/jobs/{id}"), true);
        self.send(Operation::DeleteJob, builder).await?;
        Ok(())
    }

    /// Upload a photo and attach it to job `id`. Returns the stored image
    /// reference.
    ///
    /// Two requests: the upload, then [`update_job_image`](Self::update_job_image)
    /// with the returned reference. If the second fails the upload stays on
    /// the server and the whole operation reports failure.
    pub async fn upload_job_image(&self, id: i64, file: &ImageFile) -> Result<String, RequestError> {
        let op = Operation::UploadJobImage;
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(&file.mime)
            .map_err(|e| {
                tracing::warn!("Bad image type {:?}: {}", file.mime, e);
                RequestError::fallback(op)
            })?;
        let builder = self
            .request(Method::POST, "/upload", true)
            .multipart(Form::new().part("file", part));
        let body = self.send(op, builder).await?;
        let reference = image_reference(&body).ok_or_else(|| {
            tracing::warn!("Upload returned no image reference");
            RequestError::fallback(op)
        })?;
        self.update_job_image(id, &reference).await?;
        tracing::info!("Attached image to job {}", id);
        Ok(reference)
    }

    pub async fn update_job_image(&self, id: i64, image_url: &str) -> Result<Job, RequestError> {
        let request = ImageUrlRequest {
            image_url: image_url.to_string(),
        };
        let builder = self
            .request(Method::POST, &format!("/jobs/{id}/uploadImage"), true)
            .json(&request);
        let body = self.send(Operation::UpdateJobImage, builder).await?;
        Self::decode(Operation::UpdateJobImage, &body)
    }
}

/// The upload endpoint answers with the bare stored name, possibly as a JSON
/// string.
fn image_reference(body: &str) -> Option<String> {
    let trimmed = body.trim();
    let reference = if trimmed.starts_with('"') {
        serde_json::from_str::<String>(trimmed).ok()?
    } else {
        trimmed.to_string()
    };
    (!reference.is_empty()).then_some(reference)
}
