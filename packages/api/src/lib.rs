//! # API crate: talking to the Kitchen Saver backend
//!
//! Everything between the UI and the network: the REST client, the bodies it
//! sends and receives, the form checks that run before a request is built,
//! and the job list synchronizer that keeps the dashboard in step with the
//! backend.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`client`] | [`RestClient`], one method per backend capability, bearer-signed |
//! | [`payloads`] | Request forms and response shapes (camelCase on the wire) |
//! | [`validation`] | Client-side form rules and their messages |
//! | [`backend`] | [`JobsBackend`], the calls the dashboard needs |
//! | [`sync`] | [`JobBoard`] state and [`mutate_and_resync`] |
//! | [`error`] | [`RequestError`] and the fallback message per operation |
//!
//! [`MemoryBackend`] is an in-memory [`JobsBackend`] that records calls, for
//! driving the synchronizer without a server.

pub mod backend;
pub mod client;
pub mod error;
pub mod payloads;
pub mod sync;
pub mod validation;

mod memory;
pub use memory::{BackendCall, MemoryBackend};

pub use backend::JobsBackend;
pub use client::RestClient;
pub use error::{Operation, RequestError};
pub use payloads::{
    AccountResponse, EmployeeRequest, ImageFile, JobForm, LoginRequest, NewJob, RegisterRequest,
    SignedIn, UpdateProfileRequest,
};
pub use sync::{mutate_and_resync, resync, JobBoard, JobMutation, PendingDelete, SyncError};
pub use validation::{check_image_type, Field, ValidationError};
