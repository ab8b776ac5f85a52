pub mod config;
pub mod filter;
pub mod gate;
pub mod models;
pub mod notice;
pub mod session;
pub mod storage;

mod memory;
pub use memory::MemoryStorage;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local::LocalStorage;

pub use config::ClientConfig;
pub use filter::{EmployeeFilter, JobFilter};
pub use gate::{GateOutcome, GuestOutcome};
pub use models::{Job, JobStatus, MaterialArrival, MaterialOrder, Office, Role, User};
pub use notice::{Clock, ManualClock, Notice, NoticeKind, SystemClock};
pub use session::{Session, SessionStore};
pub use storage::{KeyValueStorage, StorageError};
