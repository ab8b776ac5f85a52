mod login;
pub use login::Login;

mod signup;
pub use signup::SignUp;

mod jobs;
pub use jobs::{AdminDashboard, JobDashboard};

mod create_job;
pub use create_job::CreateJob;

mod create_employee;
pub use create_employee::CreateEmployee;

mod profile;
pub use profile::{Profile, UpdateProfile};

mod not_found;
pub use not_found::NotFound;

use store::Role;

pub(crate) fn role_options(roles: &[Role]) -> Vec<(String, String)> {
    roles
        .iter()
        .map(|role| (role.as_str().to_string(), role.label().to_string()))
        .collect()
}
