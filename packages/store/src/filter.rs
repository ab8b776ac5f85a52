//! Filter criteria for the job dashboard and the employee list.
//!
//! Criteria are derived views only: they never mutate the list they filter and
//! are never persisted. Each empty criterion imposes no constraint.

use crate::models::{Job, JobStatus, Office, User};

/// Dashboard filter: office, installer name and status.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct JobFilter {
    pub office: Option<Office>,
    /// Case-insensitive substring of the installer's name. Empty means any.
    pub installer_name: String,
    pub status: Option<JobStatus>,
}

impl JobFilter {
    pub fn is_empty(&self) -> bool {
        self.office.is_none() && self.installer_name.is_empty() && self.status.is_none()
    }

    pub fn matches(&self, job: &Job) -> bool {
        let office_match = self.office.is_none() || job.office == self.office;
        let installer_match = self.installer_name.is_empty()
            || job
                .installer_label()
                .to_lowercase()
                .contains(&self.installer_name.to_lowercase());
        let status_match = self.status.map_or(true, |status| job.status == status);

        office_match && installer_match && status_match
    }

    /// The subsequence of `jobs` matching every non-empty criterion, in order.
    pub fn apply<'a>(&self, jobs: &'a [Job]) -> Vec<&'a Job> {
        jobs.iter().filter(|job| self.matches(job)).collect()
    }
}

/// Employee list filter: office only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EmployeeFilter {
    pub office: Option<Office>,
}

impl EmployeeFilter {
    pub fn apply<'a>(&self, employees: &'a [User]) -> Vec<&'a User> {
        employees
            .iter()
            .filter(|user| self.office.is_none() || user.office == self.office)
            .collect()
    }
}
