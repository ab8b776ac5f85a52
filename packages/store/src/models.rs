//! # Domain models shared by every layer
//!
//! These are the records the backend owns and the client caches or displays. All
//! of them are `Serialize + Deserialize` with camelCase field names so they map
//! one-to-one onto the JSON the REST backend speaks.
//!
//! ## Types
//!
//! | Type | Represents |
//! |------|-----------|
//! | [`User`] | An employee account. Cached in the session after login. |
//! | [`Role`] | `ADMIN`, `CABINET_MAKER` or `INSTALLER`; anything else decodes to [`Role::Other`]. |
//! | [`Office`] | One of the three branch codes `400`, `402`, `403`. |
//! | [`Job`] | A cabinet order with its crew, counts, due date and material flags. |
//! | [`JobStatus`] | `To-Do`, `In Progress` or `Completed`. |
//! | [`MaterialOrder`] / [`MaterialArrival`] | The single non-null value of each material flag. |
//!
//! ## Material flags
//!
//! A job's arrival flag may only be `"arrived"` while its order flag is
//! `"ordered"`. [`Job::with_material_ordered`] clears arrival whenever the order
//! is withdrawn, and [`Job::with_material_arrived`] refuses to touch arrival on a
//! job whose material was never ordered.
//!
//! The backend is loose about empty values (`""` vs `null`), so the optional enum
//! fields decode unknown or empty strings as `None` instead of failing the whole
//! job list.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// Role of an employee account.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    CabinetMaker,
    Installer,
    /// A role string this client does not know about.
    #[serde(other)]
    Other,
}

impl Role {
    /// Roles that can be assigned from the signup and employee forms.
    pub const ASSIGNABLE: [Role; 3] = [Role::CabinetMaker, Role::Installer, Role::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::CabinetMaker => "CABINET_MAKER",
            Role::Installer => "INSTALLER",
            Role::Other => "OTHER",
        }
    }

    /// Human-readable label for selects and tables.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::CabinetMaker => "Cabinet Maker",
            Role::Installer => "Installer",
            Role::Other => "Other",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Role::Admin),
            "CABINET_MAKER" => Ok(Role::CabinetMaker),
            "INSTALLER" => Ok(Role::Installer),
            other => Err(UnknownValue(other.to_string())),
        }
    }
}

/// Branch location code, used to partition jobs and employees.
#[allow(clippy::enum_variant_names)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Office {
    #[serde(rename = "400")]
    Office400,
    #[serde(rename = "402")]
    Office402,
    #[serde(rename = "403")]
    Office403,
}

impl Office {
    pub const ALL: [Office; 3] = [Office::Office400, Office::Office402, Office::Office403];

    pub fn as_str(&self) -> &'static str {
        match self {
            Office::Office400 => "400",
            Office::Office402 => "402",
            Office::Office403 => "403",
        }
    }
}

impl fmt::Display for Office {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Office {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Office::ALL
            .into_iter()
            .find(|office| office.as_str() == s.trim())
            .ok_or_else(|| UnknownValue(s.to_string()))
    }
}

/// Returned by the `FromStr` impls in this module for unrecognised input.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown value `{0}`")]
pub struct UnknownValue(pub String);

/// An employee account as the backend returns it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub cell: String,
    pub role: Option<Role>,
    #[serde(deserialize_with = "lenient")]
    pub office: Option<Office>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    pub fn is_admin(&self) -> bool {
        self.role == Some(Role::Admin)
    }

    /// Landing route for this user after login.
    pub fn home_route(&self) -> &'static str {
        if self.is_admin() {
            "/admin"
        } else {
            "/jobs"
        }
    }
}

/// Lifecycle status of a job.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobStatus {
    #[default]
    #[serde(rename = "To-Do")]
    ToDo,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Completed")]
    Completed,
}

impl JobStatus {
    pub const ALL: [JobStatus; 3] = [JobStatus::ToDo, JobStatus::InProgress, JobStatus::Completed];

    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::ToDo => "To-Do",
            JobStatus::InProgress => "In Progress",
            JobStatus::Completed => "Completed",
        }
    }

    /// CSS modifier used by the job table.
    pub fn css_class(&self) -> &'static str {
        match self {
            JobStatus::ToDo => "status-to-do",
            JobStatus::InProgress => "status-in-progress",
            JobStatus::Completed => "status-completed",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobStatus {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JobStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownValue(s.to_string()))
    }
}

/// The only non-null value of `materialOrderStatus`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaterialOrder {
    #[serde(rename = "ordered")]
    Ordered,
}

impl FromStr for MaterialOrder {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ordered" => Ok(MaterialOrder::Ordered),
            other => Err(UnknownValue(other.to_string())),
        }
    }
}

/// The only non-null value of `materialArrivalStatus`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaterialArrival {
    #[serde(rename = "arrived")]
    Arrived,
}

impl FromStr for MaterialArrival {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "arrived" => Ok(MaterialArrival::Arrived),
            other => Err(UnknownValue(other.to_string())),
        }
    }
}

/// Raised when arrival is changed on a job whose material was never ordered.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("Can't set material as arrived if not ordered")]
pub struct MaterialNotOrdered;

/// A cabinet job as listed by `GET /jobs`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Job {
    pub id: i64,
    pub job_number: String,
    pub job_name: String,
    pub num_cabinets: u32,
    pub num_uppers: u32,
    pub num_lowers: u32,
    pub cabinet_maker_id: Option<i64>,
    pub cabinet_maker_name: Option<String>,
    pub installer_id: Option<i64>,
    pub installer_name: Option<String>,
    pub due_date: Option<String>,
    pub job_color: String,
    #[serde(deserialize_with = "lenient")]
    pub office: Option<Office>,
    pub status: JobStatus,
    #[serde(deserialize_with = "lenient")]
    pub material_order_status: Option<MaterialOrder>,
    #[serde(deserialize_with = "lenient")]
    pub material_arrival_status: Option<MaterialArrival>,
    pub image: Option<String>,
}

impl Job {
    pub fn is_material_ordered(&self) -> bool {
        self.material_order_status == Some(MaterialOrder::Ordered)
    }

    pub fn is_material_arrived(&self) -> bool {
        self.material_arrival_status == Some(MaterialArrival::Arrived)
    }

    /// Copy of this job with a new status.
    pub fn with_status(&self, status: JobStatus) -> Job {
        Job {
            status,
            ..self.clone()
        }
    }

    /// Copy of this job with the order flag set or withdrawn.
    ///
    /// Withdrawing the order always clears the arrival flag in the same update.
    pub fn with_material_ordered(&self, ordered: bool) -> Job {
        let mut job = self.clone();
        if ordered {
            job.material_order_status = Some(MaterialOrder::Ordered);
        } else {
            job.material_order_status = None;
            job.material_arrival_status = None;
        }
        job
    }

    /// Copy of this job with the arrival flag set or cleared.
    pub fn with_material_arrived(&self, arrived: bool) -> Result<Job, MaterialNotOrdered> {
        if !self.is_material_ordered() {
            return Err(MaterialNotOrdered);
        }
        let mut job = self.clone();
        job.material_arrival_status = arrived.then_some(MaterialArrival::Arrived);
        Ok(job)
    }

    /// Calendar part of the due date (`YYYY-MM-DD`), whatever the backend's time format.
    pub fn due_date_label(&self) -> &str {
        match self.due_date.as_deref() {
            Some(date) => date.get(..10).unwrap_or(date),
            None => "",
        }
    }

    pub fn installer_label(&self) -> &str {
        self.installer_name.as_deref().unwrap_or("")
    }

    pub fn cabinet_maker_label(&self) -> &str {
        self.cabinet_maker_name.as_deref().unwrap_or("")
    }
}

/// Decode an optional enum from a string, mapping empty or unknown values to `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| value.parse().ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ordered_job() -> Job {
        Job {
            id: 7,
            material_order_status: Some(MaterialOrder::Ordered),
            material_arrival_status: Some(MaterialArrival::Arrived),
            ..Job::default()
        }
    }

    #[test]
    fn test_withdrawing_order_clears_arrival() {
        let job = ordered_job().with_material_ordered(false);
        assert_eq!(job.material_order_status, None);
        assert_eq!(job.material_arrival_status, None);
    }

    #[test]
    fn test_ordering_keeps_arrival() {
        let job = ordered_job().with_material_ordered(true);
        assert!(job.is_material_ordered());
        assert!(job.is_material_arrived());
    }

    #[test]
    fn test_arrival_requires_order() {
        let job = Job::default();
        assert_eq!(job.with_material_arrived(true), Err(MaterialNotOrdered));

        let job = ordered_job().with_material_arrived(false).unwrap();
        assert_eq!(job.material_arrival_status, None);
        assert!(job.is_material_ordered());
    }

    #[test]
    fn test_job_decodes_backend_payload() {
        let json = r#"{
            "id": 3,
            "jobNumber": "1042",
            "jobName": "Smith Kitchen",
            "numCabinets": 12,
            "installerName": "Dana Reyes",
            "dueDate": "2025-03-10T00:00:00.000+00:00",
            "office": "402",
            "status": "In Progress",
            "materialOrderStatus": "",
            "materialArrivalStatus": null
        }"#;
        let job: Job = serde_json::from_str(json).unwrap();
        assert_eq!(job.id, 3);
        assert_eq!(job.office, Some(Office::Office402));
        assert_eq!(job.status, JobStatus::InProgress);
        assert_eq!(job.material_order_status, None);
        assert_eq!(job.due_date_label(), "2025-03-10");
        assert_eq!(job.num_uppers, 0);
    }

    #[test]
    fn test_job_encodes_camel_case_flags() {
        let value = serde_json::to_value(ordered_job()).unwrap();
        assert_eq!(value["materialOrderStatus"], "ordered");
        assert_eq!(value["materialArrivalStatus"], "arrived");
        assert_eq!(value["status"], "To-Do");
    }

    #[test]
    fn test_unknown_role_decodes_as_other() {
        let user: User =
            serde_json::from_str(r#"{"id":1,"email":"a@b.co","role":"SUPERVISOR"}"#).unwrap();
        assert_eq!(user.role, Some(Role::Other));
        assert_eq!(user.office, None);
    }

    #[test]
    fn test_home_route_by_role() {
        let mut user = User {
            role: Some(Role::Admin),
            ..User::default()
        };
        assert_eq!(user.home_route(), "/admin");
        user.role = Some(Role::Installer);
        assert_eq!(user.home_route(), "/jobs");
    }
}
