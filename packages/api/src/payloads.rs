//! Request and response bodies exchanged with the backend.
//!
//! Field names are camelCase on the wire. Form structs hold raw text as typed
//! by the user; [`crate::validation`] checks them before anything is sent.

use serde::{Deserialize, Serialize};
use store::{JobStatus, Office, Role, User};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Self-registration form.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub cell: String,
    pub office: String,
    pub role: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub username: String,
    pub email: String,
    pub cell: String,
    pub password: String,
    pub confirm_password: String,
}

impl UpdateProfileRequest {
    /// Form pre-filled from the signed-in user, passwords blank.
    pub fn from_user(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            email: user.email.clone(),
            cell: user.cell.clone(),
            ..Self::default()
        }
    }
}

/// Employee form used for both create and update. `id` is set only on update.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub cell: String,
    pub role: String,
    pub office: String,
    /// Omitted from the body when blank; sent twice as `password` and
    /// `confirmPassword` otherwise.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub password: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub confirm_password: String,
}

impl EmployeeRequest {
    /// Edit form pre-filled from an existing employee.
    pub fn from_user(user: &User) -> Self {
        Self {
            id: Some(user.id),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            cell: user.cell.clone(),
            role: user.role.map(|r| r.as_str().to_string()).unwrap_or_default(),
            office: user.office.map(|o| o.as_str().to_string()).unwrap_or_default(),
            ..Self::default()
        }
    }

    /// Copy `password` into `confirm_password` the way the backend expects.
    pub fn with_confirmed_password(mut self) -> Self {
        self.confirm_password = self.password.clone();
        self
    }
}

/// Create-job form as typed. Counts and ids stay text until validated.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct JobForm {
    pub job_number: String,
    pub job_name: String,
    pub num_cabinets: String,
    pub num_uppers: String,
    pub num_lowers: String,
    pub cabinet_maker_id: String,
    pub installer_id: String,
    pub due_date: String,
    pub job_color: String,
    pub office: String,
    pub status: String,
}

/// Body of `POST /jobs`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJob {
    pub job_number: String,
    pub job_name: String,
    pub num_cabinets: u32,
    pub num_uppers: u32,
    pub num_lowers: u32,
    pub cabinet_maker_id: i64,
    pub installer_id: i64,
    pub due_date: String,
    pub job_color: String,
    pub office: Office,
    pub status: JobStatus,
}

/// Shape of every `/user/*` response.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AccountResponse {
    pub token: Option<String>,
    pub user: Option<User>,
    pub message: Option<String>,
    pub role: Option<Role>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageUrlRequest {
    pub image_url: String,
}

/// A file picked in the browser, ready for multipart upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageFile {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Token and user returned by a successful login or registration.
#[derive(Clone, Debug, PartialEq)]
pub struct SignedIn {
    pub token: String,
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_employee_request_omits_blank_password() {
        let request = EmployeeRequest {
            first_name: "Ana".into(),
            role: "INSTALLER".into(),
            office: "402".into(),
            ..EmployeeRequest::default()
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("password").is_none());
        assert!(json.get("confirmPassword").is_none());
        assert!(json.get("id").is_none());
        assert_eq!(json["firstName"], "Ana");
    }

    #[test]
    fn test_employee_edit_sends_id_and_confirmation() {
        let user = User {
            id: 12,
            username: "ana_r".into(),
            role: Some(Role::Installer),
            office: Some(Office::Office402),
            ..User::default()
        };
        let mut request = EmployeeRequest::from_user(&user);
        request.password = "longenough".into();
        let json = serde_json::to_value(request.with_confirmed_password()).unwrap();
        assert_eq!(json["id"], 12);
        assert_eq!(json["role"], "INSTALLER");
        assert_eq!(json["office"], "402");
        assert_eq!(json["confirmPassword"], "longenough");
    }

    #[test]
    fn test_account_response_tolerates_missing_fields() {
        let parsed: AccountResponse =
            serde_json::from_str(r#"{"message":"Invalid credentials","token":""}"#).unwrap();
        assert_eq!(parsed.token.as_deref(), Some(""));
        assert!(parsed.user.is_none());
    }

    #[test]
    fn test_new_job_wire_names() {
        let job = NewJob {
            job_number: "1042".into(),
            job_name: "Maple kitchen".into(),
            num_cabinets: 12,
            num_uppers: 5,
            num_lowers: 7,
            cabinet_maker_id: 3,
            installer_id: 4,
            due_date: "2025-03-01".into(),
            job_color: "White".into(),
            office: Office::Office403,
            status: JobStatus::InProgress,
        };
        let json = serde_json::to_value(&job).unwrap();
        assert_eq!(json["numCabinets"], 12);
        assert_eq!(json["cabinetMakerId"], 3);
        assert_eq!(json["office"], "403");
        assert_eq!(json["status"], "In Progress");
    }
}
