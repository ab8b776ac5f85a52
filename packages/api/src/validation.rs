//! Client-side form checks. A form that fails here never reaches the network.
//!
//! Each form checks its rules in a fixed order and reports the first failure,
//! except login, which reports the email and password fields separately.

use std::sync::LazyLock;

use regex::Regex;
use store::{JobStatus, Office, User};

use crate::payloads::{
    EmployeeRequest, JobForm, LoginRequest, NewJob, RegisterRequest, UpdateProfileRequest,
};

static STRICT_EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"));
static LOOSE_EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern"));
static USERNAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9_]+$").expect("username pattern"));
static DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("digits pattern"));

/// MIME types accepted for job photos.
pub const IMAGE_TYPES: [&str; 3] = ["image/png", "image/jpeg", "image/svg+xml"];

/// Which input a validation message belongs under.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Email,
    Password,
    /// Shown once for the whole form.
    Form,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Email is required.")]
    EmailRequired,
    #[error("Password is required.")]
    PasswordRequired,
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    #[error("All fields are required!")]
    RegistrationIncomplete,
    #[error("Username can only contain lowercase letters, numbers and underscores.")]
    InvalidUsername,
    #[error("Password must be at least 8 characters long.")]
    PasswordTooShort,
    #[error("Passwords do not match!")]
    PasswordMismatch,
    #[error("Cell number must be numeric.")]
    CellNotNumeric,
    #[error("Please enter a valid cell phone number (numbers only).")]
    InvalidCell,
    #[error("All fields are required.")]
    MissingFields,
    #[error("Cabinet counts must be whole numbers.")]
    CountNotNumeric,
    #[error("An employee with the same username or email already exists.")]
    DuplicateEmployee,
    #[error("Only png, jpg and svg images are allowed")]
    UnsupportedImageType,
}

impl ValidationError {
    pub fn field(&self) -> Field {
        match self {
            ValidationError::EmailRequired | ValidationError::InvalidEmail => Field::Email,
            ValidationError::PasswordRequired => Field::Password,
            _ => Field::Form,
        }
    }
}

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

impl LoginRequest {
    /// Missing email and missing password are both reported; the email format
    /// is only checked once both are present.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        if blank(&self.email) {
            errors.push(ValidationError::EmailRequired);
        }
        if self.password.is_empty() {
            errors.push(ValidationError::PasswordRequired);
        }
        if errors.is_empty() && !STRICT_EMAIL.is_match(&self.email) {
            errors.push(ValidationError::InvalidEmail);
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let required = [
            &self.first_name,
            &self.last_name,
            &self.username,
            &self.email,
            &self.cell,
            &self.office,
            &self.role,
            &self.password,
            &self.confirm_password,
        ];
        if required.iter().any(|value| blank(value)) {
            return Err(ValidationError::RegistrationIncomplete);
        }
        if !USERNAME.is_match(&self.username) {
            return Err(ValidationError::InvalidUsername);
        }
        if !LOOSE_EMAIL.is_match(&self.email) {
            return Err(ValidationError::InvalidEmail);
        }
        if self.password.chars().count() < 8 {
            return Err(ValidationError::PasswordTooShort);
        }
        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }
        if !DIGITS.is_match(&self.cell) {
            return Err(ValidationError::CellNotNumeric);
        }
        Ok(())
    }
}

impl UpdateProfileRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if blank(&self.username) || blank(&self.email) || blank(&self.cell) {
            return Err(ValidationError::MissingFields);
        }
        if !STRICT_EMAIL.is_match(&self.email) {
            return Err(ValidationError::InvalidEmail);
        }
        if !DIGITS.is_match(&self.cell) {
            return Err(ValidationError::InvalidCell);
        }
        Ok(())
    }
}

impl EmployeeRequest {
    fn required_blank(&self) -> bool {
        [
            &self.first_name,
            &self.last_name,
            &self.username,
            &self.email,
            &self.cell,
            &self.role,
            &self.office,
        ]
        .iter()
        .any(|value| blank(value))
    }

    /// New employee: every field including the password, and no clash with
    /// an already loaded employee's username or email.
    pub fn validate_new(&self, existing: &[User]) -> Result<(), ValidationError> {
        if self.required_blank() || self.password.is_empty() {
            return Err(ValidationError::MissingFields);
        }
        let duplicate = existing
            .iter()
            .any(|user| user.username == self.username || user.email == self.email);
        if duplicate {
            return Err(ValidationError::DuplicateEmployee);
        }
        Ok(())
    }

    /// Edit: the password may stay blank to keep the current one.
    pub fn validate_edit(&self) -> Result<(), ValidationError> {
        if self.required_blank() {
            return Err(ValidationError::MissingFields);
        }
        Ok(())
    }
}

impl JobForm {
    /// Check every field and build the request body.
    pub fn validate(&self) -> Result<NewJob, ValidationError> {
        let fields = [
            &self.job_number,
            &self.job_name,
            &self.num_cabinets,
            &self.num_uppers,
            &self.num_lowers,
            &self.cabinet_maker_id,
            &self.installer_id,
            &self.due_date,
            &self.job_color,
            &self.office,
            &self.status,
        ];
        if fields.iter().any(|value| blank(value)) {
            return Err(ValidationError::MissingFields);
        }

        let count = |value: &str| {
            value
                .trim()
                .parse::<u32>()
                .map_err(|_| ValidationError::CountNotNumeric)
        };
        let id = |value: &str| {
            value
                .trim()
                .parse::<i64>()
                .map_err(|_| ValidationError::MissingFields)
        };
        let office: Office = self
            .office
            .parse()
            .map_err(|_| ValidationError::MissingFields)?;
        let status: JobStatus = self
            .status
            .parse()
            .map_err(|_| ValidationError::MissingFields)?;

        Ok(NewJob {
            job_number: self.job_number.trim().to_string(),
            job_name: self.job_name.trim().to_string(),
            num_cabinets: count(&self.num_cabinets)?,
            num_uppers: count(&self.num_uppers)?,
            num_lowers: count(&self.num_lowers)?,
            cabinet_maker_id: id(&self.cabinet_maker_id)?,
            installer_id: id(&self.installer_id)?,
            due_date: self.due_date.trim().to_string(),
            job_color: self.job_color.trim().to_string(),
            office,
            status,
        })
    }
}

/// Reject anything but png, jpeg and svg before uploading.
pub fn check_image_type(mime: &str) -> Result<(), ValidationError> {
    if IMAGE_TYPES.contains(&mime) {
        Ok(())
    } else {
        Err(ValidationError::UnsupportedImageType)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration() -> RegisterRequest {
        RegisterRequest {
            first_name: "Dana".into(),
            last_name: "Reyes".into(),
            username: "dana_r2".into(),
            email: "dana@example.com".into(),
            cell: "5551234567".into(),
            office: "400".into(),
            role: "INSTALLER".into(),
            password: "hunter22!".into(),
            confirm_password: "hunter22!".into(),
        }
    }

    #[test]
    fn test_login_reports_both_missing_fields() {
        let errors = LoginRequest::default().validate().unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::EmailRequired, ValidationError::PasswordRequired]
        );
        assert_eq!(errors[0].field(), Field::Email);
        assert_eq!(errors[1].field(), Field::Password);
    }

    #[test]
    fn test_login_rejects_malformed_email() {
        let request = LoginRequest {
            email: "dana@example".into(),
            password: "x".into(),
        };
        let errors = request.validate().unwrap_err();
        assert_eq!(errors, vec![ValidationError::InvalidEmail]);
        assert_eq!(errors[0].to_string(), "Please enter a valid email address.");

        let ok = LoginRequest {
            email: "dana@example.com".into(),
            password: "x".into(),
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_registration_rules_in_order() {
        assert!(registration().validate().is_ok());

        let mut r = registration();
        r.office.clear();
        assert_eq!(r.validate(), Err(ValidationError::RegistrationIncomplete));

        let mut r = registration();
        r.username = "Dana".into();
        assert_eq!(r.validate(), Err(ValidationError::InvalidUsername));

        let mut r = registration();
        r.email = "dana.example.com".into();
        assert_eq!(r.validate(), Err(ValidationError::InvalidEmail));

        let mut r = registration();
        r.password = "short".into();
        r.confirm_password = "short".into();
        assert_eq!(r.validate(), Err(ValidationError::PasswordTooShort));

        let mut r = registration();
        r.confirm_password = "hunter23!".into();
        assert_eq!(r.validate(), Err(ValidationError::PasswordMismatch));

        let mut r = registration();
        r.cell = "555-1234".into();
        assert_eq!(r.validate(), Err(ValidationError::CellNotNumeric));
    }

    #[test]
    fn test_profile_update_messages() {
        let mut form = UpdateProfileRequest {
            username: "dana".into(),
            email: "dana@example.com".into(),
            cell: "555".into(),
            ..UpdateProfileRequest::default()
        };
        assert!(form.validate().is_ok());

        form.cell = "call me".into();
        assert_eq!(
            form.validate().unwrap_err().to_string(),
            "Please enter a valid cell phone number (numbers only)."
        );

        form.email.clear();
        assert_eq!(form.validate().unwrap_err().to_string(), "All fields are required.");
    }

    #[test]
    fn test_duplicate_employee_rejected() {
        let existing = vec![User {
            id: 3,
            username: "sam".into(),
            email: "sam@example.com".into(),
            ..User::default()
        }];
        let request = EmployeeRequest {
            first_name: "Sam".into(),
            last_name: "Other".into(),
            username: "sam2".into(),
            email: "sam@example.com".into(),
            cell: "1".into(),
            role: "INSTALLER".into(),
            office: "400".into(),
            password: "password1".into(),
            ..EmployeeRequest::default()
        };
        assert_eq!(
            request.validate_new(&existing),
            Err(ValidationError::DuplicateEmployee)
        );

        let no_password = EmployeeRequest {
            password: String::new(),
            ..request.clone()
        };
        assert_eq!(no_password.validate_new(&[]), Err(ValidationError::MissingFields));
        assert!(no_password.validate_edit().is_ok());
    }

    #[test]
    fn test_job_form_builds_request() {
        let form = JobForm {
            job_number: "1042".into(),
            job_name: "Maple kitchen".into(),
            num_cabinets: "12".into(),
            num_uppers: "5".into(),
            num_lowers: "7".into(),
            cabinet_maker_id: "3".into(),
            installer_id: "4".into(),
            due_date: "2025-03-01".into(),
            job_color: "White".into(),
            office: "402".into(),
            status: "To-Do".into(),
        };
        let job = form.validate().unwrap();
        assert_eq!(job.num_cabinets, 12);
        assert_eq!(job.office, Office::Office402);
        assert_eq!(job.status, JobStatus::ToDo);

        let bad_count = JobForm {
            num_uppers: "five".into(),
            ..form.clone()
        };
        assert_eq!(bad_count.validate(), Err(ValidationError::CountNotNumeric));

        let missing = JobForm {
            job_color: " ".into(),
            ..form
        };
        assert_eq!(missing.validate(), Err(ValidationError::MissingFields));
    }

    #[test]
    fn test_image_types() {
        assert!(check_image_type("image/png").is_ok());
        assert!(check_image_type("image/jpeg").is_ok());
        assert!(check_image_type("image/svg+xml").is_ok());
        assert_eq!(
            check_image_type("image/gif").unwrap_err().to_string(),
            "Only png, jpg and svg images are allowed"
        );
    }
}
