//! Request failures and the fallback message each operation shows.

use std::fmt;

/// Backend capability an error came from. Picks the fallback message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    Login,
    Register,
    GetSelf,
    UpdateProfile,
    CreateEmployee,
    UpdateEmployee,
    GetAllEmployees,
    DeleteUser,
    CreateJob,
    UpdateJob,
    DeleteJob,
    GetJobs,
    UploadJobImage,
    UpdateJobImage,
}

impl Operation {
    /// Message shown when the backend does not supply one.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Operation::Login => "Login failed",
            Operation::Register => "Registration failed",
            Operation::GetSelf => "Failed to fetch user data",
            Operation::UpdateProfile => "Failed to update user profile",
            Operation::CreateEmployee => "Failed to create employee",
            Operation::UpdateEmployee => "Failed to update employee",
            Operation::GetAllEmployees => "Failed to fetch all employees",
            Operation::DeleteUser => "Failed to delete user",
            Operation::CreateJob => "Failed to create job",
            Operation::UpdateJob => "Failed to update job",
            Operation::DeleteJob => "Failed to delete job",
            Operation::GetJobs => "Failed to fetch jobs",
            Operation::UploadJobImage | Operation::UpdateJobImage => "Failed to upload job image",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Any failed or malformed backend exchange, reduced to a display message.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct RequestError {
    pub operation: Operation,
    pub message: String,
    /// HTTP status, when the backend answered at all.
    pub status: Option<u16>,
}

impl RequestError {
    /// Error carrying the operation's fallback message.
    pub fn fallback(operation: Operation) -> Self {
        Self {
            operation,
            message: operation.fallback_message().to_string(),
            status: None,
        }
    }

    /// Error for a non-2xx response, preferring the backend's `message` field.
    pub fn from_response(operation: Operation, status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|value| value.get("message")?.as_str().map(str::to_string))
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_else(|| operation.fallback_message().to_string());
        Self {
            operation,
            message,
            status: Some(status),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_message_wins() {
        let err = RequestError::from_response(
            Operation::Login,
            400,
            r#"{"message":"Invalid credentials","token":""}"#,
        );
        assert_eq!(err.to_string(), "Invalid credentials");
        assert_eq!(err.status, Some(400));
    }

    #[test]
    fn test_fallback_when_body_has_no_message() {
        for body in ["", "not json", r#"{"message":""}"#, r#"{"error":"x"}"#] {
            let err = RequestError::from_response(Operation::DeleteJob, 404, body);
            assert_eq!(err.message, "Failed to delete job");
        }
    }
}
