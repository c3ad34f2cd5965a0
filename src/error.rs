use std::fmt;

use serde::Deserialize;
use thiserror::Error;
use validator::ValidationErrors;

/// Maximum characters to include in error message body for debugging.
pub(crate) const MAX_ERROR_BODY_CHARS: usize = 200;

/// Identifies the API operation an error came from.
///
/// Every request-scoped [`IamError`] carries one, so callers can match both the
/// failure category and the operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CreateRole,
    GetRole,
    UpdateRole,
    DeleteRole,
    ListRoles,
    ListGrantableRoles,
    CreateUser,
    GetUser,
    ListUsers,
    RemoveUser,
    UpdateUserAuthGrants,
    UpdateUserInfo,
    UpdateUserNotifications,
    UpdateTfa,
    LockUser,
    UnlockUser,
    ResetUserPassword,
    SetUserPassword,
    SupportedCountries,
    SupportedContactTypes,
    SupportedLanguages,
    SupportedTimezones,
    ListProducts,
    ListTimeoutPolicies,
    ListStates,
    GetPasswordPolicy,
    ListAccountSwitchKeys,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::CreateRole => "create role",
            Operation::GetRole => "get role",
            Operation::UpdateRole => "update role",
            Operation::DeleteRole => "delete role",
            Operation::ListRoles => "list roles",
            Operation::ListGrantableRoles => "list grantable roles",
            Operation::CreateUser => "create user",
            Operation::GetUser => "get user",
            Operation::ListUsers => "list users",
            Operation::RemoveUser => "remove user",
            Operation::UpdateUserAuthGrants => "update user auth grants",
            Operation::UpdateUserInfo => "update user info",
            Operation::UpdateUserNotifications => "update user notifications",
            Operation::UpdateTfa => "update user's two-factor authentication",
            Operation::LockUser => "lock user",
            Operation::UnlockUser => "unlock user",
            Operation::ResetUserPassword => "reset user password",
            Operation::SetUserPassword => "set user password",
            Operation::SupportedCountries => "supported countries",
            Operation::SupportedContactTypes => "supported contact types",
            Operation::SupportedLanguages => "supported languages",
            Operation::SupportedTimezones => "supported timezones",
            Operation::ListProducts => "list products",
            Operation::ListTimeoutPolicies => "list timeout policies",
            Operation::ListStates => "list states",
            Operation::GetPasswordPolicy => "get password policy",
            Operation::ListAccountSwitchKeys => "list account switch keys",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Problem-detail payload returned by the API on failure.
///
/// `status_code` is the HTTP status of the response; the remaining fields come
/// from the JSON body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiError {
    #[serde(rename = "type")]
    pub error_type: String,
    pub title: String,
    pub detail: String,
    pub instance: String,
    pub status: Option<u16>,
    pub http_status: Option<u16>,
    #[serde(skip)]
    pub status_code: u16,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "API error (HTTP {}): [{}] {}",
            self.status_code, self.error_type, self.title
        )?;
        if !self.detail.is_empty() {
            write!(f, ": {}", self.detail)?;
        }
        Ok(())
    }
}

/// Errors that can occur when using the IAM client.
#[derive(Debug, Error)]
pub enum IamError {
    /// Request parameters failed validation; nothing was sent.
    #[error("{operation}: struct validation: {source}")]
    Validation {
        operation: Operation,
        #[source]
        source: ValidationErrors,
    },

    /// The request could not be built (bad URL, unserializable body).
    #[error("{operation}: failed to create request: {message}")]
    Request { operation: Operation, message: String },

    /// HTTP/network layer error from reqwest.
    #[error("{operation}: request failed: {source}")]
    HttpClient {
        operation: Operation,
        #[source]
        source: reqwest::Error,
    },

    /// The API answered with an unexpected status and a problem-detail body.
    #[error("{operation}: {error}")]
    Api { operation: Operation, error: ApiError },

    /// The API answered with an unexpected status and an undecodable body.
    #[error("{operation}: HTTP {status} with body: {body}")]
    Http {
        operation: Operation,
        status: u16,
        body: String,
    },

    /// Success response body did not match the expected shape.
    #[error("{operation}: deserialization error: {source}")]
    Deserialize {
        operation: Operation,
        #[source]
        source: serde_json::Error,
    },

    /// Request signing error.
    #[error("signature error: {0}")]
    Signature(String),

    /// Credential not found or invalid.
    #[error("credential error: {0}")]
    Credential(String),

    /// Client configuration error.
    #[error("config error: {0}")]
    Config(String),
}

impl IamError {
    pub(crate) fn validation(operation: Operation, source: ValidationErrors) -> Self {
        IamError::Validation { operation, source }
    }

    /// Returns the operation this error belongs to, if request-scoped.
    pub fn operation(&self) -> Option<Operation> {
        match self {
            IamError::Validation { operation, .. }
            | IamError::Request { operation, .. }
            | IamError::HttpClient { operation, .. }
            | IamError::Api { operation, .. }
            | IamError::Http { operation, .. }
            | IamError::Deserialize { operation, .. } => Some(*operation),
            IamError::Signature(_) | IamError::Credential(_) | IamError::Config(_) => None,
        }
    }

    /// Returns the problem-detail payload if this is an API error.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            IamError::Api { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Returns the HTTP status for errors produced from a response.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            IamError::Api { error, .. } => Some(error.status_code),
            IamError::Http { status, .. } => Some(*status),
            IamError::HttpClient { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns the field errors if this is a validation error.
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            IamError::Validation { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Returns `true` if retrying the same call might succeed.
    ///
    /// The client never retries on its own; this only classifies.
    pub fn is_retryable(&self) -> bool {
        match self {
            IamError::HttpClient { source, .. } => source.is_timeout() || source.is_connect(),
            IamError::Api { .. } | IamError::Http { .. } => self
                .status_code()
                .is_some_and(|status| status == 429 || status >= 500),
            IamError::Validation { .. }
            | IamError::Request { .. }
            | IamError::Deserialize { .. }
            | IamError::Signature(_)
            | IamError::Credential(_)
            | IamError::Config(_) => false,
        }
    }
}

/// A specialized Result type for IAM operations.
pub type Result<T> = std::result::Result<T, IamError>;

/// Validates request parameters before anything is built or sent.
pub(crate) fn validate<T: validator::Validate>(operation: Operation, params: &T) -> Result<()> {
    params
        .validate()
        .map_err(|errors| IamError::validation(operation, errors))
}

/// Truncates a string to at most `max_chars` characters on a valid UTF-8 boundary.
pub(crate) fn truncate_str(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
