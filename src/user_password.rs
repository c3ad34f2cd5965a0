//! Resetting and setting user passwords.

use async_trait::async_trait;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::client::Client;
use crate::error::{Operation, Result, validate};
use crate::request::{ApiRequest, NO_CONTENT, OK_OR_NO_CONTENT};

/// Parameters for [`UserPassword::reset_user_password`].
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct ResetUserPasswordRequest {
    #[validate(length(min = 1))]
    pub identity_id: String,
    /// Emails the one-time password to the user instead of returning it.
    pub send_email: bool,
}

/// One-time password returned when the reset is not emailed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResetUserPasswordResponse {
    pub new_password: String,
}

/// Parameters for [`UserPassword::set_user_password`].
#[derive(Clone, Default, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SetUserPasswordRequest {
    #[serde(skip)]
    #[validate(length(min = 1))]
    pub identity_id: String,
    #[validate(length(min = 1))]
    pub new_password: String,
}

impl std::fmt::Debug for SetUserPasswordRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SetUserPasswordRequest")
            .field("identity_id", &self.identity_id)
            .field("new_password", &"****")
            .finish()
    }
}

/// Password operations.
#[async_trait]
pub trait UserPassword {
    /// Resets the password; returns the one-time password unless it was emailed.
    async fn reset_user_password(
        &self,
        params: ResetUserPasswordRequest,
    ) -> Result<Option<ResetUserPasswordResponse>>;

    /// Sets a new password for the user.
    async fn set_user_password(&self, params: SetUserPasswordRequest) -> Result<()>;
}

pub(crate) fn reset_user_password_request(params: &ResetUserPasswordRequest) -> Result<ApiRequest> {
    validate(Operation::ResetUserPassword, params)?;
    Ok(ApiRequest::user_admin(Operation::ResetUserPassword, Method::POST)
        .segment("ui-identities")
        .segment(params.identity_id.as_str())
        .segment("reset-password")
        .query("sendEmail", params.send_email)
        .expect(OK_OR_NO_CONTENT))
}

pub(crate) fn set_user_password_request(params: &SetUserPasswordRequest) -> Result<ApiRequest> {
    validate(Operation::SetUserPassword, params)?;
    ApiRequest::user_admin(Operation::SetUserPassword, Method::POST)
        .segment("ui-identities")
        .segment(params.identity_id.as_str())
        .segment("set-password")
        .json(params)
        .map(|request| request.expect(NO_CONTENT))
}

#[async_trait]
impl UserPassword for Client {
    async fn reset_user_password(
        &self,
        params: ResetUserPasswordRequest,
    ) -> Result<Option<ResetUserPasswordResponse>> {
        self.execute_optional(reset_user_password_request(&params)?).await
    }

    async fn set_user_password(&self, params: SetUserPasswordRequest) -> Result<()> {
        self.execute_empty(set_user_password_request(&params)?).await
    }
}
