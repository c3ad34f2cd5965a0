//! User management: identities, basic info, auth grants, notifications and TFA.

use std::fmt;
use std::sync::OnceLock;

use async_trait::async_trait;
use regex::Regex;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::client::Client;
use crate::error::{Operation, Result, validate};
use crate::request::{ApiRequest, CREATED, NO_CONTENT, OK_OR_NO_CONTENT};

/// Cached regex for email validation.
static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$")
            .expect("Invalid EMAIL_REGEX pattern")
    })
}

/// Records a `required` error for `field` when the value is missing.
fn require(errors: &mut ValidationErrors, field: &'static str, present: bool) {
    if !present {
        errors.add(field, ValidationError::new("required"));
    }
}

fn into_result(errors: ValidationErrors) -> std::result::Result<(), ValidationErrors> {
    if errors.errors().is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Profile attributes shared by user reads and writes.
///
/// Empty optional strings are left out of request bodies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserBasicInfo {
    pub first_name: String,
    pub last_name: String,
    #[serde(rename = "uiUserName", skip_serializing_if = "String::is_empty")]
    pub user_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub phone: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub time_zone: String,
    pub job_title: String,
    pub tfa_enabled: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub secondary_email: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub mobile_phone: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub address: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub city: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub state: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub zip_code: String,
    pub country: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub contact_type: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub preferred_language: String,
    /// Session timeout in seconds.
    #[serde(rename = "sessionTimeOut", skip_serializing_if = "Option::is_none")]
    pub session_timeout: Option<i64>,
}

/// A user as returned by get and create.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    #[serde(flatten)]
    pub basic_info: UserBasicInfo,
    #[serde(rename = "uiIdentityId")]
    pub identity_id: String,
    pub is_locked: bool,
    pub last_login_date: String,
    pub password_expiry_date: String,
    pub tfa_configured: bool,
    pub email_update_pending: bool,
    pub auth_grants: Vec<AuthGrant>,
    pub notifications: Option<UserNotifications>,
}

/// A user as returned by list.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserListItem {
    pub first_name: String,
    pub last_name: String,
    #[serde(rename = "uiUserName")]
    pub user_name: String,
    pub email: String,
    pub tfa_enabled: bool,
    #[serde(rename = "uiIdentityId")]
    pub identity_id: String,
    pub is_locked: bool,
    pub last_login_date: String,
    pub tfa_configured: bool,
    pub account_id: String,
    pub actions: Option<UserActions>,
    pub auth_grants: Vec<AuthGrant>,
}

/// Operations the caller may perform on a listed user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserActions {
    pub api_client: bool,
    pub delete: bool,
    pub edit: bool,
    pub is_cloneable: bool,
    pub reset_password: bool,
    pub third_party_access: bool,
    #[serde(rename = "canEditTFA")]
    pub can_edit_tfa: bool,
    pub edit_profile: bool,
}

/// A role held by a user on a group, with its sub-group tree.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuthGrant {
    pub group_id: i64,
    pub group_name: String,
    pub is_blocked: bool,
    pub role_description: String,
    pub role_id: Option<i64>,
    pub role_name: String,
    #[serde(rename = "subGroups")]
    pub sub_groups: Vec<AuthGrant>,
}

/// Write-side shape of an [`AuthGrant`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthGrantRequest {
    pub group_id: i64,
    pub is_blocked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_id: Option<i64>,
    #[serde(rename = "subGroups", skip_serializing_if = "Vec::is_empty")]
    pub sub_groups: Vec<AuthGrantRequest>,
}

/// Email notification settings of a user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserNotifications {
    #[serde(rename = "enableEmailNotifications")]
    pub enable_email: bool,
    pub options: UserNotificationOptions,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserNotificationOptions {
    #[serde(rename = "newUserNotification")]
    pub new_user: bool,
    pub password_expiry: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub proactive: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub upgrade: Vec<String>,
}

/// Two-factor authentication action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TfaAction {
    Enable,
    Disable,
    Reset,
}

impl TfaAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            TfaAction::Enable => "enable",
            TfaAction::Disable => "disable",
            TfaAction::Reset => "reset",
        }
    }
}

impl fmt::Display for TfaAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters for [`Users::create_user`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[serde(flatten)]
    pub user: UserBasicInfo,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub auth_grants: Vec<AuthGrantRequest>,
    pub notifications: UserNotifications,
    /// Sends the welcome email to the new user.
    #[serde(skip)]
    pub send_email: bool,
}

impl Validate for CreateUserRequest {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        require(&mut errors, "country", !self.user.country.is_empty());
        if self.user.email.is_empty() {
            errors.add("email", ValidationError::new("required"));
        } else if !email_regex().is_match(&self.user.email) {
            errors.add("email", ValidationError::new("email"));
        }
        require(&mut errors, "first_name", !self.user.first_name.is_empty());
        require(&mut errors, "last_name", !self.user.last_name.is_empty());
        require(&mut errors, "auth_grants", !self.auth_grants.is_empty());
        into_result(errors)
    }
}

/// Parameters for [`Users::get_user`].
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct GetUserRequest {
    #[validate(length(min = 1))]
    pub identity_id: String,
    pub actions: bool,
    pub auth_grants: bool,
    pub notifications: bool,
}

/// Parameters for [`Users::list_users`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListUsersRequest {
    pub group_id: Option<i64>,
    pub auth_grants: bool,
    pub actions: bool,
}

/// Parameters for [`Users::remove_user`].
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct RemoveUserRequest {
    #[validate(length(min = 1))]
    pub identity_id: String,
}

/// Parameters for [`Users::update_user_info`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateUserInfoRequest {
    pub identity_id: String,
    pub user: UserBasicInfo,
}

impl Validate for UpdateUserInfoRequest {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        require(&mut errors, "identity_id", !self.identity_id.is_empty());
        require(&mut errors, "first_name", !self.user.first_name.is_empty());
        require(&mut errors, "last_name", !self.user.last_name.is_empty());
        require(&mut errors, "country", !self.user.country.is_empty());
        require(&mut errors, "time_zone", !self.user.time_zone.is_empty());
        require(
            &mut errors,
            "preferred_language",
            !self.user.preferred_language.is_empty(),
        );
        require(&mut errors, "session_timeout", self.user.session_timeout.is_some());
        into_result(errors)
    }
}

/// Parameters for [`Users::update_user_notifications`].
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct UpdateUserNotificationsRequest {
    #[validate(length(min = 1))]
    pub identity_id: String,
    pub notifications: UserNotifications,
}

/// Parameters for [`Users::update_user_auth_grants`].
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct UpdateUserAuthGrantsRequest {
    #[validate(length(min = 1))]
    pub identity_id: String,
    #[validate(length(min = 1))]
    pub auth_grants: Vec<AuthGrantRequest>,
}

/// Parameters for [`Users::update_tfa`].
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct UpdateTfaRequest {
    #[validate(length(min = 1))]
    pub identity_id: String,
    pub action: TfaAction,
}

/// User management operations.
#[async_trait]
pub trait Users {
    /// Creates a user; the server assigns the identity ID.
    async fn create_user(&self, params: CreateUserRequest) -> Result<User>;

    async fn get_user(&self, params: GetUserRequest) -> Result<User>;

    /// Lists users, optionally filtered by group.
    async fn list_users(&self, params: ListUsersRequest) -> Result<Vec<UserListItem>>;

    async fn remove_user(&self, params: RemoveUserRequest) -> Result<()>;

    /// Replaces the user's basic info and returns the stored version.
    async fn update_user_info(&self, params: UpdateUserInfoRequest) -> Result<UserBasicInfo>;

    async fn update_user_notifications(
        &self,
        params: UpdateUserNotificationsRequest,
    ) -> Result<UserNotifications>;

    /// Replaces the user's auth grants and returns the stored grants.
    async fn update_user_auth_grants(
        &self,
        params: UpdateUserAuthGrantsRequest,
    ) -> Result<Vec<AuthGrant>>;

    /// Enables, disables or resets two-factor authentication.
    async fn update_tfa(&self, params: UpdateTfaRequest) -> Result<()>;
}

fn identity(operation: Operation, method: Method, identity_id: &str) -> ApiRequest {
    ApiRequest::user_admin(operation, method)
        .segment("ui-identities")
        .segment(identity_id)
}

pub(crate) fn create_user_request(params: &CreateUserRequest) -> Result<ApiRequest> {
    validate(Operation::CreateUser, params)?;
    ApiRequest::user_admin(Operation::CreateUser, Method::POST)
        .segment("ui-identities")
        .query("sendEmail", params.send_email)
        .json(params)
        .map(|request| request.expect(CREATED))
}

pub(crate) fn get_user_request(params: &GetUserRequest) -> Result<ApiRequest> {
    validate(Operation::GetUser, params)?;
    Ok(identity(Operation::GetUser, Method::GET, &params.identity_id)
        .query("actions", params.actions)
        .query("authGrants", params.auth_grants)
        .query("notifications", params.notifications))
}

pub(crate) fn list_users_request(params: &ListUsersRequest) -> ApiRequest {
    ApiRequest::user_admin(Operation::ListUsers, Method::GET)
        .segment("ui-identities")
        .query("actions", params.actions)
        .query("authGrants", params.auth_grants)
        .query_opt("groupId", params.group_id)
}

pub(crate) fn remove_user_request(params: &RemoveUserRequest) -> Result<ApiRequest> {
    validate(Operation::RemoveUser, params)?;
    Ok(identity(Operation::RemoveUser, Method::DELETE, &params.identity_id).expect(OK_OR_NO_CONTENT))
}

pub(crate) fn update_user_info_request(params: &UpdateUserInfoRequest) -> Result<ApiRequest> {
    validate(Operation::UpdateUserInfo, params)?;
    identity(Operation::UpdateUserInfo, Method::PUT, &params.identity_id)
        .segment("basic-info")
        .json(&params.user)
}

pub(crate) fn update_user_notifications_request(
    params: &UpdateUserNotificationsRequest,
) -> Result<ApiRequest> {
    validate(Operation::UpdateUserNotifications, params)?;
    identity(Operation::UpdateUserNotifications, Method::PUT, &params.identity_id)
        .segment("notifications")
        .json(&params.notifications)
}

pub(crate) fn update_user_auth_grants_request(
    params: &UpdateUserAuthGrantsRequest,
) -> Result<ApiRequest> {
    validate(Operation::UpdateUserAuthGrants, params)?;
    identity(Operation::UpdateUserAuthGrants, Method::PUT, &params.identity_id)
        .segment("auth-grants")
        .json(&params.auth_grants)
}

pub(crate) fn update_tfa_request(params: &UpdateTfaRequest) -> Result<ApiRequest> {
    validate(Operation::UpdateTfa, params)?;
    Ok(identity(Operation::UpdateTfa, Method::PUT, &params.identity_id)
        .segment("tfa")
        .query("action", params.action)
        .expect(NO_CONTENT))
}

#[async_trait]
impl Users for Client {
    async fn create_user(&self, params: CreateUserRequest) -> Result<User> {
        self.execute_object(create_user_request(&params)?).await
    }

    async fn get_user(&self, params: GetUserRequest) -> Result<User> {
        self.execute_object(get_user_request(&params)?).await
    }

    async fn list_users(&self, params: ListUsersRequest) -> Result<Vec<UserListItem>> {
        self.execute(list_users_request(&params)).await
    }

    async fn remove_user(&self, params: RemoveUserRequest) -> Result<()> {
        self.execute_empty(remove_user_request(&params)?).await
    }

    async fn update_user_info(&self, params: UpdateUserInfoRequest) -> Result<UserBasicInfo> {
        self.execute_object(update_user_info_request(&params)?).await
    }

    async fn update_user_notifications(
        &self,
        params: UpdateUserNotificationsRequest,
    ) -> Result<UserNotifications> {
        self.execute_object(update_user_notifications_request(&params)?).await
    }

    async fn update_user_auth_grants(
        &self,
        params: UpdateUserAuthGrantsRequest,
    ) -> Result<Vec<AuthGrant>> {
        self.execute(update_user_auth_grants_request(&params)?).await
    }

    async fn update_tfa(&self, params: UpdateTfaRequest) -> Result<()> {
        self.execute_empty(update_tfa_request(&params)?).await
    }
}
