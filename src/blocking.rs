//! Synchronous (blocking) client for the Identity and Access Management API.
//!
//! This module is only available when the `blocking` feature is enabled.
//! It mirrors every operation of the async [`crate::client::Client`] as an
//! inherent method, using `reqwest::blocking`.
//!
//! # When to Use
//!
//! Use the blocking client for CLI tools and scripts that do not run an async
//! runtime. Use the async [`crate::Client`] inside services.
//!
//! # Example
//!
//! ```no_run
//! use rs_edgegrid_iam::blocking::Client;
//! use rs_edgegrid_iam::{Credential, ListRolesRequest};
//!
//! fn main() -> rs_edgegrid_iam::Result<()> {
//!     let client = Client::new(Credential::new(
//!         "akab-host.luna.akamaiapis.net",
//!         "client-token",
//!         "client-secret",
//!         "access-token",
//!     ))?;
//!
//!     let roles = client.list_roles(ListRolesRequest::default())?;
//!     println!("{} roles", roles.len());
//!     Ok(())
//! }
//! ```

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;

use crate::account_switch_keys::{self, AccountSwitchKey, ListAccountSwitchKeysRequest};
use crate::config::ClientConfig;
use crate::credential::{ChainProvider, Credential, CredentialProvider};
use crate::error::{IamError, Result};
use crate::exec::{
    check_status, parse_object_response, parse_optional_response, parse_success_response,
};
use crate::request::ApiRequest;
use crate::roles::{
    self, CreateRoleRequest, DeleteRoleRequest, GetRoleRequest, ListRolesRequest, Role,
    RoleGrantedRole, UpdateRoleRequest,
};
use crate::support::{self, ListStatesRequest, PasswordPolicy, TimeoutPolicy, Timezone};
use crate::user_lock::{self, LockUserRequest, UnlockUserRequest};
use crate::user_password::{
    self, ResetUserPasswordRequest, ResetUserPasswordResponse, SetUserPasswordRequest,
};
use crate::users::{
    self, AuthGrant, CreateUserRequest, GetUserRequest, ListUsersRequest, RemoveUserRequest,
    UpdateTfaRequest, UpdateUserAuthGrantsRequest, UpdateUserInfoRequest,
    UpdateUserNotificationsRequest, User, UserBasicInfo, UserListItem, UserNotifications,
};

/// Synchronous client for the Identity and Access Management API.
pub struct Client {
    http: reqwest::blocking::Client,
    config: ClientConfig,
    credential: Credential,
    base_url: String,
}

impl Client {
    /// Creates a new blocking client with an explicit credential.
    pub fn new(credential: Credential) -> Result<Self> {
        Self::with_config(credential, ClientConfig::default())
    }

    /// Creates a new blocking client with custom configuration.
    pub fn with_config(credential: Credential, config: ClientConfig) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| IamError::Config(format!("failed to build HTTP client: {}", e)))?;
        let base_url = config.base_url(&credential.host);
        Ok(Self {
            http,
            config,
            credential,
            base_url,
        })
    }

    /// Creates a new blocking client using the default credential chain.
    pub fn from_env() -> Result<Self> {
        let credential = ChainProvider::default_chain().resolve()?;
        Self::new(credential)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // Roles

    pub fn create_role(&self, params: CreateRoleRequest) -> Result<Role> {
        self.execute_object(roles::create_role_request(&params)?)
    }

    pub fn get_role(&self, params: GetRoleRequest) -> Result<Role> {
        self.execute_object(roles::get_role_request(&params)?)
    }

    pub fn update_role(&self, params: UpdateRoleRequest) -> Result<Role> {
        self.execute_object(roles::update_role_request(&params)?)
    }

    pub fn delete_role(&self, params: DeleteRoleRequest) -> Result<()> {
        self.execute_empty(roles::delete_role_request(&params)?)
    }

    pub fn list_roles(&self, params: ListRolesRequest) -> Result<Vec<Role>> {
        self.execute(roles::list_roles_request(&params))
    }

    pub fn list_grantable_roles(&self) -> Result<Vec<RoleGrantedRole>> {
        self.execute(roles::list_grantable_roles_request())
    }

    // Users

    pub fn create_user(&self, params: CreateUserRequest) -> Result<User> {
        self.execute_object(users::create_user_request(&params)?)
    }

    pub fn get_user(&self, params: GetUserRequest) -> Result<User> {
        self.execute_object(users::get_user_request(&params)?)
    }

    pub fn list_users(&self, params: ListUsersRequest) -> Result<Vec<UserListItem>> {
        self.execute(users::list_users_request(&params))
    }

    pub fn remove_user(&self, params: RemoveUserRequest) -> Result<()> {
        self.execute_empty(users::remove_user_request(&params)?)
    }

    pub fn update_user_info(&self, params: UpdateUserInfoRequest) -> Result<UserBasicInfo> {
        self.execute_object(users::update_user_info_request(&params)?)
    }

    pub fn update_user_notifications(
        &self,
        params: UpdateUserNotificationsRequest,
    ) -> Result<UserNotifications> {
        self.execute_object(users::update_user_notifications_request(&params)?)
    }

    pub fn update_user_auth_grants(
        &self,
        params: UpdateUserAuthGrantsRequest,
    ) -> Result<Vec<AuthGrant>> {
        self.execute(users::update_user_auth_grants_request(&params)?)
    }

    pub fn update_tfa(&self, params: UpdateTfaRequest) -> Result<()> {
        self.execute_empty(users::update_tfa_request(&params)?)
    }

    // Lock and password

    pub fn lock_user(&self, params: LockUserRequest) -> Result<()> {
        self.execute_empty(user_lock::lock_user_request(&params)?)
    }

    pub fn unlock_user(&self, params: UnlockUserRequest) -> Result<()> {
        self.execute_empty(user_lock::unlock_user_request(&params)?)
    }

    pub fn reset_user_password(
        &self,
        params: ResetUserPasswordRequest,
    ) -> Result<Option<ResetUserPasswordResponse>> {
        self.execute_optional(user_password::reset_user_password_request(&params)?)
    }

    pub fn set_user_password(&self, params: SetUserPasswordRequest) -> Result<()> {
        self.execute_empty(user_password::set_user_password_request(&params)?)
    }

    // Support

    pub fn supported_countries(&self) -> Result<Vec<String>> {
        self.execute(support::supported_countries_request())
    }

    pub fn supported_contact_types(&self) -> Result<Vec<String>> {
        self.execute(support::supported_contact_types_request())
    }

    pub fn supported_languages(&self) -> Result<Vec<String>> {
        self.execute(support::supported_languages_request())
    }

    pub fn supported_timezones(&self) -> Result<Vec<Timezone>> {
        self.execute(support::supported_timezones_request())
    }

    pub fn list_products(&self) -> Result<Vec<String>> {
        self.execute(support::list_products_request())
    }

    pub fn list_timeout_policies(&self) -> Result<Vec<TimeoutPolicy>> {
        self.execute(support::list_timeout_policies_request())
    }

    pub fn list_states(&self, params: ListStatesRequest) -> Result<Vec<String>> {
        self.execute(support::list_states_request(&params)?)
    }

    pub fn get_password_policy(&self) -> Result<PasswordPolicy> {
        self.execute_object(support::get_password_policy_request())
    }

    // Account-switch keys

    pub fn list_account_switch_keys(
        &self,
        params: ListAccountSwitchKeysRequest,
    ) -> Result<Vec<AccountSwitchKey>> {
        self.execute(account_switch_keys::list_account_switch_keys_request(&params))
    }

    fn send(&self, request: &ApiRequest) -> Result<String> {
        let operation = request.operation;
        let url = request.url(
            &self.base_url,
            &self.config.api_version,
            self.credential.account_key.as_deref(),
        )?;
        let authorization = request.authorization(&self.credential, &url)?;

        tracing::debug!(%operation, method = %request.method, path = url.path(), "sending request");

        let mut builder = self
            .http
            .request(request.method.clone(), url)
            .header(AUTHORIZATION, authorization)
            .header(ACCEPT, "application/json");
        if let Some(body) = &request.body {
            builder = builder
                .header(CONTENT_TYPE, "application/json")
                .body(body.clone());
        }

        let response = builder
            .send()
            .map_err(|source| IamError::HttpClient { operation, source })?;
        let status = response.status();
        let text = response
            .text()
            .map_err(|source| IamError::HttpClient { operation, source })?;

        tracing::debug!(%operation, status = status.as_u16(), "received response");

        check_status(request, status, &text)?;
        Ok(text)
    }

    fn execute<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        let text = self.send(&request)?;
        parse_success_response(request.operation, &text)
    }

    fn execute_object<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        let text = self.send(&request)?;
        parse_object_response(request.operation, &text)
    }

    fn execute_optional<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<Option<T>> {
        let text = self.send(&request)?;
        parse_optional_response(request.operation, &text)
    }

    fn execute_empty(&self, request: ApiRequest) -> Result<()> {
        self.send(&request).map(|_| ())
    }
}
