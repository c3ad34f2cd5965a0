//! Role management: custom roles and their granted roles.

use async_trait::async_trait;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::client::Client;
use crate::error::{Operation, Result, validate};
use crate::request::{ApiRequest, CREATED, NO_CONTENT};

/// Whether a role is predefined or created by the account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleType {
    #[default]
    Standard,
    Custom,
    /// A role type this client does not know about.
    #[serde(other)]
    Unknown,
}

/// A role as returned by the API.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Role {
    pub role_id: i64,
    pub role_name: String,
    pub role_description: String,
    #[serde(rename = "type")]
    pub role_type: RoleType,
    pub created_date: String,
    pub created_by: String,
    pub modified_date: String,
    pub modified_by: String,
    pub actions: Option<RoleAction>,
    pub users: Vec<RoleUser>,
    pub granted_roles: Vec<RoleGrantedRole>,
}

/// Operations the caller may perform on a role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RoleAction {
    pub edit: bool,
    pub delete: bool,
}

/// A role granted to another role.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoleGrantedRole {
    pub granted_role_id: i64,
    pub granted_role_name: String,
    pub granted_role_description: String,
}

/// A user holding a role.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoleUser {
    #[serde(rename = "uiIdentityId")]
    pub identity_id: String,
    pub first_name: String,
    pub last_name: String,
    pub account_id: String,
    pub email: String,
    pub last_login_date: String,
}

/// Reference to a granted role in write requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GrantedRoleId {
    #[serde(rename = "grantedRoleId")]
    pub id: i64,
}

impl From<i64> for GrantedRoleId {
    fn from(id: i64) -> Self {
        Self { id }
    }
}

/// Parameters for [`Roles::create_role`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
pub struct CreateRoleRequest {
    #[serde(rename = "roleName")]
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(rename = "roleDescription")]
    #[validate(length(min = 1))]
    pub description: String,
    #[serde(rename = "grantedRoles")]
    #[validate(length(min = 1))]
    pub granted_roles: Vec<GrantedRoleId>,
}

/// Writable role attributes; `None` fields are left out of the body.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RoleRequest {
    #[serde(rename = "roleName", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "roleDescription", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "grantedRoles", skip_serializing_if = "Option::is_none")]
    pub granted_roles: Option<Vec<GrantedRoleId>>,
}

/// Parameters for [`Roles::update_role`].
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct UpdateRoleRequest {
    #[validate(range(min = 1))]
    pub id: i64,
    pub role: RoleRequest,
}

/// Parameters for [`Roles::get_role`].
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct GetRoleRequest {
    #[validate(range(min = 1))]
    pub id: i64,
    pub actions: bool,
    pub granted_roles: bool,
    pub users: bool,
}

/// Parameters for [`Roles::delete_role`].
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct DeleteRoleRequest {
    #[validate(range(min = 1))]
    pub id: i64,
}

/// Parameters for [`Roles::list_roles`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListRolesRequest {
    pub group_id: Option<i64>,
    pub actions: bool,
    pub ignore_context: bool,
    pub users: bool,
}

/// Role management operations.
#[async_trait]
pub trait Roles {
    /// Creates a custom role.
    async fn create_role(&self, params: CreateRoleRequest) -> Result<Role>;

    /// Fetches a role, optionally expanding actions, granted roles and users.
    async fn get_role(&self, params: GetRoleRequest) -> Result<Role>;

    /// Updates a custom role.
    async fn update_role(&self, params: UpdateRoleRequest) -> Result<Role>;

    async fn delete_role(&self, params: DeleteRoleRequest) -> Result<()>;

    /// Lists roles visible to the caller.
    async fn list_roles(&self, params: ListRolesRequest) -> Result<Vec<Role>>;

    /// Lists the roles that can be granted when building a custom role.
    async fn list_grantable_roles(&self) -> Result<Vec<RoleGrantedRole>>;
}

pub(crate) fn create_role_request(params: &CreateRoleRequest) -> Result<ApiRequest> {
    validate(Operation::CreateRole, params)?;
    ApiRequest::user_admin(Operation::CreateRole, Method::POST)
        .segment("roles")
        .json(params)
        .map(|request| request.expect(CREATED))
}

pub(crate) fn get_role_request(params: &GetRoleRequest) -> Result<ApiRequest> {
    validate(Operation::GetRole, params)?;
    Ok(ApiRequest::user_admin(Operation::GetRole, Method::GET)
        .segment("roles")
        .segment(params.id.to_string())
        .query("actions", params.actions)
        .query("grantedRoles", params.granted_roles)
        .query("users", params.users))
}

pub(crate) fn update_role_request(params: &UpdateRoleRequest) -> Result<ApiRequest> {
    validate(Operation::UpdateRole, params)?;
    ApiRequest::user_admin(Operation::UpdateRole, Method::PUT)
        .segment("roles")
        .segment(params.id.to_string())
        .json(&params.role)
}

pub(crate) fn delete_role_request(params: &DeleteRoleRequest) -> Result<ApiRequest> {
    validate(Operation::DeleteRole, params)?;
    Ok(ApiRequest::user_admin(Operation::DeleteRole, Method::DELETE)
        .segment("roles")
        .segment(params.id.to_string())
        .expect(NO_CONTENT))
}

pub(crate) fn list_roles_request(params: &ListRolesRequest) -> ApiRequest {
    ApiRequest::user_admin(Operation::ListRoles, Method::GET)
        .segment("roles")
        .query("actions", params.actions)
        .query_opt("groupId", params.group_id)
        .query("ignoreContext", params.ignore_context)
        .query("users", params.users)
}

pub(crate) fn list_grantable_roles_request() -> ApiRequest {
    ApiRequest::user_admin(Operation::ListGrantableRoles, Method::GET)
        .segment("roles")
        .segment("grantable-roles")
}

#[async_trait]
impl Roles for Client {
    async fn create_role(&self, params: CreateRoleRequest) -> Result<Role> {
        self.execute_object(create_role_request(&params)?).await
    }

    async fn get_role(&self, params: GetRoleRequest) -> Result<Role> {
        self.execute_object(get_role_request(&params)?).await
    }

    async fn update_role(&self, params: UpdateRoleRequest) -> Result<Role> {
        self.execute_object(update_role_request(&params)?).await
    }

    async fn delete_role(&self, params: DeleteRoleRequest) -> Result<()> {
        self.execute_empty(delete_role_request(&params)?).await
    }

    async fn list_roles(&self, params: ListRolesRequest) -> Result<Vec<Role>> {
        self.execute(list_roles_request(&params)).await
    }

    async fn list_grantable_roles(&self) -> Result<Vec<RoleGrantedRole>> {
        self.execute(list_grantable_roles_request()).await
    }
}
