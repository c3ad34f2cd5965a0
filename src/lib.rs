//! Typed client for the Akamai Identity and Access Management user-admin API.
//!
//! Requests are signed with EdgeGrid (`EG1-HMAC-SHA256`). Operations are
//! grouped into capability traits, all implemented by the async [`Client`]:
//!
//! - [`Roles`]: create, read, update, delete and list roles
//! - [`Users`]: user lifecycle, basic info, auth grants, notifications, TFA
//! - [`UserLock`]: lock and unlock users
//! - [`UserPassword`]: reset or set a user's password
//! - [`Support`]: reference data (countries, states, time zones, ...)
//! - [`AccountSwitchKeys`]: accounts an API client can switch to
//!
//! Every operation validates its parameters before sending anything and
//! fails with an [`IamError`] naming the [`Operation`].
//!
//! # Quick Start (async)
//!
//! ```no_run
//! use rs_edgegrid_iam::{Client, Credential, GetRoleRequest, Roles};
//!
//! # async fn example() -> rs_edgegrid_iam::Result<()> {
//! let client = Client::new(Credential::new(
//!     "akab-host.luna.akamaiapis.net",
//!     "client-token",
//!     "client-secret",
//!     "access-token",
//! ))?;
//!
//! let role = client
//!     .get_role(GetRoleRequest {
//!         id: 123456,
//!         granted_roles: true,
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! println!("{} has {} granted roles", role.role_name, role.granted_roles.len());
//! # Ok(())
//! # }
//! ```

pub mod account_switch_keys;
pub mod client;
pub mod config;
pub mod credential;
pub mod error;
pub mod roles;
pub mod support;
pub mod user_lock;
pub mod user_password;
pub mod users;

#[cfg(feature = "blocking")]
pub mod blocking;

mod exec;
mod request;
mod sign;

pub use account_switch_keys::{AccountSwitchKey, AccountSwitchKeys, ListAccountSwitchKeysRequest};
pub use client::Client;
pub use config::ClientConfig;
pub use credential::Credential;
pub use error::{ApiError, IamError, Operation, Result};
pub use roles::{
    CreateRoleRequest, DeleteRoleRequest, GetRoleRequest, GrantedRoleId, ListRolesRequest, Role,
    RoleAction, RoleGrantedRole, RoleRequest, RoleType, RoleUser, Roles, UpdateRoleRequest,
};
pub use support::{ListStatesRequest, PasswordPolicy, Support, TimeoutPolicy, Timezone};
pub use user_lock::{LockUserRequest, UnlockUserRequest, UserLock};
pub use user_password::{
    ResetUserPasswordRequest, ResetUserPasswordResponse, SetUserPasswordRequest, UserPassword,
};
pub use users::{
    AuthGrant, AuthGrantRequest, CreateUserRequest, GetUserRequest, ListUsersRequest,
    RemoveUserRequest, TfaAction, UpdateTfaRequest, UpdateUserAuthGrantsRequest,
    UpdateUserInfoRequest, UpdateUserNotificationsRequest, User, UserActions, UserBasicInfo,
    UserListItem, UserNotificationOptions, UserNotifications, Users,
};

// Compile-time assertions: key types must be Send + Sync for use across threads.
const _: () = {
    const fn assert_send_sync<T: Send + Sync>() {}
    let _ = assert_send_sync::<Client>;
    let _ = assert_send_sync::<IamError>;
    let _ = assert_send_sync::<Credential>;
};
