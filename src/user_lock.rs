//! Locking and unlocking user accounts.

use async_trait::async_trait;
use reqwest::Method;
use validator::Validate;

use crate::client::Client;
use crate::error::{Operation, Result, validate};
use crate::request::{ApiRequest, OK_OR_NO_CONTENT};

/// Parameters for [`UserLock::lock_user`].
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct LockUserRequest {
    #[validate(length(min = 1))]
    pub identity_id: String,
}

/// Parameters for [`UserLock::unlock_user`].
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct UnlockUserRequest {
    #[validate(length(min = 1))]
    pub identity_id: String,
}

/// Account lock operations.
///
/// Both calls are idempotent on the server: unlocking an unlocked user
/// succeeds again.
#[async_trait]
pub trait UserLock {
    /// Locks the user out of Control Center.
    async fn lock_user(&self, params: LockUserRequest) -> Result<()>;

    /// Releases the lock on a user.
    async fn unlock_user(&self, params: UnlockUserRequest) -> Result<()>;
}

fn lock_state_request(operation: Operation, identity_id: &str, action: &str) -> ApiRequest {
    ApiRequest::user_admin(operation, Method::POST)
        .segment("ui-identities")
        .segment(identity_id)
        .segment(action)
        .expect(OK_OR_NO_CONTENT)
}

pub(crate) fn lock_user_request(params: &LockUserRequest) -> Result<ApiRequest> {
    validate(Operation::LockUser, params)?;
    Ok(lock_state_request(Operation::LockUser, &params.identity_id, "lock"))
}

pub(crate) fn unlock_user_request(params: &UnlockUserRequest) -> Result<ApiRequest> {
    validate(Operation::UnlockUser, params)?;
    Ok(lock_state_request(Operation::UnlockUser, &params.identity_id, "unlock"))
}

#[async_trait]
impl UserLock for Client {
    async fn lock_user(&self, params: LockUserRequest) -> Result<()> {
        self.execute_empty(lock_user_request(&params)?).await
    }

    async fn unlock_user(&self, params: UnlockUserRequest) -> Result<()> {
        self.execute_empty(unlock_user_request(&params)?).await
    }
}
