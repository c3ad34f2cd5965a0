//! Account-switch keys available to an API client.

use async_trait::async_trait;
use reqwest::Method;
use serde::Deserialize;

use crate::client::Client;
use crate::error::{Operation, Result};
use crate::request::{ApiArea, ApiRequest};

/// Path segment addressing the calling API client.
const SELF_CLIENT: &str = "self";

/// An account the client can act on behalf of.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccountSwitchKey {
    pub account_name: String,
    pub account_switch_key: String,
}

/// Parameters for [`AccountSwitchKeys::list_account_switch_keys`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListAccountSwitchKeysRequest {
    /// API client to inspect; `None` or empty means the calling client.
    pub client_id: Option<String>,
    /// Filters by account name or ID.
    pub search: Option<String>,
}

/// Account-switch key operations.
#[async_trait]
pub trait AccountSwitchKeys {
    /// Lists the accounts an API client may switch to.
    async fn list_account_switch_keys(
        &self,
        params: ListAccountSwitchKeysRequest,
    ) -> Result<Vec<AccountSwitchKey>>;
}

pub(crate) fn list_account_switch_keys_request(params: &ListAccountSwitchKeysRequest) -> ApiRequest {
    let client_id = params
        .client_id
        .as_deref()
        .filter(|id| !id.is_empty())
        .unwrap_or(SELF_CLIENT);
    ApiRequest::new(Operation::ListAccountSwitchKeys, Method::GET, ApiArea::ApiClients)
        .segment(client_id)
        .segment("account-switch-keys")
        .query_opt("search", params.search.as_deref().filter(|s| !s.is_empty()))
}

#[async_trait]
impl AccountSwitchKeys for Client {
    async fn list_account_switch_keys(
        &self,
        params: ListAccountSwitchKeysRequest,
    ) -> Result<Vec<AccountSwitchKey>> {
        self.execute(list_account_switch_keys_request(&params)).await
    }
}
