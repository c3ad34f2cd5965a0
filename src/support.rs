//! Reference data used when filling in user profiles.

use async_trait::async_trait;
use reqwest::Method;
use serde::Deserialize;
use validator::Validate;

use crate::client::Client;
use crate::error::{Operation, Result, validate};
use crate::request::ApiRequest;

/// A supported time zone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Timezone {
    pub timezone: String,
    pub description: String,
    pub offset: String,
    pub posix: String,
}

/// A session timeout option; `value` is in seconds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TimeoutPolicy {
    pub name: String,
    pub value: i64,
}

/// Password rules enforced for the account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PasswordPolicy {
    pub case_dif: i64,
    pub max_repeating: i64,
    pub min_digits: i64,
    pub min_length: i64,
    pub min_letters: i64,
    pub min_non_alpha: i64,
    pub min_reuse: i64,
    #[serde(rename = "pwclass")]
    pub pw_class: String,
    pub rotate_frequency: i64,
}

/// Parameters for [`Support::list_states`].
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct ListStatesRequest {
    #[validate(length(min = 1))]
    pub country: String,
}

/// Reference data operations.
#[async_trait]
pub trait Support {
    async fn supported_countries(&self) -> Result<Vec<String>>;

    async fn supported_contact_types(&self) -> Result<Vec<String>>;

    async fn supported_languages(&self) -> Result<Vec<String>>;

    async fn supported_timezones(&self) -> Result<Vec<Timezone>>;

    /// Lists products a user can subscribe to for notifications.
    async fn list_products(&self) -> Result<Vec<String>>;

    async fn list_timeout_policies(&self) -> Result<Vec<TimeoutPolicy>>;

    /// Lists the states or provinces of a country.
    async fn list_states(&self, params: ListStatesRequest) -> Result<Vec<String>>;

    async fn get_password_policy(&self) -> Result<PasswordPolicy>;
}

fn common(operation: Operation, resource: &str) -> ApiRequest {
    ApiRequest::user_admin(operation, Method::GET)
        .segment("common")
        .segment(resource)
}

pub(crate) fn supported_countries_request() -> ApiRequest {
    common(Operation::SupportedCountries, "countries")
}

pub(crate) fn supported_contact_types_request() -> ApiRequest {
    common(Operation::SupportedContactTypes, "contact-types")
}

pub(crate) fn supported_languages_request() -> ApiRequest {
    common(Operation::SupportedLanguages, "supported-languages")
}

pub(crate) fn supported_timezones_request() -> ApiRequest {
    common(Operation::SupportedTimezones, "timezones")
}

pub(crate) fn list_products_request() -> ApiRequest {
    common(Operation::ListProducts, "notification-products")
}

pub(crate) fn list_timeout_policies_request() -> ApiRequest {
    common(Operation::ListTimeoutPolicies, "timeout-policies")
}

pub(crate) fn list_states_request(params: &ListStatesRequest) -> Result<ApiRequest> {
    validate(Operation::ListStates, params)?;
    Ok(common(Operation::ListStates, "countries")
        .segment(params.country.as_str())
        .segment("states"))
}

pub(crate) fn get_password_policy_request() -> ApiRequest {
    common(Operation::GetPasswordPolicy, "password-policy")
}

#[async_trait]
impl Support for Client {
    async fn supported_countries(&self) -> Result<Vec<String>> {
        self.execute(supported_countries_request()).await
    }

    async fn supported_contact_types(&self) -> Result<Vec<String>> {
        self.execute(supported_contact_types_request()).await
    }

    async fn supported_languages(&self) -> Result<Vec<String>> {
        self.execute(supported_languages_request()).await
    }

    async fn supported_timezones(&self) -> Result<Vec<Timezone>> {
        self.execute(supported_timezones_request()).await
    }

    async fn list_products(&self) -> Result<Vec<String>> {
        self.execute(list_products_request()).await
    }

    async fn list_timeout_policies(&self) -> Result<Vec<TimeoutPolicy>> {
        self.execute(list_timeout_policies_request()).await
    }

    async fn list_states(&self, params: ListStatesRequest) -> Result<Vec<String>> {
        self.execute(list_states_request(&params)?).await
    }

    async fn get_password_policy(&self) -> Result<PasswordPolicy> {
        self.execute_object(get_password_policy_request()).await
    }
}
