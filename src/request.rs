//! Request description, URL construction and signing.

use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

use reqwest::{Method, StatusCode, Url};
use serde::Serialize;

use crate::credential::Credential;
use crate::error::{IamError, Operation, Result};
use crate::sign::{authorization_header, edgegrid_timestamp};

pub(crate) const OK: &[StatusCode] = &[StatusCode::OK];
pub(crate) const CREATED: &[StatusCode] = &[StatusCode::CREATED];
pub(crate) const NO_CONTENT: &[StatusCode] = &[StatusCode::NO_CONTENT];
pub(crate) const OK_OR_NO_CONTENT: &[StatusCode] = &[StatusCode::OK, StatusCode::NO_CONTENT];

/// Query parameter carrying the credential's account-switch key.
const ACCOUNT_SWITCH_KEY_PARAM: &str = "accountSwitchKey";

/// Top-level API area under `/identity-management/{version}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ApiArea {
    UserAdmin,
    ApiClients,
}

impl ApiArea {
    fn segment(&self) -> &'static str {
        match self {
            ApiArea::UserAdmin => "user-admin",
            ApiArea::ApiClients => "api-clients",
        }
    }
}

/// A fully described API call, independent of the transport executing it.
///
/// Query parameters live in a sorted map, so the rendered query string is
/// alphabetical regardless of insertion order.
#[derive(Debug, Clone)]
pub(crate) struct ApiRequest {
    pub operation: Operation,
    pub method: Method,
    area: ApiArea,
    segments: Vec<String>,
    query: BTreeMap<&'static str, String>,
    pub body: Option<Vec<u8>>,
    pub expected: &'static [StatusCode],
}

impl ApiRequest {
    pub fn new(operation: Operation, method: Method, area: ApiArea) -> Self {
        Self {
            operation,
            method,
            area,
            segments: Vec::new(),
            query: BTreeMap::new(),
            body: None,
            expected: OK,
        }
    }

    pub fn user_admin(operation: Operation, method: Method) -> Self {
        Self::new(operation, method, ApiArea::UserAdmin)
    }

    /// Appends a path segment; path parameters are percent-encoded on render.
    pub fn segment(mut self, segment: impl Into<String>) -> Self {
        self.segments.push(segment.into());
        self
    }

    pub fn query(mut self, key: &'static str, value: impl ToString) -> Self {
        self.query.insert(key, value.to_string());
        self
    }

    /// Adds the parameter only when a value is present.
    pub fn query_opt<V: ToString>(self, key: &'static str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }

    /// Serializes `body` as the JSON request body.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        let bytes = serde_json::to_vec(body).map_err(|e| IamError::Request {
            operation: self.operation,
            message: format!("serializing body: {}", e),
        })?;
        self.body = Some(bytes);
        Ok(self)
    }

    pub fn expect(mut self, statuses: &'static [StatusCode]) -> Self {
        self.expected = statuses;
        self
    }

    pub fn is_expected(&self, status: StatusCode) -> bool {
        self.expected.contains(&status)
    }

    fn build_error(&self, message: String) -> IamError {
        IamError::Request {
            operation: self.operation,
            message,
        }
    }

    /// Renders the absolute URL:
    /// `{base}/identity-management/{version}/{area}/{segments..}?{sorted query}`.
    pub fn url(&self, base: &str, api_version: &str, account_key: Option<&str>) -> Result<Url> {
        let mut url = Url::parse(base)
            .map_err(|e| self.build_error(format!("invalid endpoint '{}': {}", base, e)))?;

        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| self.build_error(format!("endpoint '{}' cannot be a base URL", base)))?;
            path.pop_if_empty()
                .push("identity-management")
                .push(api_version)
                .push(self.area.segment());
            for segment in &self.segments {
                path.push(segment);
            }
        }

        let mut query = self.query.clone();
        if let Some(key) = account_key {
            query.insert(ACCOUNT_SWITCH_KEY_PARAM, key.to_string());
        }
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query.iter());
        }

        Ok(url)
    }

    /// Computes the EdgeGrid `Authorization` header for this request at `url`.
    pub fn authorization(&self, credential: &Credential, url: &Url) -> Result<String> {
        let timestamp = edgegrid_timestamp(chrono::Utc::now());
        authorization_header(
            credential,
            self.method.as_str(),
            url,
            self.body.as_deref(),
            &timestamp,
            &generate_nonce(),
        )
    }
}

/// Generates a unique nonce for request signatures.
fn generate_nonce() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    format!("{}-{}", nanos, uuid::Uuid::new_v4())
}
