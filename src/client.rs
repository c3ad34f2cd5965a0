use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::credential::{ChainProvider, Credential, CredentialProvider};
use crate::error::{IamError, Result};
use crate::exec::{
    check_status, parse_object_response, parse_optional_response, parse_success_response,
};
use crate::request::ApiRequest;

/// Async client for the Identity and Access Management API.
///
/// Operations are grouped into capability traits ([`crate::Roles`],
/// [`crate::Users`], [`crate::UserLock`], [`crate::UserPassword`],
/// [`crate::Support`], [`crate::AccountSwitchKeys`]), all implemented by this
/// type. Import the traits you need to call their methods.
///
/// The client holds no mutable state and is safe to share across tasks.
pub struct Client {
    http: reqwest::Client,
    config: ClientConfig,
    credential: Credential,
    base_url: String,
}

impl Client {
    /// Creates a new client with an explicit credential.
    pub fn new(credential: Credential) -> Result<Self> {
        Self::with_config(credential, ClientConfig::default())
    }

    /// Creates a new client with an explicit credential and custom configuration.
    pub fn with_config(credential: Credential, config: ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
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

    /// Creates a new client using the default credential chain (env vars → `.edgerc`).
    pub fn from_env() -> Result<Self> {
        let credential = ChainProvider::default_chain().resolve()?;
        Self::new(credential)
    }

    /// Returns the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Signs and sends a request, returning the body of an expected response.
    async fn send(&self, request: &ApiRequest) -> Result<String> {
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
            .await
            .map_err(|source| IamError::HttpClient { operation, source })?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|source| IamError::HttpClient { operation, source })?;

        tracing::debug!(%operation, status = status.as_u16(), "received response");

        check_status(request, status, &text)?;
        Ok(text)
    }

    pub(crate) async fn execute<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        let text = self.send(&request).await?;
        parse_success_response(request.operation, &text)
    }

    pub(crate) async fn execute_object<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        let text = self.send(&request).await?;
        parse_object_response(request.operation, &text)
    }

    pub(crate) async fn execute_optional<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<Option<T>> {
        let text = self.send(&request).await?;
        parse_optional_response(request.operation, &text)
    }

    pub(crate) async fn execute_empty(&self, request: ApiRequest) -> Result<()> {
        self.send(&request).await.map(|_| ())
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url)
            .field("config", &self.config)
            .field("credential", &self.credential)
            .finish()
    }
}
