use std::env;
use std::fs;
use std::path::PathBuf;

use crate::error::{IamError, Result};

/// Default maximum number of POST body bytes covered by the content hash.
pub const DEFAULT_MAX_BODY: usize = 131_072;

/// Default section name in `.edgerc` files.
pub const DEFAULT_SECTION: &str = "default";

/// EdgeGrid API client credential.
///
/// The `Debug` implementation redacts `client_secret` and `access_token` to
/// prevent accidental leakage in logs.
#[derive(Clone)]
pub struct Credential {
    /// API host, e.g. `akab-xxxx.luna.akamaiapis.net`.
    pub host: String,
    pub client_token: String,
    pub client_secret: String,
    pub access_token: String,
    /// Account-switch key appended to every request when set.
    pub account_key: Option<String>,
    /// Maximum POST body bytes covered by the content hash.
    pub max_body: usize,
}

impl Credential {
    pub fn new(
        host: impl Into<String>,
        client_token: impl Into<String>,
        client_secret: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            client_token: client_token.into(),
            client_secret: client_secret.into(),
            access_token: access_token.into(),
            account_key: None,
            max_body: DEFAULT_MAX_BODY,
        }
    }

    /// Acts on behalf of another account.
    pub fn with_account_key(mut self, account_key: impl Into<String>) -> Self {
        self.account_key = Some(account_key.into());
        self
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("host", &self.host)
            .field("client_token", &self.client_token)
            .field("client_secret", &"****")
            .field("access_token", &"****")
            .field("account_key", &self.account_key)
            .field("max_body", &self.max_body)
            .finish()
    }
}

/// Resolves a [`Credential`] from a specific source.
pub trait CredentialProvider {
    /// Attempt to resolve a credential from this provider.
    fn resolve(&self) -> Result<Credential>;
}

/// Provides an explicitly specified credential.
pub struct StaticProvider {
    credential: Credential,
}

impl StaticProvider {
    pub fn new(credential: Credential) -> Self {
        Self { credential }
    }
}

impl CredentialProvider for StaticProvider {
    fn resolve(&self) -> Result<Credential> {
        Ok(self.credential.clone())
    }
}

/// Provides a credential from environment variables.
///
/// Reads `AKAMAI_HOST`, `AKAMAI_CLIENT_TOKEN`, `AKAMAI_CLIENT_SECRET`,
/// `AKAMAI_ACCESS_TOKEN` and optionally `AKAMAI_ACCOUNT_KEY` and `AKAMAI_MAX_BODY`. For a non-default
/// section the prefix becomes `AKAMAI_{SECTION}_`.
pub struct EnvProvider {
    section: String,
}

impl Default for EnvProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvProvider {
    pub fn new() -> Self {
        Self {
            section: DEFAULT_SECTION.to_string(),
        }
    }

    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = section.into();
        self
    }

    fn prefix(&self) -> String {
        if self.section.eq_ignore_ascii_case(DEFAULT_SECTION) {
            "AKAMAI".to_string()
        } else {
            format!("AKAMAI_{}", self.section.to_uppercase())
        }
    }
}

impl CredentialProvider for EnvProvider {
    fn resolve(&self) -> Result<Credential> {
        let prefix = self.prefix();
        let required = |name: &str| {
            let key = format!("{}_{}", prefix, name);
            match env::var(&key) {
                Ok(value) if !value.is_empty() => Ok(value),
                _ => Err(IamError::Credential(format!("{} not set", key))),
            }
        };

        let mut credential = Credential::new(
            required("HOST")?,
            required("CLIENT_TOKEN")?,
            required("CLIENT_SECRET")?,
            required("ACCESS_TOKEN")?,
        );
        credential.account_key = env::var(format!("{}_ACCOUNT_KEY", prefix))
            .ok()
            .filter(|v| !v.is_empty());
        credential.max_body = env::var(format!("{}_MAX_BODY", prefix))
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|v| *v > 0)
            .unwrap_or(DEFAULT_MAX_BODY);
        Ok(credential)
    }
}

/// Provides a credential from an `.edgerc` file.
///
/// Reads `~/.edgerc` in INI format. The default section name is `default`.
pub struct EdgercProvider {
    section: String,
    file_path: Option<PathBuf>,
}

impl Default for EdgercProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl EdgercProvider {
    /// Creates a provider that reads the `default` section.
    pub fn new() -> Self {
        Self {
            section: DEFAULT_SECTION.to_string(),
            file_path: None,
        }
    }

    /// Specifies a custom section name.
    pub fn with_section(mut self, name: impl Into<String>) -> Self {
        self.section = name.into();
        self
    }

    /// Specifies a custom file path instead of the default location.
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_path = Some(path.into());
        self
    }

    fn default_path() -> Result<PathBuf> {
        let home = env::var("HOME")
            .or_else(|_| env::var("USERPROFILE"))
            .map_err(|_| IamError::Config("cannot determine home directory".into()))?;
        Ok(PathBuf::from(home).join(".edgerc"))
    }

    fn parse_ini(content: &str, section: &str) -> Result<Credential> {
        let section_header = format!("[{}]", section);
        let mut in_section = false;
        let mut found_section = false;
        let mut host = None;
        let mut client_token = None;
        let mut client_secret = None;
        let mut access_token = None;
        let mut account_key = None;
        let mut max_body = None;

        for line in content.lines() {
            let line = line.trim();
            if line.starts_with('[') {
                in_section = line == section_header;
                found_section |= in_section;
                continue;
            }
            if !in_section || line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                let value = value.trim().trim_matches('"').to_string();
                match key.trim() {
                    "host" => host = Some(value),
                    "client_token" => client_token = Some(value),
                    "client_secret" => client_secret = Some(value),
                    "access_token" => access_token = Some(value),
                    "account_key" if !value.is_empty() => account_key = Some(value),
                    "max_body" => max_body = value.parse::<usize>().ok(),
                    _ => {}
                }
            }
        }

        if !found_section {
            return Err(IamError::Config(format!(
                "section '{}' not found in edgerc",
                section
            )));
        }

        match (host, client_token, client_secret, access_token) {
            (Some(host), Some(client_token), Some(client_secret), Some(access_token)) => {
                Ok(Credential {
                    host,
                    client_token,
                    client_secret,
                    access_token,
                    account_key,
                    max_body: max_body.filter(|v| *v > 0).unwrap_or(DEFAULT_MAX_BODY),
                })
            }
            _ => Err(IamError::Config(format!(
                "section '{}' missing one of host, client_token, client_secret, access_token",
                section
            ))),
        }
    }
}

impl CredentialProvider for EdgercProvider {
    fn resolve(&self) -> Result<Credential> {
        let path = match &self.file_path {
            Some(p) => p.clone(),
            None => Self::default_path()?,
        };
        let content = fs::read_to_string(&path).map_err(|e| {
            IamError::Config(format!("cannot read edgerc file {}: {}", path.display(), e))
        })?;
        Self::parse_ini(&content, &self.section)
    }
}

/// Tries multiple credential providers in order and returns the first success.
pub struct ChainProvider {
    providers: Vec<Box<dyn CredentialProvider + Send + Sync>>,
}

impl ChainProvider {
    /// Creates a chain with the given providers.
    pub fn new(providers: Vec<Box<dyn CredentialProvider + Send + Sync>>) -> Self {
        Self { providers }
    }

    /// Creates the default credential chain: Env → `.edgerc`.
    pub fn default_chain() -> Self {
        Self {
            providers: vec![
                Box::new(EnvProvider::new()),
                Box::new(EdgercProvider::new()),
            ],
        }
    }
}

impl CredentialProvider for ChainProvider {
    fn resolve(&self) -> Result<Credential> {
        let mut last_err = IamError::Credential("no credential providers configured".into());
        for provider in &self.providers {
            match provider.resolve() {
                Ok(cred) => return Ok(cred),
                Err(e) => last_err = e,
            }
        }
        Err(IamError::Credential(format!(
            "all credential providers failed, last error: {}",
            last_err
        )))
    }
}
