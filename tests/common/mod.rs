#![allow(dead_code)]

use rs_edgegrid_iam::{Client, ClientConfig, Credential};

pub const USER_ADMIN: &str = "/identity-management/v3/user-admin";

pub fn test_credential() -> Credential {
    Credential::new(
        "akab-test-host.luna.akamaiapis.net",
        "akab-client-token",
        "test-client-secret",
        "akab-access-token",
    )
}

pub fn test_client(endpoint: String) -> Client {
    let config = ClientConfig::default().with_endpoint(endpoint);
    Client::with_config(test_credential(), config).expect("failed to build client")
}

/// Signature header every request must carry.
pub fn signed() -> mockito::Matcher {
    mockito::Matcher::Regex(
        r"^EG1-HMAC-SHA256 client_token=akab-client-token;access_token=akab-access-token;timestamp=\d{8}T\d{2}:\d{2}:\d{2}\+0000;nonce=[^;]+;signature=.+$"
            .to_string(),
    )
}

pub const SERVER_ERROR: &str = r#"{
    "type": "internal_error",
    "title": "Internal Server Error",
    "detail": "Error making request",
    "status": 500
}"#;
