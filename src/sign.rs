//! EdgeGrid `EG1-HMAC-SHA256` request signing.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use hmac::{Hmac, Mac};
use reqwest::Url;
use sha2::{Digest, Sha256};

use crate::credential::Credential;
use crate::error::{IamError, Result};

type HmacSha256 = Hmac<Sha256>;

/// Signing algorithm moniker placed at the start of the Authorization header.
const ALGORITHM: &str = "EG1-HMAC-SHA256";

/// Formats a UTC instant as an EdgeGrid timestamp: `yyyyMMddTHH:mm:ss+0000`.
pub(crate) fn edgegrid_timestamp(time: chrono::DateTime<chrono::Utc>) -> String {
    time.format("%Y%m%dT%H:%M:%S+0000").to_string()
}

/// Base64 of the HMAC-SHA256 of `data` keyed with `key`.
fn hmac_base64(key: &[u8], data: &[u8]) -> Result<String> {
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|e| IamError::Signature(format!("HMAC key error: {}", e)))?;
    mac.update(data);
    Ok(BASE64.encode(mac.finalize().into_bytes()))
}

/// Base64 SHA-256 of a POST body, truncated to `max_body` bytes.
///
/// Empty for any other method or an empty body; the tab separator is still
/// emitted by the caller.
fn content_hash(method: &str, body: Option<&[u8]>, max_body: usize) -> String {
    match body {
        Some(body) if method == "POST" && !body.is_empty() => {
            let signed = &body[..body.len().min(max_body)];
            BASE64.encode(Sha256::digest(signed))
        }
        _ => String::new(),
    }
}

/// Host with an explicit port, as it appears on the wire.
fn host_with_port(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    }
}

fn request_uri(url: &Url) -> String {
    match url.query() {
        Some(query) => format!("{}?{}", url.path(), query),
        None => url.path().to_string(),
    }
}

/// Builds the signed `Authorization` header value for a request.
///
/// Steps:
/// 1. Unsigned header: `EG1-HMAC-SHA256 client_token=..;access_token=..;timestamp=..;nonce=..;`
/// 2. Signing key: base64 HMAC of the timestamp keyed with the client secret.
/// 3. Data to sign: method, scheme, host, request URI, canonical headers
///    (none), content hash and the unsigned header, tab-separated.
/// 4. Signature: base64 HMAC of the data keyed with the signing key.
pub(crate) fn authorization_header(
    credential: &Credential,
    method: &str,
    url: &Url,
    body: Option<&[u8]>,
    timestamp: &str,
    nonce: &str,
) -> Result<String> {
    let unsigned = format!(
        "{} client_token={};access_token={};timestamp={};nonce={};",
        ALGORITHM, credential.client_token, credential.access_token, timestamp, nonce
    );

    let signing_key = hmac_base64(credential.client_secret.as_bytes(), timestamp.as_bytes())?;

    let data_to_sign = [
        method.to_uppercase(),
        url.scheme().to_string(),
        host_with_port(url),
        request_uri(url),
        String::new(),
        content_hash(method, body, credential.max_body),
        unsigned.clone(),
    ]
    .join("\t");

    let signature = hmac_base64(signing_key.as_bytes(), data_to_sign.as_bytes())?;
    Ok(format!("{}signature={}", unsigned, signature))
}
