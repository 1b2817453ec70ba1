//! Shared HTTP response helpers.
//!
//! Centralizes status checks and JSON decoding so the endpoint modules stay
//! focused on request construction and response mapping.

use serde::de::DeserializeOwned;

use crate::error::ClientError;

/// Longest body excerpt carried in parse errors.
const BODY_EXCERPT: usize = 500;

/// Return the response unchanged if its status is in `accepted`, otherwise
/// an [`ClientError::Api`] carrying the status and body.
pub async fn expect_status(
    resp: reqwest::Response,
    accepted: &[u16],
) -> Result<reqwest::Response, ClientError> {
    let status = resp.status().as_u16();
    if accepted.contains(&status) {
        return Ok(resp);
    }
    let message = resp.text().await.unwrap_or_default();
    tracing::debug!(status, body = %message, "unexpected API status");
    Err(ClientError::Api { status, message })
}

/// Accept `200 OK` only.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    expect_status(resp, &[200]).await
}

/// Decode a JSON body, keeping an excerpt of the payload on failure.
pub async fn read_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ClientError> {
    let body = resp.text().await?;
    parse_json(&body)
}

pub fn parse_json<T: DeserializeOwned>(body: &str) -> Result<T, ClientError> {
    serde_json::from_str(body).map_err(|e| {
        let excerpt: String = body.chars().take(BODY_EXCERPT).collect();
        ClientError::Parse(format!("{e} (body: {excerpt})"))
    })
}
