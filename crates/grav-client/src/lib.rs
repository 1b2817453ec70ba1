//! # grav-client
//!
//! HTTP client for a Gravibase deployment.
//!
//! Covers the endpoints gravcheck exercises:
//! - `/auth/projects/{p}/token` and `/auth/projects/{p}/users` (login, registration)
//! - `/generator/projects/{p}/schema/entities[/{name}/attributes]` (schema introspection)
//! - `/security/projects/{p}/...` (capabilities, roles, users)
//! - `/api/projects/{p}/entities/{entity}/data` (record data)
//!
//! One [`GravibaseClient`] holds one pooled `reqwest::Client` and, after
//! [`GravibaseClient::authenticate`], the bearer token attached to every
//! following request.

pub mod auth;
pub mod data;
pub mod models;
pub mod schema;
pub mod security;

mod error;
mod http;

pub use error::ClientError;
pub use models::{
    AttributeSummary, EntitySummary, ProfileAttribute, Registration, RoleSummary, TokenResponse,
    UserPage, UserSummary,
};

use std::time::Duration;

/// Settings for [`GravibaseClient::new`].
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub project_code: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl ClientSettings {
    #[must_use]
    pub fn new(base_url: impl Into<String>, project_code: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            project_code: project_code.into(),
            timeout: Duration::from_secs(30),
            user_agent: concat!("gravcheck/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// ── Client ─────────────────────────────────────────────────────────

/// Session against one project of one Gravibase deployment.
pub struct GravibaseClient {
    http: reqwest::Client,
    base_url: String,
    project_code: String,
    token: Option<String>,
}

impl GravibaseClient {
    /// Build a client. No request is issued.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// fails to build.
    pub fn new(settings: ClientSettings) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .user_agent(settings.user_agent)
            .timeout(settings.timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            project_code: settings.project_code,
            token: None,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn project_code(&self) -> &str {
        &self.project_code
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Install a bearer token obtained elsewhere.
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    /// `{base}/{area}/projects/{project}{rest}`. `rest` must already be encoded.
    fn project_url(&self, area: &str, project: &str, rest: &str) -> String {
        format!(
            "{}/{area}/projects/{}{rest}",
            self.base_url,
            urlencoding::encode(project)
        )
    }

    fn url(&self, area: &str, rest: &str) -> String {
        self.project_url(area, &self.project_code, rest)
    }

    /// Attach the bearer token when one is held.
    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        self.authorize(self.http.get(url))
    }

    fn post(&self, url: &str) -> reqwest::RequestBuilder {
        self.authorize(self.http.post(url))
    }

    fn put(&self, url: &str) -> reqwest::RequestBuilder {
        self.authorize(self.http.put(url))
    }
}

/// Percent-encode one path segment (entity names, usernames).
fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> GravibaseClient {
        GravibaseClient::new(ClientSettings::new(base, "minicrm")).unwrap()
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let c = client("https://app.gravibase.ru/");
        assert_eq!(c.base_url(), "https://app.gravibase.ru");
        assert_eq!(
            c.url("generator", "/schema/entities"),
            "https://app.gravibase.ru/generator/projects/minicrm/schema/entities"
        );
    }

    #[test]
    fn project_segment_is_encoded() {
        let c = client("http://localhost");
        assert_eq!(
            c.project_url("auth", "my project", "/token"),
            "http://localhost/auth/projects/my%20project/token"
        );
    }

    #[test]
    fn token_is_absent_until_set() {
        let mut c = client("http://localhost");
        assert!(!c.is_authenticated());
        c.set_token("abc");
        assert!(c.is_authenticated());
    }

    #[test]
    fn segment_encodes_reserved_characters() {
        assert_eq!(segment("a/b c"), "a%2Fb%20c");
        assert_eq!(segment("test-user-1"), "test-user-1");
    }
}
