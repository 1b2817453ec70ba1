use chrono::{DateTime, Utc};
use serde::Serialize;

/// Credentials for the throwaway user created by the registration probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestIdentity {
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
}

impl TestIdentity {
    /// `{prefix}-{unix_seconds}` with an email at `domain`.
    #[must_use]
    pub fn generate(prefix: &str, domain: &str, password: &str, now: DateTime<Utc>) -> Self {
        let username = format!("{prefix}-{}", now.timestamp());
        let email = format!("{username}@{domain}");
        Self {
            username,
            email,
            password: password.to_string(),
        }
    }
}
