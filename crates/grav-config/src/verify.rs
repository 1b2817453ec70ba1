//! Verification workflow tuning.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

fn default_auth_project() -> String {
    "apps".to_string()
}

fn default_roles() -> Vec<String> {
    vec!["Viewer".to_string(), "Manager".to_string()]
}

fn default_test_password() -> String {
    "SecureP@ssw0rd123!".to_string()
}

fn default_user_prefix() -> String {
    "test-user".to_string()
}

fn default_email_domain() -> String {
    "example.com".to_string()
}

const fn default_list_limit() -> u32 {
    100
}

const fn default_visibility_delay_ms() -> u64 {
    2_000
}

const fn default_visibility_interval_ms() -> u64 {
    1_000
}

const fn default_request_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct VerifyConfig {
    /// Project code used for the operator's own login.
    #[serde(default = "default_auth_project")]
    pub auth_project: String,

    /// Roles assigned to the freshly registered user.
    #[serde(default = "default_roles")]
    pub roles: Vec<String>,

    /// Password given to the throwaway user.
    #[serde(default = "default_test_password")]
    pub test_password: String,

    /// Username prefix; the unix timestamp is appended.
    #[serde(default = "default_user_prefix")]
    pub user_prefix: String,

    #[serde(default = "default_email_domain")]
    pub email_domain: String,

    /// `limit` query parameter for user listings.
    #[serde(default = "default_list_limit")]
    pub list_limit: u32,

    /// Wait before the first listing attempt.
    #[serde(default = "default_visibility_delay_ms")]
    pub visibility_delay_ms: u64,

    /// Wait between listing attempts.
    #[serde(default = "default_visibility_interval_ms")]
    pub visibility_interval_ms: u64,

    /// Extra time after the first attempt during which listings are retried.
    /// Zero means a single attempt.
    #[serde(default)]
    pub visibility_timeout_ms: u64,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// JSON file replacing the built-in expected schema.
    #[serde(default)]
    pub expected_schema_path: Option<PathBuf>,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            auth_project: default_auth_project(),
            roles: default_roles(),
            test_password: default_test_password(),
            user_prefix: default_user_prefix(),
            email_domain: default_email_domain(),
            list_limit: default_list_limit(),
            visibility_delay_ms: default_visibility_delay_ms(),
            visibility_interval_ms: default_visibility_interval_ms(),
            visibility_timeout_ms: 0,
            request_timeout_secs: default_request_timeout_secs(),
            expected_schema_path: None,
        }
    }
}

impl VerifyConfig {
    #[must_use]
    pub const fn visibility_delay(&self) -> Duration {
        Duration::from_millis(self.visibility_delay_ms)
    }

    #[must_use]
    pub const fn visibility_interval(&self) -> Duration {
        Duration::from_millis(self.visibility_interval_ms)
    }

    #[must_use]
    pub const fn visibility_timeout(&self) -> Duration {
        Duration::from_millis(self.visibility_timeout_ms)
    }

    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_single_attempt_after_two_seconds() {
        let config = VerifyConfig::default();
        assert_eq!(config.auth_project, "apps");
        assert_eq!(config.roles, vec!["Viewer", "Manager"]);
        assert_eq!(config.list_limit, 100);
        assert_eq!(config.visibility_delay(), Duration::from_secs(2));
        assert!(config.visibility_timeout().is_zero());
        assert!(config.expected_schema_path.is_none());
    }
}
