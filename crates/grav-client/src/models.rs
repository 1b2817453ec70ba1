//! Wire types for the Gravibase API.
//!
//! Only the fields gravcheck reads are typed; everything else is kept in
//! `extra` so detail views can still be rendered.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Generic `{ "data": [...] }` envelope used by list endpoints.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ListEnvelope<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

/// Attribute lists come back under `data` on most deployments, under
/// `attributes` on some.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AttributeEnvelope {
    #[serde(default)]
    pub data: Option<Vec<AttributeSummary>>,
    #[serde(default)]
    pub attributes: Option<Vec<AttributeSummary>>,
}

impl AttributeEnvelope {
    pub fn into_attributes(self) -> Vec<AttributeSummary> {
        self.data.or(self.attributes).unwrap_or_default()
    }
}

/// Response of the token endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySummary {
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeSummary {
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleSummary {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub default: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// One page of the user listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPage {
    #[serde(default)]
    pub data: Vec<UserSummary>,
    /// Total users known to the platform, independent of the page size.
    #[serde(default)]
    pub total: u64,
}

impl UserPage {
    #[must_use]
    pub fn contains(&self, username: &str) -> bool {
        self.data.iter().any(|u| u.username == username)
    }
}

/// Password-flow registration payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    pub username: String,
    pub flow: String,
    pub value: String,
    pub profile: Vec<ProfileAttribute>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileAttribute {
    pub attribute: String,
    pub value: String,
}

impl Registration {
    /// Password registration with an `email` profile attribute.
    #[must_use]
    pub fn password(username: &str, email: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            flow: "password".to_string(),
            value: password.to_string(),
            profile: vec![ProfileAttribute {
                attribute: "email".to_string(),
                value: email.to_string(),
            }],
        }
    }
}
