//! Security endpoints (`/security/projects/{p}/...`): capabilities, roles, users.

use serde_json::Value;

use crate::http::{check_response, expect_status, read_json};
use crate::models::ListEnvelope;
use crate::{ClientError, GravibaseClient, RoleSummary, UserPage, segment};

/// Statuses the role assignment endpoint answers on success.
const ROLE_ASSIGNED: &[u16] = &[200, 201, 204];

impl GravibaseClient {
    /// Operations permitted to the authenticated operator in this project.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure or a non-200 status.
    pub async fn capabilities(&self) -> Result<Value, ClientError> {
        let url = self.url("security", "/capabilities");
        read_json(check_response(self.get(&url).send().await?).await?).await
    }

    /// Detail view of one user.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] with status 404 for unknown users.
    pub async fn user_details(&self, username: &str) -> Result<Value, ClientError> {
        let url = self.url("security", &format!("/users/{}", segment(username)));
        read_json(check_response(self.get(&url).send().await?).await?).await
    }

    /// Profile attributes of one user.
    ///
    /// # Errors
    ///
    /// Same as [`Self::user_details`].
    pub async fn user_profile(&self, username: &str) -> Result<Value, ClientError> {
        let url = self.url("security", &format!("/users/{}/profile", segment(username)));
        read_json(check_response(self.get(&url).send().await?).await?).await
    }

    /// Roles defined in the project.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure or a non-200 status.
    pub async fn roles(&self) -> Result<Vec<RoleSummary>, ClientError> {
        let url = self.url("security", "/roles");
        let envelope: ListEnvelope<RoleSummary> =
            read_json(check_response(self.get(&url).send().await?).await?).await?;
        Ok(envelope.data)
    }

    /// Roles held by one user.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure or a non-200 status.
    pub async fn user_roles(&self, username: &str) -> Result<Vec<RoleSummary>, ClientError> {
        let url = self.url("security", &format!("/users/{}/roles", segment(username)));
        let envelope: ListEnvelope<RoleSummary> =
            read_json(check_response(self.get(&url).send().await?).await?).await?;
        Ok(envelope.data)
    }

    /// Grant `role` to `username`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] unless the status is 200, 201 or 204.
    pub async fn assign_role(&self, username: &str, role: &str) -> Result<(), ClientError> {
        let url = self.url("security", &format!("/users/{}/roles", segment(username)));
        let resp = self.put(&url).form(&[("role", role)]).send().await?;
        expect_status(resp, ROLE_ASSIGNED).await?;
        Ok(())
    }

    /// One page of users, optionally filtered by `search`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure, a non-200 status, or an
    /// unparseable body.
    pub async fn list_users(
        &self,
        search: Option<&str>,
        limit: u32,
    ) -> Result<UserPage, ClientError> {
        let url = self.url("security", "/users");
        let limit = limit.to_string();
        let mut query = vec![("limit", limit.as_str())];
        if let Some(search) = search.filter(|s| !s.is_empty()) {
            query.push(("search", search));
        }
        let resp = self.get(&url).query(&query).send().await?;
        read_json(check_response(resp).await?).await
    }
}
