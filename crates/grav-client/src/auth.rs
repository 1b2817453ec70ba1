//! Token and registration endpoints (`/auth/projects/{p}/...`).

use crate::http::{check_response, expect_status, read_json};
use crate::{ClientError, GravibaseClient, Registration, TokenResponse};

/// Statuses the registration endpoint answers on success.
const REGISTRATION_ACCEPTED: &[u16] = &[200, 201, 202];

impl GravibaseClient {
    /// Exchange `login`/`password` for a token at `/auth/projects/{project}/token`.
    ///
    /// The held token is left untouched; see [`Self::authenticate`].
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] on any status other than 200, or
    /// [`ClientError::Parse`] if the body carries no `access_token`.
    pub async fn login(
        &self,
        project: &str,
        login: &str,
        password: &str,
    ) -> Result<TokenResponse, ClientError> {
        let url = self.project_url("auth", project, "/token");
        let resp = self
            .post(&url)
            .form(&[("login", login), ("password", password)])
            .send()
            .await?;
        read_json(check_response(resp).await?).await
    }

    /// Log in as the operator and keep the bearer token for later calls.
    ///
    /// `auth_project` is the platform project the operator account lives in
    /// (usually `apps`), not the project under verification.
    ///
    /// # Errors
    ///
    /// Same as [`Self::login`].
    pub async fn authenticate(
        &mut self,
        auth_project: &str,
        login: &str,
        password: &str,
    ) -> Result<(), ClientError> {
        tracing::info!(user = login, project = auth_project, "authenticating");
        let token = self.login(auth_project, login, password).await?;
        self.token = Some(token.access_token);
        Ok(())
    }

    /// Register a user in the verified project via the password flow.
    ///
    /// Returns the HTTP status the platform answered with.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] unless the status is 200, 201 or 202.
    pub async fn register_user(&self, registration: &Registration) -> Result<u16, ClientError> {
        let url = self.url("auth", "/users");
        let resp = self.post(&url).json(registration).send().await?;
        let resp = expect_status(resp, REGISTRATION_ACCEPTED).await?;
        Ok(resp.status().as_u16())
    }
}
