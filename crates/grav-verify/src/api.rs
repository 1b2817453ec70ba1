//! The API surface the workflow drives.
//!
//! [`GravibaseClient`] is the production implementation; tests substitute an
//! in-memory fake to make registration and indexing behavior deterministic.

use grav_client::{ClientError, GravibaseClient, Registration, UserPage};
use serde_json::Value;

#[allow(async_fn_in_trait)]
pub trait GravibaseApi {
    /// Log in as the operator and keep the token for later calls.
    async fn authenticate(
        &mut self,
        auth_project: &str,
        login: &str,
        password: &str,
    ) -> Result<(), ClientError>;

    async fn capabilities(&self) -> Result<Value, ClientError>;

    async fn entity_names(&self) -> Result<Vec<String>, ClientError>;

    async fn attribute_names(&self, entity: &str) -> Result<Vec<String>, ClientError>;

    /// Returns the accepted HTTP status.
    async fn register_user(&self, registration: &Registration) -> Result<u16, ClientError>;

    async fn user_details(&self, username: &str) -> Result<Value, ClientError>;

    async fn user_profile(&self, username: &str) -> Result<Value, ClientError>;

    async fn assign_role(&self, username: &str, role: &str) -> Result<(), ClientError>;

    async fn user_roles(&self, username: &str) -> Result<Vec<String>, ClientError>;

    /// Log in as an arbitrary user without touching the held token.
    async fn login(&self, project: &str, username: &str, password: &str)
    -> Result<(), ClientError>;

    async fn list_users(&self, search: Option<&str>, limit: u32) -> Result<UserPage, ClientError>;
}

impl GravibaseApi for GravibaseClient {
    async fn authenticate(
        &mut self,
        auth_project: &str,
        login: &str,
        password: &str,
    ) -> Result<(), ClientError> {
        Self::authenticate(self, auth_project, login, password).await
    }

    async fn capabilities(&self) -> Result<Value, ClientError> {
        Self::capabilities(self).await
    }

    async fn entity_names(&self) -> Result<Vec<String>, ClientError> {
        Ok(self.entities().await?.into_iter().map(|e| e.name).collect())
    }

    async fn attribute_names(&self, entity: &str) -> Result<Vec<String>, ClientError> {
        Ok(self
            .attributes(entity)
            .await?
            .into_iter()
            .map(|a| a.name)
            .collect())
    }

    async fn register_user(&self, registration: &Registration) -> Result<u16, ClientError> {
        Self::register_user(self, registration).await
    }

    async fn user_details(&self, username: &str) -> Result<Value, ClientError> {
        Self::user_details(self, username).await
    }

    async fn user_profile(&self, username: &str) -> Result<Value, ClientError> {
        Self::user_profile(self, username).await
    }

    async fn assign_role(&self, username: &str, role: &str) -> Result<(), ClientError> {
        Self::assign_role(self, username, role).await
    }

    async fn user_roles(&self, username: &str) -> Result<Vec<String>, ClientError> {
        Ok(Self::user_roles(self, username)
            .await?
            .into_iter()
            .map(|r| r.role)
            .collect())
    }

    async fn login(
        &self,
        project: &str,
        username: &str,
        password: &str,
    ) -> Result<(), ClientError> {
        Self::login(self, project, username, password)
            .await
            .map(|_| ())
    }

    async fn list_users(&self, search: Option<&str>, limit: u32) -> Result<UserPage, ClientError> {
        Self::list_users(self, search, limit).await
    }
}
