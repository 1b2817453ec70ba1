//! Record data API (`/api/projects/{p}/entities/{entity}/data`).

use reqwest::header::{ACCEPT, ORIGIN, REFERER};
use serde_json::Value;

use crate::http::{check_response, expect_status, read_json};
use crate::models::ListEnvelope;
use crate::{ClientError, GravibaseClient, segment};

/// Statuses the create endpoint answers on success.
const RECORD_CREATED: &[u16] = &[200, 201];

impl GravibaseClient {
    fn data_url(&self, entity: &str) -> String {
        self.url("api", &format!("/entities/{}/data", segment(entity)))
    }

    /// List records of `entity`.
    ///
    /// With `anonymous`, the bearer token is not sent, matching how the
    /// public frontend looks records up before sign-in.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure, a non-200 status, or an
    /// unparseable body.
    pub async fn list_records(
        &self,
        entity: &str,
        anonymous: bool,
    ) -> Result<Vec<Value>, ClientError> {
        let url = self.data_url(entity);
        let builder = if anonymous {
            self.http.get(&url)
        } else {
            self.get(&url)
        };
        let resp = builder.header(ACCEPT, "application/json").send().await?;
        let envelope: ListEnvelope<Value> = read_json(check_response(resp).await?).await?;
        Ok(envelope.data)
    }

    /// Create one record of `entity`. Requires a held token.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotAuthenticated`] without a token, or
    /// [`ClientError::Api`] unless the status is 200 or 201.
    pub async fn create_record(&self, entity: &str, record: &Value) -> Result<Value, ClientError> {
        if self.token.is_none() {
            return Err(ClientError::NotAuthenticated);
        }
        let url = self.data_url(entity);
        let resp = self
            .post(&url)
            .header(ACCEPT, "application/json")
            .header(ORIGIN, self.base_url.as_str())
            .header(REFERER, format!("{}/", self.base_url))
            .json(record)
            .send()
            .await?;
        let resp = expect_status(resp, RECORD_CREATED).await?;
        let body = resp.text().await?;
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        crate::http::parse_json(&body)
    }
}
