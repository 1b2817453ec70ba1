//! Schema introspection (`/generator/projects/{p}/schema/...`).

use crate::http::{check_response, read_json};
use crate::models::{AttributeEnvelope, ListEnvelope};
use crate::{AttributeSummary, ClientError, EntitySummary, GravibaseClient, segment};

impl GravibaseClient {
    /// List the entities defined in the project schema.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure, a non-200 status, or an
    /// unparseable body.
    pub async fn entities(&self) -> Result<Vec<EntitySummary>, ClientError> {
        let url = self.url("generator", "/schema/entities");
        let resp = check_response(self.get(&url).send().await?).await?;
        let envelope: ListEnvelope<EntitySummary> = read_json(resp).await?;
        Ok(envelope.data)
    }

    /// List the attributes of one entity.
    ///
    /// # Errors
    ///
    /// Same as [`Self::entities`].
    pub async fn attributes(&self, entity: &str) -> Result<Vec<AttributeSummary>, ClientError> {
        let url = self.url(
            "generator",
            &format!("/schema/entities/{}/attributes", segment(entity)),
        );
        let resp = check_response(self.get(&url).send().await?).await?;
        let envelope: AttributeEnvelope = read_json(resp).await?;
        Ok(envelope.into_attributes())
    }
}
