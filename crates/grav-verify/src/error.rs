//! Workflow error types.
//!
//! Every variant is fatal for the step that raised it. Non-fatal problems
//! never surface here; they are recorded as warnings in the report.

use grav_client::ClientError;
use grav_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("authentication failed: {0}")]
    Authentication(#[source] ClientError),

    #[error("failed to fetch entities: {0}")]
    Entities(#[source] ClientError),

    #[error("failed to fetch attributes for {entity}: {source}")]
    Attributes {
        entity: String,
        #[source]
        source: ClientError,
    },

    #[error("registration call failed: {0}")]
    Registration(#[source] ClientError),

    #[error("user {username} not found via details API immediately after registration: {source}")]
    UserNotFound {
        username: String,
        #[source]
        source: ClientError,
    },

    #[error("newly created user {username} cannot log in: {source}")]
    LoginFailed {
        username: String,
        #[source]
        source: ClientError,
    },

    #[error(transparent)]
    Core(#[from] CoreError),
}
