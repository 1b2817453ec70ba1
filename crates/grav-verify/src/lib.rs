//! Verification workflow for a Gravibase project.
//!
//! Drives a [`GravibaseApi`] through authentication, schema introspection and
//! a user-registration probe, accumulating results into a
//! [`grav_core::VerificationReport`].

mod api;
mod error;
pub mod poll;
pub mod registration;
pub mod schema;
pub mod workflow;

pub use api::GravibaseApi;
pub use error::VerifyError;
pub use poll::{PollOutcome, PollPolicy, poll_until};
pub use registration::{RegistrationPlan, register_and_verify};
pub use schema::verify_schema;
pub use workflow::{Credentials, Verifier, VerifyOptions};
