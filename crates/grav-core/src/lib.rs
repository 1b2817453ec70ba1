//! # grav-core
//!
//! Core types shared by the gravcheck crates.
//!
//! - The expected schema snapshot and the attribute diff against a live project
//! - The verification report accumulated by the workflow
//! - Throwaway test identity generation
//! - Cross-cutting error types

pub mod errors;
pub mod identity;
pub mod report;
pub mod schema;

pub use errors::CoreError;
pub use identity::TestIdentity;
pub use report::{Check, CheckStatus, RegistrationOutcome, Step, Summary, VerificationReport};
pub use schema::{EntityDiff, EntitySpec, ExpectedSchema, SchemaDiff};
