//! End-to-end verification run.
//!
//! Authentication and schema introspection are fatal. Everything after that
//! is recorded in the report and the run continues.

use std::time::Duration;

use chrono::{DateTime, Utc};
use grav_core::{ExpectedSchema, SchemaDiff, Step, TestIdentity, VerificationReport};

use crate::poll::PollPolicy;
use crate::registration::{RegistrationPlan, register_and_verify};
use crate::{GravibaseApi, VerifyError};

/// Operator login used for the bearer token.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub auth_project: String,
    pub login: String,
    pub password: String,
}

/// Tunables for one run.
#[derive(Debug, Clone)]
pub struct VerifyOptions {
    pub roles: Vec<String>,
    pub list_limit: u32,
    pub visibility: PollPolicy,
    pub user_prefix: String,
    pub email_domain: String,
    pub test_password: String,
    pub skip_registration: bool,
}

impl Default for VerifyOptions {
    fn default() -> Self {
        Self {
            roles: vec!["Viewer".to_string(), "Manager".to_string()],
            list_limit: 100,
            visibility: PollPolicy::single_attempt(Duration::from_secs(2)),
            user_prefix: "test-user".to_string(),
            email_domain: "example.com".to_string(),
            test_password: "SecureP@ssw0rd123!".to_string(),
            skip_registration: false,
        }
    }
}

impl VerifyOptions {
    /// Fresh throwaway identity stamped with `now`.
    #[must_use]
    pub fn identity(&self, now: DateTime<Utc>) -> TestIdentity {
        TestIdentity::generate(
            &self.user_prefix,
            &self.email_domain,
            &self.test_password,
            now,
        )
    }
}

/// Drives a [`GravibaseApi`] through the verification sequence.
pub struct Verifier<A> {
    api: A,
    project_code: String,
    expected: ExpectedSchema,
    credentials: Credentials,
    options: VerifyOptions,
}

impl<A: GravibaseApi> Verifier<A> {
    pub fn new(
        api: A,
        project_code: impl Into<String>,
        expected: ExpectedSchema,
        credentials: Credentials,
        options: VerifyOptions,
    ) -> Self {
        Self {
            api,
            project_code: project_code.into(),
            expected,
            credentials,
            options,
        }
    }

    /// Log in as the operator.
    ///
    /// # Errors
    ///
    /// Returns [`VerifyError::Authentication`]; a failed check is recorded
    /// first.
    pub async fn authenticate(&mut self, report: &mut VerificationReport) -> Result<(), VerifyError> {
        tracing::info!(
            project = %self.credentials.auth_project,
            login = %self.credentials.login,
            "authenticating"
        );
        match self
            .api
            .authenticate(
                &self.credentials.auth_project,
                &self.credentials.login,
                &self.credentials.password,
            )
            .await
        {
            Ok(()) => {
                report.pass(Step::Authenticate, None, "authentication successful");
                Ok(())
            }
            Err(source) => {
                report.fail(Step::Authenticate, None, format!("authentication failed: {source}"));
                Err(VerifyError::Authentication(source))
            }
        }
    }

    /// Read the capabilities document. Never fatal.
    pub async fn check_capabilities(&self, report: &mut VerificationReport) {
        match self.api.capabilities().await {
            Ok(capabilities) => {
                tracing::debug!(%capabilities, "capabilities");
                report.info(Step::Capabilities, None, capabilities.to_string());
            }
            Err(error) => {
                tracing::warn!(%error, "failed to get capabilities");
                report.warn(
                    Step::Capabilities,
                    None,
                    format!("failed to get capabilities: {error}"),
                );
            }
        }
    }

    /// Diff the live schema against the expected one.
    ///
    /// # Errors
    ///
    /// Propagates introspection failures; see [`crate::verify_schema`].
    pub async fn verify_schema(
        &self,
        report: &mut VerificationReport,
    ) -> Result<SchemaDiff, VerifyError> {
        crate::schema::verify_schema(&self.api, &self.expected, report).await
    }

    /// Run the registration probe for `identity`.
    ///
    /// Probe errors are recorded and logged, never returned. Returns whether
    /// the user became visible in a listing.
    pub async fn verify_registration(
        &self,
        identity: &TestIdentity,
        report: &mut VerificationReport,
    ) -> bool {
        let plan = RegistrationPlan {
            project: &self.project_code,
            identity,
            roles: &self.options.roles,
            list_limit: self.options.list_limit,
            visibility: self.options.visibility,
        };
        match register_and_verify(&self.api, &plan, report).await {
            Ok(visible) => {
                if !visible {
                    tracing::warn!(
                        username = %identity.username,
                        "user is not visible in the user listings"
                    );
                }
                visible
            }
            Err(error) => {
                tracing::error!(username = %identity.username, %error, "registration check failed");
                false
            }
        }
    }

    /// Full run into a fresh report.
    ///
    /// # Errors
    ///
    /// Returns the first fatal error. Use [`Self::run_into`] to keep the
    /// partial report.
    pub async fn run(&mut self, base_url: &str) -> Result<VerificationReport, VerifyError> {
        let mut report = VerificationReport::new(base_url, self.project_code.clone());
        self.run_into(&mut report).await?;
        Ok(report)
    }

    /// Full run: authenticate, capabilities, schema diff, registration probe.
    ///
    /// # Errors
    ///
    /// Authentication and schema-fetch failures abort the run; the checks
    /// recorded up to that point stay in `report`.
    pub async fn run_into(&mut self, report: &mut VerificationReport) -> Result<(), VerifyError> {
        self.authenticate(report).await?;
        self.check_capabilities(report).await;
        self.verify_schema(report).await?;

        if self.options.skip_registration {
            tracing::info!("registration check skipped");
        } else {
            let identity = self.options.identity(Utc::now());
            self.verify_registration(&identity, report).await;
        }

        let summary = report.summary();
        tracing::info!(
            passed = summary.passed,
            failed = summary.failed,
            warnings = summary.warnings,
            "verification finished"
        );
        Ok(())
    }
}
