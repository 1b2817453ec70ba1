//! Verification report accumulated by the workflow.
//!
//! Every step appends [`Check`] records in execution order. The report never
//! prints anything itself; rendering is left to the caller.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::schema::SchemaDiff;

// ---------------------------------------------------------------------------
// Step / CheckStatus
// ---------------------------------------------------------------------------

/// Workflow step a check belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Authenticate,
    Capabilities,
    Entities,
    Attributes,
    Registration,
    UserDetails,
    UserProfile,
    RoleAssignment,
    UserRoles,
    Login,
    Visibility,
}

impl Step {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Authenticate => "authenticate",
            Self::Capabilities => "capabilities",
            Self::Entities => "entities",
            Self::Attributes => "attributes",
            Self::Registration => "registration",
            Self::UserDetails => "user_details",
            Self::UserProfile => "user_profile",
            Self::RoleAssignment => "role_assignment",
            Self::UserRoles => "user_roles",
            Self::Login => "login",
            Self::Visibility => "visibility",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a single check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Pass,
    Fail,
    /// Non-fatal problem; the workflow kept going.
    Warn,
    /// Informational observation, never counted against the run.
    Info,
}

impl CheckStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Fail => "fail",
            Self::Warn => "warn",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Check
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Check {
    pub step: Step,
    /// Entity name, username, or role the check is about.
    pub subject: Option<String>,
    pub status: CheckStatus,
    pub message: String,
}

// ---------------------------------------------------------------------------
// Registration outcome
// ---------------------------------------------------------------------------

/// What the registration probe observed for the throwaway user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationOutcome {
    pub username: String,
    pub email: String,
    pub detail_found: bool,
    pub login_succeeded: bool,
    pub roles_assigned: Vec<String>,
    pub roles_failed: Vec<String>,
    pub visible_in_full_list: bool,
    pub visible_in_search: bool,
    /// Number of listing rounds issued by the visibility poll.
    pub visibility_attempts: u32,
}

impl RegistrationOutcome {
    /// The user showed up in at least one listing.
    #[must_use]
    pub const fn visible(&self) -> bool {
        self.visible_in_full_list || self.visible_in_search
    }
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// Per-status check counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub passed: usize,
    pub failed: usize,
    pub warnings: usize,
    pub info: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationReport {
    pub base_url: String,
    pub project_code: String,
    pub started_at: DateTime<Utc>,
    pub checks: Vec<Check>,
    /// Present once schema introspection completed.
    pub schema: Option<SchemaDiff>,
    /// Present once the registration probe ran (even if it failed midway).
    pub registration: Option<RegistrationOutcome>,
}

impl VerificationReport {
    #[must_use]
    pub fn new(base_url: impl Into<String>, project_code: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            project_code: project_code.into(),
            started_at: Utc::now(),
            checks: Vec::new(),
            schema: None,
            registration: None,
        }
    }

    pub fn record(
        &mut self,
        step: Step,
        subject: Option<&str>,
        status: CheckStatus,
        message: impl Into<String>,
    ) {
        self.checks.push(Check {
            step,
            subject: subject.map(str::to_string),
            status,
            message: message.into(),
        });
    }

    pub fn pass(&mut self, step: Step, subject: Option<&str>, message: impl Into<String>) {
        self.record(step, subject, CheckStatus::Pass, message);
    }

    pub fn fail(&mut self, step: Step, subject: Option<&str>, message: impl Into<String>) {
        self.record(step, subject, CheckStatus::Fail, message);
    }

    pub fn warn(&mut self, step: Step, subject: Option<&str>, message: impl Into<String>) {
        self.record(step, subject, CheckStatus::Warn, message);
    }

    pub fn info(&mut self, step: Step, subject: Option<&str>, message: impl Into<String>) {
        self.record(step, subject, CheckStatus::Info, message);
    }

    /// Checks recorded for one step, in order.
    pub fn checks_for(&self, step: Step) -> impl Iterator<Item = &Check> {
        self.checks.iter().filter(move |c| c.step == step)
    }

    #[must_use]
    pub fn summary(&self) -> Summary {
        self.checks
            .iter()
            .fold(Summary::default(), |mut acc, check| {
                match check.status {
                    CheckStatus::Pass => acc.passed += 1,
                    CheckStatus::Fail => acc.failed += 1,
                    CheckStatus::Warn => acc.warnings += 1,
                    CheckStatus::Info => acc.info += 1,
                }
                acc
            })
    }

    /// No check failed. Warnings do not count against the run.
    #[must_use]
    pub fn passed(&self) -> bool {
        !self.checks.iter().any(|c| c.status == CheckStatus::Fail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn summary_counts_each_status() {
        let mut report = VerificationReport::new("https://example.test", "crm");
        report.pass(Step::Authenticate, None, "ok");
        report.warn(Step::RoleAssignment, Some("Viewer"), "403");
        report.fail(Step::Attributes, Some("Deal"), "missing closedAt");
        report.info(Step::Capabilities, None, "{}");

        assert_eq!(
            report.summary(),
            Summary {
                passed: 1,
                failed: 1,
                warnings: 1,
                info: 1,
            }
        );
        assert!(!report.passed());
    }

    #[test]
    fn warnings_do_not_fail_the_report() {
        let mut report = VerificationReport::new("https://example.test", "crm");
        report.pass(Step::Entities, None, "all present");
        report.warn(Step::UserRoles, Some("alice"), "unavailable");
        assert!(report.passed());
    }

    #[test]
    fn checks_for_filters_by_step_in_order() {
        let mut report = VerificationReport::new("https://example.test", "crm");
        report.fail(Step::Attributes, Some("Deal"), "a");
        report.pass(Step::Entities, None, "b");
        report.fail(Step::Attributes, Some("Tag"), "c");

        let subjects: Vec<_> = report
            .checks_for(Step::Attributes)
            .filter_map(|c| c.subject.as_deref())
            .collect();
        assert_eq!(subjects, vec!["Deal", "Tag"]);
    }

    #[test]
    fn statuses_serialize_as_snake_case() {
        let check = Check {
            step: Step::RoleAssignment,
            subject: Some("Viewer".into()),
            status: CheckStatus::Warn,
            message: "denied".into(),
        };
        let json = serde_json::to_value(&check).unwrap();
        assert_eq!(json["step"], "role_assignment");
        assert_eq!(json["status"], "warn");
    }

    #[test]
    fn registration_visible_in_either_listing() {
        let mut outcome = RegistrationOutcome::default();
        assert!(!outcome.visible());
        outcome.visible_in_search = true;
        assert!(outcome.visible());
    }
}
