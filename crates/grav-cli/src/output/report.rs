//! Human-readable verification report.

use std::fmt::Write as _;

use grav_core::{CheckStatus, VerificationReport};

use super::table::{TableOptions, render_table};

const fn status_label(status: CheckStatus) -> &'static str {
    match status {
        CheckStatus::Pass => "pass",
        CheckStatus::Fail => "fail",
        CheckStatus::Warn => "warn",
        CheckStatus::Info => "info",
    }
}

/// Header, one table row per check, then the registration outcome and the
/// summary line.
#[must_use]
pub fn render_report(report: &VerificationReport, options: TableOptions) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Gravibase verification of {} (project {})",
        report.base_url, report.project_code
    );
    let _ = writeln!(out, "started {}", report.started_at.to_rfc3339());
    out.push('\n');

    let rows: Vec<Vec<String>> = report
        .checks
        .iter()
        .map(|check| {
            vec![
                check.step.to_string(),
                check.subject.clone().unwrap_or_else(|| "-".to_string()),
                status_label(check.status).to_string(),
                check.message.clone(),
            ]
        })
        .collect();
    if rows.is_empty() {
        out.push_str("(no checks recorded)\n");
    } else {
        out.push_str(&render_table(
            &["step", "subject", "status", "message"],
            &rows,
            options,
        ));
        out.push('\n');
    }

    if let Some(registration) = &report.registration {
        out.push('\n');
        let _ = writeln!(
            out,
            "Test user {} <{}>: details {}, login {}, full list {}, search {}",
            registration.username,
            registration.email,
            yes_no(registration.detail_found),
            yes_no(registration.login_succeeded),
            yes_no(registration.visible_in_full_list),
            yes_no(registration.visible_in_search),
        );
        if !registration.roles_failed.is_empty() {
            let _ = writeln!(
                out,
                "Roles not assigned: {}",
                registration.roles_failed.join(", ")
            );
        }
    }

    let summary = report.summary();
    out.push('\n');
    let _ = write!(
        out,
        "Summary: {} passed, {} failed, {} warnings. Verification {}.",
        summary.passed,
        summary.failed,
        summary.warnings,
        if report.passed() { "PASSED" } else { "FAILED" }
    );
    out
}

const fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

#[cfg(test)]
mod tests {
    use grav_core::{RegistrationOutcome, Step};

    use super::*;

    fn report() -> VerificationReport {
        let mut report = VerificationReport::new("https://crm.example", "crm");
        report.pass(Step::Authenticate, None, "authentication successful");
        report.fail(
            Step::Attributes,
            Some("Deal"),
            "missing attributes: closedAt (actual: name, company)",
        );
        report.warn(Step::RoleAssignment, Some("Manager"), "forbidden");
        report
    }

    #[test]
    fn failing_report_lists_checks_and_summary() {
        let out = render_report(&report(), TableOptions::default());

        assert!(out.starts_with("Gravibase verification of https://crm.example (project crm)"));
        assert!(out.contains("attributes"));
        assert!(out.contains("closedAt"));
        assert!(out.ends_with("Summary: 1 passed, 1 failed, 1 warnings. Verification FAILED."));
    }

    #[test]
    fn registration_outcome_is_summarized() {
        let mut report = report();
        report.registration = Some(RegistrationOutcome {
            username: "test-user-1".into(),
            email: "test-user-1@example.com".into(),
            detail_found: true,
            login_succeeded: true,
            roles_assigned: vec!["Viewer".into()],
            roles_failed: vec!["Manager".into()],
            visible_in_full_list: false,
            visible_in_search: true,
            visibility_attempts: 1,
        });

        let out = render_report(&report, TableOptions::default());

        assert!(out.contains(
            "Test user test-user-1 <test-user-1@example.com>: details yes, login yes, full list no, search yes"
        ));
        assert!(out.contains("Roles not assigned: Manager"));
    }

    #[test]
    fn empty_report_passes() {
        let report = VerificationReport::new("https://crm.example", "crm");
        let out = render_report(&report, TableOptions::default());
        assert!(out.contains("(no checks recorded)"));
        assert!(out.ends_with("Verification PASSED."));
    }
}
