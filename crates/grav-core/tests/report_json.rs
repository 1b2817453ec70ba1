//! JSON shape of the verification report as consumed by `--format json`.

use std::collections::BTreeSet;

use grav_core::{
    EntityDiff, EntitySpec, RegistrationOutcome, SchemaDiff, Step, VerificationReport,
};
use pretty_assertions::assert_eq;

fn sample_report() -> VerificationReport {
    let mut report = VerificationReport::new("https://app.gravibase.ru", "minicrm");
    report.pass(Step::Authenticate, Some("admin"), "authenticated");
    report.fail(
        Step::Attributes,
        Some("Deal"),
        "missing attributes: closedAt",
    );

    let deal = EntitySpec::new("Deal", &["name", "closedAt"]);
    report.schema = Some(SchemaDiff {
        missing_entities: BTreeSet::from(["Tag".to_string()]),
        entities: vec![EntityDiff::compute(&deal, vec!["name".to_string()])],
    });
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
    report
}

#[test]
fn report_roundtrips_through_json() {
    let report = sample_report();
    let json = serde_json::to_string_pretty(&report).unwrap();
    let recovered: VerificationReport = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered, report);
}

#[test]
fn report_json_exposes_schema_diff_and_registration() {
    let value = serde_json::to_value(sample_report()).unwrap();

    assert_eq!(value["project_code"], "minicrm");
    assert_eq!(value["checks"][1]["status"], "fail");
    assert_eq!(value["checks"][1]["subject"], "Deal");
    assert_eq!(value["schema"]["missing_entities"][0], "Tag");
    assert_eq!(value["schema"]["entities"][0]["missing"][0], "closedAt");
    assert_eq!(value["registration"]["visible_in_search"], true);
    assert_eq!(value["registration"]["roles_failed"][0], "Manager");
}
