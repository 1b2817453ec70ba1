//! `gravcheck create-company`: seed a test Company record.

use anyhow::Context;
use grav_config::GravConfig;
use serde::Serialize;
use serde_json::{Value, json};

use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::CreateCompanyArgs;
use crate::output;

const ENTITY: &str = "Company";

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
enum SeedStatus {
    Created,
    Exists,
}

#[derive(Debug, Serialize)]
struct SeedOutcome {
    status: SeedStatus,
    org_code: String,
    record: Value,
}

/// Handle `gravcheck create-company`.
pub async fn handle(
    args: &CreateCompanyArgs,
    config: &GravConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let client = bootstrap::authenticated_client(config).await?;

    // Looked up without the bearer token, like the public frontend.
    match client.list_records(ENTITY, true).await {
        Ok(records) => {
            tracing::debug!(count = records.len(), "existing companies");
            if let Some(existing) = find_by_org_code(records, &args.org_code) {
                tracing::info!(org_code = %args.org_code, "company already exists");
                return output::output(
                    &SeedOutcome {
                        status: SeedStatus::Exists,
                        org_code: args.org_code.clone(),
                        record: existing,
                    },
                    flags.format,
                );
            }
        }
        Err(error) => {
            tracing::warn!(%error, "company existence check failed; creating anyway");
        }
    }

    let record = client
        .create_record(ENTITY, &company_payload(args))
        .await
        .with_context(|| format!("failed to create company {} ({})", args.name, args.org_code))?;
    tracing::info!(name = %args.name, org_code = %args.org_code, "company created");

    output::output(
        &SeedOutcome {
            status: SeedStatus::Created,
            org_code: args.org_code.clone(),
            record,
        },
        flags.format,
    )
}

fn company_payload(args: &CreateCompanyArgs) -> Value {
    json!({
        "name": args.name,
        "orgCode": args.org_code,
        "currency": args.currency,
        "timezone": args.timezone,
        "defaultLanguage": args.language,
        "isBlocked": false,
    })
}

fn find_by_org_code(records: Vec<Value>, org_code: &str) -> Option<Value> {
    records
        .into_iter()
        .find(|record| record.get("orgCode").and_then(Value::as_str) == Some(org_code))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn args() -> CreateCompanyArgs {
        CreateCompanyArgs {
            name: "Test Company".into(),
            org_code: "TEST-01".into(),
            currency: "RUB".into(),
            timezone: "Europe/Moscow".into(),
            language: "ru".into(),
        }
    }

    #[test]
    fn payload_uses_platform_field_names() {
        assert_eq!(
            company_payload(&args()),
            json!({
                "name": "Test Company",
                "orgCode": "TEST-01",
                "currency": "RUB",
                "timezone": "Europe/Moscow",
                "defaultLanguage": "ru",
                "isBlocked": false,
            })
        );
    }

    #[test]
    fn existing_company_is_matched_by_org_code() {
        let records = vec![
            json!({"name": "Other", "orgCode": "OTHER"}),
            json!({"name": "Test Company", "orgCode": "TEST-01"}),
        ];
        let found = find_by_org_code(records, "TEST-01").expect("should match");
        assert_eq!(found["name"], "Test Company");
    }

    #[test]
    fn records_without_org_code_do_not_match() {
        let records = vec![json!({"name": "Test Company"})];
        assert!(find_by_org_code(records, "TEST-01").is_none());
    }
}
