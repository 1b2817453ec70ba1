//! Schema structure check: expected entities and attributes against the live project.

use grav_core::{EntityDiff, ExpectedSchema, SchemaDiff, Step, VerificationReport};

use crate::{GravibaseApi, VerifyError};

/// Diff the live schema against `expected`, recording one check per entity.
///
/// Entities missing remotely are reported once and skipped for the
/// attribute pass.
///
/// # Errors
///
/// Fails fast with [`VerifyError::Entities`] or [`VerifyError::Attributes`]
/// if introspection itself fails.
pub async fn verify_schema<A: GravibaseApi>(
    api: &A,
    expected: &ExpectedSchema,
    report: &mut VerificationReport,
) -> Result<SchemaDiff, VerifyError> {
    tracing::info!("verifying schema structure");
    let actual = api.entity_names().await.map_err(|source| {
        report.fail(Step::Entities, None, format!("failed to fetch entities: {source}"));
        VerifyError::Entities(source)
    })?;

    let missing_entities = expected.missing_entities(actual.as_slice());
    if missing_entities.is_empty() {
        report.pass(
            Step::Entities,
            None,
            format!("all {} expected entities present", expected.len()),
        );
    } else {
        report.fail(
            Step::Entities,
            None,
            format!("missing entities: {}", join(missing_entities.iter())),
        );
    }

    let mut entities = Vec::new();
    for spec in expected.entities() {
        if missing_entities.contains(&spec.name) {
            continue;
        }

        let names = api.attribute_names(&spec.name).await.map_err(|source| {
            report.fail(
                Step::Attributes,
                Some(spec.name.as_str()),
                format!("failed to fetch attributes: {source}"),
            );
            VerifyError::Attributes {
                entity: spec.name.clone(),
                source,
            }
        })?;

        let diff = EntityDiff::compute(spec, names);
        if diff.passed() {
            report.pass(
                Step::Attributes,
                Some(spec.name.as_str()),
                format!("all {} expected attributes present", spec.attributes.len()),
            );
        } else {
            tracing::warn!(entity = %spec.name, missing = ?diff.missing, "entity is missing attributes");
            report.fail(
                Step::Attributes,
                Some(spec.name.as_str()),
                format!(
                    "missing attributes: {} (actual: {})",
                    join(diff.missing.iter()),
                    join(diff.actual.iter())
                ),
            );
        }
        entities.push(diff);
    }

    let diff = SchemaDiff {
        missing_entities,
        entities,
    };
    report.schema = Some(diff.clone());
    Ok(diff)
}

fn join<'a>(items: impl Iterator<Item = &'a String>) -> String {
    items.map(String::as_str).collect::<Vec<_>>().join(", ")
}
