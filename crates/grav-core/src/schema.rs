//! Expected schema snapshot and attribute diffing.
//!
//! The expected schema is an ordered list of entities, each with an ordered
//! list of attribute names. A live project passes when every expected entity
//! exists and its attribute names are a superset of the expected ones. Extra
//! remote attributes are never a failure.

use std::collections::{BTreeSet, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Built-in CRM schema snapshot, in declaration order.
const CRM_SNAPSHOT: &[(&str, &[&str])] = &[
    ("PlatformAdmin", &["email", "passwordHash", "name", "isActive"]),
    (
        "Company",
        &[
            "name",
            "timezone",
            "currency",
            "logoUrl",
            "konturApiKey",
            "isBlocked",
            "blockedReason",
            "defaultLanguage",
        ],
    ),
    ("CrmFunnel", &["name", "isActive", "company"]),
    ("FunnelStage", &["name", "orderIdx", "statusType", "funnel"]),
    ("Directory", &["type", "value", "isActive", "company"]),
    ("Tag", &["name", "company"]),
    (
        "ClientCompany",
        &[
            "name",
            "inn",
            "legalForm",
            "relationType",
            "source",
            "address",
            "website",
            "konturDataRaw",
            "company",
        ],
    ),
    (
        "ContactPerson",
        &[
            "firstName",
            "lastName",
            "positionTitle",
            "phoneWork",
            "phonePersonal",
            "emailAddr",
            "commentaryText",
            "company",
        ],
    ),
    (
        "ContactCompanyLink",
        &["contactPerson", "clientCompany", "isPrimaryJob"],
    ),
    (
        "Deal",
        &[
            "name",
            "clientCompany",
            "contactPerson",
            "funnel",
            "currentStage",
            "amountValue",
            "responsibleUserId",
            "deadlineDate",
            "closedAt",
            "company",
        ],
    ),
    ("DealTagLink", &["deal", "tag"]),
    ("ClientTagLink", &["clientCompany", "tag"]),
    (
        "DealProduct",
        &["deal", "productCategory", "quantityAmount", "unitPrice"],
    ),
    (
        "DealStageHistory",
        &[
            "deal",
            "fromStage",
            "toStage",
            "changedByUserId",
            "changedAtTime",
        ],
    ),
    (
        "Interaction",
        &[
            "company",
            "interactionType",
            "clientCompany",
            "deal",
            "contactPerson",
            "interactionDate",
            "descriptionText",
            "authorUserId",
        ],
    ),
    (
        "CompanyInvite",
        &[
            "emailAddr",
            "company",
            "roleName",
            "inviteToken",
            "invitedByUserId",
            "acceptedAt",
            "expiresAt",
        ],
    ),
    ("UserPreference", &["userId", "company", "language", "theme"]),
];

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One expected entity and the attribute names it must carry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySpec {
    pub name: String,
    pub attributes: Vec<String>,
}

impl EntitySpec {
    #[must_use]
    pub fn new(name: impl Into<String>, attributes: &[&str]) -> Self {
        Self {
            name: name.into(),
            attributes: attributes.iter().map(|a| (*a).to_string()).collect(),
        }
    }
}

/// Read-only expected schema. Order is preserved for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpectedSchema {
    entities: Vec<EntitySpec>,
}

impl ExpectedSchema {
    /// The built-in CRM snapshot.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            entities: CRM_SNAPSHOT
                .iter()
                .map(|(name, attrs)| EntitySpec::new(*name, attrs))
                .collect(),
        }
    }

    /// Build a schema from explicit entity specs.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] on an empty entity name or a
    /// duplicated entity.
    pub fn from_entities(entities: Vec<EntitySpec>) -> Result<Self, CoreError> {
        let mut seen = HashSet::new();
        for entity in &entities {
            if entity.name.trim().is_empty() {
                return Err(CoreError::Validation(
                    "expected schema contains an entity with an empty name".into(),
                ));
            }
            if !seen.insert(entity.name.as_str()) {
                return Err(CoreError::Validation(format!(
                    "entity '{}' is declared more than once",
                    entity.name
                )));
            }
        }
        Ok(Self { entities })
    }

    /// Load a schema from a JSON file holding an array of
    /// `{ "name": ..., "attributes": [...] }` objects.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError`] if the file cannot be read, parsed, or validated.
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let raw = std::fs::read_to_string(path).map_err(|source| CoreError::SchemaRead {
            path: path.to_path_buf(),
            source,
        })?;
        let entities: Vec<EntitySpec> =
            serde_json::from_str(&raw).map_err(|source| CoreError::SchemaParse {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_entities(entities)
    }

    #[must_use]
    pub fn entities(&self) -> &[EntitySpec] {
        &self.entities
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&EntitySpec> {
        self.entities.iter().find(|e| e.name == name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Expected entity names absent from `actual`.
    #[must_use]
    pub fn missing_entities<S: AsRef<str>>(&self, actual: &[S]) -> BTreeSet<String> {
        let actual: HashSet<&str> = actual.iter().map(AsRef::as_ref).collect();
        self.entities
            .iter()
            .filter(|e| !actual.contains(e.name.as_str()))
            .map(|e| e.name.clone())
            .collect()
    }
}

impl Default for ExpectedSchema {
    fn default() -> Self {
        Self::builtin()
    }
}

// ---------------------------------------------------------------------------
// Diff
// ---------------------------------------------------------------------------

/// Attribute diff for one entity present remotely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityDiff {
    pub entity: String,
    /// Expected attribute names not found remotely.
    pub missing: BTreeSet<String>,
    /// Attribute names reported by the remote, in remote order.
    pub actual: Vec<String>,
}

impl EntityDiff {
    /// Set difference `expected - actual` for one entity.
    #[must_use]
    pub fn compute(spec: &EntitySpec, actual: Vec<String>) -> Self {
        let present: HashSet<&str> = actual.iter().map(String::as_str).collect();
        let missing = spec
            .attributes
            .iter()
            .filter(|a| !present.contains(a.as_str()))
            .cloned()
            .collect();
        Self {
            entity: spec.name.clone(),
            missing,
            actual,
        }
    }

    #[must_use]
    pub fn passed(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Whole-schema diff: missing entities plus per-entity attribute diffs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDiff {
    pub missing_entities: BTreeSet<String>,
    pub entities: Vec<EntityDiff>,
}

impl SchemaDiff {
    #[must_use]
    pub fn passed(&self) -> bool {
        self.missing_entities.is_empty() && self.entities.iter().all(EntityDiff::passed)
    }

    /// Entity diffs that report at least one missing attribute.
    pub fn failing(&self) -> impl Iterator<Item = &EntityDiff> {
        self.entities.iter().filter(|d| !d.passed())
    }
}
