//! Core directory types: principals, visibility tiers, and tiered records

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Unique principal identifier
pub type PrincipalId = String;

/// Lifecycle status of a principal
///
/// Terminated principals are never physically deleted while audit history
/// references them; they are excluded from hierarchy queries instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrincipalStatus {
    /// Currently employed
    Active,
    /// Departed; retained for audit references only
    Terminated,
}

/// Principal (employee) node in the organizational graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Principal identifier (e.g., "emp:alice")
    pub id: PrincipalId,

    /// Stable contact key, unique across the directory
    pub email: String,

    /// Given name
    pub given_name: String,

    /// Surname, used as the primary sort key for deterministic listings
    pub surname: String,

    /// Weak back-reference to the manager; never cyclic by invariant,
    /// but traversal code must not rely on that
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager: Option<PrincipalId>,

    /// Flat role memberships (e.g., "manager", "hr-read")
    #[serde(default)]
    pub roles: BTreeSet<String>,

    /// Lifecycle status
    pub status: PrincipalStatus,

    /// Grade tier, ordinal and informational only
    #[serde(default)]
    pub grade: u8,
}

impl Principal {
    /// Create a new active principal with no manager and no roles
    pub fn new(
        id: impl Into<String>,
        email: impl Into<String>,
        given_name: impl Into<String>,
        surname: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            given_name: given_name.into(),
            surname: surname.into(),
            manager: None,
            roles: BTreeSet::new(),
            status: PrincipalStatus::Active,
            grade: 0,
        }
    }

    /// Set the manager reference
    pub fn with_manager(mut self, manager: impl Into<String>) -> Self {
        self.manager = Some(manager.into());
        self
    }

    /// Add a role membership
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.roles.insert(role.into());
        self
    }

    /// Set the grade tier
    pub fn with_grade(mut self, grade: u8) -> Self {
        self.grade = grade;
        self
    }

    /// True if the principal is active
    pub fn is_active(&self) -> bool {
        self.status == PrincipalStatus::Active
    }
}

/// Field visibility tier
///
/// Tiers form a total order: `Public < Restricted < Confidential`. A viewer
/// granted a tier sees every field tagged at or below it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Tier {
    /// Name, title, department
    Public,
    /// Salary, bonus, phone
    Restricted,
    /// Compensation history, performance reviews
    Confidential,
}

/// A single record field with its tagged minimum visibility tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordField {
    /// Field value
    pub value: serde_json::Value,

    /// Minimum tier required to see this field
    pub tier: Tier,
}

/// Protected employee record: an owner and a set of tiered fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Principal that owns this record
    pub owner: PrincipalId,

    /// Resource type (e.g., "employee-record")
    pub resource_type: String,

    /// Fields keyed by name; every field carries exactly one tier
    #[serde(default)]
    pub fields: BTreeMap<String, RecordField>,
}

impl Record {
    /// Create an empty record for an owner
    pub fn new(owner: impl Into<String>, resource_type: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            resource_type: resource_type.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Add a field with its visibility tier
    pub fn with_field(
        mut self,
        name: impl Into<String>,
        value: serde_json::Value,
        tier: Tier,
    ) -> Self {
        self.fields.insert(name.into(), RecordField { value, tier });
        self
    }
}

/// Projection of a record visible at a granted tier
///
/// Fields above the granted tier are omitted entirely, not masked, so the
/// projection leaks neither values nor field presence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartialRecord {
    /// Principal that owns the underlying record
    pub owner: PrincipalId,

    /// Resource type of the underlying record
    pub resource_type: String,

    /// Tier the projection was taken at
    pub tier: Tier,

    /// Surviving fields
    pub fields: BTreeMap<String, RecordField>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_principal_creation() {
        let principal = Principal::new("emp:alice", "alice@tamshai.ai", "Alice", "Anders")
            .with_manager("emp:root")
            .with_role("manager")
            .with_grade(7);

        assert_eq!(principal.id, "emp:alice");
        assert_eq!(principal.manager.as_deref(), Some("emp:root"));
        assert!(principal.roles.contains("manager"));
        assert!(principal.is_active());
    }

    #[test]
    fn test_tier_total_order() {
        assert!(Tier::Public < Tier::Restricted);
        assert!(Tier::Restricted < Tier::Confidential);
        assert!(Tier::Public < Tier::Confidential);
    }

    #[test]
    fn test_record_builder() {
        let record = Record::new("emp:bob", "employee-record")
            .with_field("name", json!("Bob Baker"), Tier::Public)
            .with_field("salary", json!(95_000), Tier::Restricted)
            .with_field("reviews", json!(["exceeds"]), Tier::Confidential);

        assert_eq!(record.fields.len(), 3);
        assert_eq!(record.fields["salary"].tier, Tier::Restricted);
    }

    #[test]
    fn test_tier_serde_codes() {
        let encoded = serde_json::to_string(&Tier::Restricted).unwrap();
        assert_eq!(encoded, "\"RESTRICTED\"");
        let decoded: Tier = serde_json::from_str("\"CONFIDENTIAL\"").unwrap();
        assert_eq!(decoded, Tier::Confidential);
    }
}
