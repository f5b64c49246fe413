//! Access decision types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tamshai_directory::Tier;
use uuid::Uuid;

/// Decision outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Outcome {
    /// Access granted at some tier
    Allow,
    /// Access denied
    Deny,
}

/// Stable justification code attached to every decision
///
/// Codes, not free text, so the audit ledger and downstream consumers can
/// classify decisions programmatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Justification {
    /// Requester is the record owner
    SelfAccess,
    /// Requester holds a role with full access to the resource type
    ElevatedRole,
    /// Requester holds the executive role (read-only grant, distinct audit
    /// code to support write-gating outside this engine)
    ExecutiveRead,
    /// Requester manages the target, directly or transitively
    ManagerTransitive,
    /// No rule matched
    NoMatchingRule,
    /// Target id unknown (indistinguishable from a plain deny to the caller)
    TargetNotFound,
    /// Session claims malformed or missing
    InvalidSession,
    /// Backing store failed or timed out
    StoreUnavailable,
}

impl Justification {
    /// Stable string code for audit classification
    pub fn as_str(&self) -> &'static str {
        match self {
            Justification::SelfAccess => "self_access",
            Justification::ElevatedRole => "elevated_role",
            Justification::ExecutiveRead => "executive_read",
            Justification::ManagerTransitive => "manager_transitive",
            Justification::NoMatchingRule => "no_matching_rule",
            Justification::TargetNotFound => "target_not_found",
            Justification::InvalidSession => "invalid_session",
            Justification::StoreUnavailable => "store_unavailable",
        }
    }
}

/// Immutable result of one policy evaluation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessDecision {
    /// Unique decision identifier
    pub id: Uuid,

    /// Principal that asked
    pub requester_id: String,

    /// Principal whose record was asked for
    pub target_id: String,

    /// Resource type evaluated against
    pub resource_type: String,

    /// Allow or deny
    pub outcome: Outcome,

    /// Visibility tier granted; present exactly when the outcome is allow
    #[serde(skip_serializing_if = "Option::is_none")]
    pub granted_tier: Option<Tier>,

    /// Why
    pub justification: Justification,

    /// Request-correlation id from the session context
    pub correlation_id: Uuid,

    /// When the decision was made
    pub decided_at: DateTime<Utc>,
}

impl AccessDecision {
    /// Create an allow decision at a tier
    pub fn allow(
        requester_id: impl Into<String>,
        target_id: impl Into<String>,
        resource_type: impl Into<String>,
        tier: Tier,
        justification: Justification,
        correlation_id: Uuid,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            requester_id: requester_id.into(),
            target_id: target_id.into(),
            resource_type: resource_type.into(),
            outcome: Outcome::Allow,
            granted_tier: Some(tier),
            justification,
            correlation_id,
            decided_at: Utc::now(),
        }
    }

    /// Create a deny decision
    pub fn deny(
        requester_id: impl Into<String>,
        target_id: impl Into<String>,
        resource_type: impl Into<String>,
        justification: Justification,
        correlation_id: Uuid,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            requester_id: requester_id.into(),
            target_id: target_id.into(),
            resource_type: resource_type.into(),
            outcome: Outcome::Deny,
            granted_tier: None,
            justification,
            correlation_id,
            decided_at: Utc::now(),
        }
    }

    /// True if the outcome is allow
    pub fn is_allowed(&self) -> bool {
        self.outcome == Outcome::Allow
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allow_decision() {
        let correlation = Uuid::new_v4();
        let decision = AccessDecision::allow(
            "emp:alice",
            "emp:bob",
            "employee-record",
            Tier::Confidential,
            Justification::ElevatedRole,
            correlation,
        );

        assert!(decision.is_allowed());
        assert_eq!(decision.granted_tier, Some(Tier::Confidential));
        assert_eq!(decision.correlation_id, correlation);
    }

    #[test]
    fn test_deny_decision_has_no_tier() {
        let decision = AccessDecision::deny(
            "emp:erin",
            "emp:frank",
            "employee-record",
            Justification::NoMatchingRule,
            Uuid::new_v4(),
        );

        assert!(!decision.is_allowed());
        assert!(decision.granted_tier.is_none());
    }

    #[test]
    fn test_justification_codes_are_stable() {
        assert_eq!(Justification::SelfAccess.as_str(), "self_access");
        assert_eq!(Justification::ManagerTransitive.as_str(), "manager_transitive");
        assert_eq!(Justification::TargetNotFound.as_str(), "target_not_found");

        let encoded = serde_json::to_string(&Justification::ExecutiveRead).unwrap();
        assert_eq!(encoded, "\"executive_read\"");
    }
}
