//! Policy evaluator
//!
//! Combines self-access, role-based access, and transitive manager access
//! into one decision with a field-visibility tier. Rules are a fixed,
//! explicitly ordered list evaluated in application code (first match wins),
//! rather than declarative per-store row policies, so the same rules hold
//! across storage backends and can be tested directly.

pub mod decision;

pub use decision::{AccessDecision, Justification, Outcome};

use crate::audit::{AuditContext, AuditLedger};
use crate::error::{AuthzError, Result};
use crate::registry::{RoleRegistry, ROLE_EXECUTIVE, ROLE_MANAGER};
use crate::session::SessionContext;
use std::sync::Arc;
use tamshai_directory::{HierarchyWalker, PrincipalStore, Tier};
use tracing::{debug, info, warn};

/// Policy evaluator over a principal store, role registry, and audit ledger
///
/// Holds no per-request state and caches nothing across calls: each
/// `evaluate` is a pure function of its inputs, so a role revocation or a
/// reorg is reflected on the very next call.
pub struct PolicyEvaluator {
    store: Arc<dyn PrincipalStore>,
    registry: RoleRegistry,
    ledger: Arc<AuditLedger>,
}

impl PolicyEvaluator {
    /// Create an evaluator
    pub fn new(
        store: Arc<dyn PrincipalStore>,
        registry: RoleRegistry,
        ledger: Arc<AuditLedger>,
    ) -> Self {
        Self {
            store,
            registry,
            ledger,
        }
    }

    /// The audit ledger this evaluator appends to
    pub fn ledger(&self) -> &Arc<AuditLedger> {
        &self.ledger
    }

    /// Evaluate one (requester, target, resource type) triple
    ///
    /// Rule order is a deliberate tie-break: self-access and explicit
    /// elevated roles must never be shadowed by a failed hierarchy check.
    ///
    /// 1. self-access → allow `Confidential`
    /// 2. role set intersects the resource's full-access roles → allow
    ///    `Confidential`
    /// 3. `executive` → allow `Confidential` (read-only audit code)
    /// 4. `manager` holding requester is an ancestor of the target → allow
    ///    `Restricted`
    /// 5. deny
    ///
    /// Store failures, unknown targets, and malformed sessions are all
    /// normalized to a DENY decision here; the only error a caller can see
    /// is [`AuthzError::AuditWrite`], because a decision must not be
    /// released if its audit append cannot be guaranteed.
    pub async fn evaluate(
        &self,
        session: &SessionContext,
        target_id: &str,
        resource_type: &str,
    ) -> Result<AccessDecision> {
        debug!(
            requester = %session.principal_id,
            target = target_id,
            resource_type,
            "evaluating access"
        );

        let decision = match self.decide(session, target_id, resource_type).await {
            Ok(decision) => decision,
            Err(err) => {
                // Fail closed: every evaluation error becomes a coded deny
                warn!(error = %err, "evaluation error normalized to deny");
                let justification = match err {
                    AuthzError::NotFound(_) => Justification::TargetNotFound,
                    AuthzError::InvalidSession(_) => Justification::InvalidSession,
                    _ => Justification::StoreUnavailable,
                };
                AccessDecision::deny(
                    session.principal_id.clone(),
                    target_id,
                    resource_type,
                    justification,
                    session.correlation_id,
                )
            }
        };

        // Audit append on the request path itself; a failure here aborts the
        // whole request rather than granting access un-audited
        self.ledger
            .append(&decision, AuditContext::default())
            .await?;

        info!(
            requester = %decision.requester_id,
            target = %decision.target_id,
            outcome = ?decision.outcome,
            justification = decision.justification.as_str(),
            "decision"
        );

        Ok(decision)
    }

    /// Apply the rule list; errors are normalized by the caller
    async fn decide(
        &self,
        session: &SessionContext,
        target_id: &str,
        resource_type: &str,
    ) -> Result<AccessDecision> {
        if !session.is_valid() {
            return Ok(AccessDecision::deny(
                session.principal_id.clone(),
                target_id,
                resource_type,
                Justification::InvalidSession,
                session.correlation_id,
            ));
        }

        let requester_id = session.principal_id.as_str();

        // Rule 1: self-access, before any store read of the target
        if requester_id == target_id {
            return Ok(AccessDecision::allow(
                requester_id,
                target_id,
                resource_type,
                Tier::Confidential,
                Justification::SelfAccess,
                session.correlation_id,
            ));
        }

        // Unknown targets deny with the same shape as any other deny, so a
        // caller cannot distinguish "no such record" from "no access"
        if self.store.get_principal(target_id).await?.is_none() {
            return Ok(AccessDecision::deny(
                requester_id,
                target_id,
                resource_type,
                Justification::TargetNotFound,
                session.correlation_id,
            ));
        }

        // Rule 2: elevated roles from the registry
        if self
            .registry
            .has_full_access(resource_type, session.roles.iter())
        {
            return Ok(AccessDecision::allow(
                requester_id,
                target_id,
                resource_type,
                Tier::Confidential,
                Justification::ElevatedRole,
                session.correlation_id,
            ));
        }

        // Rule 3: executive read, same tier as rule 2 but a distinct audit
        // code so write-gating outside this engine can tell them apart
        if session.has_role(ROLE_EXECUTIVE) {
            return Ok(AccessDecision::allow(
                requester_id,
                target_id,
                resource_type,
                Tier::Confidential,
                Justification::ExecutiveRead,
                session.correlation_id,
            ));
        }

        // Rule 4: transitive manager access, one upward walk per call
        if session.has_role(ROLE_MANAGER) {
            let walker = HierarchyWalker::new(self.store.as_ref());
            if walker.is_ancestor_of(requester_id, target_id).await? {
                return Ok(AccessDecision::allow(
                    requester_id,
                    target_id,
                    resource_type,
                    Tier::Restricted,
                    Justification::ManagerTransitive,
                    session.correlation_id,
                ));
            }
        }

        // Rule 5: default deny
        Ok(AccessDecision::deny(
            requester_id,
            target_id,
            resource_type,
            Justification::NoMatchingRule,
            session.correlation_id,
        ))
    }
}
