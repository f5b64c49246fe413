//! Audit ledger behavior across full evaluations: one append per decision,
//! matching fields, fail-closed append failures, and the compliance query
//! surface.

use std::sync::Arc;
use tamshai_authz::{
    audit::{AuditFilter, AuditLedger, LedgerConfig},
    engine::{Outcome, PolicyEvaluator},
    error::AuthzError,
    registry::{RoleRegistry, RESOURCE_EMPLOYEE_RECORD},
    session::SessionContext,
};
use tamshai_directory::{InMemoryPrincipalStore, Principal};

fn seeded_store() -> InMemoryPrincipalStore {
    let store = InMemoryPrincipalStore::new();
    store.insert(
        Principal::new("emp:alice", "alice@tamshai.ai", "Alice", "Anders").with_role("hr-read"),
    );
    store.insert(Principal::new("emp:bob", "bob@tamshai.ai", "Bob", "Baker"));
    store.insert(Principal::new("emp:erin", "erin@tamshai.ai", "Erin", "Eads"));
    store
}

#[tokio::test]
async fn every_decision_appends_one_matching_entry() {
    let ledger = Arc::new(AuditLedger::new());
    let evaluator = PolicyEvaluator::new(
        Arc::new(seeded_store()),
        RoleRegistry::default(),
        ledger.clone(),
    );

    let session = SessionContext::new("emp:alice", ["hr-read"]);
    let decision = evaluator
        .evaluate(&session, "emp:bob", RESOURCE_EMPLOYEE_RECORD)
        .await
        .unwrap();

    let entries = ledger.query(&AuditFilter::default()).await;
    assert_eq!(entries.len(), 1);

    let entry = &entries[0];
    assert_eq!(entry.actor_id, decision.requester_id);
    assert_eq!(entry.target_id, decision.target_id);
    assert_eq!(entry.outcome, decision.outcome);
    assert_eq!(entry.correlation_id, decision.correlation_id);
    assert_eq!(entry.justification, "elevated_role");
}

#[tokio::test]
async fn denied_evaluations_are_audited_too() {
    let ledger = Arc::new(AuditLedger::new());
    let evaluator = PolicyEvaluator::new(
        Arc::new(seeded_store()),
        RoleRegistry::default(),
        ledger.clone(),
    );

    let session = SessionContext::new("emp:erin", Vec::<String>::new());
    evaluator
        .evaluate(&session, "emp:bob", RESOURCE_EMPLOYEE_RECORD)
        .await
        .unwrap();
    evaluator
        .evaluate(&session, "emp:zzz", RESOURCE_EMPLOYEE_RECORD)
        .await
        .unwrap();

    let denies = ledger
        .query(&AuditFilter {
            outcome: Some(Outcome::Deny),
            ..Default::default()
        })
        .await;
    assert_eq!(denies.len(), 2);

    let codes: Vec<&str> = denies.iter().map(|e| e.justification.as_str()).collect();
    assert!(codes.contains(&"no_matching_rule"));
    assert!(codes.contains(&"target_not_found"));
}

#[tokio::test]
async fn append_failure_fails_the_whole_request() {
    // Capacity 1: the second evaluation cannot be audited
    let ledger = Arc::new(AuditLedger::with_config(LedgerConfig {
        max_entries: Some(1),
        ..Default::default()
    }));
    let evaluator = PolicyEvaluator::new(
        Arc::new(seeded_store()),
        RoleRegistry::default(),
        ledger.clone(),
    );

    let session = SessionContext::new("emp:alice", ["hr-read"]);
    evaluator
        .evaluate(&session, "emp:bob", RESOURCE_EMPLOYEE_RECORD)
        .await
        .unwrap();

    // The decision itself would be ALLOW, but it must not be released
    let err = evaluator
        .evaluate(&session, "emp:bob", RESOURCE_EMPLOYEE_RECORD)
        .await
        .unwrap_err();
    assert!(matches!(err, AuthzError::AuditWrite(_)));
}

#[tokio::test]
async fn ledger_chain_stays_verifiable_across_evaluations() {
    let ledger = Arc::new(AuditLedger::new());
    let evaluator = PolicyEvaluator::new(
        Arc::new(seeded_store()),
        RoleRegistry::default(),
        ledger.clone(),
    );

    let hr = SessionContext::new("emp:alice", ["hr-read"]);
    let nobody = SessionContext::new("emp:erin", Vec::<String>::new());
    for _ in 0..3 {
        evaluator
            .evaluate(&hr, "emp:bob", RESOURCE_EMPLOYEE_RECORD)
            .await
            .unwrap();
        evaluator
            .evaluate(&nobody, "emp:bob", RESOURCE_EMPLOYEE_RECORD)
            .await
            .unwrap();
    }

    assert_eq!(ledger.len().await, 6);
    assert!(ledger.verify_integrity().await);
}

#[tokio::test]
async fn query_by_actor_and_target() {
    let ledger = Arc::new(AuditLedger::new());
    let evaluator = PolicyEvaluator::new(
        Arc::new(seeded_store()),
        RoleRegistry::default(),
        ledger.clone(),
    );

    let alice = SessionContext::new("emp:alice", ["hr-read"]);
    let erin = SessionContext::new("emp:erin", Vec::<String>::new());
    evaluator
        .evaluate(&alice, "emp:bob", RESOURCE_EMPLOYEE_RECORD)
        .await
        .unwrap();
    evaluator
        .evaluate(&alice, "emp:erin", RESOURCE_EMPLOYEE_RECORD)
        .await
        .unwrap();
    evaluator
        .evaluate(&erin, "emp:bob", RESOURCE_EMPLOYEE_RECORD)
        .await
        .unwrap();

    let by_alice = ledger
        .query(&AuditFilter {
            actor_id: Some("emp:alice".to_string()),
            ..Default::default()
        })
        .await;
    assert_eq!(by_alice.len(), 2);

    let on_bob = ledger
        .query(&AuditFilter {
            target_id: Some("emp:bob".to_string()),
            ..Default::default()
        })
        .await;
    assert_eq!(on_bob.len(), 2);

    let alice_on_bob = ledger
        .query(&AuditFilter {
            actor_id: Some("emp:alice".to_string()),
            target_id: Some("emp:bob".to_string()),
            ..Default::default()
        })
        .await;
    assert_eq!(alice_on_bob.len(), 1);
}
