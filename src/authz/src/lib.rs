//! # Tamshai Authorization Engine
//!
//! Hierarchical, multi-tier authorization and field redaction for employee
//! records. For any (requester, target, resource type) triple the engine
//! decides whether access is allowed and at which visibility tier, combining
//! three independent grants:
//!
//! - **self-access** (a principal always sees their own full record)
//! - **role-based access** (elevated roles from the [`registry`])
//! - **transitive manager access** (an upward walk over the org hierarchy)
//!
//! Every decision lands in an append-only, hash-chained [`audit`] ledger;
//! the [`projector`] then filters the record down to the granted tier.
//! The engine fails closed on unknown ids, malformed sessions, and store
//! failures, and refuses to release a decision whose audit append failed.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use tamshai_authz::{
//!     audit::AuditLedger, engine::PolicyEvaluator, projector,
//!     registry::RoleRegistry, session::SessionContext,
//! };
//! use tamshai_directory::{InMemoryPrincipalStore, Principal, Record, Tier};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(InMemoryPrincipalStore::new());
//!     store.insert(Principal::new("emp:alice", "alice@tamshai.ai", "Alice", "Anders"));
//!     store.insert(Principal::new("emp:bob", "bob@tamshai.ai", "Bob", "Baker"));
//!
//!     let evaluator = PolicyEvaluator::new(
//!         store,
//!         RoleRegistry::default(),
//!         Arc::new(AuditLedger::new()),
//!     );
//!
//!     let session = SessionContext::new("emp:alice", ["hr-read"]);
//!     let decision = evaluator.evaluate(&session, "emp:bob", "employee-record").await?;
//!     assert!(decision.is_allowed());
//!
//!     let record = Record::new("emp:bob", "employee-record")
//!         .with_field("name", "Bob Baker".into(), Tier::Public);
//!     let visible = projector::project_for_decision(&record, &decision);
//!     assert!(visible.is_some());
//!     Ok(())
//! }
//! ```

pub mod audit;
pub mod engine;
pub mod error;
pub mod projector;
pub mod registry;
pub mod session;

// Re-export commonly used types
pub use audit::{AuditContext, AuditEntry, AuditFilter, AuditLedger, LedgerConfig};
pub use engine::{AccessDecision, Justification, Outcome, PolicyEvaluator};
pub use error::{AuthzError, Result};
pub use registry::RoleRegistry;
pub use session::SessionContext;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
