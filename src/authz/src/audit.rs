//! Append-only audit ledger with a tamper-evident hash chain
//!
//! Every evaluation appends exactly one entry. Entries link to their
//! predecessor through a blake3 hash chain anchored at a genesis hash, so
//! any in-place edit of history is detectable. The only removal path is
//! retention expiry from the front of the chain; there is no update or
//! early-delete surface at all.

use crate::engine::decision::{AccessDecision, Outcome};
use crate::error::{AuthzError, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, warn};
use uuid::Uuid;

/// Domain separator for the chain anchor
const GENESIS_SEED: &[u8] = b"tamshai-audit-ledger-genesis";

/// Extra evaluation context carried into an audit entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditContext {
    /// Query text, when the decision covered a query rather than a single get
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_text: Option<String>,

    /// Number of results released under the decision
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_count: Option<usize>,
}

/// One persisted audit record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Unique entry ID
    pub id: Uuid,

    /// Principal that asked
    pub actor_id: String,

    /// Principal whose record was asked for
    pub target_id: String,

    /// Resource type evaluated against
    pub resource_type: String,

    /// Decision outcome
    pub outcome: Outcome,

    /// Granted tier, if allowed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub granted_tier: Option<tamshai_directory::Tier>,

    /// Stable justification code
    pub justification: String,

    /// Request-correlation id
    pub correlation_id: Uuid,

    /// Evaluation context (query text, result count)
    #[serde(default)]
    pub context: AuditContext,

    /// When the entry was appended
    pub recorded_at: DateTime<Utc>,

    /// When the retention window ends; an external sweeper may purge the
    /// entry after this instant, never before
    pub expires_at: DateTime<Utc>,

    /// Hash of the predecessor entry (genesis anchor for the first)
    pub prev_hash: String,

    /// blake3 over this entry with `entry_hash` blanked
    pub entry_hash: String,
}

impl AuditEntry {
    fn compute_hash(&self) -> Result<String> {
        let mut unhashed = self.clone();
        unhashed.entry_hash = String::new();
        let bytes = serde_json::to_vec(&unhashed)
            .map_err(|e| AuthzError::AuditWrite(format!("serialize audit entry: {}", e)))?;
        Ok(blake3::hash(&bytes).to_hex().to_string())
    }
}

/// Ledger configuration
#[derive(Debug, Clone)]
pub struct LedgerConfig {
    /// Retention window applied to every entry at append time
    pub retention: Duration,

    /// Optional hard capacity; a full ledger refuses appends rather than
    /// silently dropping history
    pub max_entries: Option<usize>,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            retention: Duration::days(90),
            max_entries: None,
        }
    }
}

/// Read-only query filter for compliance consumers
#[derive(Debug, Clone, Default)]
pub struct AuditFilter {
    /// Match this actor id
    pub actor_id: Option<String>,

    /// Match this target id
    pub target_id: Option<String>,

    /// Match this outcome
    pub outcome: Option<Outcome>,

    /// Only entries recorded at or after this instant
    pub from: Option<DateTime<Utc>>,

    /// Only entries recorded before this instant
    pub to: Option<DateTime<Utc>>,
}

impl AuditFilter {
    fn matches(&self, entry: &AuditEntry) -> bool {
        if let Some(actor) = &self.actor_id {
            if &entry.actor_id != actor {
                return false;
            }
        }
        if let Some(target) = &self.target_id {
            if &entry.target_id != target {
                return false;
            }
        }
        if let Some(outcome) = self.outcome {
            if entry.outcome != outcome {
                return false;
            }
        }
        if let Some(from) = self.from {
            if entry.recorded_at < from {
                return false;
            }
        }
        if let Some(to) = self.to {
            if entry.recorded_at >= to {
                return false;
            }
        }
        true
    }
}

struct LedgerState {
    entries: Vec<AuditEntry>,
    /// Hash the next verification pass anchors on: genesis initially, then
    /// the hash of the last swept entry
    anchor_hash: String,
}

/// Append-only audit ledger
pub struct AuditLedger {
    state: RwLock<LedgerState>,
    config: LedgerConfig,
}

impl AuditLedger {
    /// Create a ledger with default configuration
    pub fn new() -> Self {
        Self::with_config(LedgerConfig::default())
    }

    /// Create a ledger with explicit configuration
    pub fn with_config(config: LedgerConfig) -> Self {
        Self {
            state: RwLock::new(LedgerState {
                entries: Vec::new(),
                anchor_hash: blake3::hash(GENESIS_SEED).to_hex().to_string(),
            }),
            config,
        }
    }

    /// Append a decision to the ledger
    ///
    /// The one durability-sensitive call in the system: a failure here must
    /// abort the surrounding request, so it is surfaced as
    /// [`AuthzError::AuditWrite`] and never swallowed.
    pub async fn append(
        &self,
        decision: &AccessDecision,
        context: AuditContext,
    ) -> Result<AuditEntry> {
        let mut state = self.state.write().await;

        if let Some(max) = self.config.max_entries {
            if state.entries.len() >= max {
                warn!(capacity = max, "audit ledger full, refusing append");
                return Err(AuthzError::AuditWrite(format!(
                    "ledger at capacity ({} entries)",
                    max
                )));
            }
        }

        let prev_hash = match state.entries.last() {
            Some(last) => last.entry_hash.clone(),
            None => state.anchor_hash.clone(),
        };

        let recorded_at = Utc::now();
        let mut entry = AuditEntry {
            id: Uuid::new_v4(),
            actor_id: decision.requester_id.clone(),
            target_id: decision.target_id.clone(),
            resource_type: decision.resource_type.clone(),
            outcome: decision.outcome,
            granted_tier: decision.granted_tier,
            justification: decision.justification.as_str().to_string(),
            correlation_id: decision.correlation_id,
            context,
            recorded_at,
            expires_at: recorded_at + self.config.retention,
            prev_hash,
            entry_hash: String::new(),
        };
        entry.entry_hash = entry.compute_hash()?;

        state.entries.push(entry.clone());
        debug!(entry = %entry.id, actor = %entry.actor_id, "audit entry appended");

        Ok(entry)
    }

    /// Query entries matching a filter, oldest first
    pub async fn query(&self, filter: &AuditFilter) -> Vec<AuditEntry> {
        let state = self.state.read().await;
        state
            .entries
            .iter()
            .filter(|entry| filter.matches(entry))
            .cloned()
            .collect()
    }

    /// Recompute the hash chain and check every link
    ///
    /// Returns `false` if any entry has been edited in place or the chain
    /// has been re-ordered.
    pub async fn verify_integrity(&self) -> bool {
        let state = self.state.read().await;

        let mut expected_prev = state.anchor_hash.clone();
        for entry in &state.entries {
            if entry.prev_hash != expected_prev {
                warn!(entry = %entry.id, "audit chain link mismatch");
                return false;
            }
            match entry.compute_hash() {
                Ok(hash) if hash == entry.entry_hash => {}
                _ => {
                    warn!(entry = %entry.id, "audit entry hash mismatch");
                    return false;
                }
            }
            expected_prev = entry.entry_hash.clone();
        }

        true
    }

    /// Purge entries whose retention window has ended
    ///
    /// Models the external sweeper: only expired entries leave the ledger,
    /// always from the front of the chain, and the chain anchor advances so
    /// integrity checks keep passing for the survivors.
    pub async fn sweep_expired(&self, now: DateTime<Utc>) -> usize {
        let mut state = self.state.write().await;

        let mut removed = 0;
        loop {
            let expired = matches!(state.entries.first(), Some(first) if first.expires_at <= now);
            if !expired {
                break;
            }
            let entry = state.entries.remove(0);
            state.anchor_hash = entry.entry_hash;
            removed += 1;
        }

        if removed > 0 {
            debug!(removed, "expired audit entries swept");
        }
        removed
    }

    /// Number of entries currently held
    pub async fn len(&self) -> usize {
        self.state.read().await.entries.len()
    }

    /// True if the ledger holds no entries
    pub async fn is_empty(&self) -> bool {
        self.state.read().await.entries.is_empty()
    }

    /// Test and tooling hook: replace a stored entry wholesale
    ///
    /// Deliberately `#[cfg(test)]`-only so the public surface stays
    /// append-only; exists to prove `verify_integrity` catches tampering.
    #[cfg(test)]
    pub(crate) async fn tamper_with_entry(&self, index: usize, entry: AuditEntry) {
        let mut state = self.state.write().await;
        state.entries[index] = entry;
    }
}

impl Default for AuditLedger {
    fn default() -> Self {
        Self::new()
    }
}
