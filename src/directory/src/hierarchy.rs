//! Organizational hierarchy traversal
//!
//! Two directions, both depth-capped so a manager edge corrupted into a cycle
//! can never hang a request:
//!
//! - upward (`is_ancestor_of`, `management_chain`): O(depth) walk from a
//!   single subject, used on the access-decision hot path
//! - downward (`all_descendants_of`): breadth-first subtree materialization,
//!   used only by bulk "list my reports" queries

use crate::error::Result;
use crate::store::PrincipalStore;
use crate::types::Principal;
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};
use tracing::{debug, warn};

/// Hard cap on traversal depth
///
/// Defensive, not a performance knob: guarantees termination if the source
/// data has been corrupted into a cycle. Walks that exhaust the cap fail
/// closed (no match / truncated subtree).
pub const MAX_TRAVERSAL_DEPTH: usize = 20;

/// A descendant principal together with its distance from the queried manager
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescendantEntry {
    /// The descendant principal
    pub principal: Principal,

    /// Number of manager hops from the queried manager (direct report = 1)
    pub depth: usize,
}

/// Hierarchy traversal over a principal store
pub struct HierarchyWalker<'a> {
    store: &'a dyn PrincipalStore,
}

impl<'a> HierarchyWalker<'a> {
    /// Create a walker over a store
    pub fn new(store: &'a dyn PrincipalStore) -> Self {
        Self { store }
    }

    /// Check whether `candidate_manager` appears in `subject`'s upward
    /// management chain
    ///
    /// Returns `false` immediately when the two ids are equal (nobody manages
    /// themself) or when either id is unknown. Returns `false` once the depth
    /// cap is exhausted without a match.
    pub async fn is_ancestor_of(
        &self,
        candidate_manager: &str,
        subject: &str,
    ) -> Result<bool> {
        if candidate_manager == subject {
            return Ok(false);
        }

        if self.store.get_principal(candidate_manager).await?.is_none()
            || self.store.get_principal(subject).await?.is_none()
        {
            return Ok(false);
        }

        let mut current = subject.to_string();
        for hop in 0..MAX_TRAVERSAL_DEPTH {
            match self.store.get_manager(&current).await? {
                Some(manager) => {
                    if manager.id == candidate_manager {
                        debug!(
                            candidate = candidate_manager,
                            subject, hops = hop + 1, "ancestor match"
                        );
                        return Ok(true);
                    }
                    current = manager.id;
                }
                None => return Ok(false),
            }
        }

        warn!(
            candidate = candidate_manager,
            subject, "upward walk exhausted depth cap, failing closed"
        );
        Ok(false)
    }

    /// Compute the ordered ancestor chain from a principal up to the root
    ///
    /// Nearest manager first. Capped at [`MAX_TRAVERSAL_DEPTH`] and guarded by
    /// a visited set, so a corrupted cycle yields a truncated chain rather
    /// than a hang.
    pub async fn management_chain(&self, subject: &str) -> Result<Vec<Principal>> {
        let mut chain = Vec::new();
        let mut visited: HashSet<String> = HashSet::new();
        visited.insert(subject.to_string());

        let mut current = subject.to_string();
        for _ in 0..MAX_TRAVERSAL_DEPTH {
            match self.store.get_manager(&current).await? {
                Some(manager) => {
                    if !visited.insert(manager.id.clone()) {
                        warn!(subject, at = %manager.id, "cycle detected in management chain");
                        break;
                    }
                    current = manager.id.clone();
                    chain.push(manager);
                }
                None => break,
            }
        }

        Ok(chain)
    }

    /// Materialize the full active subtree below a manager, breadth-first
    ///
    /// Excludes terminated principals (the store already filters them from
    /// direct-report listings), caps at [`MAX_TRAVERSAL_DEPTH`] levels, and
    /// orders results by depth then surname then given name.
    pub async fn all_descendants_of(&self, manager_id: &str) -> Result<Vec<DescendantEntry>> {
        let mut results: Vec<DescendantEntry> = Vec::new();
        let mut visited: HashSet<String> = HashSet::new();
        visited.insert(manager_id.to_string());

        let mut queue: VecDeque<(String, usize)> = VecDeque::new();
        queue.push_back((manager_id.to_string(), 0));

        while let Some((current, depth)) = queue.pop_front() {
            if depth >= MAX_TRAVERSAL_DEPTH {
                warn!(manager = manager_id, "downward walk truncated at depth cap");
                continue;
            }

            for report in self.store.list_direct_reports(&current).await? {
                if !visited.insert(report.id.clone()) {
                    continue;
                }
                queue.push_back((report.id.clone(), depth + 1));
                results.push(DescendantEntry {
                    principal: report,
                    depth: depth + 1,
                });
            }
        }

        results.sort_by(|a, b| {
            (
                a.depth,
                a.principal.surname.as_str(),
                a.principal.given_name.as_str(),
            )
                .cmp(&(
                    b.depth,
                    b.principal.surname.as_str(),
                    b.principal.given_name.as_str(),
                ))
        });

        Ok(results)
    }
}
