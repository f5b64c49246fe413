//! Principal graph storage
//!
//! Read-only from the engine's perspective: mutation is owned by the external
//! HR-management collaborator. The mutation hooks on the in-memory store exist
//! for that collaborator and for test seeding.

use crate::error::Result;
use crate::types::{Principal, PrincipalId, PrincipalStatus};
use async_trait::async_trait;
use dashmap::DashMap;

/// Principal graph store trait
///
/// A remote implementation should carry a short per-read timeout and surface
/// it as `DirectoryError::StoreUnavailable`; callers treat that the same as
/// "unknown" to stay fail-closed.
#[async_trait]
pub trait PrincipalStore: Send + Sync {
    /// Get a principal by ID
    async fn get_principal(&self, id: &str) -> Result<Option<Principal>>;

    /// Get the manager of a principal, if any
    async fn get_manager(&self, id: &str) -> Result<Option<Principal>>;

    /// List active direct reports of a manager, ordered by surname then
    /// given name for determinism
    async fn list_direct_reports(&self, manager_id: &str) -> Result<Vec<Principal>>;
}

/// In-memory principal store implementation
pub struct InMemoryPrincipalStore {
    principals: DashMap<PrincipalId, Principal>,
}

impl InMemoryPrincipalStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            principals: DashMap::new(),
        }
    }

    /// Insert or replace a principal
    pub fn insert(&self, principal: Principal) {
        self.principals.insert(principal.id.clone(), principal);
    }

    /// Repoint a principal's manager edge (reorg)
    pub fn set_manager(&self, id: &str, manager: Option<PrincipalId>) {
        if let Some(mut entry) = self.principals.get_mut(id) {
            entry.manager = manager;
        }
    }

    /// Flip a principal's lifecycle status
    pub fn set_status(&self, id: &str, status: PrincipalStatus) {
        if let Some(mut entry) = self.principals.get_mut(id) {
            entry.status = status;
        }
    }

    /// Number of principals in the store
    pub fn len(&self) -> usize {
        self.principals.len()
    }

    /// True if the store holds no principals
    pub fn is_empty(&self) -> bool {
        self.principals.is_empty()
    }
}

impl Default for InMemoryPrincipalStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PrincipalStore for InMemoryPrincipalStore {
    async fn get_principal(&self, id: &str) -> Result<Option<Principal>> {
        Ok(self.principals.get(id).map(|entry| entry.clone()))
    }

    async fn get_manager(&self, id: &str) -> Result<Option<Principal>> {
        let manager_id = match self.principals.get(id) {
            Some(entry) => match &entry.manager {
                Some(manager_id) => manager_id.clone(),
                None => return Ok(None),
            },
            None => return Ok(None),
        };

        Ok(self.principals.get(&manager_id).map(|entry| entry.clone()))
    }

    async fn list_direct_reports(&self, manager_id: &str) -> Result<Vec<Principal>> {
        let mut reports: Vec<Principal> = self
            .principals
            .iter()
            .filter(|entry| {
                entry.is_active() && entry.manager.as_deref() == Some(manager_id)
            })
            .map(|entry| entry.clone())
            .collect();

        reports.sort_by(|a, b| {
            (a.surname.as_str(), a.given_name.as_str())
                .cmp(&(b.surname.as_str(), b.given_name.as_str()))
        });

        Ok(reports)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_store() -> InMemoryPrincipalStore {
        let store = InMemoryPrincipalStore::new();
        store.insert(Principal::new("emp:root", "root@tamshai.ai", "Rita", "Root"));
        store.insert(
            Principal::new("emp:alice", "alice@tamshai.ai", "Alice", "Anders")
                .with_manager("emp:root"),
        );
        store.insert(
            Principal::new("emp:bob", "bob@tamshai.ai", "Bob", "Baker")
                .with_manager("emp:root"),
        );
        store
    }

    #[tokio::test]
    async fn test_get_principal() {
        let store = seeded_store();

        let alice = store.get_principal("emp:alice").await.unwrap();
        assert_eq!(alice.unwrap().email, "alice@tamshai.ai");

        let missing = store.get_principal("emp:zzz").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_get_manager() {
        let store = seeded_store();

        let manager = store.get_manager("emp:alice").await.unwrap().unwrap();
        assert_eq!(manager.id, "emp:root");

        assert!(store.get_manager("emp:root").await.unwrap().is_none());
        assert!(store.get_manager("emp:zzz").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_direct_reports_sorted_by_surname() {
        let store = seeded_store();

        let reports = store.list_direct_reports("emp:root").await.unwrap();
        let surnames: Vec<&str> = reports.iter().map(|p| p.surname.as_str()).collect();
        assert_eq!(surnames, vec!["Anders", "Baker"]);
    }

    #[tokio::test]
    async fn test_direct_reports_exclude_terminated() {
        let store = seeded_store();
        store.set_status("emp:alice", PrincipalStatus::Terminated);

        let reports = store.list_direct_reports("emp:root").await.unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].id, "emp:bob");
    }

    #[tokio::test]
    async fn test_set_manager_reorg() {
        let store = seeded_store();
        store.set_manager("emp:bob", Some("emp:alice".to_string()));

        let manager = store.get_manager("emp:bob").await.unwrap().unwrap();
        assert_eq!(manager.id, "emp:alice");
    }
}
