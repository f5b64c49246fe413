//! Role registry: which roles carry full access to which resource types
//!
//! Roles are a flat set of capability tags, not hierarchical among
//! themselves. The registry only answers "which roles see everything on this
//! resource type"; the manager and executive rules are fixed in the
//! evaluator, not registry-driven.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Role granting full read access to HR data
pub const ROLE_HR_READ: &str = "hr-read";
/// Role granting full read/write access to HR data
pub const ROLE_HR_WRITE: &str = "hr-write";
/// Role enabling transitive access to reports' records
pub const ROLE_MANAGER: &str = "manager";
/// Role granting organization-wide read access
pub const ROLE_EXECUTIVE: &str = "executive";

/// Resource type for employee records
pub const RESOURCE_EMPLOYEE_RECORD: &str = "employee-record";

/// Maps resource types to the role set granted full (confidential) access
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleRegistry {
    full_access: BTreeMap<String, BTreeSet<String>>,
}

impl RoleRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            full_access: BTreeMap::new(),
        }
    }

    /// Grant a role full access to a resource type
    pub fn grant_full_access(&mut self, resource_type: impl Into<String>, role: impl Into<String>) {
        self.full_access
            .entry(resource_type.into())
            .or_default()
            .insert(role.into());
    }

    /// Full-access role set for a resource type (empty if none registered)
    pub fn full_access_roles(&self, resource_type: &str) -> BTreeSet<String> {
        self.full_access
            .get(resource_type)
            .cloned()
            .unwrap_or_default()
    }

    /// True if any of the given roles has full access to the resource type
    pub fn has_full_access<'a>(
        &self,
        resource_type: &str,
        roles: impl IntoIterator<Item = &'a String>,
    ) -> bool {
        match self.full_access.get(resource_type) {
            Some(granted) => roles.into_iter().any(|role| granted.contains(role)),
            None => false,
        }
    }
}

impl Default for RoleRegistry {
    /// Registry with the standard employee-record grants
    fn default() -> Self {
        let mut registry = Self::new();
        registry.grant_full_access(RESOURCE_EMPLOYEE_RECORD, ROLE_HR_READ);
        registry.grant_full_access(RESOURCE_EMPLOYEE_RECORD, ROLE_HR_WRITE);
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_employee_record_grants() {
        let registry = RoleRegistry::default();
        let roles = registry.full_access_roles(RESOURCE_EMPLOYEE_RECORD);

        assert!(roles.contains(ROLE_HR_READ));
        assert!(roles.contains(ROLE_HR_WRITE));
        assert!(!roles.contains(ROLE_MANAGER));
    }

    #[test]
    fn test_has_full_access() {
        let registry = RoleRegistry::default();

        let hr = vec![ROLE_HR_READ.to_string()];
        assert!(registry.has_full_access(RESOURCE_EMPLOYEE_RECORD, &hr));

        let manager = vec![ROLE_MANAGER.to_string()];
        assert!(!registry.has_full_access(RESOURCE_EMPLOYEE_RECORD, &manager));

        assert!(!registry.has_full_access("payroll-run", &hr));
    }

    #[test]
    fn test_custom_grant() {
        let mut registry = RoleRegistry::default();
        registry.grant_full_access("payroll-run", "payroll-admin");

        let roles = vec!["payroll-admin".to_string()];
        assert!(registry.has_full_access("payroll-run", &roles));
    }
}
