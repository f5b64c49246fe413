//! Per-request session context
//!
//! An immutable value passed into every evaluation, built from claims the
//! identity collaborator has already verified. Context-passing over ambient
//! per-connection state: there is nothing to leak across requests.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// Authenticated principal identity and role claims for one request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    /// Authenticated principal identifier
    pub principal_id: String,

    /// Role claims issued by the identity provider
    #[serde(default)]
    pub roles: BTreeSet<String>,

    /// Request-correlation id, carried into every audit entry
    pub correlation_id: Uuid,
}

impl SessionContext {
    /// Create a session context with a fresh correlation id
    pub fn new<I, S>(principal_id: impl Into<String>, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            principal_id: principal_id.into(),
            roles: roles.into_iter().map(Into::into).collect(),
            correlation_id: Uuid::new_v4(),
        }
    }

    /// Override the correlation id (e.g., propagated from the transport)
    pub fn with_correlation_id(mut self, correlation_id: Uuid) -> Self {
        self.correlation_id = correlation_id;
        self
    }

    /// True if the context carries a usable principal identity
    pub fn is_valid(&self) -> bool {
        !self.principal_id.trim().is_empty()
    }

    /// True if the context carries the given role claim
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }
}
