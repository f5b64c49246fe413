//! # Tamshai Directory
//!
//! Principal graph store and organizational hierarchy traversal for the
//! Tamshai authorization engine.
//!
//! ## Features
//!
//! - **Principal graph** with single-parent manager edges and lifecycle status
//! - **Depth-capped traversal** that terminates even on a corrupted cycle
//! - **Tiered record model** (public / restricted / confidential fields)
//! - **Async store seam** so a remote backing store can be swapped in
//!
//! ## Example
//!
//! ```rust
//! use tamshai_directory::{HierarchyWalker, InMemoryPrincipalStore, Principal};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = InMemoryPrincipalStore::new();
//!     store.insert(Principal::new("alice", "alice@tamshai.ai", "Alice", "Anders"));
//!     store.insert(
//!         Principal::new("bob", "bob@tamshai.ai", "Bob", "Baker").with_manager("alice"),
//!     );
//!
//!     let walker = HierarchyWalker::new(&store);
//!     assert!(walker.is_ancestor_of("alice", "bob").await?);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod hierarchy;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use error::{DirectoryError, Result};
pub use hierarchy::{DescendantEntry, HierarchyWalker, MAX_TRAVERSAL_DEPTH};
pub use store::{InMemoryPrincipalStore, PrincipalStore};
pub use types::{
    PartialRecord, Principal, PrincipalId, PrincipalStatus, Record, RecordField, Tier,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
