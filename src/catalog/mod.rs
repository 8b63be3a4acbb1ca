//! Release catalog abstraction layer
//!
//! Lifecycle date formulas need the most recent previously published release of a
//! given type. This module hides where that history comes from behind the
//! [ReleaseCatalog] trait.
//!
//! # Overview
//!
//! - [history::ReleaseHistory]: history loaded from a JSON export of published releases
//! - [mock::MockCatalog]: in-memory catalog for tests, counting lookups
//!
//! # Usage
//!
//! ```rust
//! # use catalog_publish::catalog::ReleaseCatalog;
//! # use catalog_publish::domain::ReleaseType;
//! # fn example<C: ReleaseCatalog>(catalog: &C) -> catalog_publish::Result<()> {
//! if let Some(previous) = catalog.latest_release(6, ReleaseType::Major)? {
//!     println!("previous major: {} on {}", previous.version, previous.release_date);
//! }
//! # Ok(())
//! # }
//! ```

pub mod history;
pub mod mock;

pub use history::{PublishedRelease, ReleaseHistory};
pub use mock::MockCatalog;

use crate::domain::{ReleaseType, SiblingRelease};
use crate::error::Result;

/// Sibling-release query against the distribution catalog
///
/// ## Error Handling
///
/// "No such release" is a legitimate answer and is reported as `Ok(None)`; errors
/// are reserved for failing to read the catalog at all.
pub trait ReleaseCatalog: Send + Sync {
    /// Most recent publicly available release with the given major version and type
    ///
    /// # Arguments
    /// * `major` - Major version the sibling must share (e.g., 6)
    /// * `release_type` - Release type the sibling must have
    ///
    /// # Returns
    /// * `Ok(Some(SiblingRelease))` - Highest matching version
    /// * `Ok(None)` - No matching release has been published
    /// * `Err` - If the catalog cannot be queried
    fn latest_release(
        &self,
        major: u32,
        release_type: ReleaseType,
    ) -> Result<Option<SiblingRelease>>;
}

impl<C: ReleaseCatalog + ?Sized> ReleaseCatalog for &C {
    fn latest_release(
        &self,
        major: u32,
        release_type: ReleaseType,
    ) -> Result<Option<SiblingRelease>> {
        (**self).latest_release(major, release_type)
    }
}
