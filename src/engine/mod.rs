//! Release metadata derivation
//!
//! Fills the derived fields of a [`Release`](crate::domain::Release) in a fixed
//! order: release type, end of support, end of guidance, end of availability,
//! release notes URL. Every step returns a value the user already supplied
//! unchanged and stores what it computes, so running a step twice is free.

pub mod classifier;
pub mod lifecycle;
pub mod release_notes;

pub use classifier::ReleaseClassifier;
pub use lifecycle::LifecycleDateCalculator;
pub use release_notes::ReleaseNotesUrlBuilder;

use crate::catalog::ReleaseCatalog;
use crate::domain::Release;
use crate::error::Result;

/// Run every derivation step on `release`
pub fn derive_release<C: ReleaseCatalog>(
    release: &mut Release,
    calculator: &LifecycleDateCalculator<C>,
) -> Result<()> {
    ReleaseClassifier::classify(release)?;
    calculator.end_of_support(release)?;
    calculator.end_of_guidance(release)?;
    calculator.end_of_availability(release)?;
    ReleaseNotesUrlBuilder::build(release)?;
    Ok(())
}
