//! Domain logic - pure release model independent of the catalog and the filesystem

pub mod date;
pub mod epoch;
pub mod field;
pub mod prerelease;
pub mod release;
pub mod release_type;
pub mod version;

pub use date::OffsetExpression;
pub use epoch::Epoch;
pub use field::{Field, COMPUTE_MARKER};
pub use prerelease::{PreRelease, PreReleaseStage};
pub use release::{Release, ReleaseDetails, SiblingRelease};
pub use release_type::ReleaseType;
pub use version::Version;
