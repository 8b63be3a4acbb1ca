use crate::domain::date::OffsetExpression;
use crate::domain::field::Field;
use crate::domain::release_type::ReleaseType;
use crate::domain::version::Version;
use chrono::NaiveDate;
use serde::Serialize;

/// Descriptive release fields passed through to the catalog unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReleaseDetails {
    pub eula_slug: String,
    pub description: String,
    pub availability: String,
    pub controlled: bool,
    pub eccn: String,
    pub license_exception: String,
}

/// A release being prepared for publication
///
/// Built once from declarative metadata, then filled in by the classifier, the
/// lifecycle date calculator and the release notes URL builder. Each derived field
/// is computed at most once; afterwards it holds `Field::Concrete`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    pub version: Version,
    pub release_type: Field<ReleaseType>,
    pub release_date: Option<NaiveDate>,
    pub end_of_support: Field<NaiveDate>,
    pub end_of_guidance: Field<NaiveDate>,
    pub end_of_availability: Field<NaiveDate>,
    pub end_of_availability_offset: Option<OffsetExpression>,
    pub release_notes_url: Field<String>,
    pub details: ReleaseDetails,
}

impl Release {
    /// A release with every derivable field marked for computation
    pub fn new(version: Version) -> Self {
        Release {
            version,
            release_type: Field::Compute,
            release_date: None,
            end_of_support: Field::Compute,
            end_of_guidance: Field::Compute,
            end_of_availability: Field::Compute,
            end_of_availability_offset: None,
            release_notes_url: Field::Compute,
            details: ReleaseDetails::default(),
        }
    }

    pub fn with_release_type(mut self, release_type: ReleaseType) -> Self {
        self.release_type = Field::Concrete(release_type);
        self
    }

    pub fn with_release_date(mut self, date: NaiveDate) -> Self {
        self.release_date = Some(date);
        self
    }
}

/// Previously published release of the same product, as reported by the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiblingRelease {
    pub version: Version,
    pub release_type: ReleaseType,
    pub release_date: NaiveDate,
}
