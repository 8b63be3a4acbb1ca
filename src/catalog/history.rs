use crate::catalog::ReleaseCatalog;
use crate::domain::{ReleaseType, SiblingRelease, Version};
use crate::error::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Availability value of releases visible to every catalog user
pub const DEFAULT_PUBLIC_AVAILABILITY: &str = "All Users";

/// One entry of a catalog release export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishedRelease {
    pub version: String,
    pub release_type: String,
    pub release_date: NaiveDate,
    #[serde(default)]
    pub availability: String,
}

/// Release history backed by a JSON export of the catalog's published releases
///
/// Versions are parsed once at load time. Records whose version does not parse are
/// skipped and reported through [`ReleaseHistory::skipped`].
#[derive(Debug, Clone, Default)]
pub struct ReleaseHistory {
    releases: Vec<(Version, PublishedRelease)>,
    skipped: Vec<String>,
    public_availability: String,
}

impl ReleaseHistory {
    /// Build a history from already decoded records
    pub fn new(records: Vec<PublishedRelease>, public_availability: impl Into<String>) -> Self {
        let mut releases = Vec::new();
        let mut skipped = Vec::new();

        for record in records {
            match Version::parse(&record.version) {
                Ok(version) => releases.push((version, record)),
                Err(e) => {
                    warn!("skipping published release '{}': {}", record.version, e);
                    skipped.push(record.version);
                }
            }
        }

        ReleaseHistory {
            releases,
            skipped,
            public_availability: public_availability.into(),
        }
    }

    /// Load a history from a JSON array of [`PublishedRelease`] records
    pub fn load(path: &Path, public_availability: &str) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let records: Vec<PublishedRelease> = serde_json::from_str(&content)?;
        debug!("loaded {} published releases from {}", records.len(), path.display());
        Ok(Self::new(records, public_availability))
    }

    /// Versions of records that were ignored because they could not be parsed
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    pub fn len(&self) -> usize {
        self.releases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.releases.is_empty()
    }
}

impl ReleaseCatalog for ReleaseHistory {
    fn latest_release(
        &self,
        major: u32,
        release_type: ReleaseType,
    ) -> Result<Option<SiblingRelease>> {
        let latest = self
            .releases
            .iter()
            .filter(|(_, record)| record.availability == self.public_availability)
            .filter(|(version, _)| version.major() == major)
            .filter(|(_, record)| record.release_type.trim() == release_type.name())
            .max_by(|(a, _), (b, _)| a.cmp(b));

        match latest {
            Some((version, record)) => {
                debug!(
                    "previous {} for major {}: {} ({})",
                    release_type, major, version, record.release_date
                );
                Ok(Some(SiblingRelease {
                    version: version.clone(),
                    release_type,
                    release_date: record.release_date,
                }))
            }
            None => {
                debug!("no previous {} published for major {}", release_type, major);
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn record(version: &str, release_type: &str, date: &str, availability: &str) -> PublishedRelease {
        PublishedRelease {
            version: version.to_string(),
            release_type: release_type.to_string(),
            release_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            availability: availability.to_string(),
        }
    }

    fn history() -> ReleaseHistory {
        ReleaseHistory::new(
            vec![
                record("6.0.0", "Major Release", "2019-09-03", "All Users"),
                record("6.1.0", "Minor Release", "2019-10-20", "All Users"),
                record("6.10.0", "Minor Release", "2020-08-01", "All Users"),
                record("6.11.0", "Minor Release", "2020-09-01", "Admins Only"),
                record("6.9.0", "Minor Release", "2020-06-01", "All Users"),
                record("5.0.0", "Major Release", "2017-09-07", "All Users"),
                record("not-a-version", "Minor Release", "2020-01-01", "All Users"),
            ],
            DEFAULT_PUBLIC_AVAILABILITY,
        )
    }

    #[test]
    fn test_latest_uses_version_order_not_listing_order() {
        let sibling = history().latest_release(6, ReleaseType::Minor).unwrap().unwrap();
        assert_eq!(sibling.version.to_string(), "6.10.0");
        assert_eq!(sibling.release_type, ReleaseType::Minor);
    }

    #[test]
    fn test_latest_ignores_restricted_availability() {
        let sibling = history().latest_release(6, ReleaseType::Minor).unwrap().unwrap();
        assert_ne!(sibling.version.to_string(), "6.11.0");
    }

    #[test]
    fn test_latest_filters_by_major() {
        let sibling = history().latest_release(5, ReleaseType::Major).unwrap().unwrap();
        assert_eq!(sibling.version.to_string(), "5.0.0");
        assert!(history().latest_release(4, ReleaseType::Major).unwrap().is_none());
    }

    #[test]
    fn test_unparsable_versions_are_skipped() {
        let history = history();
        assert_eq!(history.skipped(), &["not-a-version".to_string()]);
        assert_eq!(history.len(), 6);
    }

    #[test]
    fn test_load_from_json_file() {
        let mut file = NamedTempFile::new().unwrap();
        let json = r#"[
            {"version": "6.0.0", "release_type": "Major Release", "release_date": "2019-09-03", "availability": "All Users"}
        ]"#;
        file.write_all(json.as_bytes()).unwrap();
        file.flush().unwrap();

        let history = ReleaseHistory::load(file.path(), DEFAULT_PUBLIC_AVAILABILITY).unwrap();
        let major = history.latest_release(6, ReleaseType::Major).unwrap().unwrap();
        assert_eq!(major.release_date, NaiveDate::from_ymd_opt(2019, 9, 3).unwrap());
    }

    #[test]
    fn test_load_rejects_malformed_json() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"{not json").unwrap();
        file.flush().unwrap();
        assert!(ReleaseHistory::load(file.path(), DEFAULT_PUBLIC_AVAILABILITY).is_err());
    }
}
