use crate::catalog::ReleaseCatalog;
use crate::domain::{ReleaseType, SiblingRelease, Version};
use crate::error::Result;
use chrono::NaiveDate;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Mock catalog for testing without a release history
pub struct MockCatalog {
    releases: Vec<SiblingRelease>,
    lookups: AtomicUsize,
}

impl MockCatalog {
    /// Create a new empty mock catalog
    pub fn new() -> Self {
        MockCatalog {
            releases: Vec::new(),
            lookups: AtomicUsize::new(0),
        }
    }

    /// Add a published release to the mock catalog
    pub fn add_release(&mut self, version: Version, release_type: ReleaseType, date: NaiveDate) {
        self.releases.push(SiblingRelease {
            version,
            release_type,
            release_date: date,
        });
    }

    /// Builder form of [`MockCatalog::add_release`]
    pub fn with_release(mut self, version: &str, release_type: ReleaseType, date: NaiveDate) -> Result<Self> {
        self.add_release(Version::parse(version)?, release_type, date);
        Ok(self)
    }

    /// Number of `latest_release` calls served so far
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl Default for MockCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl ReleaseCatalog for MockCatalog {
    fn latest_release(
        &self,
        major: u32,
        release_type: ReleaseType,
    ) -> Result<Option<SiblingRelease>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .releases
            .iter()
            .filter(|r| r.version.major() == major && r.release_type == release_type)
            .max_by(|a, b| a.version.cmp(&b.version))
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_mock_catalog_latest() {
        let catalog = MockCatalog::new()
            .with_release("6.0.0", ReleaseType::Major, date(2019, 9, 3))
            .unwrap()
            .with_release("6.2.0", ReleaseType::Minor, date(2019, 12, 1))
            .unwrap()
            .with_release("6.1.0", ReleaseType::Minor, date(2019, 10, 20))
            .unwrap();

        let minor = catalog.latest_release(6, ReleaseType::Minor).unwrap().unwrap();
        assert_eq!(minor.version.to_string(), "6.2.0");
        assert_eq!(catalog.lookups(), 1);
    }

    #[test]
    fn test_mock_catalog_none() {
        let catalog = MockCatalog::default();
        assert!(catalog.latest_release(5, ReleaseType::Major).unwrap().is_none());
    }

    #[test]
    fn test_mock_catalog_filters_major() {
        let catalog = MockCatalog::new()
            .with_release("5.0.0", ReleaseType::Major, date(2017, 9, 1))
            .unwrap();
        assert!(catalog.latest_release(6, ReleaseType::Major).unwrap().is_none());
    }
}
