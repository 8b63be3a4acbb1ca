use crate::domain::epoch::Epoch;
use crate::domain::prerelease::PreRelease;
use crate::error::{PublishError, Result};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Dotted release version with an optional pre-release tag
///
/// The number of release components depends on the epoch: four for the legacy
/// epoch (4.3.33.0), three otherwise (6.1.0, 6.1.0-beta.1).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version {
    components: Vec<u32>,
    prerelease: Option<PreRelease>,
}

impl Version {
    /// Parse a version string (e.g., "6.1.0", "4.3.33.0", "6.0.0-beta.1")
    pub fn parse(value: &str) -> Result<Self> {
        let value = value.trim();
        if value.is_empty() {
            return Err(PublishError::version("Empty version string"));
        }

        let (release, prerelease) = match value.split_once('-') {
            Some((release, tag)) => (release, Some(PreRelease::parse(tag)?)),
            None => (value, None),
        };

        let components = release
            .split('.')
            .map(|part| {
                part.parse::<u32>().map_err(|_| {
                    PublishError::version(format!(
                        "Invalid version component '{}' in '{}'",
                        part, value
                    ))
                })
            })
            .collect::<Result<Vec<u32>>>()?;

        Ok(Version {
            components,
            prerelease,
        })
    }

    /// Numeric release components in order
    pub fn components(&self) -> &[u32] {
        &self.components
    }

    pub fn arity(&self) -> usize {
        self.components.len()
    }

    pub fn prerelease(&self) -> Option<&PreRelease> {
        self.prerelease.as_ref()
    }

    /// Read the component at a zero-based position
    ///
    /// A missing position means the caller assumed the wrong epoch for this version;
    /// the returned error is flagged as misuse (see [`PublishError::is_misuse`]).
    pub fn component(&self, position: usize) -> Result<u32> {
        self.components
            .get(position)
            .copied()
            .ok_or_else(|| PublishError::VersionComponent {
                position,
                len: self.components.len(),
                version: self.to_string(),
            })
    }

    /// Parsing guarantees at least one component
    pub fn major(&self) -> u32 {
        self.components[0]
    }

    pub fn minor(&self) -> Result<u32> {
        self.component(1)
    }

    pub fn patch(&self) -> Result<u32> {
        self.component(2)
    }

    /// Fourth component, only present in legacy-epoch versions
    pub fn fourth(&self) -> Result<u32> {
        self.component(3)
    }

    /// Epoch of the major version, `None` for unsupported majors
    pub fn epoch(&self) -> Option<Epoch> {
        Epoch::from_major(self.major())
    }

    /// Release components concatenated without separators ("6.1.0" -> "610")
    pub fn concatenated(&self) -> String {
        self.components.iter().map(|c| c.to_string()).collect()
    }

    /// Release part without the pre-release tag ("6.1.0-beta.1" -> "6.1.0")
    pub fn release_string(&self) -> String {
        self.components
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl FromStr for Version {
    type Err = PublishError;

    fn from_str(s: &str) -> Result<Self> {
        Version::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.release_string())?;
        if let Some(prerelease) = &self.prerelease {
            write!(f, "-{}", prerelease)?;
        }
        Ok(())
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.components
            .cmp(&other.components)
            .then_with(|| match (&self.prerelease, &other.prerelease) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(a), Some(b)) => a.cmp(b),
            })
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
