//! Pre-release tags attached to a version after a `-`
//!
//! Tags are free-form dot-separated tokens ("alpha.1", "beta-2", "rc.3"). Only the
//! `alpha` and `beta` substrings carry meaning for release classification.

use crate::error::{PublishError, Result};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Pre-release stage recognised by release classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreReleaseStage {
    Alpha,
    Beta,
}

/// Pre-release tag sequence
///
/// # Examples
/// - "alpha" -> PreRelease { components: ["alpha"] }
/// - "beta.1" -> PreRelease { components: ["beta", "1"] }
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PreRelease {
    components: Vec<String>,
}

impl PreRelease {
    /// Parse a pre-release tag from the text following the `-`
    ///
    /// # Returns
    /// * `Ok(PreRelease)` - Parsed tag
    /// * `Err` - If the tag or any of its components is empty or holds invalid characters
    pub fn parse(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(PublishError::version("Empty pre-release identifier"));
        }

        let mut components = Vec::new();
        for part in s.split('.') {
            if part.is_empty() {
                return Err(PublishError::version(format!(
                    "Empty pre-release component in '{}'",
                    s
                )));
            }
            if !part.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
                return Err(PublishError::version(format!(
                    "Invalid pre-release identifier: '{}'",
                    part
                )));
            }
            components.push(part.to_string());
        }

        Ok(PreRelease { components })
    }

    /// The dot-separated components in order
    pub fn components(&self) -> &[String] {
        &self.components
    }

    /// First component containing "alpha" or "beta", checked component by component
    pub fn stage(&self) -> Option<PreReleaseStage> {
        for component in &self.components {
            if component.contains("alpha") {
                return Some(PreReleaseStage::Alpha);
            }
            if component.contains("beta") {
                return Some(PreReleaseStage::Beta);
            }
        }
        None
    }

    /// Upper-cased leading component, as used in documentation paths ("beta.1" -> "BETA")
    pub fn label(&self) -> String {
        self.components
            .first()
            .map(|c| c.to_uppercase())
            .unwrap_or_default()
    }
}

impl FromStr for PreRelease {
    type Err = PublishError;

    fn from_str(s: &str) -> Result<Self> {
        PreRelease::parse(s)
    }
}

impl fmt::Display for PreRelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.components.join("."))
    }
}

fn compare_component(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        // numeric identifiers sort before alphanumeric ones
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

impl Ord for PreRelease {
    fn cmp(&self, other: &Self) -> Ordering {
        for (a, b) in self.components.iter().zip(other.components.iter()) {
            match compare_component(a, b) {
                Ordering::Equal => continue,
                ordering => return ordering,
            }
        }
        self.components.len().cmp(&other.components.len())
    }
}

impl PartialOrd for PreRelease {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prerelease_parse_with_iteration() {
        let pr = PreRelease::parse("beta.1").unwrap();
        assert_eq!(pr.components(), &["beta".to_string(), "1".to_string()]);
    }

    #[test]
    fn test_prerelease_parse_invalid() {
        assert!(PreRelease::parse("").is_err());
        assert!(PreRelease::parse("beta..1").is_err());
        assert!(PreRelease::parse("invalid!name").is_err());
    }

    #[test]
    fn test_prerelease_stage_alpha_before_beta() {
        assert_eq!(
            PreRelease::parse("alpha.1").unwrap().stage(),
            Some(PreReleaseStage::Alpha)
        );
        assert_eq!(
            PreRelease::parse("prebeta").unwrap().stage(),
            Some(PreReleaseStage::Beta)
        );
        // a component naming both resolves to alpha
        assert_eq!(
            PreRelease::parse("alphabeta").unwrap().stage(),
            Some(PreReleaseStage::Alpha)
        );
        assert_eq!(PreRelease::parse("rc.1").unwrap().stage(), None);
    }

    #[test]
    fn test_prerelease_first_component_wins() {
        let pr = PreRelease::parse("beta.alpha").unwrap();
        assert_eq!(pr.stage(), Some(PreReleaseStage::Beta));
    }

    #[test]
    fn test_prerelease_label() {
        assert_eq!(PreRelease::parse("beta.1").unwrap().label(), "BETA");
    }

    #[test]
    fn test_prerelease_display() {
        assert_eq!(PreRelease::parse("rc.2").unwrap().to_string(), "rc.2");
    }

    #[test]
    fn test_prerelease_ordering() {
        let alpha1 = PreRelease::parse("alpha.1").unwrap();
        let alpha2 = PreRelease::parse("alpha.2").unwrap();
        let alpha10 = PreRelease::parse("alpha.10").unwrap();
        let beta = PreRelease::parse("beta").unwrap();
        assert!(alpha1 < alpha2);
        assert!(alpha2 < alpha10);
        assert!(alpha10 < beta);
        assert!(PreRelease::parse("alpha").unwrap() < alpha1);
    }
}
