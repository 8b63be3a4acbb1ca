use crate::domain::{Epoch, Field, PreReleaseStage, Release, ReleaseType, Version};
use crate::error::{PublishError, Result};
use tracing::debug;

/// Derives a release's category from its version
pub struct ReleaseClassifier;

impl ReleaseClassifier {
    /// Resolve the release type of `release`, storing the result on it
    ///
    /// A release type supplied by the user is returned unchanged.
    pub fn classify(release: &mut Release) -> Result<ReleaseType> {
        if let Field::Concrete(release_type) = release.release_type {
            return Ok(release_type);
        }

        let release_type = Self::classify_version(&release.version)?;
        debug!("classified {} as {}", release.version, release_type);
        release.release_type = Field::Concrete(release_type);
        Ok(release_type)
    }

    /// Classify a bare version
    ///
    /// Decision order:
    /// 1. a pre-release tag mentioning alpha or beta
    /// 2. the epoch's component arity
    /// 3. the epoch's numeric rules
    pub fn classify_version(version: &Version) -> Result<ReleaseType> {
        if let Some(stage) = version.prerelease().and_then(|p| p.stage()) {
            return Ok(match stage {
                PreReleaseStage::Alpha => ReleaseType::Alpha,
                PreReleaseStage::Beta => ReleaseType::Beta,
            });
        }

        let epoch = version.epoch().ok_or_else(|| {
            PublishError::classification(format!("Unsupported release version: {}", version))
        })?;

        if version.arity() != epoch.arity() {
            return Err(PublishError::version(format!(
                "Invalid release version for epoch {}: {} (expected {} components)",
                epoch,
                version,
                epoch.arity()
            )));
        }

        match epoch {
            // 4.3.33.0 opens a minor line, 4.3.33.1 maintains it
            Epoch::Legacy => {
                if version.fourth()? == 0 {
                    Ok(ReleaseType::Minor)
                } else {
                    Ok(ReleaseType::Maintenance)
                }
            }
            Epoch::Five | Epoch::Six => match (version.minor()?, version.patch()?) {
                (0, 0) => Ok(ReleaseType::Major),
                (_, 0) => Ok(ReleaseType::Minor),
                _ => Ok(ReleaseType::Maintenance),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(version: &str) -> Result<ReleaseType> {
        ReleaseClassifier::classify_version(&Version::parse(version).unwrap())
    }

    #[test]
    fn test_classify_supported_versions() {
        let cases = [
            ("4.3.3.0", ReleaseType::Minor),
            ("4.3.3.1", ReleaseType::Maintenance),
            ("4.3.3.0-alpha.1", ReleaseType::Alpha),
            ("4.3.3.0-beta.1", ReleaseType::Beta),
            ("5.0.0", ReleaseType::Major),
            ("5.1.0", ReleaseType::Minor),
            ("5.1.1", ReleaseType::Maintenance),
            ("5.1.1-alpha.1", ReleaseType::Alpha),
            ("5.1.1-beta.1", ReleaseType::Beta),
            ("6.0.0", ReleaseType::Major),
            ("6.1.0", ReleaseType::Minor),
            ("6.1.1", ReleaseType::Maintenance),
            ("6.0.1", ReleaseType::Maintenance),
            ("6.1.1-alpha.1", ReleaseType::Alpha),
            ("6.1.1-beta.1", ReleaseType::Beta),
        ];
        for (version, expected) in cases {
            assert_eq!(classify(version).unwrap(), expected, "{}", version);
        }
    }

    #[test]
    fn test_classify_wrong_arity() {
        for version in ["4.3.3", "4.3", "4.3.37.5.6", "5.2", "5.27.1.2", "6.7.2.1", "6.7"] {
            let err = classify(version).unwrap_err();
            assert!(matches!(err, PublishError::VersionParse(_)), "{}", version);
            assert!(err.to_string().contains(version), "{}", err);
        }
    }

    #[test]
    fn test_classify_unsupported_major() {
        for version in ["1.0.0", "7.1.0", "7.0.0"] {
            let err = classify(version).unwrap_err();
            assert!(matches!(err, PublishError::Classification(_)), "{}", version);
            assert!(err.to_string().contains(version));
        }
    }

    #[test]
    fn test_prerelease_checked_before_arity() {
        assert_eq!(classify("4.3-alpha").unwrap(), ReleaseType::Alpha);
    }

    #[test]
    fn test_rc_prerelease_falls_through_to_numeric_rules() {
        assert_eq!(classify("6.2.0-rc.1").unwrap(), ReleaseType::Minor);
    }

    #[test]
    fn test_legacy_epoch_never_major() {
        for version in ["4.0.0.0", "4.3.0.0", "4.0.0.1", "4.3.33.0", "4.3.33.7"] {
            assert_ne!(classify(version).unwrap(), ReleaseType::Major, "{}", version);
        }
    }

    #[test]
    fn test_user_supplied_type_wins() {
        for release_type in ReleaseType::ALL {
            let mut release =
                Release::new(Version::parse("6.1.1").unwrap()).with_release_type(release_type);
            assert_eq!(ReleaseClassifier::classify(&mut release).unwrap(), release_type);
        }
    }

    #[test]
    fn test_classify_memoizes() {
        let mut release = Release::new(Version::parse("6.1.0").unwrap());
        assert_eq!(ReleaseClassifier::classify(&mut release).unwrap(), ReleaseType::Minor);
        assert_eq!(release.release_type, Field::Concrete(ReleaseType::Minor));
    }
}
