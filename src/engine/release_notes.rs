use crate::domain::{Epoch, Field, Release, Version};
use crate::error::{PublishError, Result};
use tracing::debug;

/// Root of the product documentation site
pub const DOCS_BASE_URL: &str = "https://gpdb.docs.pivotal.io";

/// Derives the canonical release notes URL of a release
pub struct ReleaseNotesUrlBuilder;

impl ReleaseNotesUrlBuilder {
    /// Resolve the release notes URL of `release`, storing the result on it
    ///
    /// A URL supplied by the user is returned unchanged.
    pub fn build(release: &mut Release) -> Result<String> {
        if let Field::Concrete(url) = &release.release_notes_url {
            return Ok(url.clone());
        }

        let url = Self::url_for(&release.version)?;
        debug!("release notes for {}: {}", release.version, url);
        release.release_notes_url = Field::Concrete(url.clone());
        Ok(url)
    }

    /// Documentation URL for a bare version
    ///
    /// # Examples
    /// * `4.3.33.1` -> `.../43330/relnotes/GPDB_43331_README.html`
    /// * `5.28.1` -> `.../5280/relnotes/GPDB_5281_README.html`
    /// * `6.12.0` -> `.../6-12/main/index.html`
    /// * `6.0.0-beta.1` -> `.../600BETA/main/index.html`
    pub fn url_for(version: &Version) -> Result<String> {
        let epoch = version.epoch().ok_or_else(|| {
            PublishError::url(format!(
                "Cannot build release notes URL for unsupported version: {}",
                version
            ))
        })?;

        if let Some(prerelease) = version.prerelease() {
            return Ok(format!(
                "{}/{}{}/main/index.html",
                DOCS_BASE_URL,
                version.concatenated(),
                prerelease.label()
            ));
        }

        match epoch {
            Epoch::Legacy | Epoch::Five => {
                let components = version.components();
                let line: String = components[..components.len() - 1]
                    .iter()
                    .map(|c| c.to_string())
                    .collect();
                Ok(format!(
                    "{}/{}0/relnotes/GPDB_{}_README.html",
                    DOCS_BASE_URL,
                    line,
                    version.concatenated()
                ))
            }
            Epoch::Six => Ok(format!(
                "{}/{}-{}/main/index.html",
                DOCS_BASE_URL,
                version.major(),
                version.minor()?
            )),
        }
    }
}
