//! Declarative release metadata document
//!
//! The YAML document names the release's descriptive fields, optionally pins any
//! derivable field (or asks for it with `<COMPUTED>`), and declares the product
//! files to publish, either loose or organized in named file groups.

use crate::domain::date::parse_date;
use crate::domain::{Field, OffsetExpression, Release, ReleaseDetails, ReleaseType, Version};
use crate::error::Result;
use serde::{Deserialize, Deserializer};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Blank YAML values (`description:`) decode to the type's default
fn nullable<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// The `release` block, kept as written
///
/// Dates stay textual here so that malformed values reach the validator instead of
/// failing the whole document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReleaseSpec {
    #[serde(default)]
    pub release_type: Field<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub eula_slug: String,
    #[serde(default, deserialize_with = "nullable")]
    pub description: String,
    #[serde(default)]
    pub release_notes_url: Field<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub availability: String,
    #[serde(default, deserialize_with = "nullable")]
    pub controlled: bool,
    #[serde(default, deserialize_with = "nullable")]
    pub eccn: String,
    #[serde(default, deserialize_with = "nullable")]
    pub license_exception: String,
    #[serde(default)]
    pub release_date: Field<String>,
    #[serde(default)]
    pub end_of_support_date: Field<String>,
    #[serde(default)]
    pub end_of_guidance_date: Field<String>,
    #[serde(default)]
    pub end_of_availability_date: Field<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub end_of_availability_date_offset: String,
}

impl ReleaseSpec {
    /// Build the typed release for `version`
    ///
    /// Expects a document that passed validation; malformed dates, offsets or an
    /// unknown release type are still reported as errors.
    pub fn to_release(&self, version: Version) -> Result<Release> {
        let mut release = Release::new(version);

        if let Field::Concrete(name) = &self.release_type {
            release.release_type = Field::Concrete(name.parse::<ReleaseType>()?);
        }
        if let Field::Concrete(url) = &self.release_notes_url {
            release.release_notes_url = Field::Concrete(url.clone());
        }
        if let Field::Concrete(date) = &self.release_date {
            release.release_date = Some(parse_date(date)?);
        }

        release.end_of_support = concrete_date(&self.end_of_support_date)?;
        release.end_of_guidance = concrete_date(&self.end_of_guidance_date)?;
        release.end_of_availability = concrete_date(&self.end_of_availability_date)?;

        let offset = self.end_of_availability_date_offset.trim();
        if !offset.is_empty() {
            release.end_of_availability_offset = Some(OffsetExpression::parse(offset)?);
        }

        release.details = ReleaseDetails {
            eula_slug: self.eula_slug.clone(),
            description: self.description.clone(),
            availability: self.availability.clone(),
            controlled: self.controlled,
            eccn: self.eccn.clone(),
            license_exception: self.license_exception.clone(),
        };

        debug!("release {} built from metadata", release.version);
        Ok(release)
    }
}

/// Only a concrete date pins the field; anything else is derived
fn concrete_date(field: &Field<String>) -> Result<Field<chrono::NaiveDate>> {
    match field {
        Field::Concrete(value) => Ok(Field::Concrete(parse_date(value)?)),
        _ => Ok(Field::Compute),
    }
}

/// One declared product file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProductFileSpec {
    #[serde(default, deserialize_with = "nullable")]
    pub file: String,
    #[serde(default, deserialize_with = "nullable")]
    pub upload_as: String,
    #[serde(default, deserialize_with = "nullable")]
    pub description: String,
    #[serde(default, deserialize_with = "nullable")]
    pub file_type: String,
    #[serde(default, deserialize_with = "nullable")]
    pub docs_url: String,
    #[serde(default, deserialize_with = "nullable")]
    pub system_requirements: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub platforms: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub included_files: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub file_version: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FileGroup {
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub product_files: Vec<ProductFileSpec>,
}

/// The whole metadata document
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetadataDocument {
    #[serde(default, deserialize_with = "nullable")]
    pub release: ReleaseSpec,
    #[serde(default, deserialize_with = "nullable")]
    pub file_groups: Vec<FileGroup>,
    #[serde(default, deserialize_with = "nullable")]
    pub product_files: Vec<ProductFileSpec>,
}

impl MetadataDocument {
    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Every declared product file with the name of its group, grouped files first
    pub fn all_product_files(&self) -> impl Iterator<Item = (Option<&str>, &ProductFileSpec)> {
        self.file_groups
            .iter()
            .flat_map(|group| {
                group
                    .product_files
                    .iter()
                    .map(move |file| (Some(group.name.as_str()), file))
            })
            .chain(self.product_files.iter().map(|file| (None, file)))
    }
}

/// Read and decode a metadata document from disk
pub fn load_metadata(path: &Path) -> Result<MetadataDocument> {
    let content = fs::read_to_string(path)?;
    let document = MetadataDocument::from_yaml(&content)?;
    debug!(
        "loaded metadata from {}: {} file groups, {} product files",
        path.display(),
        document.file_groups.len(),
        document.product_files.len()
    );
    Ok(document)
}
