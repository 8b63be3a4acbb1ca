//! Release pipeline orchestration
//!
//! Ties the metadata document, the derivation engine and the resolver together
//! into a [`ReleasePlan`]: the upload-ready description of a release. This keeps
//! CLI argument parsing out of the pipeline so it can be driven programmatically.

use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use serde::Serialize;
use tracing::{debug, info};

use crate::catalog::ReleaseHistory;
use crate::config::{Config, UploadConfig};
use crate::domain::{Field, Release, ReleaseDetails, ReleaseType, Version};
use crate::engine::{derive_release, LifecycleDateCalculator};
use crate::error::{PublishError, Result};
use crate::metadata::{load_metadata, ProductFileSpec};
use crate::resolver::{DirectoryWalker, FsWalker, ResourceResolver};
use crate::template::substitute;
use crate::validator::MetadataValidator;
use crate::warning::ReleaseWarning;

/// Arguments for the release pipeline
///
/// Mirrors the CLI Args but in a format suitable for orchestration logic.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineArgs {
    /// Declarative metadata document
    pub metadata_path: PathBuf,

    /// Version being released, e.g. "6.12.0"
    pub release_version: String,

    /// Overrides `[resolver] search_path`
    pub search_path: Option<PathBuf>,

    /// Overrides `[catalog] history_file`
    pub history_file: Option<PathBuf>,

    /// Date used when the release has none; the local date when unset
    pub today: Option<NaiveDate>,
}

/// Derived release metadata as it will be sent to the catalog
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReleaseSummary {
    pub version: String,
    pub release_type: ReleaseType,
    pub release_date: NaiveDate,
    pub end_of_support_date: NaiveDate,
    pub end_of_guidance_date: NaiveDate,
    pub end_of_availability_date: NaiveDate,
    pub release_notes_url: String,
    #[serde(flatten)]
    pub details: ReleaseDetails,
}

fn derived<T: Clone>(field: &Field<T>, name: &str, version: &Version) -> Result<T> {
    field
        .concrete()
        .cloned()
        .ok_or_else(|| PublishError::date(format!("{} of {} was not derived", name, version)))
}

impl ReleaseSummary {
    /// Summarize a fully derived release
    pub fn from_release(release: &Release, today: NaiveDate) -> Result<Self> {
        let version = &release.version;
        Ok(ReleaseSummary {
            version: version.to_string(),
            release_type: derived(&release.release_type, "release type", version)?,
            release_date: release.release_date.unwrap_or(today),
            end_of_support_date: derived(&release.end_of_support, "end of support", version)?,
            end_of_guidance_date: derived(&release.end_of_guidance, "end of guidance", version)?,
            end_of_availability_date: derived(
                &release.end_of_availability,
                "end of availability",
                version,
            )?,
            release_notes_url: derived(&release.release_notes_url, "release notes URL", version)?,
            details: release.details.clone(),
        })
    }
}

/// One product file ready for upload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductFilePlan {
    pub local_file_path: PathBuf,
    pub object_key: String,
    pub upload_as: String,
    pub description: String,
    pub file_type: String,
    pub file_version: String,
    pub resolved_version: Option<String>,
    pub docs_url: String,
    pub system_requirements: Vec<String>,
    pub platforms: Vec<String>,
    pub included_files: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileGroupPlan {
    pub name: String,
    pub product_files: Vec<ProductFilePlan>,
}

/// Result of a successful pipeline run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReleasePlan {
    pub product_slug: String,
    pub release: ReleaseSummary,
    pub file_groups: Vec<FileGroupPlan>,
    pub product_files: Vec<ProductFilePlan>,
    pub warnings: Vec<ReleaseWarning>,
}

/// Release pipeline over the local filesystem
///
/// See [`run_release_pipeline_with`].
pub fn run_release_pipeline(args: &PipelineArgs, config: &Config) -> Result<ReleasePlan> {
    run_release_pipeline_with(args, config, FsWalker)
}

/// Main release pipeline
///
/// Orchestrates the whole planning process:
/// 1. Load the metadata document
/// 2. Validate it, reporting every violation at once
/// 3. Build the release and derive its type, lifecycle dates and notes URL
/// 4. Resolve every declared file and substitute its version into templated fields
///
/// # Arguments
///
/// * `args` - Pipeline arguments (metadata path, release version, overrides)
/// * `config` - Loaded configuration
/// * `walker` - Directory listing used to resolve file declarations
///
/// # Returns
///
/// The release plan, or the first error that aborted planning
pub fn run_release_pipeline_with<W: DirectoryWalker>(
    args: &PipelineArgs,
    config: &Config,
    walker: W,
) -> Result<ReleasePlan> {
    let document = load_metadata(&args.metadata_path)?;
    MetadataValidator::check(&document)?;
    debug!("metadata document is valid");

    let version = Version::parse(&args.release_version)?;
    info!("planning release {}", version);
    let mut release = document.release.to_release(version)?;

    let mut warnings = Vec::new();
    let history_file = args
        .history_file
        .as_ref()
        .or(config.catalog.history_file.as_ref());
    let history = match history_file {
        Some(path) => {
            let history = ReleaseHistory::load(path, &config.catalog.public_availability)?;
            warnings.extend(history.skipped().iter().map(|version| {
                ReleaseWarning::UnparsableHistoryRecord {
                    version: version.clone(),
                }
            }));
            history
        }
        None => {
            warnings.push(ReleaseWarning::NoReleaseHistory);
            ReleaseHistory::new(Vec::new(), config.catalog.public_availability.as_str())
        }
    };

    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let calculator = LifecycleDateCalculator::with_today(&history, today);
    derive_release(&mut release, &calculator)?;
    let summary = ReleaseSummary::from_release(&release, today)?;
    info!(
        "{} {}: end of support {}, end of guidance {}, end of availability {}",
        summary.release_type,
        summary.version,
        summary.end_of_support_date,
        summary.end_of_guidance_date,
        summary.end_of_availability_date
    );

    let search_path = args
        .search_path
        .clone()
        .unwrap_or_else(|| config.resolver.search_path.clone());
    let resolver = ResourceResolver::new(search_path, walker);

    let mut file_groups = Vec::new();
    for group in &document.file_groups {
        let mut product_files = Vec::new();
        for spec in &group.product_files {
            product_files.push(plan_product_file(&resolver, &config.upload, spec, &mut warnings)?);
        }
        file_groups.push(FileGroupPlan {
            name: group.name.clone(),
            product_files,
        });
    }

    let mut product_files = Vec::new();
    for spec in &document.product_files {
        product_files.push(plan_product_file(&resolver, &config.upload, spec, &mut warnings)?);
    }

    Ok(ReleasePlan {
        product_slug: config.catalog.product_slug.clone(),
        release: summary,
        file_groups,
        product_files,
        warnings,
    })
}

fn plan_product_file<W: DirectoryWalker>(
    resolver: &ResourceResolver<W>,
    upload: &UploadConfig,
    spec: &ProductFileSpec,
    warnings: &mut Vec<ReleaseWarning>,
) -> Result<ProductFilePlan> {
    let resolved = resolver.resolve(&spec.file)?;
    let version = resolved.resolved_version.as_ref();
    if version.is_none() {
        warnings.push(ReleaseWarning::UnversionedFile {
            file: spec.file.clone(),
        });
    }

    let upload_as = substitute(&spec.upload_as, version)?;
    let description = match substitute(&spec.description, version)? {
        description if description.trim().is_empty() => upload_as.clone(),
        description => description,
    };

    Ok(ProductFilePlan {
        object_key: upload.object_key(&resolved.local_file_name),
        local_file_path: resolved.local_file_path,
        upload_as,
        description,
        file_type: spec.file_type.clone(),
        file_version: substitute(&spec.file_version, version)?,
        resolved_version: version.map(|v| v.to_string()),
        docs_url: spec.docs_url.clone(),
        system_requirements: spec.system_requirements.clone(),
        platforms: spec.platforms.clone(),
        included_files: spec.included_files.clone(),
    })
}
