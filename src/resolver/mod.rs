//! Declarative resource resolution
//!
//! Turns a `file://` declaration from the metadata document into exactly one local
//! file, extracting the version embedded in its name when the declaration carries
//! a capture group.
//!
//! ```rust
//! # use catalog_publish::resolver::{MockWalker, ResourceResolver};
//! let walker = MockWalker::new(["/tmp/server/greenplum-db-6.6.7-rhel6-x86_64.rpm"]);
//! let resolver = ResourceResolver::new("/tmp", walker);
//! let file = resolver.resolve("file://server/greenplum-db-(.*)-rhel6-x86_64.rpm").unwrap();
//! assert_eq!(file.resolved_version.unwrap().to_string(), "6.6.7");
//! ```

pub mod pattern;
pub mod walker;

pub use pattern::{FilePattern, NamePattern, FILE_SCHEME};
pub use walker::{DirectoryWalker, FsWalker, MockWalker};

use crate::domain::Version;
use crate::error::{PublishError, Result};
use std::path::PathBuf;
use tracing::{debug, info};

/// A declaration mapped to a concrete local file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFile {
    pub local_file_path: PathBuf,
    pub local_file_name: String,
    /// Version captured from the file name, `None` for literal declarations
    pub resolved_version: Option<Version>,
}

/// Resolves file declarations below a search path
pub struct ResourceResolver<W: DirectoryWalker> {
    search_path: PathBuf,
    walker: W,
}

impl<W: DirectoryWalker> ResourceResolver<W> {
    pub fn new(search_path: impl Into<PathBuf>, walker: W) -> Self {
        ResourceResolver {
            search_path: search_path.into(),
            walker,
        }
    }

    /// Parse and resolve a raw declaration
    pub fn resolve(&self, declaration: &str) -> Result<ResolvedFile> {
        let pattern = FilePattern::parse(declaration)?;
        self.resolve_pattern(&pattern)
    }

    /// Resolve an already parsed declaration
    ///
    /// # Returns
    /// * `Ok(ResolvedFile)` - The single matching file
    /// * `Err` - If no file or more than one file matches, or the captured version
    ///   does not parse
    pub fn resolve_pattern(&self, pattern: &FilePattern) -> Result<ResolvedFile> {
        if let NamePattern::Literal(name) = pattern.name() {
            let local_file_path = pattern.local_path(&self.search_path);
            debug!("literal declaration {} -> {}", pattern, local_file_path.display());
            return Ok(ResolvedFile {
                local_file_path,
                local_file_name: name.clone(),
                resolved_version: None,
            });
        }

        let dir = pattern.directory(&self.search_path);
        let listing = self.walker.list_files(&dir)?;
        debug!("scanning {} files under '{}' for {}", listing.len(), dir.display(), pattern);

        let mut matched = Vec::new();
        for path in listing {
            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if let Some(captured) = pattern.name().match_name(file_name) {
                let captured = captured.unwrap_or_default().to_string();
                let local_file_name = file_name.to_string();
                matched.push((path, local_file_name, captured));
            }
        }

        match matched.len() {
            0 => Err(PublishError::resolution(format!(
                "No file under '{}' matches {}",
                dir.display(),
                pattern
            ))),
            1 => {
                let (local_file_path, local_file_name, captured) = matched.remove(0);
                let version = Version::parse(&captured).map_err(|e| {
                    PublishError::resolution(format!(
                        "Version '{}' captured from {} is invalid: {}",
                        captured, local_file_name, e
                    ))
                })?;
                info!("resolved {} -> {} ({})", pattern, local_file_path.display(), version);
                Ok(ResolvedFile {
                    local_file_path,
                    local_file_name,
                    resolved_version: Some(version),
                })
            }
            _ => {
                let candidates: Vec<String> = matched
                    .iter()
                    .map(|(path, _, _)| path.display().to_string())
                    .collect();
                Err(PublishError::resolution(format!(
                    "Ambiguous match for {}: {}",
                    pattern,
                    candidates.join(", ")
                )))
            }
        }
    }
}
