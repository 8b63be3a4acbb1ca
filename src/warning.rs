use serde::Serialize;
use std::fmt;

/// Non-fatal issues found while planning a release.
/// These are reported to the user alongside the plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReleaseWarning {
    /// No release history configured, so sibling releases cannot be found
    NoReleaseHistory,
    /// A history record was ignored because its version does not parse
    UnparsableHistoryRecord { version: String },
    /// A literal file declaration carries no version
    UnversionedFile { file: String },
}

impl fmt::Display for ReleaseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseWarning::NoReleaseHistory => write!(
                f,
                "No release history configured; lifecycle dates that need a previous release will fail"
            ),
            ReleaseWarning::UnparsableHistoryRecord { version } => {
                write!(f, "Skipped published release with unparsable version '{}'", version)
            }
            ReleaseWarning::UnversionedFile { file } => {
                write!(f, "'{}' has no capture group, no version resolved", file)
            }
        }
    }
}
