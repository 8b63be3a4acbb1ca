use crate::error::{PublishError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Release category as named by the distribution catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReleaseType {
    #[serde(rename = "Alpha Release")]
    Alpha,
    #[serde(rename = "Beta Release")]
    Beta,
    #[serde(rename = "Major Release")]
    Major,
    #[serde(rename = "Minor Release")]
    Minor,
    #[serde(rename = "Maintenance Release")]
    Maintenance,
}

impl ReleaseType {
    pub const ALL: [ReleaseType; 5] = [
        ReleaseType::Alpha,
        ReleaseType::Beta,
        ReleaseType::Major,
        ReleaseType::Minor,
        ReleaseType::Maintenance,
    ];

    /// Catalog name of the release type
    pub fn name(&self) -> &'static str {
        match self {
            ReleaseType::Alpha => "Alpha Release",
            ReleaseType::Beta => "Beta Release",
            ReleaseType::Major => "Major Release",
            ReleaseType::Minor => "Minor Release",
            ReleaseType::Maintenance => "Maintenance Release",
        }
    }
}

impl FromStr for ReleaseType {
    type Err = PublishError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        ReleaseType::ALL
            .iter()
            .find(|t| t.name().eq_ignore_ascii_case(wanted))
            .copied()
            .ok_or_else(|| PublishError::classification(format!("Unknown release type: '{}'", s)))
    }
}

impl fmt::Display for ReleaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
