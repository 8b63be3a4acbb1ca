//! Substitution of resolved versions into version-templated metadata fields

use crate::domain::Version;
use crate::error::{PublishError, Result};

/// Placeholder replaced by the version resolved from a file declaration
pub const VERSION_TOKEN: &str = "${VERSION_REGEX}";

pub fn has_version_token(template: &str) -> bool {
    template.contains(VERSION_TOKEN)
}

/// Replace every version placeholder in `template`
///
/// # Returns
/// * `Ok(String)` - `template` unchanged when it has no placeholder
/// * `Err` - If the placeholder is present but no version was resolved
pub fn substitute(template: &str, version: Option<&Version>) -> Result<String> {
    if !has_version_token(template) {
        return Ok(template.to_string());
    }

    match version {
        Some(version) => Ok(template.replace(VERSION_TOKEN, &version.to_string())),
        None => Err(PublishError::template(format!(
            "'{}' uses {} but no version was resolved from the file name",
            template, VERSION_TOKEN
        ))),
    }
}
