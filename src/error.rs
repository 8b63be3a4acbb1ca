use thiserror::Error;

/// Unified error type for catalog-publish operations
#[derive(Error, Debug)]
pub enum PublishError {
    #[error("Version parsing error: {0}")]
    VersionParse(String),

    /// A caller read a version component the version does not have.
    ///
    /// This signals a bug in the caller (it assumed the wrong epoch), not bad input.
    #[error("Version component {position} requested from '{version}', which has only {len}")]
    VersionComponent {
        position: usize,
        len: usize,
        version: String,
    },

    #[error("Classification error: {0}")]
    Classification(String),

    #[error("Date computation error: {0}")]
    DateComputation(String),

    #[error("Release notes URL error: {0}")]
    UrlBuild(String),

    #[error("Resolution error: {0}")]
    Resolution(String),

    #[error("Template error: {0}")]
    Template(String),

    #[error("Metadata validation failed:\n{}", .0.join("\n"))]
    Validation(Vec<String>),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Metadata document error: {0}")]
    Metadata(#[from] serde_yaml::Error),

    #[error("Release history error: {0}")]
    History(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in catalog-publish
pub type Result<T> = std::result::Result<T, PublishError>;

impl PublishError {
    /// Create a version parsing error with context
    pub fn version(msg: impl Into<String>) -> Self {
        PublishError::VersionParse(msg.into())
    }

    /// Create a classification error with context
    pub fn classification(msg: impl Into<String>) -> Self {
        PublishError::Classification(msg.into())
    }

    /// Create a date computation error with context
    pub fn date(msg: impl Into<String>) -> Self {
        PublishError::DateComputation(msg.into())
    }

    /// Create a release notes URL error with context
    pub fn url(msg: impl Into<String>) -> Self {
        PublishError::UrlBuild(msg.into())
    }

    /// Create a resolution error with context
    pub fn resolution(msg: impl Into<String>) -> Self {
        PublishError::Resolution(msg.into())
    }

    /// Create a template error with context
    pub fn template(msg: impl Into<String>) -> Self {
        PublishError::Template(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        PublishError::Config(msg.into())
    }

    /// True when the error reports a programming mistake rather than bad input
    pub fn is_misuse(&self) -> bool {
        matches!(self, PublishError::VersionComponent { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PublishError::config("missing product slug");
        assert_eq!(err.to_string(), "Configuration error: missing product slug");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: PublishError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (PublishError::version("x"), "Version parsing error"),
            (PublishError::classification("x"), "Classification error"),
            (PublishError::date("x"), "Date computation error"),
            (PublishError::url("x"), "Release notes URL error"),
            (PublishError::resolution("x"), "Resolution error"),
            (PublishError::template("x"), "Template error"),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }

    #[test]
    fn test_validation_error_lists_every_message() {
        let err = PublishError::Validation(vec![
            "first problem".to_string(),
            "second problem".to_string(),
        ]);
        let msg = err.to_string();
        assert!(msg.contains("first problem"));
        assert!(msg.contains("second problem"));
    }

    #[test]
    fn test_version_component_is_misuse() {
        let err = PublishError::VersionComponent {
            position: 3,
            len: 3,
            version: "6.1.0".to_string(),
        };
        assert!(err.is_misuse());
        assert!(err.to_string().contains("6.1.0"));
        assert!(!PublishError::version("bad").is_misuse());
    }
}
