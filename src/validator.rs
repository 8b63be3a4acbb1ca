//! Consistency checks on a metadata document before anything is derived
//!
//! Every rule runs; violations are collected so the whole document can be fixed in
//! one pass.

use crate::domain::date::is_date;
use crate::domain::{Field, OffsetExpression};
use crate::error::{PublishError, Result};
use crate::metadata::{MetadataDocument, ProductFileSpec};
use crate::resolver::FilePattern;
use tracing::debug;

pub const BOTH_END_OF_AVAILABILITY_MESSAGE: &str =
    "end_of_availability_date and end_of_availability_date_offset cannot both be set";

pub const OFFSET_FORMAT_MESSAGE: &str =
    r#"end_of_availability_date_offset must be a valid offset of the form "(+\d+[mdyMDY])+""#;

/// Validates a [`MetadataDocument`]
pub struct MetadataValidator<'a> {
    document: &'a MetadataDocument,
    messages: Vec<String>,
}

impl<'a> MetadataValidator<'a> {
    pub fn new(document: &'a MetadataDocument) -> Self {
        MetadataValidator {
            document,
            messages: Vec::new(),
        }
    }

    /// Run every rule, returning true when the document has no violations
    pub fn validate(&mut self) -> bool {
        let mut messages = Vec::new();
        let release = &self.document.release;

        debug!("validating date settings");
        let offset = release.end_of_availability_date_offset.trim();
        if release.end_of_availability_date.is_concrete() && !offset.is_empty() {
            messages.push(BOTH_END_OF_AVAILABILITY_MESSAGE.to_string());
        }

        for (name, field) in [
            ("release_date", &release.release_date),
            ("end_of_support_date", &release.end_of_support_date),
            ("end_of_guidance_date", &release.end_of_guidance_date),
            ("end_of_availability_date", &release.end_of_availability_date),
        ] {
            if let Field::Concrete(value) = field {
                if !is_date(value) {
                    messages.push(format!(
                        r#"{} must be a valid date of the format "YYYY-MM-DD", got '{}'"#,
                        name, value
                    ));
                }
            }
        }

        debug!("validating offset settings");
        if !offset.is_empty() && !OffsetExpression::is_valid(offset) {
            messages.push(OFFSET_FORMAT_MESSAGE.to_string());
        }

        debug!("validating product files");
        for (group, file) in self.document.all_product_files() {
            debug!("\tvalidating product file: {}", file.file);
            messages.extend(product_file_violations(group, file));
        }

        self.messages = messages;
        self.messages.is_empty()
    }

    /// Violations found by the last [`MetadataValidator::validate`] call
    pub fn error_messages(&self) -> &[String] {
        &self.messages
    }

    /// Validate, turning violations into a single [`PublishError::Validation`]
    pub fn check(document: &MetadataDocument) -> Result<()> {
        let mut validator = MetadataValidator::new(document);
        if validator.validate() {
            Ok(())
        } else {
            Err(PublishError::Validation(validator.messages))
        }
    }
}

fn product_file_violations(group: Option<&str>, file: &ProductFileSpec) -> Vec<String> {
    let location = match group {
        Some(name) => format!("file group '{}'", name),
        None => "product_files".to_string(),
    };
    let required = [
        ("file", &file.file),
        ("upload_as", &file.upload_as),
        ("file_type", &file.file_type),
        ("file_version", &file.file_version),
    ];
    let context = format!(
        "(| {} |)",
        required
            .iter()
            .map(|(_, value)| value.as_str())
            .collect::<Vec<_>>()
            .join(" | ")
    );

    let mut messages: Vec<String> = required
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| format!("{} is empty in {} {}", name, location, context))
        .collect();

    if !file.file.trim().is_empty() {
        if let Err(e) = FilePattern::parse(&file.file) {
            messages.push(format!("file in {} is not a valid file pattern: {}", location, e));
        }
    }

    messages
}
