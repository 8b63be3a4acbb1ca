//! Pure formatting functions for UI output.
//!
//! Rendering is kept apart from printing so the layout can be tested; the
//! `display_*` functions only print what the `render_*` functions produce.

use console::style;

use crate::cli::orchestration::{ProductFilePlan, ReleasePlan};
use crate::warning::ReleaseWarning;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Display a release warning to the user.
pub fn display_warning(warning: &ReleaseWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Display every metadata violation found by the validator.
pub fn display_violations(messages: &[String]) {
    eprintln!("{}", render_violations(messages));
}

pub fn render_violations(messages: &[String]) -> String {
    let mut out = format!(
        "{} metadata validation failed with {} violation(s):",
        style("ERROR:").red(),
        messages.len()
    );
    for (i, message) in messages.iter().enumerate() {
        out.push_str(&format!("\n  {}. {}", i + 1, message));
    }
    out
}

/// Display the planned release and every file it will upload.
pub fn display_release_plan(plan: &ReleasePlan) {
    println!("{}", render_release_plan(plan));
}

/// Render the plan as an indented, human readable listing.
pub fn render_release_plan(plan: &ReleasePlan) -> String {
    let release = &plan.release;
    let mut lines = vec![
        format!(
            "{} {} {}",
            style("Release").bold(),
            style(&release.version).green(),
            style(format!("({})", plan.product_slug)).dim()
        ),
        format!("  Type:                {}", release.release_type),
        format!("  Release date:        {}", release.release_date),
        format!("  End of support:      {}", release.end_of_support_date),
        format!("  End of guidance:     {}", release.end_of_guidance_date),
        format!("  End of availability: {}", release.end_of_availability_date),
        format!("  Release notes:       {}", style(&release.release_notes_url).cyan()),
    ];

    for group in &plan.file_groups {
        lines.push(String::new());
        lines.push(format!("{} {}", style("File group").bold(), group.name));
        lines.extend(group.product_files.iter().map(render_product_file));
    }

    if !plan.product_files.is_empty() {
        lines.push(String::new());
        lines.push(style("Product files").bold().to_string());
        lines.extend(plan.product_files.iter().map(render_product_file));
    }

    lines.join("\n")
}

fn render_product_file(file: &ProductFilePlan) -> String {
    format!(
        "  - {} [{}, {}]\n    {} -> {}",
        file.upload_as,
        file.file_type,
        file.file_version,
        file.local_file_path.display(),
        style(&file.object_key).dim()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_error() {
        // Visual verification test - output is printed to stderr
        display_error("test error");
    }

    #[test]
    fn test_display_success() {
        // Visual verification test - output is printed to stdout
        display_success("test success");
    }

    #[test]
    fn test_render_violations_numbers_messages() {
        let rendered = render_violations(&["first".to_string(), "second".to_string()]);
        assert!(rendered.contains("2 violation(s)"));
        assert!(rendered.contains("1. first"));
        assert!(rendered.contains("2. second"));
    }
}
