//! User interface module - formatting of plans, warnings and errors.

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_error, display_release_plan, display_success, display_violations, display_warning,
};
