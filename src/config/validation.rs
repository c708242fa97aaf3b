//! Configuration validation.
//!
//! # Responsibilities
//! - Reject empty directory paths
//! - Reject empty or dotted file extensions
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Path existence is not checked here; a missing directory surfaces as an
//!   I/O error when the loader reads it

use std::fmt;

use crate::config::schema::Options;

/// A single validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate resolved options.
pub fn validate_options(options: &Options) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if options.routes.as_os_str().is_empty() {
        errors.push(ValidationError {
            field: "routes",
            message: "path must not be empty".to_string(),
        });
    }
    if options.controllers.as_os_str().is_empty() {
        errors.push(ValidationError {
            field: "controllers",
            message: "path must not be empty".to_string(),
        });
    }

    for (field, ext) in [
        ("route_extension", &options.route_extension),
        ("controller_extension", &options.controller_extension),
    ] {
        if ext.is_empty() {
            errors.push(ValidationError {
                field,
                message: "extension must not be empty".to_string(),
            });
        } else if ext.starts_with('.') {
            errors.push(ValidationError {
                field,
                message: format!("write \"{}\" without the leading dot", ext.trim_start_matches('.')),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
