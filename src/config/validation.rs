use http::header::{HeaderName, HeaderValue};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

use crate::config::models::StaticOptions;

/// Header names owned by the resolver and therefore not configurable
const RESERVED_HEADERS: [&str; 2] = ["content-type", "location"];

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Options validation failed: {message}")]
    ValidationFailed { message: String },

    #[error("Root must be an absolute path: {path}")]
    RelativeRoot { path: String },

    #[error("Root is not an existing directory: {path}")]
    RootNotDirectory { path: String },

    #[error("Invalid field '{field}': {message}")]
    InvalidField { field: String, message: String },

    #[error("Invalid extra header '{name}': {reason}")]
    InvalidHeader { name: String, reason: String },

    #[error("Reserved header '{name}' cannot be set through options")]
    ReservedHeader { name: String },
}

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Options validator with detailed error reporting
pub struct OptionsValidator;

impl OptionsValidator {
    /// Validate a root directory together with a complete set of options
    pub fn validate(root: &Path, options: &StaticOptions) -> ValidationResult<()> {
        let mut errors = Vec::new();

        if let Err(e) = Self::validate_root(root) {
            errors.push(e);
        }

        if let Some(index) = &options.index {
            if let Err(e) = Self::validate_index(index) {
                errors.push(e);
            }
        }

        if let Some(prefix) = &options.strip_prefix {
            if prefix.is_empty() {
                errors.push(ValidationError::InvalidField {
                    field: "strip_prefix".to_string(),
                    message: "must not be empty".to_string(),
                });
            }
        }

        if options.default_mime.is_empty() {
            errors.push(ValidationError::InvalidField {
                field: "default_mime".to_string(),
                message: "must not be empty".to_string(),
            });
        }

        if options.charset.is_empty() {
            errors.push(ValidationError::InvalidField {
                field: "charset".to_string(),
                message: "must not be empty".to_string(),
            });
        }

        errors.extend(Self::check_headers(&options.headers));

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::ValidationFailed {
                message: Self::format_multiple_errors(errors),
            })
        }
    }

    /// Validate the root directory path
    fn validate_root(root: &Path) -> ValidationResult<()> {
        if !root.is_absolute() {
            return Err(ValidationError::RelativeRoot {
                path: root.display().to_string(),
            });
        }

        if !root.is_dir() {
            return Err(ValidationError::RootNotDirectory {
                path: root.display().to_string(),
            });
        }

        Ok(())
    }

    /// Validate the configured index file name
    fn validate_index(index: &str) -> ValidationResult<()> {
        if index.is_empty() || index.contains('/') {
            return Err(ValidationError::InvalidField {
                field: "index".to_string(),
                message: format!("'{index}' must be a bare file name"),
            });
        }

        Ok(())
    }

    /// Validate configured extra headers
    fn check_headers(headers: &HashMap<String, String>) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        for (name, value) in headers {
            if RESERVED_HEADERS
                .iter()
                .any(|reserved| name.eq_ignore_ascii_case(reserved))
            {
                errors.push(ValidationError::ReservedHeader { name: name.clone() });
                continue;
            }

            if HeaderName::try_from(name.as_str()).is_err() {
                errors.push(ValidationError::InvalidHeader {
                    name: name.clone(),
                    reason: "not a valid header name".to_string(),
                });
            } else if HeaderValue::try_from(value.as_str()).is_err() {
                errors.push(ValidationError::InvalidHeader {
                    name: name.clone(),
                    reason: "value contains invalid characters".to_string(),
                });
            }
        }

        errors
    }

    /// Format multiple validation errors into a single message
    fn format_multiple_errors(errors: Vec<ValidationError>) -> String {
        errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_options_pass() {
        let root = TempDir::new().expect("Failed to create temp directory");
        let options = StaticOptions::default();

        assert!(OptionsValidator::validate(root.path(), &options).is_ok());
    }

    #[test]
    fn test_relative_root_rejected() {
        let options = StaticOptions::default();

        let err = OptionsValidator::validate(Path::new("public"), &options)
            .expect_err("relative root must be rejected");
        assert!(err.to_string().contains("absolute"));
    }

    #[test]
    fn test_missing_root_rejected() {
        let root = TempDir::new().expect("Failed to create temp directory");
        let missing = root.path().join("nope");
        let options = StaticOptions::default();

        let err = OptionsValidator::validate(&missing, &options)
            .expect_err("missing root must be rejected");
        assert!(err.to_string().contains("existing directory"));
    }

    #[test]
    fn test_index_with_separator_rejected() {
        let root = TempDir::new().expect("Failed to create temp directory");
        let options = StaticOptions::builder().index("sub/index.html").build();

        let err = OptionsValidator::validate(root.path(), &options)
            .expect_err("index with separator must be rejected");
        assert!(err.to_string().contains("bare file name"));
    }

    #[test]
    fn test_empty_strip_prefix_rejected() {
        let root = TempDir::new().expect("Failed to create temp directory");
        let options = StaticOptions::builder().strip_prefix("").build();

        let err = OptionsValidator::validate(root.path(), &options)
            .expect_err("empty strip prefix must be rejected");
        assert!(err.to_string().contains("strip_prefix"));
    }

    #[test]
    fn test_reserved_headers_rejected() {
        let root = TempDir::new().expect("Failed to create temp directory");
        let options = StaticOptions::builder()
            .header("Content-Type", "text/html")
            .build();

        let err = OptionsValidator::validate(root.path(), &options)
            .expect_err("reserved header must be rejected");
        assert!(err.to_string().contains("Reserved header"));

        let options = StaticOptions::builder().header("Location", "/").build();
        assert!(OptionsValidator::validate(root.path(), &options).is_err());
    }

    #[test]
    fn test_invalid_header_name_rejected() {
        let root = TempDir::new().expect("Failed to create temp directory");
        let options = StaticOptions::builder().header("bad header", "x").build();

        let err = OptionsValidator::validate(root.path(), &options)
            .expect_err("invalid header name must be rejected");
        assert!(err.to_string().contains("bad header"));
    }

    #[test]
    fn test_invalid_header_value_rejected() {
        let root = TempDir::new().expect("Failed to create temp directory");
        let options = StaticOptions::builder()
            .header("x-custom", "line\nbreak")
            .build();

        let err = OptionsValidator::validate(root.path(), &options)
            .expect_err("invalid header value must be rejected");
        assert!(err.to_string().contains("invalid characters"));
    }

    #[test]
    fn test_multiple_errors_are_aggregated() {
        let options = StaticOptions::builder()
            .charset("")
            .header("Content-Type", "text/html")
            .build();

        let err = OptionsValidator::validate(Path::new("public"), &options)
            .expect_err("all violations must be reported");
        let message = err.to_string();
        assert!(message.contains("absolute"));
        assert!(message.contains("charset"));
        assert!(message.contains("Reserved header"));
    }
}
