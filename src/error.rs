//! Error types for the fleet payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for the conditions that can abort an operation. Non-fatal findings such
//! as invalid national IDs are reported as warnings instead.

use thiserror::Error;

/// The main error type for the fleet payroll engine.
///
/// # Example
///
/// ```
/// use fleet_payroll::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/salaries.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/salaries.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A period token was not a valid `YYYY-MM` value.
    #[error("Invalid period '{value}': expected YYYY-MM")]
    InvalidPeriod {
        /// The rejected token.
        value: String,
    },

    /// A file in an import batch could not be decoded. Nothing from the
    /// batch is committed.
    #[error("Failed to process file '{file}' at line {line}: {message}")]
    BatchParse {
        /// The name of the file that failed.
        file: String,
        /// The 1-based line where decoding failed.
        line: u64,
        /// A description of the failure.
        message: String,
    },

    /// Entries could not be serialized for export.
    #[error("Export failed: {message}")]
    Export {
        /// A description of the failure.
        message: String,
    },

    /// No configuration exists for the requested branch.
    #[error("Branch not configured: {branch}")]
    BranchNotFound {
        /// The branch name.
        branch: String,
    },

    /// The persistence layer failed to save or read a resource.
    #[error("Storage error for '{resource}': {message}")]
    Storage {
        /// The resource being accessed (e.g. "entries").
        resource: String,
        /// A description of the failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/salaries.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/salaries.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_invalid_period_displays_value() {
        let error = EngineError::InvalidPeriod {
            value: "2024-13".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid period '2024-13': expected YYYY-MM"
        );
    }

    #[test]
    fn test_batch_parse_displays_file_and_line() {
        let error = EngineError::BatchParse {
            file: "filial_sp.csv".to_string(),
            line: 4,
            message: "invalid utf-8".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to process file 'filial_sp.csv' at line 4: invalid utf-8"
        );
    }

    #[test]
    fn test_branch_not_found_displays_branch() {
        let error = EngineError::BranchNotFound {
            branch: "VIANA".to_string(),
        };
        assert_eq!(error.to_string(), "Branch not configured: VIANA");
    }

    #[test]
    fn test_storage_error_displays_resource_and_message() {
        let error = EngineError::Storage {
            resource: "entries".to_string(),
            message: "disk full".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Storage error for 'entries': disk full"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_invalid_period() -> EngineResult<()> {
            Err(EngineError::InvalidPeriod {
                value: "march".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_invalid_period()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
