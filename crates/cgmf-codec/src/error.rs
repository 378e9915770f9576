//! Error types for parameter-file codec operations.

use thiserror::Error;

/// Errors that can occur when decoding or encoding parameter files.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Target nuclide absent from the file's key set.
    #[error("target ZAID {zaid} not found; available ZAIDs: {available:?}")]
    TargetNotFound { zaid: i32, available: Vec<i32> },

    /// A line that must be data failed required parsing mid-section.
    #[error("invalid format on line {line}: {message}")]
    InvalidFormat { line: usize, message: String },

    /// A numeric literal failed to parse.
    #[error("invalid numeric literal on line {line}: '{token}'")]
    InvalidNumber { line: usize, token: String },

    /// A re-rendered fixed-width line does not meet its exact required width.
    ///
    /// Fatal: the external reader slices by position, so a wrong-width line
    /// would be silently misread. The write must abort instead.
    #[error("rendered line must be exactly {expected} chars, got {actual}: '{line}'")]
    WidthViolation {
        expected: usize,
        actual: usize,
        line: String,
    },

    /// A re-rendered line does not tokenize to its required token count.
    #[error("rendered line must tokenize to {expected} fields, got {actual}")]
    TokenCountViolation { expected: usize, actual: usize },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;

impl CodecError {
    /// Create a TargetNotFound error with the available keys sorted.
    pub fn target_not_found(zaid: i32, keys: impl IntoIterator<Item = i32>) -> Self {
        let mut available: Vec<i32> = keys.into_iter().collect();
        available.sort_unstable();
        Self::TargetNotFound { zaid, available }
    }

    /// Create an InvalidFormat error.
    pub fn invalid_format(line: usize, message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            line,
            message: message.into(),
        }
    }

    /// Create an InvalidNumber error.
    pub fn invalid_number(line: usize, token: impl Into<String>) -> Self {
        Self::InvalidNumber {
            line,
            token: token.into(),
        }
    }

    /// Create a WidthViolation error.
    pub fn width_violation(expected: usize, line: impl Into<String>) -> Self {
        let line = line.into();
        Self::WidthViolation {
            expected,
            actual: line.len(),
            line,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_not_found_lists_sorted_keys() {
        let err = CodecError::target_not_found(92236, vec![98253, 92234, 94240]);
        assert_eq!(
            format!("{err}"),
            "target ZAID 92236 not found; available ZAIDs: [92234, 94240, 98253]"
        );
    }

    #[test]
    fn width_violation_reports_actual_length() {
        let err = CodecError::width_violation(97, "too short");
        assert!(format!("{err}").contains("exactly 97 chars, got 9"));
    }

    #[test]
    fn io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let err: CodecError = io_err.into();
        assert!(matches!(err, CodecError::Io(_)));
    }
}
