//! Error types for the devreport parsing pipeline.
//!
//! This module defines one error type per pipeline layer:
//!
//! - [`ParseError`] - Line classification and report assembly failures
//! - [`RenderError`] - Output rendering failures
//! - [`ReportError`] - Top-level file/bytes entry-point failures
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries. Every failure aborts
//! the current parse attempt; nothing is retried internally, and the
//! message of each variant is what the caller shows to the end user.

use thiserror::Error;

use crate::models::LineKind;

// =============================================================================
// Parse Errors
// =============================================================================

/// Errors during line classification and report assembly.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// First field of a line is not one of the known record type tags.
    #[error("Unknown record type: {0}")]
    UnknownRecordType(String),

    /// A line has the wrong number of `|`-separated parts for its kind.
    #[error("Malformed {kind} line: expected {expected} parts, found {found}")]
    MalformedLine {
        kind: LineKind,
        expected: usize,
        found: usize,
    },

    /// Trailer count field is not a valid base-10 integer.
    #[error("Invalid count in trailer line: {0} is not a valid number")]
    InvalidCount(String),

    /// More than one header line in the file.
    #[error("Multiple header lines found")]
    DuplicateHeader,

    /// More than one trailer line in the file.
    #[error("Multiple trailer lines found")]
    DuplicateTrailer,

    /// No header line in the file.
    #[error("No header record found")]
    MissingHeader,

    /// No trailer line in the file.
    #[error("No trailer record found")]
    MissingTrailer,

    /// Trailer count disagrees with the number of record lines.
    #[error("Record count mismatch: expected {expected}, found {found}")]
    RecordCountMismatch { expected: i64, found: usize },
}

// =============================================================================
// Render Errors
// =============================================================================

/// Errors during report rendering.
///
/// Rendering a valid [`crate::models::DeviceReport`] always succeeds; this
/// type exists so the JSON encoder's error can propagate through `?`.
#[derive(Debug, Error)]
pub enum RenderError {
    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// =============================================================================
// Report Errors (top-level)
// =============================================================================

/// Top-level errors from the file and bytes entry points.
///
/// This is the error type returned by [`crate::parser::parse_report_file`]
/// and [`crate::parser::parse_report_bytes`]. Parse failures pass through
/// transparently so the user sees the parser's message unchanged.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Failed to read the input file.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// Parse failure.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for classification and assembly operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Result type for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Result type for file/bytes entry points.
pub type ReportResult<T> = Result<T, ReportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_messages() {
        assert_eq!(
            ParseError::UnknownRecordType("X".into()).to_string(),
            "Unknown record type: X"
        );
        assert_eq!(
            ParseError::MalformedLine {
                kind: LineKind::Record,
                expected: 5,
                found: 3,
            }
            .to_string(),
            "Malformed Record line: expected 5 parts, found 3"
        );
        assert_eq!(
            ParseError::InvalidCount("abc".into()).to_string(),
            "Invalid count in trailer line: abc is not a valid number"
        );
        assert_eq!(
            ParseError::RecordCountMismatch {
                expected: 1,
                found: 2,
            }
            .to_string(),
            "Record count mismatch: expected 1, found 2"
        );
    }

    #[test]
    fn test_mandatory_line_messages() {
        assert_eq!(ParseError::MissingHeader.to_string(), "No header record found");
        assert_eq!(ParseError::MissingTrailer.to_string(), "No trailer record found");
        assert_eq!(ParseError::DuplicateHeader.to_string(), "Multiple header lines found");
        assert_eq!(ParseError::DuplicateTrailer.to_string(), "Multiple trailer lines found");
    }

    #[test]
    fn test_error_conversion_chain() {
        // ParseError -> ReportError, message passes through unchanged
        let parse_err = ParseError::MissingHeader;
        let report_err: ReportError = parse_err.into();
        assert_eq!(report_err.to_string(), "No header record found");

        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let report_err: ReportError = io_err.into();
        assert!(report_err.to_string().contains("Failed to read file"));
    }
}
