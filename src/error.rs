//! Error types for the Quake 2 BSP analyzer.
//!
//! Only one condition is fatal to an analysis: a buffer too small to hold
//! the 8-byte header. Every other variant describes a recoverable problem
//! and is rendered through its `Display` implementation into the
//! `errors` or `warnings` list of an [`AnalysisResult`](crate::AnalysisResult).

use thiserror::Error;

use crate::format::LumpType;

/// The main error type for BSP analysis operations.
///
/// # Example
///
/// ```
/// use q2_bsp_analyzer::error::{AnalyzerError, Result};
///
/// fn example_operation() -> Result<()> {
///     Err(AnalyzerError::unexpected_eof(8, 3))
/// }
///
/// assert!(example_operation().is_err());
/// ```
#[derive(Error, Debug)]
pub enum AnalyzerError {
    /// An I/O error occurred while reading a map file.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The file does not start with the `IBSP` signature.
    #[error("Invalid BSP signature: expected \"{expected}\", found \"{found}\"")]
    InvalidSignature {
        /// The expected signature.
        expected: String,
        /// The signature actually present in the file (ASCII-escaped).
        found: String,
    },

    /// The header carries a version other than 38.
    #[error("Unexpected BSP version: expected {expected}, found {found}")]
    UnsupportedVersion {
        /// The version this analyzer understands.
        expected: i32,
        /// The version stored in the header.
        found: i32,
    },

    /// The lump directory ended before all entries were read.
    #[error("Unexpected end of file in lump table: read {read} of {expected} entries")]
    TruncatedLumpTable {
        /// Number of entries successfully read.
        read: usize,
        /// Number of entries a complete directory has.
        expected: usize,
    },

    /// A lump is empty, missing from the directory or points outside the file.
    #[error("{} lump unavailable: {reason}", .lump.label())]
    LumpUnavailable {
        /// The lump that could not be used.
        lump: LumpType,
        /// Why the lump was rejected.
        reason: String,
    },

    /// The data ended unexpectedly before the required bytes could be read.
    #[error("Unexpected end of data: expected {expected} bytes, but only {available} available")]
    UnexpectedEof {
        /// The number of bytes that were expected to be available.
        expected: usize,
        /// The actual number of bytes available.
        available: usize,
    },
}

impl AnalyzerError {
    /// Creates an `InvalidSignature` error from raw signature bytes.
    ///
    /// Non-printable bytes are escaped so the message stays readable.
    ///
    /// ```
    /// use q2_bsp_analyzer::error::AnalyzerError;
    ///
    /// let err = AnalyzerError::invalid_signature(b"IBSP", b"XXXX");
    /// assert!(err.to_string().contains("\"IBSP\""));
    /// assert!(err.to_string().contains("\"XXXX\""));
    /// ```
    #[must_use]
    pub fn invalid_signature(expected: &[u8], found: &[u8]) -> Self {
        AnalyzerError::InvalidSignature {
            expected: expected.escape_ascii().to_string(),
            found: found.escape_ascii().to_string(),
        }
    }

    /// Creates an `UnexpectedEof` error with the given sizes.
    #[must_use]
    pub fn unexpected_eof(expected: usize, available: usize) -> Self {
        AnalyzerError::UnexpectedEof {
            expected,
            available,
        }
    }

    /// Creates a `LumpUnavailable` error for the given lump.
    #[must_use]
    pub fn lump_unavailable(lump: LumpType, reason: impl Into<String>) -> Self {
        AnalyzerError::LumpUnavailable {
            lump,
            reason: reason.into(),
        }
    }

    /// Returns whether this error aborts an analysis.
    ///
    /// A buffer too short for the header and a failed file read are fatal;
    /// everything else is recorded in the result and processing continues.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            AnalyzerError::UnexpectedEof { .. } | AnalyzerError::IoError(_)
        )
    }
}

/// A specialized Result type for BSP analysis operations.
pub type Result<T> = std::result::Result<T, AnalyzerError>;
