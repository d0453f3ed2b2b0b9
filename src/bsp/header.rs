//! Header parser for Quake 2 BSP files.
//!
//! # Header Layout (8 bytes)
//!
//! | Offset | Size | Field | Description |
//! |--------|------|-------|-------------|
//! | 0x00 | 4 | `magic` | `IBSP` |
//! | 0x04 | 4 | `version` | 38 for Quake 2 |
//!
//! Parsing only fails when the buffer is too short to hold these 8 bytes.
//! A wrong signature or version is reported by [`BspHeader::validate`] as a
//! list of recoverable problems so callers can keep going with the presumed
//! layout.

use crate::binary::{read_bytes, read_i32_le};
use crate::error::{AnalyzerError, Result};
use crate::format::{HEADER_SIZE, IBSP_MAGIC, Q2_BSP_VERSION};

/// Parsed 8-byte BSP header.
///
/// # Example
///
/// ```
/// use q2_bsp_analyzer::bsp::BspHeader;
///
/// let data = b"IBSP\x26\x00\x00\x00";
/// let header = BspHeader::parse(data).unwrap();
/// assert!(header.has_valid_signature());
/// assert!(header.is_supported_version());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BspHeader {
    /// Signature at offset 0x00, expected to be `IBSP`.
    pub magic: [u8; 4],

    /// Format version at offset 0x04, expected to be 38.
    pub version: i32,
}

/// Problems found in a header that do not stop the analysis.
#[derive(Debug, Default)]
pub struct HeaderIssues {
    /// Problems that make the rest of the file suspect.
    pub errors: Vec<AnalyzerError>,
    /// Problems that are merely unusual.
    pub warnings: Vec<AnalyzerError>,
}

impl BspHeader {
    /// Parses the header from the start of a BSP file.
    ///
    /// # Errors
    ///
    /// Returns `AnalyzerError::UnexpectedEof` if `data` is shorter than
    /// 8 bytes. This is the only fatal condition of an analysis.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < HEADER_SIZE {
            return Err(AnalyzerError::unexpected_eof(HEADER_SIZE, data.len()));
        }

        let mut magic = [0u8; 4];
        magic.copy_from_slice(read_bytes(data, 0x00, 4)?);
        let version = read_i32_le(data, 0x04)?;

        Ok(BspHeader { magic, version })
    }

    /// Returns whether the signature is `IBSP`.
    #[must_use]
    pub fn has_valid_signature(&self) -> bool {
        &self.magic == IBSP_MAGIC
    }

    /// Returns whether the version is the Quake 2 version (38).
    #[must_use]
    pub fn is_supported_version(&self) -> bool {
        self.version == Q2_BSP_VERSION
    }

    /// Returns the signature as printable text, escaping non-ASCII bytes.
    #[must_use]
    pub fn signature_string(&self) -> String {
        self.magic.escape_ascii().to_string()
    }

    /// Checks the signature and version.
    ///
    /// A signature mismatch is an error, a version mismatch a warning.
    /// Neither prevents further parsing.
    #[must_use]
    pub fn validate(&self) -> HeaderIssues {
        let mut issues = HeaderIssues::default();

        if !self.has_valid_signature() {
            issues
                .errors
                .push(AnalyzerError::invalid_signature(IBSP_MAGIC, &self.magic));
        }

        if !self.is_supported_version() {
            issues.warnings.push(AnalyzerError::UnsupportedVersion {
                expected: Q2_BSP_VERSION,
                found: self.version,
            });
        }

        issues
    }
}
