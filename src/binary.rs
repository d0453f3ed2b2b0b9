//! Binary reading utilities for parsing BSP files.
//!
//! All functions perform bounds checking and return
//! [`AnalyzerError::UnexpectedEof`] for truncated data instead of panicking.
//! Multi-byte integers in Quake 2 BSP files are little-endian.
//!
//! # Example
//!
//! ```
//! use q2_bsp_analyzer::binary::{read_bytes, read_i32_le, read_fixed_string};
//!
//! let data = [b'I', b'B', b'S', b'P', 0x26, 0x00, 0x00, 0x00];
//!
//! assert_eq!(read_bytes(&data, 0, 4).unwrap(), b"IBSP");
//! assert_eq!(read_i32_le(&data, 4).unwrap(), 38);
//! assert_eq!(read_fixed_string(&data, 0, 4).unwrap(), "IBSP");
//! ```

use crate::error::{AnalyzerError, Result};

/// Reads a little-endian i32 value from the byte buffer at the given offset.
///
/// # Errors
///
/// Returns `AnalyzerError::UnexpectedEof` if the buffer doesn't contain
/// at least 4 bytes starting from the given offset.
///
/// # Example
///
/// ```
/// use q2_bsp_analyzer::binary::read_i32_le;
///
/// let data = [0xFF, 0xFF, 0xFF, 0xFF, 0xA0, 0x00, 0x00, 0x00];
/// assert_eq!(read_i32_le(&data, 0).unwrap(), -1);
/// assert_eq!(read_i32_le(&data, 4).unwrap(), 160);
/// ```
pub fn read_i32_le(bytes: &[u8], offset: usize) -> Result<i32> {
    let slice = read_bytes(bytes, offset, 4)?;
    Ok(i32::from_le_bytes([slice[0], slice[1], slice[2], slice[3]]))
}

/// Reads a slice of bytes from the buffer at the given offset.
///
/// # Errors
///
/// Returns `AnalyzerError::UnexpectedEof` if the buffer doesn't contain
/// at least `len` bytes starting from the given offset.
pub fn read_bytes(bytes: &[u8], offset: usize, len: usize) -> Result<&[u8]> {
    let end = offset.saturating_add(len);
    if end > bytes.len() {
        return Err(AnalyzerError::unexpected_eof(end, bytes.len()));
    }

    Ok(&bytes[offset..end])
}

/// Reads a fixed-length string field, stopping at the first null byte.
///
/// Bytes after the terminator are ignored. Bytes that are not valid UTF-8
/// are replaced rather than rejected, since map files are assumed to carry
/// ASCII but are not guaranteed to.
///
/// # Errors
///
/// Returns `AnalyzerError::UnexpectedEof` if `offset + len` is beyond the
/// buffer.
///
/// # Example
///
/// ```
/// use q2_bsp_analyzer::binary::read_fixed_string;
///
/// let data = b"e1u1/wall01\x00\x00\x00\x00\x00";
/// assert_eq!(read_fixed_string(data, 0, 16).unwrap(), "e1u1/wall01");
/// ```
pub fn read_fixed_string(bytes: &[u8], offset: usize, len: usize) -> Result<String> {
    let slice = read_bytes(bytes, offset, len)?;
    let string_len = slice.iter().position(|&b| b == 0).unwrap_or(len);

    Ok(String::from_utf8_lossy(&slice[..string_len]).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================
    // read_i32_le tests
    // ========================

    #[test]
    fn test_read_i32_le_basic() {
        let data = [0x78, 0x56, 0x34, 0x12];
        assert_eq!(read_i32_le(&data, 0).unwrap(), 0x1234_5678);
    }

    #[test]
    fn test_read_i32_le_negative() {
        let data = (-160i32).to_le_bytes();
        assert_eq!(read_i32_le(&data, 0).unwrap(), -160);
    }

    #[test]
    fn test_read_i32_le_with_offset() {
        let data = [0x00, 0x00, 0x26, 0x00, 0x00, 0x00];
        assert_eq!(read_i32_le(&data, 2).unwrap(), 38);
    }

    #[test]
    fn test_read_i32_le_too_short() {
        let data = [0x78, 0x56, 0x34];
        let result = read_i32_le(&data, 0);
        assert!(matches!(
            result,
            Err(AnalyzerError::UnexpectedEof {
                expected: 4,
                available: 3
            })
        ));
    }

    #[test]
    fn test_read_i32_le_offset_beyond_buffer() {
        let data = [0x00; 4];
        assert!(read_i32_le(&data, 100).is_err());
        assert!(read_i32_le(&data, usize::MAX).is_err());
    }

    // ========================
    // read_bytes tests
    // ========================

    #[test]
    fn test_read_bytes_basic() {
        let data = b"IBSP\x26\x00\x00\x00";
        assert_eq!(read_bytes(data, 0, 4).unwrap(), b"IBSP");
    }

    #[test]
    fn test_read_bytes_overflow() {
        let data = b"IBSP";
        let result = read_bytes(data, 2, 4);
        assert!(matches!(
            result,
            Err(AnalyzerError::UnexpectedEof {
                expected: 6,
                available: 4
            })
        ));
    }

    #[test]
    fn test_read_bytes_zero_length() {
        let data = b"IBSP";
        assert_eq!(read_bytes(data, 4, 0).unwrap(), &[] as &[u8]);
    }

    // ========================
    // read_fixed_string tests
    // ========================

    #[test]
    fn test_read_fixed_string_null_padded() {
        let data = b"Hi\x00\x00\x00\x00\x00\x00";
        assert_eq!(read_fixed_string(data, 0, 8).unwrap(), "Hi");
    }

    #[test]
    fn test_read_fixed_string_full_length() {
        let data = b"HelloWorld";
        assert_eq!(read_fixed_string(data, 0, 8).unwrap(), "HelloWor");
    }

    #[test]
    fn test_read_fixed_string_ignores_bytes_after_null() {
        let data = b"sky\x00junk";
        assert_eq!(read_fixed_string(data, 0, 8).unwrap(), "sky");
    }

    #[test]
    fn test_read_fixed_string_invalid_utf8_is_replaced() {
        let data = [b'a', 0xFF, b'b', 0x00];
        let s = read_fixed_string(&data, 0, 4).unwrap();
        assert!(s.starts_with('a'));
        assert!(s.ends_with('b'));
    }

    #[test]
    fn test_read_fixed_string_overflow() {
        let data = b"Hi";
        assert!(matches!(
            read_fixed_string(data, 0, 8),
            Err(AnalyzerError::UnexpectedEof { .. })
        ));
    }
}
