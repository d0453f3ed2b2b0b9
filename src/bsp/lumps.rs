//! Lump directory reader.
//!
//! The directory follows the 8-byte header and holds up to 19 entries of
//! two little-endian `i32` values each: `offset` and `length`. Reading stops
//! at the first entry that does not fit in the buffer; entries read so far
//! are kept.
//!
//! The reader does not validate the ranges it returns. Bounds are checked
//! when a consumer asks for a lump's bytes through
//! [`LumpDirectory::lump_data`] or [`Lump::slice`].

use tracing::debug;

use crate::binary::read_i32_le;
use crate::error::{AnalyzerError, Result};
use crate::format::{LumpType, LUMP_COUNT, LUMP_ENTRY_SIZE, LUMP_TABLE_OFFSET};

/// A single `(offset, length)` directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Lump {
    /// Byte offset of the lump from the start of the file.
    pub offset: i32,
    /// Length of the lump in bytes.
    pub length: i32,
}

impl Lump {
    /// Returns the bytes this lump covers within `data`.
    ///
    /// # Errors
    ///
    /// Returns `AnalyzerError::LumpUnavailable` if the offset or length is
    /// negative, the length is zero, or the range extends past the end of
    /// `data`.
    ///
    /// # Example
    ///
    /// ```
    /// use q2_bsp_analyzer::bsp::Lump;
    /// use q2_bsp_analyzer::format::LumpType;
    ///
    /// let data = b"0123456789";
    /// let lump = Lump { offset: 2, length: 3 };
    /// assert_eq!(lump.slice(data, LumpType::Entities).unwrap(), b"234");
    ///
    /// let past_end = Lump { offset: 8, length: 3 };
    /// assert!(past_end.slice(data, LumpType::Entities).is_err());
    /// ```
    pub fn slice<'a>(&self, data: &'a [u8], lump: LumpType) -> Result<&'a [u8]> {
        let (Ok(offset), Ok(length)) = (usize::try_from(self.offset), usize::try_from(self.length))
        else {
            return Err(AnalyzerError::lump_unavailable(
                lump,
                format!(
                    "negative range (offset {}, length {})",
                    self.offset, self.length
                ),
            ));
        };

        if length == 0 {
            return Err(AnalyzerError::lump_unavailable(lump, "lump is empty"));
        }

        match offset.checked_add(length) {
            Some(end) if end <= data.len() => Ok(&data[offset..end]),
            _ => Err(AnalyzerError::lump_unavailable(
                lump,
                format!(
                    "range {}+{} exceeds file size {}",
                    self.offset,
                    self.length,
                    data.len()
                ),
            )),
        }
    }
}

/// The lump directory of a BSP file.
///
/// # Example
///
/// ```
/// use q2_bsp_analyzer::bsp::LumpDirectory;
///
/// // Header only, no directory entries at all.
/// let data = b"IBSP\x26\x00\x00\x00";
/// let directory = LumpDirectory::parse(data);
/// assert!(directory.is_empty());
/// assert!(!directory.is_complete());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LumpDirectory {
    entries: Vec<Lump>,
}

impl LumpDirectory {
    /// Reads the directory starting at byte 8 of `data`.
    ///
    /// Never fails; a short buffer yields a partial directory, which
    /// [`is_complete`](Self::is_complete) reports.
    #[must_use]
    pub fn parse(data: &[u8]) -> Self {
        let mut entries = Vec::with_capacity(LUMP_COUNT);

        for index in 0..LUMP_COUNT {
            let base = LUMP_TABLE_OFFSET + index * LUMP_ENTRY_SIZE;
            let (Ok(offset), Ok(length)) = (read_i32_le(data, base), read_i32_le(data, base + 4))
            else {
                debug!(read = index, "lump table truncated");
                break;
            };
            entries.push(Lump { offset, length });
        }

        LumpDirectory { entries }
    }

    /// Returns whether all 19 entries were read.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.entries.len() == LUMP_COUNT
    }

    /// Returns the truncation error for an incomplete directory.
    #[must_use]
    pub fn truncation_error(&self) -> Option<AnalyzerError> {
        (!self.is_complete()).then(|| AnalyzerError::TruncatedLumpTable {
            read: self.entries.len(),
            expected: LUMP_COUNT,
        })
    }

    /// Returns the number of entries read.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether no entries were read.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the directory entry for a lump, if it was read.
    #[must_use]
    pub fn get(&self, lump: LumpType) -> Option<Lump> {
        self.entries.get(lump.index()).copied()
    }

    /// Iterates over the entries read, paired with their lump type.
    pub fn iter(&self) -> impl Iterator<Item = (LumpType, Lump)> + '_ {
        LumpType::ALL.iter().copied().zip(self.entries.iter().copied())
    }

    /// Returns the bytes of a lump after checking its range.
    ///
    /// # Errors
    ///
    /// Returns `AnalyzerError::LumpUnavailable` if the entry was not read
    /// or its range is unusable.
    pub fn lump_data<'a>(&self, data: &'a [u8], lump: LumpType) -> Result<&'a [u8]> {
        self.get(lump)
            .ok_or_else(|| AnalyzerError::lump_unavailable(lump, "missing from lump table"))?
            .slice(data, lump)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory_bytes(entries: &[(i32, i32)]) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(b"IBSP");
        data.extend_from_slice(&38i32.to_le_bytes());
        for (offset, length) in entries {
            data.extend_from_slice(&offset.to_le_bytes());
            data.extend_from_slice(&length.to_le_bytes());
        }
        data
    }

    #[test]
    fn test_parse_full_directory() {
        let entries: Vec<(i32, i32)> = (0..19).map(|i| (160 + i * 4, i)).collect();
        let data = directory_bytes(&entries);
        let directory = LumpDirectory::parse(&data);

        assert!(directory.is_complete());
        assert!(directory.truncation_error().is_none());
        assert_eq!(directory.len(), 19);
        assert_eq!(
            directory.get(LumpType::TexInfo),
            Some(Lump {
                offset: 180,
                length: 5
            })
        );
        assert_eq!(directory.iter().count(), 19);
    }

    #[test]
    fn test_parse_truncated_directory_keeps_entries() {
        let mut data = directory_bytes(&[(10, 20), (30, 40), (50, 60)]);
        // Half an entry trailing.
        data.extend_from_slice(&[0x01, 0x02, 0x03, 0x04, 0x05]);
        let directory = LumpDirectory::parse(&data);

        assert!(!directory.is_complete());
        assert_eq!(directory.len(), 3);
        assert_eq!(
            directory.get(LumpType::Vertexes),
            Some(Lump {
                offset: 50,
                length: 60
            })
        );
        assert_eq!(directory.get(LumpType::Visibility), None);
        assert!(matches!(
            directory.truncation_error(),
            Some(AnalyzerError::TruncatedLumpTable {
                read: 3,
                expected: 19
            })
        ));
    }

    #[test]
    fn test_lump_data_missing_entry() {
        let data = directory_bytes(&[(0, 4)]);
        let directory = LumpDirectory::parse(&data);

        assert_eq!(
            directory.lump_data(&data, LumpType::Entities).unwrap(),
            b"IBSP"
        );
        let err = directory.lump_data(&data, LumpType::TexInfo).unwrap_err();
        assert!(err.to_string().contains("missing from lump table"));
    }

    #[test]
    fn test_slice_rejects_bad_ranges() {
        let data = [0u8; 32];

        let negative_offset = Lump {
            offset: -1,
            length: 4,
        };
        assert!(negative_offset.slice(&data, LumpType::Entities).is_err());

        let negative_length = Lump {
            offset: 0,
            length: -4,
        };
        assert!(negative_length.slice(&data, LumpType::Entities).is_err());

        let empty = Lump {
            offset: 4,
            length: 0,
        };
        let err = empty.slice(&data, LumpType::Entities).unwrap_err();
        assert!(err.to_string().contains("empty"));

        let past_end = Lump {
            offset: 30,
            length: 3,
        };
        assert!(past_end.slice(&data, LumpType::Entities).is_err());

        let overflow = Lump {
            offset: i32::MAX,
            length: i32::MAX,
        };
        assert!(overflow.slice(&data, LumpType::Entities).is_err());
    }

    #[test]
    fn test_slice_exact_end() {
        let data = [7u8; 16];
        let lump = Lump {
            offset: 8,
            length: 8,
        };
        assert_eq!(lump.slice(&data, LumpType::TexInfo).unwrap(), &[7u8; 8]);
    }
}
