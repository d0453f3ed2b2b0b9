//! Texture-info lump decoder.
//!
//! The TEXINFO lump is an array of 76-byte records:
//!
//! | Offset | Size | Field | Description |
//! |--------|------|-------|-------------|
//! | 0x00 | 32 | `vecs` | Two 4-float texture projection vectors |
//! | 0x20 | 4 | `flags` | Surface flags |
//! | 0x24 | 4 | `value` | Light emission value |
//! | 0x28 | 32 | `texture` | NUL-padded texture name |
//! | 0x48 | 4 | `nexttexinfo` | Animation chain index |
//!
//! Only the texture name is consumed. Names are resolved the way the game
//! resolves them: relative to `textures/` with a `.wal` extension appended.

use std::collections::BTreeSet;

use tracing::debug;

use crate::binary::read_fixed_string;
use crate::format::{TEXINFO_NAME_LEN, TEXINFO_NAME_OFFSET, TEXINFO_STRIDE};

/// Returns the number of whole records in a lump of `length` bytes.
///
/// Trailing bytes that do not form a complete record are ignored.
#[must_use]
pub fn record_count(length: usize) -> usize {
    length / TEXINFO_STRIDE
}

/// Reads the raw texture name of record `index`, trimmed of whitespace and NULs.
///
/// Returns `None` when the record lies outside `lump`.
#[must_use]
pub fn texture_name(lump: &[u8], index: usize) -> Option<String> {
    let offset = index
        .checked_mul(TEXINFO_STRIDE)?
        .checked_add(TEXINFO_NAME_OFFSET)?;
    let name = read_fixed_string(lump, offset, TEXINFO_NAME_LEN).ok()?;

    Some(
        name.trim_matches(|c: char| c.is_whitespace() || c == '\0')
            .to_string(),
    )
}

/// Converts a stored texture name into the path the game loads.
///
/// A leading `textures/` or `textures\` is removed (case-insensitive),
/// backslashes become forward slashes and the result is always placed
/// under `textures/` with a `.wal` extension, even if the name already
/// has an extension.
///
/// # Example
///
/// ```
/// use q2_bsp_analyzer::bsp::normalize_texture_name;
///
/// assert_eq!(normalize_texture_name("e1u1/wall01"), "textures/e1u1/wall01.wal");
/// assert_eq!(normalize_texture_name("TEXTURES\\e1u1\\floor"), "textures/e1u1/floor.wal");
/// assert_eq!(normalize_texture_name("e1u1/sky.tga"), "textures/e1u1/sky.tga.wal");
/// ```
#[must_use]
pub fn normalize_texture_name(name: &str) -> String {
    const PREFIX_LEN: usize = "textures/".len();

    let stripped = match name.get(..PREFIX_LEN) {
        Some(prefix)
            if prefix.eq_ignore_ascii_case("textures/")
                || prefix.eq_ignore_ascii_case("textures\\") =>
        {
            &name[PREFIX_LEN..]
        }
        _ => name,
    };

    format!("textures/{}.wal", stripped.replace('\\', "/"))
}

/// Decodes every texture reference in a TEXINFO lump.
///
/// Records with an empty name are skipped. The returned set is sorted and
/// free of duplicates.
///
/// # Example
///
/// ```
/// use q2_bsp_analyzer::bsp::decode_textures;
///
/// let mut lump = vec![0u8; 76];
/// lump[40..51].copy_from_slice(b"e1u1/wall01");
///
/// let textures = decode_textures(&lump);
/// assert_eq!(textures.len(), 1);
/// assert!(textures.contains("textures/e1u1/wall01.wal"));
/// ```
#[must_use]
pub fn decode_textures(lump: &[u8]) -> BTreeSet<String> {
    let count = record_count(lump.len());
    let textures: BTreeSet<String> = (0..count)
        .filter_map(|index| texture_name(lump, index))
        .filter(|name| !name.is_empty())
        .map(|name| normalize_texture_name(&name))
        .collect();

    debug!(
        records = count,
        unique = textures.len(),
        "decoded texinfo lump"
    );
    textures
}
