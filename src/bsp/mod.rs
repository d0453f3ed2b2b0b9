//! Binary structure of Quake 2 BSP files.
//!
//! - [`header`]: the 8-byte `IBSP` header
//! - [`lumps`]: the 19-entry lump directory and bounds-checked lump access
//! - [`texinfo`]: texture names from the TEXINFO lump
//!
//! ```
//! use q2_bsp_analyzer::bsp::{BspHeader, LumpDirectory};
//! use q2_bsp_analyzer::format::LumpType;
//!
//! let mut data = b"IBSP\x26\x00\x00\x00".to_vec();
//! data.resize(160, 0);
//!
//! let header = BspHeader::parse(&data).unwrap();
//! let directory = LumpDirectory::parse(&data);
//! assert!(header.has_valid_signature());
//! assert!(directory.is_complete());
//! // Every lump is empty, so none of them can be read.
//! assert!(directory.lump_data(&data, LumpType::Entities).is_err());
//! ```

pub mod header;
pub mod lumps;
pub mod texinfo;

pub use header::{BspHeader, HeaderIssues};
pub use lumps::{Lump, LumpDirectory};
pub use texinfo::{decode_textures, normalize_texture_name};
