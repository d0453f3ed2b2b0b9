//! Quake 2 BSP format constants and lump catalogue.
//!
//! A Quake 2 map starts with an 8-byte header followed by a directory of
//! 19 lumps:
//!
//! | Offset | Size | Field | Description |
//! |--------|------|-------|-------------|
//! | 0x00 | 4 | `magic` | `IBSP` |
//! | 0x04 | 4 | `version` | 38 (signed, little-endian) |
//! | 0x08 | 152 | `lumps` | 19 x (`offset: i32`, `length: i32`) |
//!
//! Only the ENTITIES and TEXINFO lumps are decoded by this crate; the rest
//! are catalogued so diagnostics and tooling can name them.
//!
//! # Example
//!
//! ```
//! use q2_bsp_analyzer::format::{LumpType, LUMP_COUNT};
//!
//! assert_eq!(LumpType::TexInfo.index(), 5);
//! assert_eq!(LumpType::from_index(0), Some(LumpType::Entities));
//! assert_eq!(LumpType::ALL.len(), LUMP_COUNT);
//! ```

/// The signature at the start of every Quake 2 BSP file.
pub const IBSP_MAGIC: &[u8; 4] = b"IBSP";

/// The BSP version used by Quake 2.
pub const Q2_BSP_VERSION: i32 = 38;

/// Size of the fixed header (magic + version) in bytes.
pub const HEADER_SIZE: usize = 8;

/// Number of entries in the Quake 2 lump directory.
pub const LUMP_COUNT: usize = 19;

/// Size of one lump directory entry in bytes.
pub const LUMP_ENTRY_SIZE: usize = 8;

/// Byte offset where the lump directory begins.
pub const LUMP_TABLE_OFFSET: usize = HEADER_SIZE;

/// Stride of one texture-info record in bytes.
pub const TEXINFO_STRIDE: usize = 76;

/// Offset of the texture name field within a texture-info record.
///
/// The preceding 40 bytes hold two 4-float projection vectors, the surface
/// flags and the light value.
pub const TEXINFO_NAME_OFFSET: usize = 40;

/// Length of the texture name field in bytes.
pub const TEXINFO_NAME_LEN: usize = 32;

/// The 19 lumps of a Quake 2 BSP, in directory order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LumpType {
    /// Entity definitions as plain text.
    Entities = 0,
    /// Splitting planes.
    Planes = 1,
    /// Vertex positions.
    Vertexes = 2,
    /// Compressed PVS/PHS data.
    Visibility = 3,
    /// BSP tree nodes.
    Nodes = 4,
    /// Texture projection records.
    TexInfo = 5,
    /// Surface faces.
    Faces = 6,
    /// Lightmap samples.
    Lighting = 7,
    /// BSP tree leaves.
    Leafs = 8,
    /// Leaf to face references.
    LeafFaces = 9,
    /// Leaf to brush references.
    LeafBrushes = 10,
    /// Edges.
    Edges = 11,
    /// Face to edge references.
    SurfEdges = 12,
    /// Inline brush models.
    Models = 13,
    /// Brushes.
    Brushes = 14,
    /// Brush sides.
    BrushSides = 15,
    /// Unused.
    Pop = 16,
    /// Areas.
    Areas = 17,
    /// Area portals.
    AreaPortals = 18,
}

impl LumpType {
    /// Every lump type in directory order.
    pub const ALL: [LumpType; LUMP_COUNT] = [
        LumpType::Entities,
        LumpType::Planes,
        LumpType::Vertexes,
        LumpType::Visibility,
        LumpType::Nodes,
        LumpType::TexInfo,
        LumpType::Faces,
        LumpType::Lighting,
        LumpType::Leafs,
        LumpType::LeafFaces,
        LumpType::LeafBrushes,
        LumpType::Edges,
        LumpType::SurfEdges,
        LumpType::Models,
        LumpType::Brushes,
        LumpType::BrushSides,
        LumpType::Pop,
        LumpType::Areas,
        LumpType::AreaPortals,
    ];

    /// Returns the lump at the given directory index.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Returns the directory index of this lump.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the lowercase name of this lump.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            LumpType::Entities => "entities",
            LumpType::Planes => "planes",
            LumpType::Vertexes => "vertexes",
            LumpType::Visibility => "visibility",
            LumpType::Nodes => "nodes",
            LumpType::TexInfo => "texinfo",
            LumpType::Faces => "faces",
            LumpType::Lighting => "lighting",
            LumpType::Leafs => "leafs",
            LumpType::LeafFaces => "leaffaces",
            LumpType::LeafBrushes => "leafbrushes",
            LumpType::Edges => "edges",
            LumpType::SurfEdges => "surfedges",
            LumpType::Models => "models",
            LumpType::Brushes => "brushes",
            LumpType::BrushSides => "brushsides",
            LumpType::Pop => "pop",
            LumpType::Areas => "areas",
            LumpType::AreaPortals => "areaportals",
        }
    }

    /// Returns the uppercase label used in diagnostics (e.g. `TEXINFO`).
    #[must_use]
    pub fn label(self) -> String {
        self.name().to_ascii_uppercase()
    }
}
