//! # Quake 2 BSP Analyzer
//!
//! Static analysis of Quake 2 `IBSP` (version 38) map files.
//!
//! Given the raw bytes of a `.bsp` file, this library lists the textures,
//! skies, sounds and models the game would load for the map, counts
//! gameplay entities (weapons, armor, pickups, spawn points) and reads the
//! declared map name and version. Nothing is executed and no other files
//! are touched.
//!
//! ## Quick Start
//!
//! ```no_run
//! use q2_bsp_analyzer::{analyze, Result};
//!
//! fn report(path: &str) -> Result<()> {
//!     let data = std::fs::read(path)?;
//!     let result = analyze(&data)?;
//!
//!     println!("Map: {}", result.map_name.as_deref().unwrap_or("(unnamed)"));
//!     for texture in &result.textures {
//!         println!("  {texture}");
//!     }
//!     for warning in &result.warnings {
//!         eprintln!("warning: {warning}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Overview
//!
//! - [`error`] - Error types and result alias
//! - [`binary`] - Bounds-checked little-endian reading
//! - [`format`] - Format constants and the lump catalogue
//! - [`bsp`] - Header, lump directory and TEXINFO decoding
//! - [`entities`] - ENTITIES text tokenizer and classifier
//! - [`analysis`] - The [`analyze`] entry point and [`AnalysisResult`]
//!
//! ## Error Policy
//!
//! Only a buffer shorter than the 8-byte header makes [`analyze`] fail.
//! Everything else is reported inside the returned [`AnalysisResult`] and
//! extraction continues with whatever can still be read.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod analysis;
pub mod binary;
pub mod bsp;
pub mod entities;
pub mod error;
pub mod format;

// Re-export commonly used types at the crate root
pub use analysis::{analyze, AnalysisResult};
pub use bsp::{BspHeader, Lump, LumpDirectory};
pub use entities::{EntityPair, EntityStats, SpawnPoints};
pub use error::{AnalyzerError, Result};
pub use format::LumpType;
