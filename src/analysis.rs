//! Whole-file analysis and the result record.
//!
//! [`analyze`] drives the decoders over one buffer and merges their output
//! into an [`AnalysisResult`]. Problems found along the way are collected as
//! human-readable strings in `errors` (the file is probably not a valid
//! Quake 2 map) or `warnings` (something could not be extracted), in the
//! order they were found.

use std::collections::BTreeSet;
use std::fmt::Display;

use serde::Serialize;
use tracing::debug;

use crate::bsp::{decode_textures, BspHeader, LumpDirectory};
use crate::entities::{
    classify_pairs, entities_text, tokenize_entities, ClassifiedEntities, EntityStats,
};
use crate::error::Result;
use crate::format::LumpType;

/// Warning recorded when the TEXINFO lump cannot be read.
///
/// The separator is an ASCII `" - "`, not an em-dash, so exact-text
/// matches must use this constant.
pub const TEXINFO_MISSING_WARNING: &str =
    "TEXINFO lump missing or corrupt - textures may not be found";

/// Warning recorded when the ENTITIES lump cannot be read.
pub const ENTITIES_MISSING_WARNING: &str = "ENTITIES lump missing or corrupt";

/// Resources and gameplay metadata extracted from one map.
///
/// Resource sets are sorted and duplicate-free. Serializes with camelCase
/// keys (`mapName`, `entityStats`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Recoverable errors, in the order found.
    pub errors: Vec<String>,
    /// Warnings, in the order found.
    pub warnings: Vec<String>,
    /// Map name from the first `message`, `map` or `mapname` key.
    pub map_name: Option<String>,
    /// Map version from the first `mapversion` or `version` key.
    pub map_version: Option<String>,
    /// Wall textures as `textures/<name>.wal`.
    pub textures: BTreeSet<String>,
    /// Sky base paths as `env/<name>*`.
    pub skies: BTreeSet<String>,
    /// Sound and music paths.
    pub sounds: BTreeSet<String>,
    /// Model paths.
    pub models: BTreeSet<String>,
    /// Other references as `key=value`.
    pub others: BTreeSet<String>,
    /// Gameplay entity counts.
    pub entity_stats: EntityStats,
}

impl AnalysisResult {
    /// Returns whether no errors were recorded. Warnings are allowed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Total number of entries across all resource sets.
    #[must_use]
    pub fn resource_count(&self) -> usize {
        self.textures.len()
            + self.skies.len()
            + self.sounds.len()
            + self.models.len()
            + self.others.len()
    }
}

/// Errors and warnings collected during one analysis.
#[derive(Debug, Default)]
struct Diagnostics {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl Diagnostics {
    fn error(&mut self, message: impl Display) {
        let message = message.to_string();
        debug!(%message, "analysis error");
        self.errors.push(message);
    }

    fn warning(&mut self, message: impl Display) {
        let message = message.to_string();
        debug!(%message, "analysis warning");
        self.warnings.push(message);
    }
}

/// Analyzes a Quake 2 BSP file held in memory.
///
/// Always returns a result for buffers of 8 bytes or more. A bad signature,
/// unexpected version, truncated lump table or unreadable lump is recorded
/// in the result and extraction continues with whatever can be read.
///
/// # Errors
///
/// Returns `AnalyzerError::UnexpectedEof` if `data` is shorter than the
/// 8-byte header.
///
/// # Example
///
/// ```
/// use q2_bsp_analyzer::analyze;
///
/// assert!(analyze(b"IBSP").is_err());
///
/// let result = analyze(b"IBSP\x26\x00\x00\x00").unwrap();
/// assert_eq!(result.errors.len(), 1); // lump table truncated
/// assert!(result.textures.is_empty());
/// ```
pub fn analyze(data: &[u8]) -> Result<AnalysisResult> {
    let header = BspHeader::parse(data)?;
    let mut diagnostics = Diagnostics::default();

    let issues = header.validate();
    for error in issues.errors {
        diagnostics.error(error);
    }
    for warning in issues.warnings {
        diagnostics.warning(warning);
    }

    let directory = LumpDirectory::parse(data);
    if let Some(error) = directory.truncation_error() {
        diagnostics.error(error);
    }
    debug!(
        signature = %header.signature_string(),
        version = header.version,
        lumps = directory.len(),
        "parsed bsp header"
    );

    let textures = match directory.lump_data(data, LumpType::TexInfo) {
        Ok(lump) => decode_textures(lump),
        Err(err) => {
            debug!(%err, "skipping texinfo lump");
            diagnostics.warning(TEXINFO_MISSING_WARNING);
            BTreeSet::new()
        }
    };

    let entities = match directory.lump_data(data, LumpType::Entities) {
        Ok(lump) => classify_pairs(&tokenize_entities(&entities_text(lump))),
        Err(err) => {
            debug!(%err, "skipping entities lump");
            diagnostics.warning(ENTITIES_MISSING_WARNING);
            ClassifiedEntities::default()
        }
    };

    let ClassifiedEntities {
        skies,
        sounds,
        models,
        others,
        map_name,
        map_version,
        stats,
    } = entities;

    Ok(AnalysisResult {
        errors: diagnostics.errors,
        warnings: diagnostics.warnings,
        map_name,
        map_version,
        textures,
        skies,
        sounds,
        models,
        others,
        entity_stats: stats,
    })
}
