//! Entity pair classification.
//!
//! A single left-to-right pass over the flat pair stream sorts resource
//! references into typed buckets, counts gameplay entities by classname and
//! captures the map name and version. Map metadata is first-write-wins:
//! once a name or version is seen, later keys are ignored.
//!
//! # Key Rules
//!
//! Rules are checked in this order; the first that applies handles the
//! pair. `vv` is the value with backslashes turned into forward slashes.
//!
//! | Key | Effect |
//! |-----|--------|
//! | `sky` | `env/<vv>*` into skies |
//! | `sound`, `noise`, `snd`, `sound*` | sounds if a sound path, else `key=vv` into others |
//! | `model` | models if it looks like a model path, else `key=vv` into others |
//! | `music`, `cdtrack`, `wav` | sounds |
//! | `wad` | `wad=vv` into others |
//! | starts `path`, contains `file` or `script`, ends `shader` | `key=vv` into others |
//! | `message`, `map`, `mapname` | map name |
//! | `mapversion`, `version` | map version |
//! | `classname` | gameplay counters |

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tracing::trace;

use super::tokenizer::EntityPair;

/// Pickup classnames counted as items.
pub const TRACKED_ITEMS: [&str; 10] = [
    "item_health",
    "item_health_large",
    "item_health_mega",
    "item_quad",
    "item_invulnerability",
    "item_adrenaline",
    "item_bandolier",
    "item_pack",
    "item_power_screen",
    "item_power_shield",
];

const SOUND_EXTENSIONS: [&str; 3] = [".wav", ".ogg", ".mp3"];
const MODEL_EXTENSIONS: [&str; 4] = [".md2", ".sp2", ".iqm", ".md3"];

/// Player start counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SpawnPoints {
    /// `info_player_deathmatch` count.
    pub deathmatch: u32,
    /// `info_player_start` count.
    pub start: u32,
    /// `info_player_coop` count.
    pub coop: u32,
    /// `info_player_intermission` count.
    pub intermission: u32,
}

impl SpawnPoints {
    /// Sum of all spawn point counters.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.deathmatch + self.start + self.coop + self.intermission
    }
}

/// Gameplay entity counts for one map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityStats {
    /// Weapon pickups keyed by classname.
    pub weapons: BTreeMap<String, u32>,
    /// Armor pickups keyed by classname.
    pub armors: BTreeMap<String, u32>,
    /// Other tracked pickups keyed by classname.
    pub items: BTreeMap<String, u32>,
    /// Player start counters.
    pub spawn_points: SpawnPoints,
}

impl EntityStats {
    /// Total number of weapon entities.
    #[must_use]
    pub fn total_weapons(&self) -> u32 {
        self.weapons.values().sum()
    }

    /// Total number of armor entities.
    #[must_use]
    pub fn total_armors(&self) -> u32 {
        self.armors.values().sum()
    }

    /// Total number of tracked item entities.
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.items.values().sum()
    }

    /// Counts one entity of the given lowercase classname.
    ///
    /// Prefix checks run in priority order and the first match wins;
    /// unknown `info_player_*` variants and untracked classnames are
    /// ignored.
    pub fn record_classname(&mut self, classname: &str) {
        if classname.starts_with("weapon_") {
            *self.weapons.entry(classname.to_string()).or_insert(0) += 1;
        } else if classname.starts_with("item_armor_") {
            *self.armors.entry(classname.to_string()).or_insert(0) += 1;
        } else if let Some(kind) = classname.strip_prefix("info_player_") {
            match kind {
                "deathmatch" => self.spawn_points.deathmatch += 1,
                "start" => self.spawn_points.start += 1,
                "coop" => self.spawn_points.coop += 1,
                "intermission" => self.spawn_points.intermission += 1,
                _ => {}
            }
        } else if TRACKED_ITEMS.contains(&classname) {
            *self.items.entry(classname.to_string()).or_insert(0) += 1;
        }
    }
}

/// Everything the classifier extracts from the entity stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedEntities {
    /// Sky image base paths, with a trailing `*` wildcard.
    pub skies: BTreeSet<String>,
    /// Sound and music paths.
    pub sounds: BTreeSet<String>,
    /// Model paths.
    pub models: BTreeSet<String>,
    /// Other resource-like references as `key=value`.
    pub others: BTreeSet<String>,
    /// First map name seen.
    pub map_name: Option<String>,
    /// First map version seen.
    pub map_version: Option<String>,
    /// Gameplay entity counts.
    pub stats: EntityStats,
}

impl ClassifiedEntities {
    /// Applies the key rules to one pair.
    ///
    /// Pairs with an empty value are ignored.
    pub fn classify(&mut self, pair: &EntityPair) {
        let key = pair.key.as_str();
        let raw = pair.value.as_str();
        if raw.is_empty() {
            return;
        }
        let value = raw.replace('\\', "/");
        trace!(key, value = %value, "classifying entity pair");

        match key {
            "sky" => {
                self.skies.insert(format!("env/{value}*"));
            }
            _ if is_sound_key(key) => {
                if looks_like_sound(&value) {
                    self.sounds.insert(value);
                } else {
                    self.others.insert(format!("{key}={value}"));
                }
            }
            "model" => {
                if looks_like_model(&value) {
                    self.models.insert(value);
                } else {
                    self.others.insert(format!("{key}={value}"));
                }
            }
            "music" | "cdtrack" | "wav" => {
                self.sounds.insert(value);
            }
            "wad" => {
                self.others.insert(format!("wad={value}"));
            }
            _ if is_reference_key(key) => {
                self.others.insert(format!("{key}={value}"));
            }
            "message" | "map" | "mapname" => {
                self.map_name.get_or_insert_with(|| raw.to_string());
            }
            "mapversion" | "version" => {
                self.map_version.get_or_insert_with(|| raw.to_string());
            }
            "classname" => self.stats.record_classname(&raw.to_lowercase()),
            _ => {}
        }
    }
}

/// Classifies a whole pair stream in order.
///
/// # Example
///
/// ```
/// use q2_bsp_analyzer::entities::{classify_pairs, tokenize_entities};
///
/// let pairs = tokenize_entities(
///     r#"{ "classname" "worldspawn" "message" "Frag Pit" "sky" "unit1_" }
///        { "classname" "weapon_railgun" }
///        { "classname" "info_player_deathmatch" }"#,
/// );
/// let classified = classify_pairs(&pairs);
///
/// assert_eq!(classified.map_name.as_deref(), Some("Frag Pit"));
/// assert!(classified.skies.contains("env/unit1_*"));
/// assert_eq!(classified.stats.weapons["weapon_railgun"], 1);
/// assert_eq!(classified.stats.spawn_points.deathmatch, 1);
/// ```
#[must_use]
pub fn classify_pairs(pairs: &[EntityPair]) -> ClassifiedEntities {
    pairs
        .iter()
        .fold(ClassifiedEntities::default(), |mut acc, pair| {
            acc.classify(pair);
            acc
        })
}

fn is_sound_key(key: &str) -> bool {
    matches!(key, "noise" | "snd") || key.starts_with("sound")
}

/// Keys that name a file or script without a more specific rule.
fn is_reference_key(key: &str) -> bool {
    key.starts_with("path")
        || key.contains("file")
        || key.contains("script")
        || key.ends_with("shader")
}

fn looks_like_sound(value: &str) -> bool {
    starts_with_ignore_case(value, "sound/") || ends_with_any_ignore_case(value, &SOUND_EXTENSIONS)
}

fn looks_like_model(value: &str) -> bool {
    starts_with_ignore_case(value, "models/")
        || ends_with_any_ignore_case(value, &MODEL_EXTENSIONS)
}

fn starts_with_ignore_case(value: &str, prefix: &str) -> bool {
    value
        .as_bytes()
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix.as_bytes()))
}

fn ends_with_any_ignore_case(value: &str, suffixes: &[&str]) -> bool {
    let bytes = value.as_bytes();
    suffixes.iter().any(|suffix| {
        bytes.len() >= suffix.len()
            && bytes[bytes.len() - suffix.len()..].eq_ignore_ascii_case(suffix.as_bytes())
    })
}
