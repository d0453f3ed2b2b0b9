//! ENTITIES lump parsing and classification.
//!
//! - [`tokenizer`]: flat `"key" "value"` pair extraction
//! - [`classifier`]: resource buckets, gameplay counters and map metadata

pub mod classifier;
pub mod tokenizer;

pub use classifier::{classify_pairs, ClassifiedEntities, EntityStats, SpawnPoints, TRACKED_ITEMS};
pub use tokenizer::{entities_text, tokenize_entities, EntityPair};
