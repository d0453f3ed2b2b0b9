//! Key/value tokenizer for the ENTITIES lump.
//!
//! The lump is plain text of the form
//!
//! ```text
//! {
//! "classname" "worldspawn"
//! "message" "The Edge"
//! }
//! {
//! "classname" "weapon_shotgun"
//! "origin" "64 -128 24"
//! }
//! ```
//!
//! The tokenizer does not track braces. It finds every `"key" "value"`
//! pair left to right, without overlap, and skips anything between pairs
//! that does not fit the pattern. All entities therefore arrive as one flat
//! stream; the classifier is written so that this is sufficient.

use std::borrow::Cow;

use tracing::debug;

/// Marker that opens and closes every key and value.
const QUOTE: u8 = b'"';

/// A key/value pair from the entity text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityPair {
    /// The key, lowercased.
    pub key: String,
    /// The value exactly as written, possibly empty.
    pub value: String,
}

impl EntityPair {
    /// Creates a pair, lowercasing the key.
    #[must_use]
    pub fn new(key: &str, value: &str) -> Self {
        EntityPair {
            key: key.to_lowercase(),
            value: value.to_string(),
        }
    }
}

/// Interprets the raw ENTITIES lump as text.
///
/// The format is ASCII; any invalid UTF-8 is replaced rather than rejected.
#[must_use]
pub fn entities_text(lump: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(lump)
}

/// Splits entity text into key/value pairs in order of appearance.
///
/// # Example
///
/// ```
/// use q2_bsp_analyzer::entities::{tokenize_entities, EntityPair};
///
/// let text = "{\n\"ClassName\" \"worldspawn\"\n\"message\" \"\"\n}";
/// let pairs = tokenize_entities(text);
/// assert_eq!(
///     pairs,
///     vec![
///         EntityPair::new("classname", "worldspawn"),
///         EntityPair::new("message", ""),
///     ]
/// );
/// ```
#[must_use]
pub fn tokenize_entities(text: &str) -> Vec<EntityPair> {
    let bytes = text.as_bytes();
    let mut pairs = Vec::new();
    let mut pos = 0;

    while let Some(start) = find_quote(bytes, pos) {
        match match_pair(bytes, start) {
            PairMatch::Found {
                key_start,
                key_end,
                value_start,
                value_end,
            } => {
                pairs.push(EntityPair::new(
                    &text[key_start..key_end],
                    &text[value_start..value_end],
                ));
                pos = value_end + 1;
            }
            PairMatch::Retry => pos = start + 1,
            PairMatch::Exhausted => break,
        }
    }

    debug!(pairs = pairs.len(), "tokenized entity text");
    pairs
}

/// Outcome of trying to match a pair at one opening quote.
enum PairMatch {
    /// A complete pair; ranges exclude the quotes.
    Found {
        key_start: usize,
        key_end: usize,
        value_start: usize,
        value_end: usize,
    },
    /// No pair starts here, but one may start at a later quote.
    Retry,
    /// No later quote can start a pair either.
    Exhausted,
}

fn match_pair(bytes: &[u8], start: usize) -> PairMatch {
    let key_start = start + 1;
    let Some(key_end) = find_quote(bytes, key_start) else {
        return PairMatch::Exhausted;
    };

    let mut cursor = key_end + 1;
    while cursor < bytes.len() && is_separator(bytes[cursor]) {
        cursor += 1;
    }
    if bytes.get(cursor) != Some(&QUOTE) {
        return PairMatch::Retry;
    }

    let value_start = cursor + 1;
    let Some(value_end) = find_quote(bytes, value_start) else {
        return PairMatch::Exhausted;
    };

    PairMatch::Found {
        key_start,
        key_end,
        value_start,
        value_end,
    }
}

fn find_quote(bytes: &[u8], from: usize) -> Option<usize> {
    bytes
        .get(from..)?
        .iter()
        .position(|&b| b == QUOTE)
        .map(|i| from + i)
}

/// Whitespace allowed between a key and its value.
fn is_separator(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0B | 0x0C)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(pairs: &[EntityPair]) -> Vec<&str> {
        pairs.iter().map(|p| p.key.as_str()).collect()
    }

    #[test]
    fn test_tokenize_two_entities_flat() {
        let text = "{\n\"classname\" \"worldspawn\"\n\"sky\" \"unit1_\"\n}\n\
                    {\n\"classname\" \"weapon_shotgun\"\n\"origin\" \"0 0 0\"\n}\n";
        let pairs = tokenize_entities(text);

        assert_eq!(keys(&pairs), vec!["classname", "sky", "classname", "origin"]);
        assert_eq!(pairs[1].value, "unit1_");
        assert_eq!(pairs[3].value, "0 0 0");
    }

    #[test]
    fn test_keys_lowercased_values_verbatim() {
        let pairs = tokenize_entities("\"NOISE\" \"World\\Amb10.WAV\"");
        assert_eq!(pairs, vec![EntityPair::new("noise", "World\\Amb10.WAV")]);
        assert_eq!(pairs[0].key, "noise");
    }

    #[test]
    fn test_empty_value_kept() {
        let pairs = tokenize_entities("\"target\" \"\" \"angle\" \"90\"");
        assert_eq!(
            pairs,
            vec![EntityPair::new("target", ""), EntityPair::new("angle", "90")]
        );
    }

    #[test]
    fn test_no_separator_required() {
        let pairs = tokenize_entities("\"a\"\"b\"");
        assert_eq!(pairs, vec![EntityPair::new("a", "b")]);
    }

    #[test]
    fn test_junk_between_pairs_is_skipped() {
        let text = "garbage { } \"classname\" \"info_player_start\" 123 } {\"light\" \"200\"}";
        let pairs = tokenize_entities(text);
        assert_eq!(
            pairs,
            vec![
                EntityPair::new("classname", "info_player_start"),
                EntityPair::new("light", "200"),
            ]
        );
    }

    #[test]
    fn test_lone_quoted_string_resyncs_on_next_quote() {
        // The lone "a" cannot pair with what follows it, so matching restarts
        // at each later quote until a full pair fits.
        let text = "\"a\" x \"b\" \"c\"";
        let pairs = tokenize_entities(text);
        assert_eq!(pairs, vec![EntityPair::new("b", "c")]);

        // Restarting at a closing quote can pair text between two strings.
        let text = "\"a\" x\" \"y\"";
        let pairs = tokenize_entities(text);
        assert_eq!(pairs, vec![EntityPair::new(" x", "y")]);
    }

    #[test]
    fn test_unterminated_value_is_dropped() {
        let pairs = tokenize_entities("\"classname\" \"weapon_bfg\" \"message\" \"broken");
        assert_eq!(pairs, vec![EntityPair::new("classname", "weapon_bfg")]);
    }

    #[test]
    fn test_empty_and_quote_free_input() {
        assert!(tokenize_entities("").is_empty());
        assert!(tokenize_entities("{ }\n{ }").is_empty());
        assert!(tokenize_entities("\"").is_empty());
    }

    #[test]
    fn test_entities_text_lossy() {
        let lump = b"\"message\" \"caf\xE9\"\x00";
        let text = entities_text(lump);
        let pairs = tokenize_entities(&text);
        assert_eq!(pairs.len(), 1);
        assert!(pairs[0].value.starts_with("caf"));
    }
}
