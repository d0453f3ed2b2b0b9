//! Integration tests for entity tokenizing and classification through the
//! public API.

use q2_bsp_analyzer::entities::{classify_pairs, tokenize_entities, TRACKED_ITEMS};
use q2_bsp_analyzer::SpawnPoints;

fn classify(text: &str) -> q2_bsp_analyzer::entities::ClassifiedEntities {
    classify_pairs(&tokenize_entities(text))
}

#[test]
fn test_three_shotguns() {
    let text = r#"
{ "classname" "weapon_shotgun" "origin" "0 0 0" }
{ "classname" "weapon_shotgun" "origin" "64 0 0" }
{ "classname" "weapon_shotgun" "origin" "128 0 0" }
"#;
    let c = classify(text);

    assert_eq!(c.stats.weapons.len(), 1);
    assert_eq!(c.stats.weapons["weapon_shotgun"], 3);
    assert!(c.stats.armors.is_empty());
    assert!(c.stats.items.is_empty());
    assert_eq!(c.stats.spawn_points, SpawnPoints::default());
}

#[test]
fn test_spawn_point_counts() {
    let text = r#"
{ "classname" "info_player_deathmatch" }
{ "classname" "info_player_start" }
{ "classname" "info_player_deathmatch" }
"#;
    let c = classify(text);

    assert_eq!(
        c.stats.spawn_points,
        SpawnPoints {
            deathmatch: 2,
            start: 1,
            coop: 0,
            intermission: 0
        }
    );
}

#[test]
fn test_first_message_wins_across_entities() {
    let text = r#"
{ "classname" "worldspawn" "message" "Frag Pit" }
{ "classname" "target_help" "message" "Other Name" }
"#;
    assert_eq!(classify(text).map_name.as_deref(), Some("Frag Pit"));
}

#[test]
fn test_flat_stream_crosses_entity_boundaries() {
    // A version key in a later entity still fills the map version.
    let text = r#"
{ "classname" "worldspawn" "message" "Base" }
{ "classname" "target_string" "version" "3" }
{ "classname" "worldspawn" "mapversion" "9" }
"#;
    let c = classify(text);
    assert_eq!(c.map_version.as_deref(), Some("3"));
}

#[test]
fn test_every_tracked_item_counted() {
    let text: String = TRACKED_ITEMS
        .iter()
        .map(|item| format!("{{ \"classname\" \"{}\" }}\n", item.to_uppercase()))
        .collect();
    let c = classify(&text);

    assert_eq!(c.stats.items.len(), TRACKED_ITEMS.len());
    assert!(c.stats.items.values().all(|&n| n == 1));
}

#[test]
fn test_priority_prefix_before_allowlist() {
    let text = r#"
{ "classname" "weapon_item_quad" }
{ "classname" "item_armor_combat" }
{ "classname" "info_player_coop" }
{ "classname" "info_player_intermission" }
{ "classname" "info_player_ctf" }
{ "classname" "item_ancient_head" }
"#;
    let c = classify(text);

    assert_eq!(c.stats.weapons["weapon_item_quad"], 1);
    assert_eq!(c.stats.armors["item_armor_combat"], 1);
    assert_eq!(c.stats.spawn_points.coop, 1);
    assert_eq!(c.stats.spawn_points.intermission, 1);
    assert_eq!(c.stats.spawn_points.total(), 2);
    assert!(c.stats.items.is_empty());
}
