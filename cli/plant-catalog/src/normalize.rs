//! Mapping of catalog payloads onto [`PlantRecord`].
//!
//! The catalog serves two shapes of plant objects:
//!
//! - a guide shape with `description`, `tips`, `companionPlants`,
//!   `daysToHarvest`, `imageUrl` and `plantingGuide`
//! - a journal shape with `notes`, `careLevel`, `companions` and `avoid`
//!
//! [`normalize`] reads both, as well as the serialized form of
//! [`PlantRecord`] itself.
//! Lookups are case sensitive on keys,
//! missing or mistyped fields fall back to defaults instead of failing.
//!
//! `daysToHarvest` is only ever read from the field of that name.
//! Deriving it from the free text `growingTime` field some payloads carry
//! would need a parsing rule the catalog does not define.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::types::{
    Category,
    DEFAULT_PLANT_EMOJI,
    DEFAULT_PLANT_NAME,
    Difficulty,
    PlantRecord,
    RawPlant,
};

/// Identifier used when neither an id nor a name can be found.
const FALLBACK_ID: &str = "unknown-plant";

/// Normalize a catalog payload into a [`PlantRecord`].
///
/// This never fails: every field has a default
/// and list fields are empty rather than absent.
pub fn normalize(raw: &RawPlant) -> PlantRecord {
    let name = text(raw, "name").unwrap_or_else(|| DEFAULT_PLANT_NAME.to_string());
    let id = identifier(raw).unwrap_or_else(|| slug(&name));
    let planting_guide = planting_guide(raw);

    PlantRecord {
        id,
        emoji: text(raw, "emoji").unwrap_or_else(|| DEFAULT_PLANT_EMOJI.to_string()),
        category: first_text(raw, &["category"])
            .and_then(|category| category.parse().ok())
            .unwrap_or(Category::Unknown),
        difficulty: first_text(raw, &["difficulty", "careLevel"])
            .and_then(|difficulty| difficulty.parse().ok())
            .unwrap_or(Difficulty::Unknown),
        summary: first_text(raw, &["description", "notes", "summary"]).unwrap_or_default(),
        growing_seasons: strings(raw, "growingSeasons").unwrap_or_default(),
        days_to_harvest: raw
            .get("daysToHarvest")
            .and_then(Value::as_u64)
            .and_then(|days| u32::try_from(days).ok()),
        sunlight: text(raw, "sunlight"),
        water: text(raw, "water"),
        soil: text(raw, "soil").or_else(|| planting_guide.get("soil").cloned()),
        tips: strings(raw, "tips").unwrap_or_default(),
        companions: first_strings(raw, &["companionPlants", "companions"]),
        pests: strings(raw, "pests").unwrap_or_default(),
        avoid: strings(raw, "avoid").unwrap_or_default(),
        images: first_strings(raw, &["images", "imageUrl"]),
        planting_guide,
        name,
    }
}

/// A non-blank string field.
fn text(raw: &RawPlant, key: &str) -> Option<String> {
    match raw.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        _ => None,
    }
}

fn first_text(raw: &RawPlant, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| text(raw, key))
}

/// A list of strings.
///
/// A lone string is read as a list of one,
/// non-string and blank entries are dropped.
fn strings(raw: &RawPlant, key: &str) -> Option<Vec<String>> {
    match raw.get(key)? {
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(Value::as_str)
                .filter(|item| !item.trim().is_empty())
                .map(ToString::to_string)
                .collect(),
        ),
        Value::String(s) if !s.trim().is_empty() => Some(vec![s.clone()]),
        _ => None,
    }
}

/// The first of `keys` that holds a list, or an empty list.
fn first_strings(raw: &RawPlant, keys: &[&str]) -> Vec<String> {
    keys.iter()
        .find_map(|key| strings(raw, key))
        .unwrap_or_default()
}

/// Catalog ids are strings, but numeric ids are accepted as well.
fn identifier(raw: &RawPlant) -> Option<String> {
    match raw.get("id")? {
        Value::String(id) if !id.trim().is_empty() => Some(id.clone()),
        Value::Number(id) if id.is_u64() || id.is_i64() => Some(id.to_string()),
        _ => None,
    }
}

/// Derive a stable identifier from a display name,
/// e.g. "Sweet Basil" -> "sweet-basil".
fn slug(name: &str) -> String {
    let slug = name
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-");

    if slug.is_empty() {
        FALLBACK_ID.to_string()
    } else {
        slug
    }
}

fn planting_guide(raw: &RawPlant) -> BTreeMap<String, String> {
    let Some(Value::Object(guide)) = raw.get("plantingGuide") else {
        return BTreeMap::new();
    };

    guide
        .iter()
        .filter_map(|(key, value)| match value {
            Value::String(s) if !s.trim().is_empty() => Some((key.clone(), s.clone())),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use serde_json::json;

    use super::*;
    use crate::test_helpers::{arb_raw_plant, raw_plant};

    #[test]
    fn normalizes_guide_shape() {
        let raw = raw_plant(json!({
            "id": "tomato",
            "name": "Tomato",
            "emoji": "🍅",
            "category": "vegetables",
            "difficulty": "Medium",
            "description": "Juicy summer staple.",
            "growingSeasons": ["spring", "summer"],
            "daysToHarvest": 75,
            "sunlight": "Full sun",
            "water": "Regular",
            "tips": ["Stake early", "Pinch suckers"],
            "imageUrl": "https://img.example/tomato.png",
            "plantingGuide": {"depth": "1/4 inch", "spacing": "24 inches", "soil": "Loamy"},
            "companionPlants": ["basil", "marigold"],
            "pests": ["hornworm"]
        }));

        let record = normalize(&raw);

        assert_eq!(record.id, "tomato");
        assert_eq!(record.name, "Tomato");
        assert_eq!(record.emoji, "🍅");
        assert_eq!(record.category, Category::Vegetables);
        assert_eq!(record.difficulty, Difficulty::Medium);
        assert_eq!(record.summary, "Juicy summer staple.");
        assert_eq!(record.growing_seasons, vec!["spring", "summer"]);
        assert_eq!(record.days_to_harvest, Some(75));
        assert_eq!(record.soil.as_deref(), Some("Loamy"));
        assert_eq!(record.tips, vec!["Stake early", "Pinch suckers"]);
        assert_eq!(record.companions, vec!["basil", "marigold"]);
        assert_eq!(record.pests, vec!["hornworm"]);
        assert!(record.avoid.is_empty());
        assert_eq!(record.images, vec!["https://img.example/tomato.png"]);
        assert_eq!(record.planting_guide.len(), 3);
    }

    #[test]
    fn normalizes_journal_shape() {
        let raw = raw_plant(json!({
            "id": "mint",
            "name": "Mint",
            "category": "Herbs",
            "careLevel": "EASY",
            "notes": "Spreads aggressively, keep it in a pot.",
            "growingTime": "60-90 days",
            "companions": ["cabbage"],
            "avoid": ["parsley"],
            "pests": ["aphids"],
            "soil": "Moist"
        }));

        let record = normalize(&raw);

        assert_eq!(record.category, Category::Herbs);
        assert_eq!(record.difficulty, Difficulty::Easy);
        assert_eq!(record.summary, "Spreads aggressively, keep it in a pot.");
        assert_eq!(record.companions, vec!["cabbage"]);
        assert_eq!(record.avoid, vec!["parsley"]);
        assert_eq!(record.soil.as_deref(), Some("Moist"));
        assert_eq!(record.days_to_harvest, None, "growingTime is never parsed");
        assert!(record.tips.is_empty());
        assert!(record.images.is_empty());
        assert_eq!(record.emoji, DEFAULT_PLANT_EMOJI);
    }

    #[test]
    fn empty_object_gets_defaults() {
        let record = normalize(&RawPlant::default());

        assert_eq!(record.name, DEFAULT_PLANT_NAME);
        assert_eq!(record.id, "unknown-plant");
        assert_eq!(record.emoji, DEFAULT_PLANT_EMOJI);
        assert_eq!(record.category, Category::Unknown);
        assert_eq!(record.difficulty, Difficulty::Unknown);
        assert_eq!(record.summary, "");
        assert_eq!(record.days_to_harvest, None);
    }

    #[test]
    fn difficulty_matches_case_insensitive() {
        let difficulties = ["Easy", "EASY", "easy"]
            .into_iter()
            .map(|difficulty| normalize(&raw_plant(json!({ "difficulty": difficulty }))).difficulty)
            .collect::<Vec<_>>();
        assert_eq!(difficulties, vec![Difficulty::Easy; 3]);

        let extreme = normalize(&raw_plant(json!({ "difficulty": "extreme" })));
        assert_eq!(extreme.difficulty, Difficulty::Unknown);
    }

    #[test]
    fn unrecognized_category_is_unknown() {
        let record = normalize(&raw_plant(json!({ "category": "trees" })));
        assert_eq!(record.category, Category::Unknown);
    }

    #[test]
    fn description_wins_over_notes() {
        let record = normalize(&raw_plant(json!({
            "description": "from description",
            "notes": "from notes",
        })));
        assert_eq!(record.summary, "from description");

        let record = normalize(&raw_plant(json!({
            "description": "  ",
            "notes": "from notes",
        })));
        assert_eq!(record.summary, "from notes");
    }

    #[test]
    fn numeric_id_and_missing_id() {
        assert_eq!(normalize(&raw_plant(json!({ "id": 42 }))).id, "42");
        assert_eq!(
            normalize(&raw_plant(json!({ "name": "Sweet Basil" }))).id,
            "sweet-basil"
        );
        assert_eq!(
            normalize(&raw_plant(json!({ "id": "", "name": "Thai Basil!" }))).id,
            "thai-basil"
        );
    }

    #[test]
    fn mistyped_fields_fall_back() {
        let record = normalize(&raw_plant(json!({
            "name": 7,
            "tips": "Water at dawn",
            "pests": [1, null, "slugs", ""],
            "daysToHarvest": -3,
            "growingSeasons": {"spring": true},
        })));

        assert_eq!(record.name, DEFAULT_PLANT_NAME);
        assert_eq!(record.tips, vec!["Water at dawn"]);
        assert_eq!(record.pests, vec!["slugs"]);
        assert_eq!(record.days_to_harvest, None);
        assert!(record.growing_seasons.is_empty());
    }

    #[test]
    fn companion_plants_win_over_companions() {
        let record = normalize(&raw_plant(json!({
            "companionPlants": ["basil"],
            "companions": ["dill"],
        })));
        assert_eq!(record.companions, vec!["basil"]);
    }

    proptest! {
        #[test]
        fn normalized_records_are_complete(raw in arb_raw_plant()) {
            let record = normalize(&raw);
            prop_assert!(!record.id.is_empty());
            prop_assert!(!record.name.trim().is_empty());
            prop_assert!(!record.emoji.is_empty());
        }

        #[test]
        fn normalize_is_idempotent(raw in arb_raw_plant()) {
            let record = normalize(&raw);
            let canonical = RawPlant::try_from(serde_json::to_value(&record).unwrap()).unwrap();
            prop_assert_eq!(normalize(&canonical), record);
        }
    }
}
