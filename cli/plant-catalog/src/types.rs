use std::collections::BTreeMap;
use std::str::FromStr;

use derive_more::Display;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Display name for records that arrive without one.
pub const DEFAULT_PLANT_NAME: &str = "Unknown Plant";
/// Glyph for records that arrive without one.
pub const DEFAULT_PLANT_EMOJI: &str = "🌱";

/// Plant categories known to the catalog.
///
/// Anything the catalog sends outside of this set is mapped to
/// [`Category::Unknown`] rather than carried along as a free string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[display("vegetables")]
    Vegetables,
    #[display("herbs")]
    Herbs,
    #[display("fruits")]
    Fruits,
    #[display("flowers")]
    Flowers,
    #[display("succulents")]
    Succulents,
    #[display("unknown")]
    Unknown,
}

impl Category {
    /// All categories a catalog query can filter by.
    pub const KNOWN: [Category; 5] = [
        Category::Vegetables,
        Category::Herbs,
        Category::Fruits,
        Category::Flowers,
        Category::Succulents,
    ];

    pub fn is_known(self) -> bool {
        self != Category::Unknown
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown category '{0}', expected one of: vegetables, herbs, fruits, flowers, succulents")]
pub struct ParseCategoryError(String);

/// Parses one of the [`Category::KNOWN`] names, ignoring case
/// and surrounding whitespace.
impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let category = match s.trim().to_lowercase().as_str() {
            "vegetables" => Category::Vegetables,
            "herbs" => Category::Herbs,
            "fruits" => Category::Fruits,
            "flowers" => Category::Flowers,
            "succulents" => Category::Succulents,
            _ => return Err(ParseCategoryError(s.to_string())),
        };
        Ok(category)
    }
}

/// How hard a plant is to grow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[display("easy")]
    Easy,
    #[display("medium")]
    Medium,
    #[display("hard")]
    Hard,
    #[display("unknown")]
    Unknown,
}

impl Difficulty {
    pub const KNOWN: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn is_known(self) -> bool {
        self != Difficulty::Unknown
    }

    /// Capitalized form for user facing output, e.g. "Easy to grow".
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown difficulty '{0}', expected one of: easy, medium, hard")]
pub struct ParseDifficultyError(String);

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let difficulty = match s.trim().to_lowercase().as_str() {
            "easy" => Difficulty::Easy,
            "medium" => Difficulty::Medium,
            "hard" => Difficulty::Hard,
            _ => return Err(ParseDifficultyError(s.to_string())),
        };
        Ok(difficulty)
    }
}

/// A plant object as sent by the catalog, before normalization.
///
/// The catalog serves at least two incompatible shapes for the same concept,
/// so the payload is kept as an untyped JSON object.
/// Its fields can only be read by [`crate::normalize`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct RawPlant(Map<String, Value>);

impl RawPlant {
    pub(crate) fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }
}

impl From<Map<String, Value>> for RawPlant {
    fn from(map: Map<String, Value>) -> Self {
        RawPlant(map)
    }
}

/// Succeeds only for JSON objects, returning any other value unchanged.
impl TryFrom<Value> for RawPlant {
    type Error = Value;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(RawPlant(map)),
            other => Err(other),
        }
    }
}

/// The canonical plant record all consumers render.
///
/// Records are values: they are created once by [`crate::normalize`]
/// and never mutated afterwards.
/// The struct is `non_exhaustive` so that records outside of this crate
/// can only come out of normalization, which guarantees a non-empty
/// `id` and `name`.
///
/// The serialized form uses the same field names the normalizer reads,
/// so a serialized record normalizes back to itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct PlantRecord {
    pub id: String,
    pub name: String,
    pub emoji: String,
    pub category: Category,
    pub difficulty: Difficulty,
    pub summary: String,
    pub growing_seasons: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_to_harvest: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sunlight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub water: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub soil: Option<String>,
    pub tips: Vec<String>,
    pub companions: Vec<String>,
    pub pests: Vec<String>,
    pub avoid: Vec<String>,
    pub images: Vec<String>,
    /// Free form planting instructions, e.g. `depth`, `spacing`.
    pub planting_guide: BTreeMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_parses_case_insensitive() {
        for input in ["herbs", "Herbs", "HERBS", " herbs "] {
            assert_eq!(input.parse::<Category>(), Ok(Category::Herbs));
        }
    }

    #[test]
    fn unknown_is_not_a_parseable_category() {
        assert!("unknown".parse::<Category>().is_err());
        assert!("trees".parse::<Category>().is_err());
    }

    #[test]
    fn difficulty_display_matches_parse() {
        for difficulty in Difficulty::KNOWN {
            assert_eq!(difficulty.to_string().parse::<Difficulty>(), Ok(difficulty));
        }
        for category in Category::KNOWN {
            assert_eq!(category.to_string().parse::<Category>(), Ok(category));
        }
    }

    #[test]
    fn raw_plant_only_from_objects() {
        assert!(RawPlant::try_from(serde_json::json!({"id": "basil"})).is_ok());
        assert_eq!(
            RawPlant::try_from(serde_json::json!(["basil"])),
            Err(serde_json::json!(["basil"]))
        );
    }
}
