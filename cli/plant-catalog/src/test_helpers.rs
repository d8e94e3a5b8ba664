//! Helpers for building plant payloads in tests.

use proptest::collection::{btree_map, vec};
use proptest::prelude::*;
use proptest::sample::select;
use serde_json::{Map, Value};

use crate::{PlantRecord, RawPlant, normalize};

/// Keys of both catalog shapes, plus fields neither shape reads.
const RAW_KEYS: &[&str] = &[
    "id",
    "name",
    "emoji",
    "category",
    "difficulty",
    "careLevel",
    "description",
    "notes",
    "growingSeasons",
    "daysToHarvest",
    "growingTime",
    "sunlight",
    "water",
    "soil",
    "tips",
    "companionPlants",
    "companions",
    "pests",
    "avoid",
    "imageUrl",
    "images",
    "plantingGuide",
];

const ENUM_LIKE: &[&str] = &[
    "easy",
    "Easy",
    "EASY",
    "medium",
    "Hard",
    "extreme",
    "herbs",
    "Vegetables",
    "FRUITS",
    "flowers",
    "succulents",
    "trees",
];

/// Wrap a JSON object literal as a [`RawPlant`].
pub fn raw_plant(value: Value) -> RawPlant {
    RawPlant::try_from(value).expect("test plant must be a JSON object")
}

/// Normalize a JSON object literal.
pub fn plant_record(value: Value) -> PlantRecord {
    normalize(&raw_plant(value))
}

fn arb_text() -> impl Strategy<Value = String> {
    "[ a-zA-Z0-9]{0,12}"
}

fn arb_field_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        (0..400_u32).prop_map(Value::from),
        arb_text().prop_map(Value::from),
        select(ENUM_LIKE).prop_map(Value::from),
        vec(arb_text(), 0..4).prop_map(Value::from),
        btree_map("[a-z]{1,6}", arb_text(), 0..3)
            .prop_map(|guide| Value::Object(guide.into_iter().map(|(k, v)| (k, v.into())).collect())),
    ]
}

/// Plant payloads in either catalog shape, or any mix of both,
/// with arbitrarily typed field values.
pub fn arb_raw_plant() -> impl Strategy<Value = RawPlant> {
    btree_map(select(RAW_KEYS), arb_field_value(), 0..12).prop_map(|fields| {
        fields
            .into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect::<Map<_, _>>()
            .into()
    })
}
