use std::fmt::{self, Display};

use plant_catalog::PlantRecord;

/// One line per plant: `emoji name (category, difficulty)`
pub struct DisplayPlants<'a>(pub &'a [PlantRecord]);

impl Display for DisplayPlants<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for plant in self.0 {
            writeln!(
                f,
                "{} {} ({}, {})",
                plant.emoji,
                plant.name,
                plant.category,
                plant.difficulty.label()
            )?;
        }
        Ok(())
    }
}

/// All known details of a single plant.
///
/// Fields the catalog didn't provide are left out.
pub struct DisplayPlant<'a>(pub &'a PlantRecord);

const LABEL_WIDTH: usize = 17;

fn field(f: &mut fmt::Formatter<'_>, label: &str, value: impl Display) -> fmt::Result {
    writeln!(f, "  {:<LABEL_WIDTH$}{value}", format!("{label}:"))
}

fn list_field(f: &mut fmt::Formatter<'_>, label: &str, values: &[String]) -> fmt::Result {
    if values.is_empty() {
        return Ok(());
    }
    field(f, label, values.join(", "))
}

impl Display for DisplayPlant<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plant = self.0;

        writeln!(f, "{} {} ({})", plant.emoji, plant.name, plant.id)?;
        if !plant.summary.is_empty() {
            writeln!(f, "{}", plant.summary)?;
        }
        writeln!(f)?;

        field(f, "Category", plant.category)?;
        field(f, "Difficulty", plant.difficulty.label())?;
        list_field(f, "Growing seasons", &plant.growing_seasons)?;
        if let Some(days) = plant.days_to_harvest {
            field(f, "Days to harvest", days)?;
        }
        for (label, value) in [
            ("Sunlight", &plant.sunlight),
            ("Water", &plant.water),
            ("Soil", &plant.soil),
        ] {
            if let Some(value) = value {
                field(f, label, value)?;
            }
        }
        list_field(f, "Companions", &plant.companions)?;
        list_field(f, "Avoid", &plant.avoid)?;
        list_field(f, "Pests", &plant.pests)?;

        if !plant.planting_guide.is_empty() {
            writeln!(f, "  Planting guide:")?;
            for (step, instruction) in &plant.planting_guide {
                writeln!(f, "    {step}: {instruction}")?;
            }
        }
        if !plant.tips.is_empty() {
            writeln!(f, "  Tips:")?;
            for tip in &plant.tips {
                writeln!(f, "    - {tip}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use plant_catalog::test_helpers::plant_record;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn plants_render_one_per_line() {
        let plants = [
            plant_record(json!({
                "name": "Basil",
                "emoji": "🌿",
                "category": "herbs",
                "difficulty": "easy"
            })),
            plant_record(json!({ "name": "Mystery" })),
        ];

        assert_eq!(DisplayPlants(&plants).to_string(), indoc! {"
            🌿 Basil (herbs, Easy)
            🌱 Mystery (unknown, Unknown)
        "});
    }

    #[test]
    fn plant_detail_skips_missing_fields() {
        let plant = plant_record(json!({
            "id": "tomato",
            "name": "Tomato",
            "emoji": "🍅",
            "category": "vegetables",
            "careLevel": "Medium",
            "notes": "Loves warmth.",
            "growingSeasons": ["spring", "summer"],
            "daysToHarvest": 70,
            "sunlight": "Full sun",
            "companions": ["basil"],
            "plantingGuide": { "depth": "1cm" },
            "tips": ["Stake early"]
        }));

        assert_eq!(DisplayPlant(&plant).to_string(), indoc! {"
            🍅 Tomato (tomato)
            Loves warmth.

              Category:        vegetables
              Difficulty:      Medium
              Growing seasons: spring, summer
              Days to harvest: 70
              Sunlight:        Full sun
              Companions:      basil
              Planting guide:
                depth: 1cm
              Tips:
                - Stake early
        "});
    }
}
