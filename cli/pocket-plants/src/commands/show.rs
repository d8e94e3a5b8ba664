use anyhow::{Context, Result};
use bpaf::Bpaf;
use plant_sdk::models::retrieval::PlantCatalog;
use plant_sdk::providers::catalog::ClientTrait;
use tracing::instrument;

use super::settled;
use crate::utils::render::DisplayPlant;

// Show details about a single plant
#[derive(Debug, Bpaf, Clone)]
pub struct Show {
    /// Display the plant as a JSON object
    #[bpaf(long)]
    pub json: bool,

    /// The id of the plant, as listed by 'pocket-plants list --json'
    #[bpaf(positional("id"))]
    pub id: String,
}

impl Show {
    #[instrument(name = "show", fields(json = self.json, id = self.id), skip_all)]
    pub async fn handle(self, catalog: &PlantCatalog<impl ClientTrait>) -> Result<()> {
        catalog.fetch_plant(&self.id).await;

        let state = catalog.detail_state();
        let plant = settled(&state)
            .and_then(|plant| plant.as_ref().context("catalog returned no plant"))
            .with_context(|| format!("Could not show plant '{}'", self.id))?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(plant)?);
        } else {
            print!("{}", DisplayPlant(plant));
        }
        Ok(())
    }
}
