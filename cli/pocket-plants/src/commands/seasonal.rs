use anyhow::{Context, Result};
use bpaf::Bpaf;
use plant_sdk::models::retrieval::PlantCatalog;
use plant_sdk::providers::catalog::ClientTrait;
use tracing::instrument;

use super::print_plants;

// List plants to grow in a given month and location
#[derive(Debug, Bpaf, Clone)]
pub struct Seasonal {
    /// Display plants as a JSON array
    #[bpaf(long)]
    pub json: bool,

    /// Month to plant in, 1 for January through 12 for December
    #[bpaf(long, short, argument("month"))]
    pub month: u8,

    /// Where the plants will grow, e.g. a city or region
    #[bpaf(long, short, argument("location"))]
    pub location: String,
}

impl Seasonal {
    #[instrument(name = "seasonal", fields(json = self.json, month = self.month, location = self.location), skip_all)]
    pub async fn handle(self, catalog: &PlantCatalog<impl ClientTrait>) -> Result<()> {
        catalog.seasonal_plants(self.month, &self.location).await;

        print_plants(&catalog.list_state(), self.json)
            .with_context(|| format!("Could not list plants for month {}", self.month))
    }
}
