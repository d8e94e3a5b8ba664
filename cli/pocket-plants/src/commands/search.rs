use anyhow::{Context, Result};
use bpaf::Bpaf;
use plant_sdk::models::retrieval::PlantCatalog;
use plant_sdk::providers::catalog::ClientTrait;
use tracing::{debug, instrument};

use super::print_plants;

// Search plants by name or description
#[derive(Debug, Bpaf, Clone)]
pub struct Search {
    /// Display search results as a JSON array
    #[bpaf(long)]
    pub json: bool,

    /// Text to look for in plant names and descriptions.
    /// Lists all plants if omitted.
    #[bpaf(positional("query"))]
    pub query: Option<String>,
}

impl Search {
    #[instrument(name = "search", fields(json = self.json, query = self.query), skip_all)]
    pub async fn handle(self, catalog: &PlantCatalog<impl ClientTrait>) -> Result<()> {
        let query = self.query.as_deref().unwrap_or_default();
        debug!("performing search for query: '{query}'");

        catalog.search_plants(query).await;

        print_plants(&catalog.list_state(), self.json).context("Could not search plants")
    }
}
