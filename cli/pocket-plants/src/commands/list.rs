use anyhow::{Context, Result};
use bpaf::Bpaf;
use plant_catalog::{Category, Difficulty};
use plant_sdk::models::retrieval::PlantCatalog;
use plant_sdk::providers::catalog::ClientTrait;
use tracing::instrument;

use super::print_plants;

#[derive(Debug, Bpaf, Clone)]
pub enum ListFilter {
    Category(
        /// Only list plants of this category
        /// (vegetables, herbs, fruits, flowers or succulents)
        #[bpaf(long("category"), short('c'), argument("category"))]
        Category,
    ),
    Difficulty(
        /// Only list plants of this difficulty (easy, medium or hard)
        #[bpaf(long("difficulty"), short('d'), argument("difficulty"))]
        Difficulty,
    ),
}

// List plants in the catalog
#[derive(Debug, Bpaf, Clone)]
pub struct List {
    /// Display plants as a JSON array
    #[bpaf(long)]
    pub json: bool,

    #[bpaf(external(list_filter), optional)]
    pub filter: Option<ListFilter>,
}

impl List {
    #[instrument(name = "list", fields(json = self.json, filter = ?self.filter), skip_all)]
    pub async fn handle(self, catalog: &PlantCatalog<impl ClientTrait>) -> Result<()> {
        match self.filter {
            None => catalog.fetch_plants().await,
            Some(ListFilter::Category(category)) => catalog.plants_by_category(category).await,
            Some(ListFilter::Difficulty(difficulty)) => {
                catalog.plants_by_difficulty(difficulty).await
            },
        };

        print_plants(&catalog.list_state(), self.json).context("Could not list plants")
    }
}
