mod list;
mod search;
mod seasonal;
mod show;

use anyhow::{Context, Result, bail};
use bpaf::Bpaf;
use indoc::indoc;
use plant_catalog::PlantRecord;
use plant_sdk::models::retrieval::{PlantCatalog, TargetState};
use plant_sdk::providers::catalog::ClientTrait;

use crate::config::Config;
use crate::utils::init::init_catalog_client;
use crate::utils::message;
use crate::utils::render::DisplayPlants;

static DESCRIPTION: &'_ str = indoc! {"
    Pocket Plants looks up what to grow, when to plant it and how to care for it.

    Plant data is read from the catalog configured as 'catalog_url'."
};

const SHOW_HINT: &str = "Use 'pocket-plants show <id>' to see details about a plant";

fn vec_len<T>(x: Vec<T>) -> usize {
    Vec::len(&x)
}

#[derive(Bpaf, Clone, Copy, Debug)]
pub enum Verbosity {
    Verbose(
        /// Increase logging verbosity
        ///
        /// Invoke multiple times for increasing detail.
        #[bpaf(short('v'), long("verbose"), req_flag(()), many, map(vec_len))]
        usize,
    ),

    /// Silence logs except for errors
    #[bpaf(short, long)]
    Quiet,
}

impl Default for Verbosity {
    fn default() -> Self {
        Verbosity::Verbose(0)
    }
}

#[derive(Bpaf)]
#[bpaf(options, version, descr(DESCRIPTION))]
pub struct PocketPlantsCli(#[bpaf(external(pocket_plants_args))] pub PocketPlantsArgs);

/// Main args parser
///
/// To parse the whole CLI, use [`PocketPlantsCli`] via [`pocket_plants_cli()`].
#[derive(Debug, Bpaf)]
#[bpaf(ignore_rustdoc)]
pub struct PocketPlantsArgs {
    /// Verbose mode
    ///
    /// Invoke multiple times for increasing detail.
    #[bpaf(external, fallback(Default::default()))]
    pub verbosity: Verbosity,

    #[bpaf(external(commands))]
    command: Commands,
}

impl PocketPlantsArgs {
    pub async fn handle(self, config: Config) -> Result<()> {
        let client = init_catalog_client(&config)?;
        let catalog = PlantCatalog::new(client);
        self.command.handle(&catalog).await
    }
}

#[derive(Debug, Bpaf, Clone)]
enum Commands {
    /// List plants in the catalog
    #[bpaf(command)]
    List(#[bpaf(external(list::list))] list::List),

    /// Show details about a single plant
    #[bpaf(command)]
    Show(#[bpaf(external(show::show))] show::Show),

    /// Search plants by name or description
    #[bpaf(command)]
    Search(#[bpaf(external(search::search))] search::Search),

    /// List plants to grow in a given month and location
    #[bpaf(command)]
    Seasonal(#[bpaf(external(seasonal::seasonal))] seasonal::Seasonal),
}

impl Commands {
    async fn handle(self, catalog: &PlantCatalog<impl ClientTrait>) -> Result<()> {
        match self {
            Commands::List(args) => args.handle(catalog).await?,
            Commands::Show(args) => args.handle(catalog).await?,
            Commands::Search(args) => args.handle(catalog).await?,
            Commands::Seasonal(args) => args.handle(catalog).await?,
        }
        Ok(())
    }
}

/// Data of the latest query on a target.
///
/// Errors take precedence; stale data of an earlier query is never returned.
fn settled<T>(state: &TargetState<T>) -> Result<&T> {
    if let Some(error) = state.error() {
        bail!("{error}");
    }
    state.current().context("catalog query did not complete")
}

/// Print the plants of the latest list query, or fail with its error.
fn print_plants(state: &TargetState<Vec<PlantRecord>>, json: bool) -> Result<()> {
    let plants = settled(state)?;

    if json {
        println!("{}", serde_json::to_string_pretty(plants)?);
        return Ok(());
    }

    if plants.is_empty() {
        message::warning("No plants found");
        return Ok(());
    }

    print!("{}", DisplayPlants(plants));
    message::plain(SHOW_HINT);
    Ok(())
}

#[cfg(test)]
mod tests {
    use bpaf::Args;
    use plant_catalog::test_helpers::raw_plant;
    use plant_sdk::models::retrieval::Phase;
    use plant_sdk::providers::catalog::MockClient;
    use pretty_assertions::assert_eq;
    use reqwest::StatusCode;
    use serde_json::json;

    use super::*;

    fn parse(args: &[&str]) -> PocketPlantsArgs {
        let PocketPlantsCli(args) = pocket_plants_cli()
            .run_inner(Args::from(args))
            .unwrap();
        args
    }

    fn mock_catalog(configure: impl FnOnce(&mut MockClient)) -> PlantCatalog<MockClient> {
        let mut client = MockClient::new(None::<&str>).unwrap();
        configure(&mut client);
        PlantCatalog::new(client)
    }

    #[test]
    fn verbosity_flags_are_counted() {
        assert!(matches!(parse(&["-vv", "list"]).verbosity, Verbosity::Verbose(2)));
        assert!(matches!(parse(&["-q", "list"]).verbosity, Verbosity::Quiet));
        assert!(matches!(parse(&["list"]).verbosity, Verbosity::Verbose(0)));
    }

    #[test]
    fn list_filters_are_mutually_exclusive() {
        let result = pocket_plants_cli()
            .run_inner(Args::from(&["list", "--category", "herbs", "--difficulty", "easy"]));
        assert!(result.is_err());
    }

    #[test]
    fn unknown_category_is_rejected_by_the_parser() {
        let result = pocket_plants_cli().run_inner(Args::from(&["list", "--category", "trees"]));
        assert!(result.is_err());
    }

    #[test]
    fn settled_requires_a_completed_query() {
        assert_eq!(
            settled(&TargetState::<Vec<PlantRecord>>::default())
                .unwrap_err()
                .to_string(),
            "catalog query did not complete"
        );
    }

    #[tokio::test]
    async fn list_succeeds_with_plants() {
        let catalog = mock_catalog(|client| {
            client.push_list_response(vec![raw_plant(json!({ "name": "Basil" }))]);
        });

        parse(&["list", "--json"]).command.handle(&catalog).await.unwrap();

        assert_eq!(catalog.list_state().phase(), &Phase::Ready);
    }

    #[tokio::test]
    async fn failed_list_is_an_error() {
        let catalog = mock_catalog(|client| {
            client.push_error_response(StatusCode::INTERNAL_SERVER_ERROR);
        });

        let err = parse(&["list", "--difficulty", "hard"])
            .command
            .handle(&catalog)
            .await
            .unwrap_err();

        let message = format!("{err:#}");
        assert!(message.contains("500"), "{message}");
    }

    #[tokio::test]
    async fn show_reports_missing_plant() {
        let catalog = mock_catalog(|client| {
            client.push_error_response(StatusCode::NOT_FOUND);
        });

        let err = parse(&["show", "unknown-id"])
            .command
            .handle(&catalog)
            .await
            .unwrap_err();

        let message = format!("{err:#}");
        assert!(message.contains("'unknown-id'"), "{message}");
        assert!(message.contains("404"), "{message}");
    }

    #[tokio::test]
    async fn blank_search_lists_all_plants() {
        let catalog = mock_catalog(|client| {
            client.push_list_response(vec![raw_plant(json!({ "name": "Mint" }))]);
        });

        parse(&["search"]).command.handle(&catalog).await.unwrap();

        assert_eq!(catalog.state().plant_count(), 1);
    }

    #[tokio::test]
    async fn seasonal_lists_plants() {
        let catalog = mock_catalog(|client| {
            client.push_list_response(vec![
                raw_plant(json!({ "name": "Radish" })),
                raw_plant(json!({ "name": "Pea" })),
            ]);
        });

        parse(&["seasonal", "--month", "4", "--location", "Porto"])
            .command
            .handle(&catalog)
            .await
            .unwrap();

        assert_eq!(catalog.state().plant_count(), 2);
    }
}
