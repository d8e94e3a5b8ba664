use std::collections::VecDeque;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

use enum_dispatch::enum_dispatch;
pub use plant_catalog::{
    CatalogClient,
    CatalogClientConfig,
    CatalogClientError,
    Category,
    Difficulty,
    PlantRecord,
    RawPlant,
};
use plant_catalog::normalize;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Path to a JSON file with canned catalog responses.
/// If set, a [MockClient] is used instead of a [CatalogClient].
pub const PLANTS_CATALOG_MOCK_DATA_VAR: &str = "POCKET_PLANTS_CATALOG_MOCK";

// Arc allows you to push things into the client from outside the client if necessary
// Mutex allows you to share across threads (necessary because of tokio)
type MockField<T> = Arc<Mutex<T>>;

/// A canned catalog response.
///
/// Plants are stored in their raw catalog shape and normalized when served,
/// just like responses of the real catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Response {
    /// Response to any of the list queries
    List(Vec<RawPlant>),
    /// Response to [ClientTrait::get_by_id]
    Item(RawPlant),
    /// A non-success HTTP status
    Error(GenericResponse),
}

/// A failed response, represented by its status code only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenericResponse {
    pub status: u16,
}

#[derive(Debug, Error)]
pub enum MockDataError {
    /// Failed to read the JSON file pointed at by the POCKET_PLANTS_CATALOG_MOCK var
    #[error("failed to read mock response file")]
    ReadMockFile(#[source] std::io::Error),
    /// Failed to parse the contents of the mock data file as JSON
    #[error("failed to parse mock data as JSON")]
    ParseJson(#[source] serde_json::Error),
    /// The data was parsed as JSON but it wasn't semantically valid
    #[error("invalid mocked data: {0}")]
    InvalidData(String),
}

/// Reads a list of mock responses from disk.
fn read_mock_responses(path: impl AsRef<Path>) -> Result<VecDeque<Response>, MockDataError> {
    let contents = std::fs::read_to_string(path).map_err(MockDataError::ReadMockFile)?;
    let responses: Vec<Response> =
        serde_json::from_str(&contents).map_err(MockDataError::ParseJson)?;

    for response in &responses {
        if let Response::Error(GenericResponse { status }) = response {
            StatusCode::from_u16(*status)
                .map_err(|_| MockDataError::InvalidData(format!("invalid status code {status}")))?;
        }
    }

    Ok(responses.into())
}

/// The catalog operations the retrieval state is built on.
#[enum_dispatch]
#[allow(async_fn_in_trait)]
pub trait ClientTrait {
    /// List every plant in the catalog.
    async fn list_all(&self) -> Result<Vec<PlantRecord>, CatalogClientError>;

    /// Get a single plant by its id.
    async fn get_by_id(&self, id: &str) -> Result<PlantRecord, CatalogClientError>;

    /// List plants of one category.
    async fn list_by_category(
        &self,
        category: Category,
    ) -> Result<Vec<PlantRecord>, CatalogClientError>;

    /// List plants of one difficulty.
    async fn list_by_difficulty(
        &self,
        difficulty: Difficulty,
    ) -> Result<Vec<PlantRecord>, CatalogClientError>;

    /// Search plants by name or description.
    async fn search(&self, query: &str) -> Result<Vec<PlantRecord>, CatalogClientError>;

    /// List plants to grow in a month (1-12) at a location.
    async fn list_seasonal(
        &self,
        month: u8,
        location: &str,
    ) -> Result<Vec<PlantRecord>, CatalogClientError>;
}

/// Either a client for the actual catalog service,
/// or a mock client for testing.
#[derive(Debug)]
#[enum_dispatch(ClientTrait)]
pub enum Client {
    Catalog(CatalogClient),
    Mock(MockClient),
}

impl ClientTrait for CatalogClient {
    async fn list_all(&self) -> Result<Vec<PlantRecord>, CatalogClientError> {
        CatalogClient::list_all(self).await
    }

    async fn get_by_id(&self, id: &str) -> Result<PlantRecord, CatalogClientError> {
        CatalogClient::get_by_id(self, id).await
    }

    async fn list_by_category(
        &self,
        category: Category,
    ) -> Result<Vec<PlantRecord>, CatalogClientError> {
        CatalogClient::list_by_category(self, category).await
    }

    async fn list_by_difficulty(
        &self,
        difficulty: Difficulty,
    ) -> Result<Vec<PlantRecord>, CatalogClientError> {
        CatalogClient::list_by_difficulty(self, difficulty).await
    }

    async fn search(&self, query: &str) -> Result<Vec<PlantRecord>, CatalogClientError> {
        CatalogClient::search(self, query).await
    }

    async fn list_seasonal(
        &self,
        month: u8,
        location: &str,
    ) -> Result<Vec<PlantRecord>, CatalogClientError> {
        CatalogClient::list_seasonal(self, month, location).await
    }
}

/// A catalog client that can be seeded with mock responses.
///
/// Responses are served in the order they were pushed,
/// regardless of which operation is called.
#[derive(Debug, Default, Clone)]
pub struct MockClient {
    pub mock_responses: MockField<VecDeque<Response>>,
}

impl MockClient {
    /// Create a new mock client, potentially reading mock responses from disk
    pub fn new(mock_data_path: Option<impl AsRef<Path>>) -> Result<Self, MockDataError> {
        let mock_responses = match mock_data_path {
            Some(path) => read_mock_responses(path)?,
            None => VecDeque::new(),
        };
        Ok(Self {
            mock_responses: Arc::new(Mutex::new(mock_responses)),
        })
    }

    fn push(&self, response: Response) {
        self.mock_responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(response);
    }

    /// Push a new list response into the list of mock responses
    pub fn push_list_response(&mut self, plants: Vec<RawPlant>) {
        self.push(Response::List(plants));
    }

    /// Push a new single plant response into the list of mock responses
    pub fn push_item_response(&mut self, plant: RawPlant) {
        self.push(Response::Item(plant));
    }

    /// Push a failed response into the list of mock responses
    pub fn push_error_response(&mut self, status: StatusCode) {
        self.push(Response::Error(GenericResponse {
            status: status.as_u16(),
        }));
    }

    fn pop(&self, operation: &str) -> Result<Response, CatalogClientError> {
        let response = self
            .mock_responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();
        debug!(operation, ?response, "serving mock catalog response");

        match response {
            Some(Response::Error(GenericResponse { status })) => {
                Err(CatalogClientError::Transport {
                    status: StatusCode::from_u16(status)
                        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                })
            },
            Some(response) => Ok(response),
            None => Err(CatalogClientError::Decode {
                detail: format!("no mock response left for '{operation}'"),
            }),
        }
    }

    fn pop_list(&self, operation: &str) -> Result<Vec<PlantRecord>, CatalogClientError> {
        match self.pop(operation)? {
            Response::List(plants) => Ok(plants.iter().map(normalize).collect()),
            other => Err(unexpected_mock_response(operation, &other)),
        }
    }
}

fn unexpected_mock_response(operation: &str, response: &Response) -> CatalogClientError {
    CatalogClientError::Decode {
        detail: format!("expected mock response for '{operation}', found {response:?}"),
    }
}

impl ClientTrait for MockClient {
    async fn list_all(&self) -> Result<Vec<PlantRecord>, CatalogClientError> {
        self.pop_list("list_all")
    }

    async fn get_by_id(&self, _id: &str) -> Result<PlantRecord, CatalogClientError> {
        match self.pop("get_by_id")? {
            Response::Item(plant) => Ok(normalize(&plant)),
            other => Err(unexpected_mock_response("get_by_id", &other)),
        }
    }

    async fn list_by_category(
        &self,
        _category: Category,
    ) -> Result<Vec<PlantRecord>, CatalogClientError> {
        self.pop_list("list_by_category")
    }

    async fn list_by_difficulty(
        &self,
        _difficulty: Difficulty,
    ) -> Result<Vec<PlantRecord>, CatalogClientError> {
        self.pop_list("list_by_difficulty")
    }

    async fn search(&self, _query: &str) -> Result<Vec<PlantRecord>, CatalogClientError> {
        self.pop_list("search")
    }

    async fn list_seasonal(
        &self,
        _month: u8,
        _location: &str,
    ) -> Result<Vec<PlantRecord>, CatalogClientError> {
        self.pop_list("list_seasonal")
    }
}
