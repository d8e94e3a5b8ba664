//! Retrieval state for the plant list and the plant detail view.
//!
//! Each view is an independent query target.
//! Issuing a query on a target supersedes every query issued on it before,
//! so whatever resolves last, the target reflects the latest issued query.

use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};

use plant_catalog::{CatalogClientError, Category, Difficulty, PlantRecord};
use tracing::debug;

use crate::providers::catalog::ClientTrait;
use crate::utils::display_chain;

/// Where a query target is in its lifecycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Phase {
    /// Nothing was requested yet, or an error was cleared.
    #[default]
    Idle,
    Loading,
    Ready,
    /// The latest query failed with this message.
    Failed(String),
}

/// Snapshot of a single query target.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TargetState<T> {
    phase: Phase,
    data: T,
}

impl<T> TargetState<T> {
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            Phase::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Data of the latest query, if it succeeded.
    pub fn current(&self) -> Option<&T> {
        match self.phase {
            Phase::Ready => Some(&self.data),
            _ => None,
        }
    }

    /// Data of the last successful query,
    /// possibly stale if a later query is loading or failed.
    pub fn last_known(&self) -> &T {
        &self.data
    }
}

/// Whether a resolved query was reflected in the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryOutcome {
    Applied,
    /// A later query was issued on the same target in the meantime.
    Superseded,
}

#[derive(Debug, Default)]
struct Target<T> {
    state: TargetState<T>,
    issued: u64,
}

impl<T> Target<T> {
    /// Issue a new query and return its ticket.
    fn begin(&mut self) -> u64 {
        self.issued += 1;
        self.state.phase = Phase::Loading;
        self.issued
    }

    fn finish(&mut self, ticket: u64, result: Result<T, String>) -> QueryOutcome {
        if ticket != self.issued {
            return QueryOutcome::Superseded;
        }
        match result {
            Ok(data) => {
                self.state.data = data;
                self.state.phase = Phase::Ready;
            },
            Err(message) => self.state.phase = Phase::Failed(message),
        }
        QueryOutcome::Applied
    }

    fn clear_error(&mut self) {
        if let Phase::Failed(_) = self.state.phase {
            self.state.phase = Phase::Idle;
        }
    }
}

/// Combined snapshot of both query targets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RetrievalState {
    pub list: TargetState<Vec<PlantRecord>>,
    pub detail: TargetState<Option<PlantRecord>>,
}

impl RetrievalState {
    /// Records of the latest successful list query.
    pub fn records(&self) -> &[PlantRecord] {
        self.list.current().map(Vec::as_slice).unwrap_or_default()
    }

    /// The plant of the latest successful detail query.
    pub fn selected(&self) -> Option<&PlantRecord> {
        self.detail.current().and_then(Option::as_ref)
    }

    pub fn loading(&self) -> bool {
        self.list.is_loading() || self.detail.is_loading()
    }

    /// The list error, or else the detail error.
    pub fn error(&self) -> Option<&str> {
        self.list.error().or_else(|| self.detail.error())
    }

    pub fn has_plants(&self) -> bool {
        !self.records().is_empty()
    }

    pub fn plant_count(&self) -> usize {
        self.records().len()
    }
}

/// Issues catalog queries and tracks their results per query target.
#[derive(Debug)]
pub struct PlantCatalog<C> {
    client: C,
    list: Mutex<Target<Vec<PlantRecord>>>,
    detail: Mutex<Target<Option<PlantRecord>>>,
}

fn lock<T>(target: &Mutex<T>) -> MutexGuard<'_, T> {
    target.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<C: ClientTrait> PlantCatalog<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            list: Mutex::default(),
            detail: Mutex::default(),
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn state(&self) -> RetrievalState {
        RetrievalState {
            list: self.list_state(),
            detail: self.detail_state(),
        }
    }

    pub fn list_state(&self) -> TargetState<Vec<PlantRecord>> {
        lock(&self.list).state.clone()
    }

    pub fn detail_state(&self) -> TargetState<Option<PlantRecord>> {
        lock(&self.detail).state.clone()
    }

    pub async fn fetch_plants(&self) -> QueryOutcome {
        self.query_list("all plants", self.client.list_all()).await
    }

    pub async fn plants_by_category(&self, category: Category) -> QueryOutcome {
        let query = format!("category {category}");
        self.query_list(&query, self.client.list_by_category(category))
            .await
    }

    pub async fn plants_by_difficulty(&self, difficulty: Difficulty) -> QueryOutcome {
        let query = format!("difficulty {difficulty}");
        self.query_list(&query, self.client.list_by_difficulty(difficulty))
            .await
    }

    /// Search plants, or list all of them if `query` is blank.
    pub async fn search_plants(&self, query: &str) -> QueryOutcome {
        if query.trim().is_empty() {
            return self.fetch_plants().await;
        }
        let description = format!("search '{query}'");
        self.query_list(&description, self.client.search(query))
            .await
    }

    pub async fn seasonal_plants(&self, month: u8, location: &str) -> QueryOutcome {
        let query = format!("seasonal {month} at '{location}'");
        self.query_list(&query, self.client.list_seasonal(month, location))
            .await
    }

    pub async fn fetch_plant(&self, id: &str) -> QueryOutcome {
        let ticket = lock(&self.detail).begin();
        debug!(target_name = "detail", ticket, id, "issuing catalog query");

        let result = self
            .client
            .get_by_id(id)
            .await
            .map(Some)
            .map_err(|err| error_message(&err));

        let outcome = lock(&self.detail).finish(ticket, result);
        log_outcome("detail", ticket, outcome);
        outcome
    }

    /// Move a failed list back to idle.
    pub fn clear_list_error(&self) {
        lock(&self.list).clear_error();
    }

    /// Move a failed detail view back to idle.
    pub fn clear_detail_error(&self) {
        lock(&self.detail).clear_error();
    }

    /// Drop the selected plant.
    ///
    /// A detail query still in flight is superseded.
    pub fn clear_selected_plant(&self) {
        let mut detail = lock(&self.detail);
        detail.issued += 1;
        detail.state = TargetState::default();
    }

    async fn query_list(
        &self,
        query: &str,
        request: impl Future<Output = Result<Vec<PlantRecord>, CatalogClientError>>,
    ) -> QueryOutcome {
        let ticket = lock(&self.list).begin();
        debug!(target_name = "list", ticket, query, "issuing catalog query");

        let result = request.await.map_err(|err| error_message(&err));

        let outcome = lock(&self.list).finish(ticket, result);
        log_outcome("list", ticket, outcome);
        outcome
    }
}

fn error_message(err: &CatalogClientError) -> String {
    debug!(error = %err, "catalog query failed");
    display_chain(err)
}

fn log_outcome(target_name: &str, ticket: u64, outcome: QueryOutcome) {
    if outcome == QueryOutcome::Superseded {
        debug!(target_name, ticket, "discarding superseded response");
    }
}
