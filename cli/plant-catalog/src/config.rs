//! Configuration types for catalog client construction.

use std::collections::BTreeMap;
use std::time::Duration;

/// Catalog instance used when nothing else is configured.
pub const DEFAULT_CATALOG_URL: &str = "http://localhost:3000";

/// Configuration for catalog client construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogClientConfig {
    /// Base URL for the catalog API.
    ///
    /// May carry a path prefix, e.g. `https://example.com/api`.
    pub catalog_url: String,
    /// User agent sent with every request.
    pub user_agent: Option<String>,
    /// Additional headers to include in requests.
    pub extra_headers: BTreeMap<String, String>,
    /// Timeout for establishing a connection.
    /// The transport default applies if unset.
    pub connect_timeout: Option<Duration>,
    /// Timeout for a complete request.
    /// The transport default applies if unset.
    pub request_timeout: Option<Duration>,
}

impl CatalogClientConfig {
    pub fn new(catalog_url: impl Into<String>) -> Self {
        Self {
            catalog_url: catalog_url.into(),
            ..Default::default()
        }
    }
}

impl Default for CatalogClientConfig {
    fn default() -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            user_agent: None,
            extra_headers: BTreeMap::new(),
            connect_timeout: None,
            request_timeout: None,
        }
    }
}
