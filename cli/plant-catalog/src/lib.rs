//! HTTP client for the Pocket Plants catalog API.
//!
//! This crate provides:
//! - HTTP client construction from an explicit [`CatalogClientConfig`]
//! - Typed errors separating transport failures from undecodable payloads
//! - Normalization of the heterogeneous backend plant shapes into one
//!   canonical [`PlantRecord`]
//!
//! ## Usage
//!
//! ```ignore
//! use plant_catalog::{CatalogClient, CatalogClientConfig};
//!
//! let config = CatalogClientConfig::new("http://localhost:3000");
//! let client = CatalogClient::new(config)?;
//! let plants = client.search("basil").await?;
//! ```

mod client;
mod config;
mod error;
mod normalize;
mod types;

#[cfg(any(test, feature = "tests"))]
pub mod test_helpers;

pub use client::CatalogClient;
pub use config::{CatalogClientConfig, DEFAULT_CATALOG_URL};
pub use error::CatalogClientError;
pub use normalize::normalize;
pub use types::{
    Category,
    DEFAULT_PLANT_EMOJI,
    DEFAULT_PLANT_NAME,
    Difficulty,
    ParseCategoryError,
    ParseDifficultyError,
    PlantRecord,
    RawPlant,
};
