use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use plant_sdk::providers::catalog::{
    CatalogClient,
    Client,
    MockClient,
    PLANTS_CATALOG_MOCK_DATA_VAR,
};
use tracing::debug;

use crate::config::Config;

/// Initialize the catalog client
///
/// - Initialize a mock client if `POCKET_PLANTS_CATALOG_MOCK` points to mock data
/// - Initialize a real client otherwise
pub fn init_catalog_client(config: &Config) -> Result<Client> {
    if let Ok(path_str) = std::env::var(PLANTS_CATALOG_MOCK_DATA_VAR) {
        let path = PathBuf::from(path_str);
        if !path.exists() {
            bail!("path to mock data file doesn't exist: {}", path.display());
        }

        debug!(mock_data_path = %path.display(), "using mock catalog client");
        return Ok(MockClient::new(Some(path))?.into());
    }

    let client_config = config.catalog_client_config();
    debug!(catalog_url = %client_config.catalog_url, "using catalog client");
    let client = CatalogClient::new(client_config).context("Could not create catalog client")?;
    Ok(client.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn real_client_by_default() {
        let config = Config {
            catalog_url: Some("https://plants.example.com/api".to_string()),
            ..Default::default()
        };

        let client = temp_env::with_var_unset(PLANTS_CATALOG_MOCK_DATA_VAR, || {
            init_catalog_client(&config)
        })
        .unwrap();

        match client {
            Client::Catalog(client) => {
                assert_eq!(client.catalog_url(), "https://plants.example.com/api")
            },
            other => panic!("expected a catalog client, got {other:?}"),
        }
    }

    #[test]
    fn mock_client_when_mock_data_is_set() {
        let mock_data = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(mock_data.path(), "[]").unwrap();

        let client = temp_env::with_var(PLANTS_CATALOG_MOCK_DATA_VAR, Some(mock_data.path()), || {
            init_catalog_client(&Config::default())
        })
        .unwrap();

        assert!(matches!(client, Client::Mock(_)), "{client:?}");
    }

    #[test]
    fn missing_mock_data_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");

        let result = temp_env::with_var(PLANTS_CATALOG_MOCK_DATA_VAR, Some(&missing), || {
            init_catalog_client(&Config::default())
        });

        let err = result.unwrap_err();
        assert!(err.to_string().contains("doesn't exist"), "{err}");
    }

    #[test]
    fn invalid_catalog_url_is_an_error() {
        let config = Config {
            catalog_url: Some("not a url".to_string()),
            ..Default::default()
        };

        let result = temp_env::with_var_unset(PLANTS_CATALOG_MOCK_DATA_VAR, || {
            init_catalog_client(&config)
        });

        assert!(result.is_err());
    }
}
