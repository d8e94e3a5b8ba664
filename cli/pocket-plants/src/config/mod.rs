use std::collections::{BTreeMap, HashMap};
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use config::{Config as HierarchicalConfig, Environment};
use plant_catalog::{CatalogClientConfig, DEFAULT_CATALOG_URL};
use serde::{Deserialize, Serialize};
use tracing::debug;
use xdg::BaseDirectories;

/// Name of the directory holding our configuration
const CONFIG_DIR_NAME: &str = "pocket-plants";
const CONFIG_DIR_VAR: &str = "POCKET_PLANTS_CONFIG_DIR";
const ENV_PREFIX: &str = "POCKET_PLANTS_";
pub const CONFIG_FILE: &str = "pocket-plants.toml";

#[derive(Clone, Debug, Deserialize, Default, Serialize, PartialEq)]
pub struct Config {
    /// The URL of the catalog instance to use
    // Kept as a String; `Url` would append a trailing slash.
    pub catalog_url: Option<String>,

    /// User agent sent with catalog requests
    pub user_agent: Option<String>,

    /// Timeout for a whole catalog request, in seconds
    pub request_timeout_secs: Option<u64>,

    /// Timeout for connecting to the catalog, in seconds
    pub connect_timeout_secs: Option<u64>,

    /// Additional headers sent with catalog requests
    #[serde(default)]
    pub extra_headers: BTreeMap<String, String>,

    /// Directory the config file was read from (default:
    /// `$XDG_CONFIG_HOME/pocket-plants`)
    #[serde(default)]
    pub config_dir: PathBuf,
}

impl Config {
    /// Creates a [Config] from defaults, config files and the environment
    pub fn parse() -> Result<Config> {
        let raw = read_raw_config()?;
        let config: Config = raw.try_deserialize().context("Could not parse config")?;
        debug!(?config, "parsed config");
        Ok(config)
    }

    /// The catalog client configuration described by this config.
    pub fn catalog_client_config(&self) -> CatalogClientConfig {
        CatalogClientConfig {
            catalog_url: self
                .catalog_url
                .clone()
                .unwrap_or_else(|| DEFAULT_CATALOG_URL.to_string()),
            user_agent: self.user_agent.clone(),
            extra_headers: self.extra_headers.clone(),
            connect_timeout: self.connect_timeout_secs.map(Duration::from_secs),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
        }
    }
}

fn config_dir() -> Result<PathBuf> {
    match env::var(CONFIG_DIR_VAR) {
        Ok(v) => {
            debug!("`${CONFIG_DIR_VAR}` set: {v}");
            Ok(v.into())
        },
        Err(_) => {
            let config_dir = BaseDirectories::with_prefix(CONFIG_DIR_NAME)
                .get_config_home()
                .context("Could not determine config directory")?;
            debug!("`${CONFIG_DIR_VAR}` not set, using {config_dir:?}");
            Ok(config_dir)
        },
    }
}

/// Layers, lowest precedence first:
/// XDG config files, `$POCKET_PLANTS_CONFIG_DIR/pocket-plants.toml`,
/// `POCKET_PLANTS_*` environment variables.
fn read_raw_config() -> Result<HierarchicalConfig> {
    let config_dir = config_dir()?;

    let mut builder = HierarchicalConfig::builder()
        .set_default("catalog_url", DEFAULT_CATALOG_URL)?
        // The config file cannot change the config dir.
        .set_override("config_dir", path_str(&config_dir)?)?;

    // look for files in XDG_CONFIG_DIRS locations
    for file in BaseDirectories::with_prefix(CONFIG_DIR_NAME).find_config_files(CONFIG_FILE) {
        if file.parent() == Some(config_dir.as_path()) {
            continue;
        }
        debug!(?file, "reading config file");
        builder = builder.add_source(config::File::from(file).format(config::FileFormat::Toml));
    }

    // Add the explicit config dir file last
    builder = builder.add_source(
        config::File::from(config_dir.join(CONFIG_FILE))
            .format(config::FileFormat::Toml)
            .required(false),
    );

    // override via env variables
    let envs = env::vars()
        .filter_map(|(k, v)| k.strip_prefix(ENV_PREFIX).map(|k| (k.to_owned(), v)))
        .collect::<HashMap<_, _>>();

    let final_config = builder
        .add_source(
            Environment::default()
                .source(Some(envs))
                .try_parsing(true),
        )
        .build()?;
    Ok(final_config)
}

fn path_str(path: &Path) -> Result<&str> {
    path.to_str()
        .with_context(|| format!("Config directory is not valid UTF-8: {path:?}"))
}
