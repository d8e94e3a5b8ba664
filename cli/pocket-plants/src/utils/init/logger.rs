use std::sync::OnceLock;

use tracing::{debug, error};
use tracing_subscriber::prelude::*;
use tracing_subscriber::reload::Handle;
use tracing_subscriber::{EnvFilter, Registry};

use crate::commands::Verbosity;

static LOGGER_HANDLE: OnceLock<Handle<EnvFilter, Registry>> = OnceLock::new();

/// Filter directives for a verbosity level.
///
/// `RUST_LOG` takes precedence over these.
pub(crate) fn log_filter(verbosity: Verbosity) -> &'static str {
    match verbosity {
        // Show only errors
        Verbosity::Quiet => "off,pocket_plants=error",
        // Only show warnings
        Verbosity::Verbose(0) => "off,pocket_plants=warn",
        // Show our own info logs
        Verbosity::Verbose(1) => "off,pocket_plants=info",
        // Also show debug from our libraries
        Verbosity::Verbose(2) => "off,pocket_plants=debug,plant_sdk=debug,plant_catalog=debug",
        Verbosity::Verbose(3) => "off,pocket_plants=trace,plant_sdk=trace,plant_catalog=trace",
        // Also show debug from the http stack
        Verbosity::Verbose(4) => "debug,pocket_plants=trace,plant_sdk=trace,plant_catalog=trace",
        Verbosity::Verbose(_) => "trace",
    }
}

/// Install the global subscriber on first use,
/// update its filter on every later call.
pub(crate) fn init_logger(verbosity: Option<Verbosity>) {
    let verbosity = verbosity.unwrap_or_default();

    let filter_handle = LOGGER_HANDLE.get_or_init(|| {
        let (subscriber, reload_handle) = create_registry_and_filter_reload_handle();
        subscriber.init();
        reload_handle
    });

    update_filters(filter_handle, log_filter(verbosity));
}

fn update_filters(filter_handle: &Handle<EnvFilter, Registry>, log_filter: &str) {
    let result = filter_handle.modify(|layer| {
        match EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(log_filter)) {
            Ok(new_filter) => *layer = new_filter,
            Err(err) => {
                error!("Updating logger filter failed: {}", err);
            },
        };
    });
    if let Err(err) = result {
        error!("Updating logger filter failed: {}", err);
    }
}

fn create_registry_and_filter_reload_handle() -> (
    impl tracing_subscriber::util::SubscriberInitExt,
    Handle<EnvFilter, Registry>,
) {
    debug!("Initializing logger");
    // Starts out permissive, `update_filters` narrows it right after.
    let filter = EnvFilter::new("trace");
    let (filter, filter_reload_handle) = tracing_subscriber::reload::Layer::new(filter);
    let log_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(filter);
    let registry = tracing_subscriber::registry().with(log_layer);

    (registry, filter_reload_handle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_verbosity_has_a_valid_filter() {
        let levels = [Verbosity::Quiet]
            .into_iter()
            .chain((0..6).map(Verbosity::Verbose));
        for verbosity in levels {
            let directives = log_filter(verbosity);
            assert!(
                EnvFilter::try_new(directives).is_ok(),
                "{verbosity:?}: {directives}"
            );
        }
    }

    #[test]
    fn default_verbosity_shows_warnings_only() {
        assert_eq!(log_filter(Verbosity::default()), "off,pocket_plants=warn");
    }
}
