//! Logger setup
//!
//! `RUST_LOG` picks the filter unless the level was set explicitly, either by
//! `--log-level`/`STUDIO_LOG` or by debug mode in the config file.

use env_logger::{Builder, Env};
use db_studio_core::StoreConfig;

/// Build the logger; `explicit` makes the configured filter win over the environment
pub fn logger_builder(env: Env<'_>, config: &StoreConfig, explicit: bool) -> Builder {
    let filter = config.log_filter();
    let mut builder = Builder::from_env(env.default_filter_or(filter.clone()));

    if explicit || config.debug_mode {
        builder.parse_filters(&filter);
    }

    builder
}
