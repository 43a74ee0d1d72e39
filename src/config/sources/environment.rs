//! Environment variable source: CHANGE_UUID prefix with __ separator

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::Environment;

/// Add environment variable overlay to builder.
///
/// `CHANGE_UUID__STORE__RETENTION_SECS=60` sets `store.retention_secs`.
pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix("CHANGE_UUID")
            .separator("__")
            .try_parsing(true),
    )
}
