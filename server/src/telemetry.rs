//! Logging setup.

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LogFormat;
use crate::error::ServerError;

const DEFAULT_DIRECTIVES: &str = "info,tower_http=debug";

/// Install the global subscriber. `RUST_LOG` wins over the default filter.
pub fn init(format: LogFormat) -> Result<(), ServerError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));
    let builder = fmt().with_env_filter(filter);
    let result = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    result.map_err(|err| ServerError::Telemetry(err.to_string()))
}
