//! Structured logging setup and runtime log-level switching.
//!
//! Logs go to stderr so stdout stays reserved for protocol responses. When
//! `RUST_LOG` is set it wins and stays fixed; otherwise the level follows the
//! configuration's `debug` flag and is swapped on every reload by
//! [`LogLevelConsumer`].

use std::sync::Arc;

use cavespawn_core::registry::{ConfigurationConsumer, ConsumerError};
use cavespawn_core::snapshot::ConfigurationSnapshot;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt, reload};

use crate::error::HostError;

/// Follows the `debug` flag across reloads.
pub struct LogLevelConsumer {
    handle: reload::Handle<EnvFilter, Registry>,
    pinned: bool,
}

impl ConfigurationConsumer for LogLevelConsumer {
    fn name(&self) -> &str {
        "log-level"
    }

    fn on_reload(&self, snapshot: &Arc<ConfigurationSnapshot>) -> Result<(), ConsumerError> {
        if self.pinned {
            return Ok(());
        }
        self.handle
            .reload(filter_for(snapshot.debug()))
            .map_err(|e| ConsumerError::new(format!("failed to swap log filter: {e}")))
    }
}

/// Install the global subscriber.
///
/// # Errors
///
/// Returns [`HostError::Logging`] if a global subscriber is already set.
pub fn init(debug: bool) -> Result<LogLevelConsumer, HostError> {
    let (filter, pinned) = match EnvFilter::try_from_default_env() {
        Ok(filter) => (filter, true),
        Err(_) => (filter_for(debug), false),
    };
    let (filter, handle) = reload::Layer::new(filter);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .try_init()
        .map_err(|e| HostError::Logging {
            message: e.to_string(),
        })?;

    Ok(LogLevelConsumer { handle, pinned })
}

fn filter_for(debug: bool) -> EnvFilter {
    EnvFilter::new(if debug { "debug" } else { "info" })
}
