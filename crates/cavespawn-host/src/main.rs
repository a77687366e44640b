//! Host adapter binary for the cavespawn rules.
//!
//! Stands in for the game server: it owns the composition root, reads spawn
//! reports and administrative commands as JSON lines on stdin, and answers
//! each with one JSON line on stdout.
//!
//! # Startup Sequence
//!
//! 1. Resolve the config path (`CAVESPAWN_CONFIG`, default
//!    `cavespawn-config.yaml`) and load it
//! 2. Initialize structured logging (tracing), honoring the `debug` flag
//! 3. Validate the config into the initial snapshot, reporting skipped or
//!    clamped entries
//! 4. Create the reload registry and register the log-level consumer
//! 5. Build the session, which registers the decision engine
//! 6. Serve stdin until end of input

mod error;
mod logging;
mod protocol;
mod session;

use std::path::PathBuf;
use std::sync::Arc;

use cavespawn_core::config::CaveSpawnConfig;
use cavespawn_core::registry::{ConfigurationConsumer, ReloadRegistry};
use cavespawn_core::snapshot::ConfigurationSnapshot;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{info, warn};

use crate::error::HostError;
use crate::session::Session;

/// Default configuration file, relative to the working directory.
const DEFAULT_CONFIG_PATH: &str = "cavespawn-config.yaml";

/// Application entry point for the host adapter.
///
/// # Errors
///
/// Returns an error if startup fails or stdin/stdout become unusable.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration.
    let config_path = std::env::var("CAVESPAWN_CONFIG")
        .map_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    let config_missing = !config_path.exists();
    let config = if config_missing {
        CaveSpawnConfig::default()
    } else {
        CaveSpawnConfig::from_file(&config_path).map_err(HostError::from)?
    };

    // 2. Initialize structured logging before validation so its warnings are seen.
    let log_level = logging::init(config.debug)?;
    info!("cavespawn-host starting");
    if config_missing {
        warn!(path = %config_path.display(), "Config file not found, using defaults");
    }

    // 3. Validate.
    let snapshot = Arc::new(ConfigurationSnapshot::from_config(&config).map_err(HostError::from)?);
    info!(
        path = %config_path.display(),
        min_y = snapshot.range().min_y(),
        max_y = snapshot.range().max_y(),
        distribution = %snapshot.distribution(),
        biomes = snapshot.allowed_biomes().len(),
        environments = snapshot.allowed_environments().len(),
        replaceable = snapshot.replaceable_kinds().len(),
        locale = snapshot.locale(),
        metrics = snapshot.metrics(),
        "Configuration loaded"
    );

    // 4. Registry.
    let registry = Arc::new(ReloadRegistry::new());
    registry.register(Arc::new(log_level) as Arc<dyn ConfigurationConsumer>);

    // 5. Session (registers the engine).
    let mut session = Session::new(config_path, Arc::clone(&registry), snapshot, rand::rng());
    info!(consumers = registry.len(), "Decision engine ready");

    // 6. Serve.
    serve(&mut session).await?;
    info!("stdin closed, shutting down");
    Ok(())
}

async fn serve<R: rand::Rng>(session: &mut Session<R>) -> Result<(), HostError> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let response = session.handle_line(&line);
        let mut encoded = serde_json::to_vec(&response)?;
        encoded.push(b'\n');
        stdout.write_all(&encoded).await?;
        stdout.flush().await?;
    }
    Ok(())
}
