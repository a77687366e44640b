//! Command dispatch for one host connection.
//!
//! [`Session`] owns the composition root's handles: the shared
//! [`ReloadRegistry`], the [`SpawnDecisionEngine`] registered with it, and
//! the path configuration is reloaded from. It turns one input line into one
//! [`Response`] and never fails as a whole; a bad line yields an error
//! response.

use std::path::PathBuf;
use std::sync::Arc;

use cavespawn_core::config::CaveSpawnConfig;
use cavespawn_core::engine::SpawnDecisionEngine;
use cavespawn_core::registry::{ReloadError, ReloadRegistry};
use cavespawn_core::snapshot::ConfigurationSnapshot;
use cavespawn_types::Difficulty;
use rand::Rng;
use tracing::{info, warn};

use crate::protocol::{AboutReport, Command, Response};

/// Dispatches protocol commands against the engine and registry.
pub struct Session<R> {
    config_path: PathBuf,
    registry: Arc<ReloadRegistry>,
    engine: Arc<SpawnDecisionEngine>,
    rng: R,
}

impl<R: Rng> Session<R> {
    /// Build the engine against `initial`, registering it with `registry`.
    pub fn new(
        config_path: PathBuf,
        registry: Arc<ReloadRegistry>,
        initial: Arc<ConfigurationSnapshot>,
        rng: R,
    ) -> Self {
        let engine = SpawnDecisionEngine::new(&registry, initial);
        Self {
            config_path,
            registry,
            engine,
            rng,
        }
    }

    /// Handle one input line.
    pub fn handle_line(&mut self, line: &str) -> Response {
        match serde_json::from_str::<Command>(line) {
            Ok(command) => self.handle(command),
            Err(e) => {
                warn!(error = %e, "Malformed command line");
                Response::error(format!("malformed command: {e}"))
            }
        }
    }

    /// Handle one parsed command.
    pub fn handle(&mut self, command: Command) -> Response {
        match command {
            Command::Spawn { event } => {
                Response::decision(self.engine.decide(&event, &mut self.rng))
            }
            Command::Reload => self.reload(),
            Command::About { difficulty, y } => Response::About(self.about(difficulty, y)),
        }
    }

    fn reload(&self) -> Response {
        let config = match CaveSpawnConfig::from_file(&self.config_path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    path = %self.config_path.display(),
                    error = %e,
                    "Reload failed to read configuration"
                );
                return Response::error(format!("reload failed, previous configuration kept: {e}"));
            }
        };

        match self.registry.reload_config(&config) {
            Ok(_) => {
                let consumers = self.registry.len();
                info!(consumers, "Configuration reloaded");
                Response::Reloaded { consumers }
            }
            Err(e @ ReloadError::Invalid { .. }) => {
                Response::error(format!("reload failed, previous configuration kept: {e}"))
            }
            Err(ReloadError::ConsumerNotificationFailed { total, failures }) => {
                let names: Vec<String> = failures
                    .iter()
                    .map(|f| format!("{} ({}): {}", f.name, f.id, f.error))
                    .collect();
                Response::error(format!(
                    "reload applied, but {} of {total} consumers failed: {}",
                    failures.len(),
                    names.join("; ")
                ))
            }
        }
    }

    fn about(&self, difficulty: Difficulty, y: f64) -> AboutReport {
        let snapshot = self.engine.snapshot();
        let chances = snapshot.chances();
        AboutReport {
            min_y: snapshot.range().min_y(),
            max_y: snapshot.range().max_y(),
            allow_spawns_below_min_y: snapshot.range().allow_spawns_below_min_y(),
            easy_chance: chances.for_difficulty(Difficulty::Easy),
            normal_chance: chances.for_difficulty(Difficulty::Normal),
            hard_chance: chances.for_difficulty(Difficulty::Hard),
            distribution: snapshot.distribution(),
            y,
            difficulty,
            spawn_chance: self.engine.spawn_chance_at(difficulty, y),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::path::Path;

    use cavespawn_types::{EntityKind, SpawnDecision, SpawnDistribution, SpawnReason};
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use serde_json::Value;

    use super::*;

    const YAML: &str = r"
spawn_options:
  range: { min_y: -64, max_y: -8 }
  distribution: constant
  chances: { easy: 1.0, normal: 1.0, hard: 1.0 }
  jockey_chance: 1.0
biomes: [DEEP_DARK, DESERT]
environments: [NORMAL]
replace_entities: [SPIDER]
";

    fn temp_config(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "cavespawn-{name}-{}.yaml",
            std::process::id()
        ));
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn session_for(path: &Path) -> Session<SmallRng> {
        let config = CaveSpawnConfig::from_file(path).unwrap();
        let snapshot = Arc::new(ConfigurationSnapshot::from_config(&config).unwrap());
        Session::new(
            path.to_path_buf(),
            Arc::new(ReloadRegistry::new()),
            snapshot,
            SmallRng::seed_from_u64(42),
        )
    }

    fn spider_line(block_y: i32) -> String {
        format!(
            r#"{{"command":"spawn","event":{{"entity_kind":"SPIDER","reason":"NATURAL","y":{block_y}.0,"block_y":{block_y},"difficulty":"NORMAL","biome":"DEEP_DARK","environment":"NORMAL"}}}}"#
        )
    }

    #[test]
    fn spawn_command_returns_replacement() {
        let path = temp_config("spawn", YAML);
        let mut session = session_for(&path);

        let response = session.handle_line(&spider_line(-40));
        assert_eq!(
            response,
            Response::Decision {
                decision: SpawnDecision::Replace(EntityKind::CaveSpider),
                follow_up_reason: Some(SpawnReason::Natural),
                juvenile: false,
            }
        );

        let response = session.handle_line(&spider_line(0));
        assert_eq!(response, Response::decision(SpawnDecision::NoOp));
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn cave_spider_gets_juvenile_husk_in_desert() {
        let path = temp_config("rider", YAML);
        let mut session = session_for(&path);
        let line = r#"{"command":"spawn","event":{"entity_kind":"CAVE_SPIDER","reason":"NATURAL","y":-30.0,"block_y":-30,"difficulty":"HARD","biome":"DESERT","environment":"NORMAL"}}"#;

        let response = session.handle_line(line);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "decision");
        assert_eq!(json["decision"]["action"], "attach_rider");
        assert_eq!(json["decision"]["kind"], "HUSK");
        assert_eq!(json["follow_up_reason"], "JOCKEY");
        assert_eq!(json["juvenile"], Value::Bool(true));
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn unknown_list_entries_are_skipped_not_fatal() {
        let yaml = YAML
            .replace("biomes: [DEEP_DARK, DESERT]", "biomes: [MOON, DEEP_DARK]")
            .replace("replace_entities: [SPIDER]", "replace_entities: [SPIDER, DRAGONFLY]");
        let path = temp_config("unknown-entries", &yaml);
        let mut session = session_for(&path);

        let snapshot = session.engine.snapshot();
        assert_eq!(snapshot.allowed_biomes().len(), 1);
        assert_eq!(snapshot.replaceable_kinds().len(), 1);
        assert_eq!(
            session.handle_line(&spider_line(-40)),
            Response::decision(SpawnDecision::Replace(EntityKind::CaveSpider))
        );

        let response = session.handle_line(r#"{"command":"reload"}"#);
        assert_eq!(response, Response::Reloaded { consumers: 1 });
        assert_eq!(session.engine.snapshot().allowed_biomes().len(), 1);
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn malformed_line_is_an_error_response() {
        let path = temp_config("malformed", YAML);
        let mut session = session_for(&path);
        assert!(matches!(session.handle_line("not json"), Response::Error { .. }));
        assert!(matches!(
            session.handle_line(r#"{"command":"launch"}"#),
            Response::Error { .. }
        ));
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn reload_picks_up_file_changes() {
        let path = temp_config("reload", YAML);
        let mut session = session_for(&path);

        std::fs::write(&path, YAML.replace("replace_entities: [SPIDER]", "replace_entities: []"))
            .unwrap();
        let response = session.handle_line(r#"{"command":"reload"}"#);
        assert_eq!(response, Response::Reloaded { consumers: 1 });

        let response = session.handle_line(&spider_line(-40));
        assert_eq!(response, Response::decision(SpawnDecision::NoOp));
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn invalid_reload_keeps_previous_configuration() {
        let path = temp_config("invalid", YAML);
        let mut session = session_for(&path);

        std::fs::write(&path, YAML.replace("{ min_y: -64, max_y: -8 }", "{ min_y: 0, max_y: -8 }"))
            .unwrap();
        let response = session.handle_line(r#"{"command":"reload"}"#);
        assert!(matches!(response, Response::Error { .. }));

        let response = session.handle_line(&spider_line(-40));
        assert_eq!(
            response,
            Response::decision(SpawnDecision::Replace(EntityKind::CaveSpider))
        );
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn missing_file_on_reload_is_reported() {
        let path = temp_config("missing", YAML);
        let mut session = session_for(&path);
        std::fs::remove_file(&path).unwrap();

        let response = session.handle_line(r#"{"command":"reload"}"#);
        assert!(matches!(response, Response::Error { .. }));
    }

    #[test]
    fn about_reports_range_gated_chance() {
        let path = temp_config("about", YAML);
        let mut session = session_for(&path);

        let inside = session.handle_line(r#"{"command":"about","difficulty":"HARD","y":-40.0}"#);
        match inside {
            Response::About(report) => {
                assert_eq!(report.min_y, -64);
                assert_eq!(report.max_y, -8);
                assert_eq!(report.distribution, SpawnDistribution::Constant);
                assert!((report.spawn_chance - 1.0).abs() < f64::EPSILON);
            }
            other => panic!("expected about report, got {other:?}"),
        }

        let above = session.handle_line(r#"{"command":"about","difficulty":"HARD","y":10.0}"#);
        match above {
            Response::About(report) => assert!(report.spawn_chance.abs() < f64::EPSILON),
            other => panic!("expected about report, got {other:?}"),
        }
        std::fs::remove_file(path).unwrap();
    }
}
