//! Raw configuration document for the spawn rules.
//!
//! The canonical configuration lives in `cavespawn-config.yaml`. This module
//! defines structs that mirror the YAML layout field for field, plus a
//! loader. Values here are *raw*: lists are still strings and numbers have
//! not been range-checked. [`ConfigurationSnapshot::from_config`] turns a
//! [`CaveSpawnConfig`] into the validated form the engine consumes.
//!
//! [`ConfigurationSnapshot::from_config`]: crate::snapshot::ConfigurationSnapshot::from_config

use std::fmt::Display;
use std::path::Path;

use serde::Deserialize;
use tracing::warn;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level configuration document.
///
/// Every field has a default, so an empty document is a valid configuration
/// that never replaces anything (all allow-lists empty).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CaveSpawnConfig {
    /// Locale used by the host for player-facing messages.
    #[serde(default = "default_locale")]
    pub locale: String,

    /// Height range, curve, and chance settings.
    #[serde(default)]
    pub spawn_options: SpawnOptionsConfig,

    /// Biome names in which replacement may happen.
    #[serde(default)]
    pub biomes: Vec<String>,

    /// Environment names in which replacement may happen.
    #[serde(default)]
    pub environments: Vec<String>,

    /// Entity kind names that may be replaced.
    #[serde(default)]
    pub replace_entities: Vec<String>,

    /// Whether to enable debug logging.
    #[serde(default)]
    pub debug: bool,

    /// Whether the host should report usage metrics.
    #[serde(default)]
    pub metrics: bool,
}

impl Default for CaveSpawnConfig {
    fn default() -> Self {
        Self {
            locale: default_locale(),
            spawn_options: SpawnOptionsConfig::default(),
            biomes: Vec::new(),
            environments: Vec::new(),
            replace_entities: Vec::new(),
            debug: false,
            metrics: false,
        }
    }
}

impl CaveSpawnConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// Keys the document does not define are ignored after a `warn!`, so a
    /// misspelled or camelCase key is reported instead of silently falling
    /// back to its default.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let document: serde_yml::Value = serde_yml::from_str(yaml)?;
        if document.is_null() {
            return Ok(Self::default());
        }
        for key in unrecognized_keys(&document) {
            warn!(key = %key, "Ignoring unrecognized config key");
        }
        Ok(serde_yml::from_value(document)?)
    }
}

const TOP_LEVEL_KEYS: &[&str] = &[
    "locale",
    "spawn_options",
    "biomes",
    "environments",
    "replace_entities",
    "debug",
    "metrics",
];

const SPAWN_OPTION_KEYS: &[&str] = &["range", "distribution", "chances", "jockey_chance"];

const RANGE_KEYS: &[&str] = &["min_y", "max_y", "allow_spawns_below_min_y"];

const CHANCE_KEYS: &[&str] = &["easy", "normal", "hard"];

/// Dotted paths of every key the configuration structs do not define.
fn unrecognized_keys(document: &serde_yml::Value) -> Vec<String> {
    let mut unknown = Vec::new();
    collect_unknown("", document, TOP_LEVEL_KEYS, &mut unknown);
    if let Some(options) = document.get("spawn_options") {
        collect_unknown("spawn_options.", options, SPAWN_OPTION_KEYS, &mut unknown);
        if let Some(range) = options.get("range") {
            collect_unknown("spawn_options.range.", range, RANGE_KEYS, &mut unknown);
        }
        if let Some(chances) = options.get("chances") {
            collect_unknown("spawn_options.chances.", chances, CHANCE_KEYS, &mut unknown);
        }
    }
    unknown
}

fn collect_unknown(
    prefix: &str,
    section: &serde_yml::Value,
    known: &[&str],
    out: &mut Vec<String>,
) {
    let Some(mapping) = section.as_mapping() else {
        return;
    };
    for key in mapping.keys() {
        match key.as_str() {
            Some(name) if known.contains(&name) => {}
            Some(name) => out.push(format!("{prefix}{name}")),
            None => out.push(format!("{prefix}{key:?}")),
        }
    }
}

/// Spawning options.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SpawnOptionsConfig {
    /// Vertical spawn range.
    #[serde(default)]
    pub range: SpawnRangeConfig,

    /// Curve name: `constant`, `linear`, `hyperbolic`, or `logarithmic`.
    #[serde(default = "default_distribution")]
    pub distribution: String,

    /// Per-difficulty base chances.
    #[serde(default)]
    pub chances: SpawnChancesConfig,

    /// Chance that a cave spider gets a rider on hard difficulty.
    #[serde(default)]
    pub jockey_chance: f64,
}

impl Default for SpawnOptionsConfig {
    fn default() -> Self {
        Self {
            range: SpawnRangeConfig::default(),
            distribution: default_distribution(),
            chances: SpawnChancesConfig::default(),
            jockey_chance: 0.0,
        }
    }
}

/// Vertical spawn range.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SpawnRangeConfig {
    /// Lowest block Y at which replacement happens.
    #[serde(default = "default_min_y")]
    pub min_y: i32,

    /// Highest block Y at which replacement happens.
    #[serde(default = "default_max_y")]
    pub max_y: i32,

    /// Also replace below `min_y`, always at the full base chance.
    #[serde(default)]
    pub allow_spawns_below_min_y: bool,
}

impl Default for SpawnRangeConfig {
    fn default() -> Self {
        Self {
            min_y: default_min_y(),
            max_y: default_max_y(),
            allow_spawns_below_min_y: false,
        }
    }
}

/// Per-difficulty base chances.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SpawnChancesConfig {
    /// Base chance on easy difficulty.
    #[serde(default = "default_easy_chance")]
    pub easy: f64,

    /// Base chance on normal difficulty.
    #[serde(default = "default_normal_chance")]
    pub normal: f64,

    /// Base chance on hard difficulty.
    #[serde(default = "default_hard_chance")]
    pub hard: f64,
}

impl Default for SpawnChancesConfig {
    fn default() -> Self {
        Self {
            easy: default_easy_chance(),
            normal: default_normal_chance(),
            hard: default_hard_chance(),
        }
    }
}

// ---------------------------------------------------------------------------
// Enum lists
// ---------------------------------------------------------------------------

/// Parse a list of enum names, skipping entries that do not parse.
///
/// Entries are trimmed and blank ones are ignored silently. Each entry that
/// `parse_one` rejects is logged at `warn` with `list` as context and then
/// skipped; a bad entry never fails the whole list.
pub fn parse_enum_list<T, E, F>(list: &str, raw: &[String], parse_one: F) -> Vec<T>
where
    F: Fn(&str) -> Result<T, E>,
    E: Display,
{
    raw.iter()
        .map(|entry| entry.trim())
        .filter(|entry| !entry.is_empty())
        .filter_map(|entry| match parse_one(entry) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(list, entry, error = %e, "Skipping unrecognized config entry");
                None
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

fn default_locale() -> String {
    "en_US".to_owned()
}

fn default_distribution() -> String {
    "constant".to_owned()
}

const fn default_min_y() -> i32 {
    -64
}

const fn default_max_y() -> i32 {
    -8
}

const fn default_easy_chance() -> f64 {
    0.05
}

const fn default_normal_chance() -> f64 {
    0.1
}

const fn default_hard_chance() -> f64 {
    0.5
}
