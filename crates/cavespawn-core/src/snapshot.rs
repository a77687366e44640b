//! Validated, immutable configuration snapshots.
//!
//! A [`ConfigurationSnapshot`] is built once per reload from a raw
//! [`CaveSpawnConfig`] and never mutated afterwards. Construction is the
//! only place configuration is checked: Y values are pinned to the world
//! build range, probabilities to `[0, 1]`, and an inverted range or a
//! non-finite probability is refused outright. Everything downstream can
//! therefore assume a well-formed snapshot.

use std::collections::BTreeSet;
use std::str::FromStr;

use cavespawn_types::{Biome, Difficulty, EntityKind, Environment, SpawnDistribution};
use tracing::warn;

use crate::config::{CaveSpawnConfig, parse_enum_list};
use crate::distribution::effective_chance;

/// Lowest Y a spawn range may reach.
pub const WORLD_MIN_Y: i32 = -64;

/// Highest Y a spawn range may reach.
pub const WORLD_MAX_Y: i32 = 320;

/// Reasons a raw configuration cannot become a snapshot.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SnapshotError {
    /// The range floor sits above its ceiling.
    #[error("spawn range is inverted: min_y {min_y} > max_y {max_y}")]
    InvertedRange {
        /// Configured floor.
        min_y: i32,
        /// Configured ceiling.
        max_y: i32,
    },

    /// A probability is NaN or infinite.
    #[error("{field} must be a finite probability, got {value}")]
    NonFiniteProbability {
        /// Configuration path of the offending value.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },
}

/// Inclusive vertical range in which replacement may happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnRange {
    min_y: i32,
    max_y: i32,
    allow_spawns_below_min_y: bool,
}

impl SpawnRange {
    /// Create a range, rejecting `min_y > max_y`.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::InvertedRange`] if the floor is above the
    /// ceiling.
    pub const fn new(
        min_y: i32,
        max_y: i32,
        allow_spawns_below_min_y: bool,
    ) -> Result<Self, SnapshotError> {
        if min_y > max_y {
            return Err(SnapshotError::InvertedRange { min_y, max_y });
        }
        Ok(Self {
            min_y,
            max_y,
            allow_spawns_below_min_y,
        })
    }

    /// Range floor.
    pub const fn min_y(&self) -> i32 {
        self.min_y
    }

    /// Range ceiling.
    pub const fn max_y(&self) -> i32 {
        self.max_y
    }

    /// Whether spawns below the floor are accepted.
    pub const fn allow_spawns_below_min_y(&self) -> bool {
        self.allow_spawns_below_min_y
    }

    /// Whether a block height is eligible for replacement.
    pub const fn contains_block(&self, block_y: i32) -> bool {
        (block_y >= self.min_y || self.allow_spawns_below_min_y) && block_y <= self.max_y
    }

    /// Whether an exact height is eligible, using the same rules as
    /// [`contains_block`](Self::contains_block).
    pub fn contains_height(&self, y: f64) -> bool {
        (y >= f64::from(self.min_y) || self.allow_spawns_below_min_y) && y <= f64::from(self.max_y)
    }
}

/// Base chance per difficulty. Peaceful is always zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyChances {
    easy: f64,
    normal: f64,
    hard: f64,
}

impl DifficultyChances {
    /// Base chance for the given difficulty.
    pub const fn for_difficulty(&self, difficulty: Difficulty) -> f64 {
        match difficulty {
            Difficulty::Peaceful => 0.0,
            Difficulty::Easy => self.easy,
            Difficulty::Normal => self.normal,
            Difficulty::Hard => self.hard,
        }
    }
}

/// Immutable configuration in effect at a point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigurationSnapshot {
    range: SpawnRange,
    chances: DifficultyChances,
    distribution: SpawnDistribution,
    jockey_chance: f64,
    allowed_biomes: BTreeSet<Biome>,
    allowed_environments: BTreeSet<Environment>,
    replaceable_kinds: BTreeSet<EntityKind>,
    locale: String,
    debug: bool,
    metrics: bool,
}

impl ConfigurationSnapshot {
    /// Validate a raw configuration and freeze it into a snapshot.
    ///
    /// Out-of-bounds numbers are pinned into range with a warning; unknown
    /// list entries and an unknown curve name are skipped (the curve falls
    /// back to [`SpawnDistribution::Constant`]) with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError`] if a probability is not finite or the
    /// (pinned) range is inverted.
    pub fn from_config(config: &CaveSpawnConfig) -> Result<Self, SnapshotError> {
        let options = &config.spawn_options;

        let min_y = bounded_y("spawn_options.range.min_y", options.range.min_y);
        let max_y = bounded_y("spawn_options.range.max_y", options.range.max_y);
        let range = SpawnRange::new(min_y, max_y, options.range.allow_spawns_below_min_y)?;

        let chances = DifficultyChances {
            easy: probability("spawn_options.chances.easy", options.chances.easy)?,
            normal: probability("spawn_options.chances.normal", options.chances.normal)?,
            hard: probability("spawn_options.chances.hard", options.chances.hard)?,
        };
        let jockey_chance = probability("spawn_options.jockey_chance", options.jockey_chance)?;

        let distribution = SpawnDistribution::from_str(options.distribution.trim())
            .unwrap_or_else(|_| {
                warn!(
                    distribution = options.distribution,
                    "Unknown spawn distribution, falling back to constant"
                );
                SpawnDistribution::Constant
            });

        Ok(Self {
            range,
            chances,
            distribution,
            jockey_chance,
            allowed_biomes: parse_enum_list("biomes", &config.biomes, Biome::from_str)
                .into_iter()
                .collect(),
            allowed_environments: parse_enum_list(
                "environments",
                &config.environments,
                Environment::from_str,
            )
            .into_iter()
            .collect(),
            replaceable_kinds: parse_enum_list(
                "replace_entities",
                &config.replace_entities,
                EntityKind::from_str,
            )
            .into_iter()
            .collect(),
            locale: config.locale.clone(),
            debug: config.debug,
            metrics: config.metrics,
        })
    }

    /// Vertical spawn range.
    pub const fn range(&self) -> &SpawnRange {
        &self.range
    }

    /// Per-difficulty base chances.
    pub const fn chances(&self) -> &DifficultyChances {
        &self.chances
    }

    /// Height curve applied to the base chance.
    pub const fn distribution(&self) -> SpawnDistribution {
        self.distribution
    }

    /// Chance a cave spider receives a rider on hard difficulty.
    pub const fn jockey_chance(&self) -> f64 {
        self.jockey_chance
    }

    /// Biomes in which replacement may happen.
    pub const fn allowed_biomes(&self) -> &BTreeSet<Biome> {
        &self.allowed_biomes
    }

    /// Environments in which replacement may happen.
    pub const fn allowed_environments(&self) -> &BTreeSet<Environment> {
        &self.allowed_environments
    }

    /// Entity kinds that may be replaced.
    pub const fn replaceable_kinds(&self) -> &BTreeSet<EntityKind> {
        &self.replaceable_kinds
    }

    /// Locale for player-facing messages.
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Whether debug logging was requested.
    pub const fn debug(&self) -> bool {
        self.debug
    }

    /// Whether usage metrics were requested.
    pub const fn metrics(&self) -> bool {
        self.metrics
    }

    /// Curve-adjusted chance at height `y`, ignoring range limits.
    pub fn effective_chance(&self, difficulty: Difficulty, y: f64) -> f64 {
        effective_chance(
            self.distribution,
            self.chances.for_difficulty(difficulty),
            y,
            self.range.min_y,
            self.range.max_y,
        )
    }
}

fn bounded_y(field: &'static str, value: i32) -> i32 {
    let bounded = value.clamp(WORLD_MIN_Y, WORLD_MAX_Y);
    if bounded != value {
        warn!(field, value, bounded, "Y value outside world build range");
    }
    bounded
}

fn probability(field: &'static str, value: f64) -> Result<f64, SnapshotError> {
    if !value.is_finite() {
        return Err(SnapshotError::NonFiniteProbability { field, value });
    }
    let bounded = value.clamp(0.0, 1.0);
    if (bounded - value).abs() > 0.0 {
        warn!(field, value, bounded, "Probability outside [0, 1]");
    }
    Ok(bounded)
}
