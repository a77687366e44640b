//! Spawn decision engine.
//!
//! For every spawn the host reports, the engine answers with a
//! [`SpawnDecision`]. Two independent procedures exist:
//!
//! - [`replacement_decision`] -- should an ordinary creature spawning deep
//!   underground be swapped for a cave spider?
//! - [`rider_decision`] -- should a freshly spawned cave spider carry a
//!   juvenile rider?
//!
//! Both are pure with respect to the snapshot they are given and draw their
//! randomness from the caller's [`Rng`]. The engine never spawns or cancels
//! anything; the host applies the returned decision.

use std::sync::Arc;

use cavespawn_types::{
    Biome, Difficulty, EntityKind, Environment, SpawnDecision, SpawnEventDescriptor, SpawnReason,
};
use rand::Rng;
use tracing::debug;

use crate::active::ActiveSnapshot;
use crate::registry::{ConfigurationConsumer, ConsumerError, ReloadRegistry};
use crate::snapshot::ConfigurationSnapshot;

/// Decides spawn substitutions and riders against the latest snapshot.
///
/// Construct with [`SpawnDecisionEngine::new`], which registers the engine
/// with a [`ReloadRegistry`] so later reloads reach it automatically. The
/// engine is `Send + Sync`; decisions may run concurrently with each other
/// and with a reload.
#[derive(Debug)]
pub struct SpawnDecisionEngine {
    active: ActiveSnapshot,
}

impl SpawnDecisionEngine {
    /// Create an engine using `initial` and register it with `registry`.
    pub fn new(registry: &ReloadRegistry, initial: Arc<ConfigurationSnapshot>) -> Arc<Self> {
        let engine = Arc::new(Self {
            active: ActiveSnapshot::new(initial),
        });
        registry.register(Arc::clone(&engine) as Arc<dyn ConfigurationConsumer>);
        engine
    }

    /// The snapshot decisions are currently made against.
    pub fn snapshot(&self) -> Arc<ConfigurationSnapshot> {
        self.active.load()
    }

    /// Run both procedures: replacement first, then rider attachment.
    pub fn decide(&self, event: &SpawnEventDescriptor, rng: &mut impl Rng) -> SpawnDecision {
        let snapshot = self.active.load();
        match replacement_decision(&snapshot, event, rng) {
            SpawnDecision::NoOp => rider_decision(&snapshot, event, rng),
            decision => decision,
        }
    }

    /// Replacement procedure against the current snapshot.
    pub fn decide_replacement(
        &self,
        event: &SpawnEventDescriptor,
        rng: &mut impl Rng,
    ) -> SpawnDecision {
        replacement_decision(&self.active.load(), event, rng)
    }

    /// Rider procedure against the current snapshot.
    pub fn decide_rider(&self, event: &SpawnEventDescriptor, rng: &mut impl Rng) -> SpawnDecision {
        rider_decision(&self.active.load(), event, rng)
    }

    /// Replacement chance at height `y`: the curve-adjusted base chance
    /// inside the range, zero outside it.
    pub fn spawn_chance_at(&self, difficulty: Difficulty, y: f64) -> f64 {
        let snapshot = self.active.load();
        if snapshot.range().contains_height(y) {
            snapshot.effective_chance(difficulty, y)
        } else {
            0.0
        }
    }
}

impl ConfigurationConsumer for SpawnDecisionEngine {
    fn name(&self) -> &str {
        "spawn-decision-engine"
    }

    fn on_reload(&self, snapshot: &Arc<ConfigurationSnapshot>) -> Result<(), ConsumerError> {
        self.active.store(Arc::clone(snapshot));
        Ok(())
    }
}

/// Decide whether an ordinary spawn becomes a cave spider.
///
/// Every filter must pass: natural spawn reason, replaceable kind, block
/// height inside the range, not in liquid, positive effective chance,
/// allowed environment and biome. The roll is uniform in `[0, 1)` and
/// succeeds when strictly below the effective chance.
pub fn replacement_decision(
    snapshot: &ConfigurationSnapshot,
    event: &SpawnEventDescriptor,
    rng: &mut impl Rng,
) -> SpawnDecision {
    if !event.reason.is_natural() || !snapshot.replaceable_kinds().contains(&event.entity_kind) {
        return SpawnDecision::NoOp;
    }
    if !snapshot.range().contains_block(event.block_y) || event.liquid {
        return SpawnDecision::NoOp;
    }

    let chance = snapshot.effective_chance(event.difficulty, event.y);
    if chance <= 0.0 {
        return SpawnDecision::NoOp;
    }
    if !snapshot.allowed_environments().contains(&event.environment)
        || !snapshot.allowed_biomes().contains(&event.biome)
    {
        return SpawnDecision::NoOp;
    }

    let roll: f64 = rng.random();
    if roll < chance {
        debug!(
            replaced = %event.entity_kind,
            y = event.y,
            chance,
            roll,
            "Replacing spawn with cave spider"
        );
        SpawnDecision::Replace(EntityKind::REPLACEMENT)
    } else {
        SpawnDecision::NoOp
    }
}

/// Decide whether a cave spider spawn gets a juvenile rider.
///
/// Applies only to cave spiders spawned naturally or from an egg, only on
/// the hardest difficulty, and only with a positive rider chance.
pub fn rider_decision(
    snapshot: &ConfigurationSnapshot,
    event: &SpawnEventDescriptor,
    rng: &mut impl Rng,
) -> SpawnDecision {
    if event.entity_kind != EntityKind::CaveSpider
        || !matches!(event.reason, SpawnReason::Natural | SpawnReason::SpawnerEgg)
    {
        return SpawnDecision::NoOp;
    }

    let chance = snapshot.jockey_chance();
    if chance <= 0.0 || !event.difficulty.is_hardest() {
        return SpawnDecision::NoOp;
    }

    let roll: f64 = rng.random();
    if roll < chance {
        let rider = rider_for(event.biome, event.environment);
        debug!(%rider, biome = %event.biome, roll, "Attaching rider to cave spider");
        SpawnDecision::AttachRider(rider)
    } else {
        SpawnDecision::NoOp
    }
}

/// Rider kind suited to a location.
///
/// The nether always yields a zombified piglin. Elsewhere oceans and rivers
/// yield drowned, deserts yield husks, and everything else a zombie.
pub const fn rider_for(biome: Biome, environment: Environment) -> EntityKind {
    if matches!(environment, Environment::Nether) {
        return EntityKind::ZombifiedPiglin;
    }
    if biome.is_watery() {
        return EntityKind::Drowned;
    }
    match biome {
        Biome::Desert => EntityKind::Husk,
        _ => EntityKind::Zombie,
    }
}
