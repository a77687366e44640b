//! Per-event values exchanged between the host and the decision engine.
//!
//! A [`SpawnEventDescriptor`] is built by the host for every creature spawn
//! it is about to perform. The engine answers with a [`SpawnDecision`]; the
//! host owns every side effect of applying it.

use serde::{Deserialize, Serialize};

use crate::enums::{Biome, Difficulty, EntityKind, Environment, SpawnReason};

/// Everything the decision engine needs to know about one spawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnEventDescriptor {
    /// Kind of creature the host is about to spawn.
    pub entity_kind: EntityKind,
    /// Why the creature is being spawned.
    pub reason: SpawnReason,
    /// Exact vertical coordinate of the spawn location.
    pub y: f64,
    /// Vertical coordinate of the block containing the spawn location.
    pub block_y: i32,
    /// Difficulty of the world the spawn happens in.
    pub difficulty: Difficulty,
    /// Biome at the spawn location.
    pub biome: Biome,
    /// Dimension of the world the spawn happens in.
    pub environment: Environment,
    /// Whether the spawn block is a liquid.
    #[serde(default)]
    pub liquid: bool,
}

/// What the host should do with a spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "action", content = "kind", rename_all = "snake_case")]
pub enum SpawnDecision {
    /// Let the spawn proceed untouched.
    NoOp,
    /// Cancel the spawn and spawn the given kind in its place.
    Replace(EntityKind),
    /// Spawn a juvenile of the given kind and seat it on the spawned creature.
    AttachRider(EntityKind),
}

impl SpawnDecision {
    /// Whether the decision leaves the spawn untouched.
    pub const fn is_no_op(self) -> bool {
        matches!(self, Self::NoOp)
    }

    /// Spawn reason the host should use for the creature this decision
    /// introduces, if any.
    pub const fn follow_up_reason(self) -> Option<SpawnReason> {
        match self {
            Self::NoOp => None,
            Self::Replace(_) => Some(SpawnReason::Natural),
            Self::AttachRider(_) => Some(SpawnReason::Jockey),
        }
    }

    /// Whether the creature this decision introduces must be a juvenile.
    pub const fn is_juvenile_rider(self) -> bool {
        matches!(self, Self::AttachRider(_))
    }
}
