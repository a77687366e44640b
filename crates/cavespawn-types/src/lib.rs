//! Shared type definitions for the cavespawn spawn-replacement rules.
//!
//! This crate is the single source of truth for the closed enumerations the
//! host world exposes (difficulty, biome, environment, entity kind, spawn
//! reason) and for the per-event values that cross the boundary between the
//! host and the decision engine.
//!
//! # Modules
//!
//! - [`enums`] -- Closed enumerations parsed from configuration strings.
//! - [`event`] -- [`SpawnEventDescriptor`] and [`SpawnDecision`].

pub mod enums;
pub mod event;

pub use enums::{Biome, Difficulty, EntityKind, Environment, SpawnDistribution, SpawnReason};
pub use event::{SpawnDecision, SpawnEventDescriptor};
