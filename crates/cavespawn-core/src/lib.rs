//! Spawn substitution and rider rules for deep cave spawning.
//!
//! This crate decides, for each creature spawn the host reports, whether
//! the creature should be swapped for a cave spider and whether a juvenile
//! rider should be seated on it. All tunables come from a single reloadable
//! configuration that is pushed to every interested component at once.
//!
//! # Modules
//!
//! - [`math`] -- Clamp and arbitrary-base logarithm helpers.
//! - [`distribution`] -- Height-dependent spawn probability curves.
//! - [`config`] -- Raw YAML configuration document and enum-list parsing.
//! - [`snapshot`] -- Validated, immutable [`ConfigurationSnapshot`].
//! - [`active`] -- Atomically swapped pointer to the snapshot in effect.
//! - [`registry`] -- [`ReloadRegistry`] broadcasting new snapshots to
//!   every registered [`ConfigurationConsumer`].
//! - [`engine`] -- [`SpawnDecisionEngine`] turning spawn events into
//!   [`SpawnDecision`](cavespawn_types::SpawnDecision)s.
//!
//! [`ConfigurationSnapshot`]: snapshot::ConfigurationSnapshot
//! [`ReloadRegistry`]: registry::ReloadRegistry
//! [`ConfigurationConsumer`]: registry::ConfigurationConsumer
//! [`SpawnDecisionEngine`]: engine::SpawnDecisionEngine

pub mod active;
pub mod config;
pub mod distribution;
pub mod engine;
pub mod math;
pub mod registry;
pub mod snapshot;
