//! JSON-lines wire types exchanged with the host process.
//!
//! Every request is one JSON object on one line, tagged by `"command"`.
//! Every response is one JSON object on one line, tagged by `"status"`.

use cavespawn_types::{
    Difficulty, SpawnDecision, SpawnDistribution, SpawnEventDescriptor, SpawnReason,
};
use serde::{Deserialize, Serialize};

/// A request read from stdin.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    /// Decide what to do with a spawn.
    Spawn {
        /// The spawn being reported.
        event: SpawnEventDescriptor,
    },
    /// Re-read the configuration file and broadcast it.
    Reload,
    /// Report the active settings and the chance at a height.
    About {
        /// Difficulty to evaluate the chance for.
        difficulty: Difficulty,
        /// Height to evaluate the chance at.
        y: f64,
    },
}

/// A response written to stdout.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Response {
    /// Outcome of a `spawn` command.
    Decision {
        /// What the host should do.
        decision: SpawnDecision,
        /// Reason to use when spawning the replacement or rider.
        follow_up_reason: Option<SpawnReason>,
        /// Whether the introduced creature must be a juvenile.
        juvenile: bool,
    },
    /// Outcome of a successful `reload` command.
    Reloaded {
        /// Number of consumers that received the new snapshot.
        consumers: usize,
    },
    /// Outcome of an `about` command.
    About(AboutReport),
    /// The command failed; nothing changed unless stated in the message.
    Error {
        /// What went wrong.
        message: String,
    },
}

impl Response {
    /// Build a decision response with its follow-up details.
    pub const fn decision(decision: SpawnDecision) -> Self {
        Self::Decision {
            decision,
            follow_up_reason: decision.follow_up_reason(),
            juvenile: decision.is_juvenile_rider(),
        }
    }

    /// Build an error response.
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }
}

/// Active settings plus the effective chance at one height.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AboutReport {
    /// Range floor.
    pub min_y: i32,
    /// Range ceiling.
    pub max_y: i32,
    /// Whether spawns below the floor are accepted.
    pub allow_spawns_below_min_y: bool,
    /// Base chance on easy.
    pub easy_chance: f64,
    /// Base chance on normal.
    pub normal_chance: f64,
    /// Base chance on hard.
    pub hard_chance: f64,
    /// Active height curve.
    pub distribution: SpawnDistribution,
    /// Height the chance was evaluated at.
    pub y: f64,
    /// Difficulty the chance was evaluated for.
    pub difficulty: Difficulty,
    /// Replacement chance at `y`, zero outside the range.
    pub spawn_chance: f64,
}
