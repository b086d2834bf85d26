#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Rogue Defence engine.
//!
//! This crate defines the vocabulary that connects the authoritative world
//! state, the pure systems that generate levels, waves and upgrade cards, the
//! simulation engine, and adapters. Adapters invoke engine commands with
//! [`CellCoord`] values, the engine mutates the world tick by tick, and then
//! records [`Event`] values that adapters may drain for presentation. Events
//! never feed back into the simulation.

pub mod config;
pub mod geometry;

use serde::{Deserialize, Serialize};

pub use config::{ConfigError, EngineConfig, TowerStats, TowerTable};
pub use geometry::{CellCoord, Point};

/// Canonical banner emitted when a run boots.
pub const WELCOME_BANNER: &str = "Welcome to Rogue Defence.";

/// Unique identifier assigned to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a tower.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TowerId(u32);

impl TowerId {
    /// Creates a new tower identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the tower identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectileId(u32);

impl ProjectileId {
    /// Creates a new projectile identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the projectile identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Types of towers that can be constructed on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TowerKind {
    /// Balanced single-target tower.
    Archer,
    /// Slow tower whose shells explode on impact.
    Cannon,
    /// Frost tower that slows whatever it hits.
    Mage,
    /// Long-range tower with heavy single shots.
    Sniper,
}

impl TowerKind {
    /// Every tower kind in catalog order.
    pub const ALL: [TowerKind; 4] = [
        TowerKind::Archer,
        TowerKind::Cannon,
        TowerKind::Mage,
        TowerKind::Sniper,
    ];
}

/// Archetypes of enemies that traverse the path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnemyKind {
    /// Baseline enemy.
    Basic,
    /// Quick and fragile.
    Fast,
    /// Slow and durable.
    Tank,
    /// Very fragile, appears in numbers from wave four onward.
    Swarm,
    /// Final enemy of every fifth wave.
    Boss,
}

impl EnemyKind {
    /// Gold granted when an enemy of this kind is killed.
    ///
    /// The bounty is a fixed table and does not scale with hit points.
    #[must_use]
    pub const fn bounty(self) -> u32 {
        match self {
            Self::Boss => 50,
            Self::Tank => 10,
            Self::Swarm => 2,
            Self::Basic | Self::Fast => 5,
        }
    }

    /// Reports whether the kind is exempt from execute effects.
    #[must_use]
    pub const fn is_boss(self) -> bool {
        matches!(self, Self::Boss)
    }
}

/// Reasons a tower placement request may be rejected by the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlacementError {
    /// The requested cell lies beyond the grid columns.
    OutOfBounds,
    /// The requested cell lies in the rows reserved for the interface.
    OutsidePlayableRows,
    /// The requested cell lies on a path segment.
    OnPath,
    /// The requested cell holds an obstacle.
    OnObstacle,
    /// The requested cell already holds a tower.
    Occupied,
    /// The player cannot afford the tower.
    InsufficientFunds,
}

/// Reasons a tower upgrade request may be rejected by the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeError {
    /// No tower occupies the requested cell.
    MissingTower,
    /// The player cannot afford the upgrade.
    InsufficientFunds,
}

/// Events recorded by the engine while processing ticks and commands.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// A wave's spawn queue was built.
    WavePrepared {
        /// Wave number the queue belongs to.
        wave: u32,
        /// Number of enemies waiting in the queue.
        queued: usize,
        /// Indicates whether the queue ends with a boss.
        boss: bool,
    },
    /// An enemy left the spawn queue and entered the path.
    EnemySpawned {
        /// Identifier of the spawned enemy.
        enemy: EnemyId,
        /// Archetype of the spawned enemy.
        kind: EnemyKind,
    },
    /// An enemy was killed.
    EnemyKilled {
        /// Identifier of the killed enemy.
        enemy: EnemyId,
        /// Archetype of the killed enemy.
        kind: EnemyKind,
        /// Gold granted for the kill.
        bounty: u32,
        /// Kill streak after the kill was counted.
        combo: u32,
    },
    /// An enemy reached the end of the path.
    BaseDamaged {
        /// Identifier of the enemy that escaped.
        enemy: EnemyId,
        /// Lives remaining after the loss.
        lives: u32,
    },
    /// The kill streak expired.
    ComboLost,
    /// The kill streak reached a multiple of ten.
    ComboMilestone {
        /// Kill streak that triggered the milestone.
        combo: u32,
    },
    /// A tower was constructed.
    TowerPlaced {
        /// Identifier allocated to the tower.
        tower: TowerId,
        /// Kind of tower constructed.
        kind: TowerKind,
        /// Cell occupied by the tower.
        cell: CellCoord,
    },
    /// A tower gained a level.
    TowerUpgraded {
        /// Identifier of the upgraded tower.
        tower: TowerId,
        /// Level reached by the tower.
        level: u32,
        /// Gold spent on the upgrade.
        cost: u32,
    },
    /// A tower was sold.
    TowerSold {
        /// Identifier of the sold tower.
        tower: TowerId,
        /// Gold refunded for the tower.
        refund: u32,
    },
    /// The ultimate ability fired.
    OrbitalStrike {
        /// Number of enemies caught in the strike.
        targets: usize,
    },
    /// An upgrade card was applied to the run.
    UpgradeApplied {
        /// Catalog identifier of the card.
        id: String,
    },
    /// The map advanced to a new stage.
    StageAdvanced {
        /// Stage that became active.
        stage: u32,
        /// Gold recovered by selling every tower.
        recovered: u32,
    },
}

/// Supplies narration for a wave.
///
/// Implementations must be pure functions of the wave number; the engine
/// never consults them and their output only affects displayed text.
pub trait FlavorText {
    /// Returns the narration line for the provided wave.
    fn flavor_text(&self, wave: u32) -> String;
}
