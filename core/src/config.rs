//! Tunable configuration recognized by the engine.

use std::{fs, path::Path, path::PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::TowerKind;

/// Failures raised while loading or validating an [`EngineConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration at {}", path.display())]
    Io {
        /// Location that was read.
        path: PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// The configuration contents are not valid TOML for this schema.
    #[error("failed to parse configuration")]
    Parse(#[from] toml::de::Error),
    /// A value violates an engine invariant.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Base statistics for a single tower kind.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TowerStats {
    /// Gold required to construct the tower.
    pub cost: u32,
    /// Targeting radius measured in cells.
    pub range: f32,
    /// Damage per shot at level one.
    pub damage: f32,
    /// Ticks between shots before speed bonuses.
    pub cooldown: u32,
    /// Radius of the impact explosion, if the tower splashes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub splash: Option<f32>,
    /// Ticks of slow applied on hit, if the tower freezes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub freeze: Option<u32>,
}

/// Per-kind tower statistics.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TowerTable {
    /// Statistics for [`TowerKind::Archer`].
    pub archer: TowerStats,
    /// Statistics for [`TowerKind::Cannon`].
    pub cannon: TowerStats,
    /// Statistics for [`TowerKind::Mage`].
    pub mage: TowerStats,
    /// Statistics for [`TowerKind::Sniper`].
    pub sniper: TowerStats,
}

impl TowerTable {
    /// Returns the statistics associated with a tower kind.
    #[must_use]
    pub const fn get(&self, kind: TowerKind) -> &TowerStats {
        match kind {
            TowerKind::Archer => &self.archer,
            TowerKind::Cannon => &self.cannon,
            TowerKind::Mage => &self.mage,
            TowerKind::Sniper => &self.sniper,
        }
    }
}

impl Default for TowerTable {
    fn default() -> Self {
        Self {
            archer: TowerStats {
                cost: 50,
                range: 3.5,
                damage: 15.0,
                cooldown: 40,
                splash: None,
                freeze: None,
            },
            cannon: TowerStats {
                cost: 120,
                range: 3.0,
                damage: 40.0,
                cooldown: 90,
                splash: Some(1.5),
                freeze: None,
            },
            mage: TowerStats {
                cost: 150,
                range: 4.0,
                damage: 10.0,
                cooldown: 30,
                splash: None,
                freeze: Some(30),
            },
            sniper: TowerStats {
                cost: 250,
                range: 8.0,
                damage: 150.0,
                cooldown: 180,
                splash: None,
                freeze: None,
            },
        }
    }
}

/// Grid dimensions, pacing constants and tower statistics for a run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Number of grid columns.
    pub grid_w: u32,
    /// Number of grid rows, including the rows reserved for the interface.
    pub grid_h: u32,
    /// Number of rows, counted from the top, where the path and towers live.
    pub playable_rows: u32,
    /// Side length of a cell in pixels; consumed by renderers only.
    pub cell_size: u32,
    /// Fraction of the invested gold refunded when a tower is sold.
    pub sell_ratio: f32,
    /// Gold charged to redraw the upgrade cards.
    pub reroll_cost: u32,
    /// Growth factor of the upgrade price per tower level.
    pub upgrade_cost_multiplier: f32,
    /// Growth factor of tower damage per level.
    pub upgrade_stat_multiplier: f32,
    /// Number of waves fought on a map before the stage advances.
    pub waves_per_stage: u32,
    /// Ticks a kill streak survives without another kill.
    pub combo_timeout: u32,
    /// Additional damage fraction granted per combo count.
    pub combo_damage_scaling: f32,
    /// Energy required to fire the orbital strike.
    pub max_energy: u32,
    /// Energy granted per kill.
    pub energy_per_kill: u32,
    /// Flat damage dealt to every enemy by the orbital strike.
    pub orbital_strike_damage: f32,
    /// Gold available when a run starts.
    pub starting_money: u32,
    /// Lives available when a run starts.
    pub starting_lives: u32,
    /// Base tower statistics.
    pub towers: TowerTable,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            grid_w: 16,
            grid_h: 9,
            playable_rows: 7,
            cell_size: 64,
            sell_ratio: 0.7,
            reroll_cost: 50,
            upgrade_cost_multiplier: 1.5,
            upgrade_stat_multiplier: 1.25,
            waves_per_stage: 5,
            combo_timeout: 180,
            combo_damage_scaling: 0.02,
            max_energy: 100,
            energy_per_kill: 5,
            orbital_strike_damage: 500.0,
            starting_money: 650,
            starting_lives: 20,
            towers: TowerTable::default(),
        }
    }
}

impl EngineConfig {
    /// Parses and validates a configuration from TOML contents.
    ///
    /// Keys that are absent keep their default values.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates the configuration stored at `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Rejects values that would break engine invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_w < 2 {
            return Err(invalid("grid_w must be at least 2"));
        }
        if self.playable_rows < 3 {
            return Err(invalid("playable_rows must be at least 3"));
        }
        if self.playable_rows > self.grid_h {
            return Err(invalid("playable_rows cannot exceed grid_h"));
        }
        if !(0.0..=1.0).contains(&self.sell_ratio) {
            return Err(invalid("sell_ratio must lie within [0, 1]"));
        }
        if self.upgrade_cost_multiplier <= 0.0 || self.upgrade_stat_multiplier <= 0.0 {
            return Err(invalid("upgrade multipliers must be positive"));
        }
        if self.waves_per_stage == 0 {
            return Err(invalid("waves_per_stage must be positive"));
        }
        if self.max_energy == 0 {
            return Err(invalid("max_energy must be positive"));
        }
        for kind in TowerKind::ALL {
            let stats = self.towers.get(kind);
            if stats.cost == 0 {
                return Err(ConfigError::Invalid(format!("{kind:?} tower cost must be positive")));
            }
            if stats.cooldown == 0 {
                return Err(ConfigError::Invalid(format!(
                    "{kind:?} tower cooldown must be positive"
                )));
            }
        }
        Ok(())
    }
}

fn invalid(reason: &str) -> ConfigError {
    ConfigError::Invalid(reason.to_owned())
}
