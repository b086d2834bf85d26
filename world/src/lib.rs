#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative state records for Rogue Defence.
//!
//! The world crate holds plain data only. The engine is the sole mutator of
//! [`GameState`] and [`GameModifiers`]; adapters read them through the
//! engine once per frame, after a tick has completed.

pub mod entities;
pub mod grid;

use rogue_defence_core::{CellCoord, EnemyId, EngineConfig, Point};
use serde::Serialize;

pub use entities::{Color, Enemy, FloatingText, Particle, Projectile, Tower, HIT_FLASH_TICKS};
pub use grid::Grid;

/// Single aggregate describing a run in progress.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GameState {
    /// Gold available to the player.
    pub money: u32,
    /// Lives remaining; zero ends the run.
    pub lives: u32,
    /// Current wave number, starting at one.
    pub wave: u32,
    /// Current map generation, starting at one.
    pub stage: u32,
    /// Accumulated score.
    pub score: u32,
    /// Tower placement lattice.
    pub grid: Grid,
    /// Ordered path cells from the left edge to beyond the right edge.
    pub path: Vec<CellCoord>,
    /// Cells blocked for construction, disjoint from the path.
    pub obstacles: Vec<CellCoord>,
    /// Enemies on the map.
    pub enemies: Vec<Enemy>,
    /// Projectiles in flight.
    pub projectiles: Vec<Projectile>,
    /// Cosmetic sparks.
    pub particles: Vec<Particle>,
    /// Cosmetic text labels.
    pub floating_texts: Vec<FloatingText>,
    /// Current kill streak.
    pub combo: u32,
    /// Ticks remaining before the streak resets.
    pub combo_timer: u32,
    /// Ultimate ability meter.
    pub energy: u32,
    /// Remaining visual ticks of the last orbital strike.
    pub orbital_strike_tick: u32,
    /// Decaying camera shake consumed by renderers.
    pub screen_shake: f32,
}

impl GameState {
    /// Creates the opening state of a run on the provided map.
    ///
    /// # Panics
    ///
    /// Panics when the path has fewer than two points.
    #[must_use]
    pub fn new(config: &EngineConfig, path: Vec<CellCoord>, obstacles: Vec<CellCoord>) -> Self {
        assert!(path.len() >= 2, "path requires at least two points");
        Self {
            money: config.starting_money,
            lives: config.starting_lives,
            wave: 1,
            stage: 1,
            score: 0,
            grid: Grid::new(config.grid_w, config.grid_h),
            path,
            obstacles,
            enemies: Vec::new(),
            projectiles: Vec::new(),
            particles: Vec::new(),
            floating_texts: Vec::new(),
            combo: 0,
            combo_timer: 0,
            energy: 0,
            orbital_strike_tick: 0,
            screen_shake: 0.0,
        }
    }

    /// Position where enemies enter the map.
    #[must_use]
    pub fn spawn_point(&self) -> Point {
        self.path[0].to_point()
    }

    /// Looks up a living enemy by identifier.
    #[must_use]
    pub fn enemy(&self, id: EnemyId) -> Option<&Enemy> {
        self.enemies.iter().find(|enemy| enemy.id == id)
    }
}

/// Run-wide bonuses accumulated from upgrade cards.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct GameModifiers {
    /// Multiplier applied to every tower's damage.
    pub damage_mul: f32,
    /// Cells added to every tower's range.
    pub range_add: f32,
    /// Divisor applied to every tower's cooldown.
    pub speed_mul: f32,
    /// Extra multiplier applied to sniper damage.
    pub sniper_mul: f32,
    /// Multiplier applied to splash radii.
    pub splash_radius_mul: f32,
    /// Health fraction below which non-boss enemies are executed.
    pub execute_threshold: f32,
    /// Probability that a shot is critical.
    pub crit_chance: f32,
    /// Damage multiplier of critical shots.
    pub crit_dmg: f32,
    /// Probability that a hit grants gold.
    pub gold_on_hit_chance: f32,
    /// Damage dealt around an enemy when it dies.
    pub explode_on_death: f32,
}

impl Default for GameModifiers {
    fn default() -> Self {
        Self {
            damage_mul: 1.0,
            range_add: 0.0,
            speed_mul: 1.0,
            sniper_mul: 1.0,
            splash_radius_mul: 1.0,
            execute_threshold: 0.0,
            crit_chance: 0.0,
            crit_dmg: 1.5,
            gold_on_hit_chance: 0.0,
            explode_on_death: 0.0,
        }
    }
}

/// Query functions that provide read-only answers about the world state.
pub mod query {
    use rogue_defence_core::{CellCoord, PlacementError};

    use super::GameState;

    /// Reports whether the cell lies on any path segment.
    ///
    /// Path segments are axis-aligned, so containment in a segment's bounding
    /// box is equivalent to lying on the segment.
    #[must_use]
    pub fn is_on_path(path: &[CellCoord], cell: CellCoord) -> bool {
        path.windows(2)
            .any(|segment| cell.within_span(segment[0], segment[1]))
    }

    /// Reports whether the cell holds an obstacle.
    #[must_use]
    pub fn is_obstacle(obstacles: &[CellCoord], cell: CellCoord) -> bool {
        obstacles.contains(&cell)
    }

    /// Explains why a tower cannot be built at `cell`, ignoring cost.
    ///
    /// The answer depends only on the grid, path and obstacles, so repeated
    /// calls against unchanged state agree.
    #[must_use]
    pub fn placement_error(
        state: &GameState,
        playable_rows: u32,
        cell: CellCoord,
    ) -> Option<PlacementError> {
        if cell.row() >= playable_rows {
            return Some(PlacementError::OutsidePlayableRows);
        }
        if !state.grid.contains(cell) {
            return Some(PlacementError::OutOfBounds);
        }
        if is_obstacle(&state.obstacles, cell) {
            return Some(PlacementError::OnObstacle);
        }
        if state.grid.tower(cell).is_some() {
            return Some(PlacementError::Occupied);
        }
        if is_on_path(&state.path, cell) {
            return Some(PlacementError::OnPath);
        }
        None
    }
}
