#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Procedural map generation: a winding path and a scattering of obstacles.
//!
//! The path is a biased random walk from the left edge to one cell beyond
//! the right edge. Every step moves exactly one cell along exactly one axis,
//! so consecutive points always form an axis-aligned segment of length one.
//! Higher stages raise the probability of stepping right, producing
//! straighter and shorter paths.

use log::debug;
use rand::Rng;
use rogue_defence_core::{CellCoord, EngineConfig};

const OBSTACLE_ATTEMPTS: u32 = 100;
const BASE_OBSTACLES: u32 = 3;

/// Configuration parameters required to construct the generator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    grid_w: u32,
    playable_rows: u32,
}

impl Config {
    /// Creates a new configuration for a grid of `grid_w` columns whose top
    /// `playable_rows` rows host the map.
    ///
    /// # Panics
    ///
    /// Panics when the grid is narrower than two columns or has fewer than
    /// three playable rows, since no bordered lane would exist.
    #[must_use]
    pub fn new(grid_w: u32, playable_rows: u32) -> Self {
        assert!(grid_w >= 2, "grid must span at least two columns");
        assert!(playable_rows >= 3, "grid must expose at least three playable rows");
        Self {
            grid_w,
            playable_rows,
        }
    }

    /// Extracts the generator configuration from the engine configuration.
    #[must_use]
    pub fn from_engine(config: &EngineConfig) -> Self {
        Self::new(config.grid_w, config.playable_rows)
    }

    /// Lowest row the path may occupy.
    #[must_use]
    pub const fn min_lane(&self) -> u32 {
        1
    }

    /// Highest row the path may occupy.
    #[must_use]
    pub const fn max_lane(&self) -> u32 {
        self.playable_rows - 2
    }
}

/// Map produced for a stage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Level {
    /// Ordered path cells; the final point lies one column beyond the grid.
    pub path: Vec<CellCoord>,
    /// Cells blocked for construction, disjoint from the path.
    pub obstacles: Vec<CellCoord>,
}

/// Probability of stepping right on a given stage.
#[must_use]
pub fn move_right_chance(stage: u32) -> f64 {
    (0.3 + f64::from(stage) * 0.05).min(0.8)
}

/// Number of obstacles the generator aims to place on a stage, before the
/// random bonus of zero to two.
#[must_use]
pub fn base_obstacle_target(stage: u32) -> u32 {
    BASE_OBSTACLES + stage / 2
}

/// Pure system that produces stage maps from an injected random source.
#[derive(Clone, Copy, Debug)]
pub struct LevelGenerator {
    config: Config,
}

impl LevelGenerator {
    /// Creates a new generator using the supplied configuration.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    /// Generates the path and obstacles for `stage`.
    pub fn generate<R: Rng + ?Sized>(&self, stage: u32, rng: &mut R) -> Level {
        let path = self.generate_path(stage, rng);
        let obstacles = self.generate_obstacles(stage, &path, rng);
        debug!(
            "generated stage {stage}: {} path cells, {} obstacles",
            path.len(),
            obstacles.len()
        );
        Level { path, obstacles }
    }

    fn generate_path<R: Rng + ?Sized>(&self, stage: u32, rng: &mut R) -> Vec<CellCoord> {
        let last_column = self.config.grid_w - 1;
        let min_lane = self.config.min_lane();
        let max_lane = self.config.max_lane();
        let chance = move_right_chance(stage);

        let mut column = 0;
        let mut row = rng.gen_range(min_lane..=max_lane);
        let mut path = vec![CellCoord::new(column, row)];

        while column < last_column {
            let move_right = rng.gen::<f64>() < chance || column == 0;
            if move_right {
                let steps = rng.gen_range(1..=2);
                let next_column = (column + steps).min(last_column);
                for step in column + 1..=next_column {
                    path.push(CellCoord::new(step, row));
                }
                column = next_column;
                continue;
            }

            let next_row = if rng.gen_bool(0.5) {
                Some(row + 1)
            } else {
                row.checked_sub(1)
            };
            let previous = path.len().checked_sub(2).map(|index| path[index]);
            let accepted = next_row.filter(|candidate| {
                let backtrack = previous == Some(CellCoord::new(column, *candidate));
                (min_lane..=max_lane).contains(candidate) && !backtrack
            });

            match accepted {
                Some(next_row) => {
                    row = next_row;
                }
                None => {
                    column += 1;
                }
            }
            path.push(CellCoord::new(column, row));
        }

        path.push(CellCoord::new(self.config.grid_w, row));
        path
    }

    fn generate_obstacles<R: Rng + ?Sized>(
        &self,
        stage: u32,
        path: &[CellCoord],
        rng: &mut R,
    ) -> Vec<CellCoord> {
        let target = base_obstacle_target(stage) + rng.gen_range(0..3);
        let target = usize::try_from(target).unwrap_or(usize::MAX);
        let mut obstacles = Vec::with_capacity(target);

        let mut attempts = 0;
        while obstacles.len() < target && attempts < OBSTACLE_ATTEMPTS {
            attempts += 1;
            let cell = CellCoord::new(
                rng.gen_range(0..self.config.grid_w),
                rng.gen_range(0..self.config.playable_rows),
            );
            if path.contains(&cell) || obstacles.contains(&cell) {
                continue;
            }
            obstacles.push(cell);
        }

        obstacles
    }
}
