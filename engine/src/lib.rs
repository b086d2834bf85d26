#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Simulation engine for Rogue Defence.
//!
//! [`Engine`] owns the authoritative [`GameState`] and the run-wide
//! [`GameModifiers`]. Adapters drive it with one [`Engine::update`] call per
//! frame, issue player commands between ticks, and read the state back once
//! a tick has completed.
//!
//! Every tick runs six phases in a fixed order:
//!
//! 1. timers, combo expiry and floating texts decay,
//! 2. the spawn queue releases an enemy on its cadence,
//! 3. enemies advance along the path,
//! 4. towers pick targets and fire,
//! 5. projectiles advance and resolve hits,
//! 6. particles integrate their velocity.
//!
//! Enemies therefore move before towers fire, and freshly fired projectiles
//! never move during the tick that created them.

mod combat;
mod commands;
mod effects;
mod firing;
mod movement;
mod projectiles;
mod seeds;

use log::{debug, info};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rogue_defence_core::{ConfigError, EngineConfig, Event, Point};
use rogue_defence_system_level_generation::{Config as LevelConfig, Level, LevelGenerator};
use rogue_defence_system_spawning::{is_boss_wave, Spawning};
use rogue_defence_system_upgrades::{self as upgrades, UpgradeCard};
use rogue_defence_world::{Color, GameModifiers, GameState};

/// Visual duration of an orbital strike in ticks.
pub const ORBITAL_STRIKE_TICKS: u32 = 30;

const ORBITAL_STRIKE_SHAKE: f32 = 20.0;
const ORBITAL_HIT_FLASH_TICKS: u32 = 20;
const SCREEN_SHAKE_DECAY: f32 = 0.9;
const SCREEN_SHAKE_FLOOR: f32 = 0.5;

/// Observable phase of the current wave.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WavePhase {
    /// No wave has been prepared since the last wave or stage change.
    Idle,
    /// Enemies are still waiting in the spawn queue.
    Spawning,
    /// Every enemy has spawned and some are still alive.
    Active,
    /// The prepared wave has been fully cleared.
    Complete,
}

/// Deterministic simulation of a single run.
#[derive(Debug)]
pub struct Engine {
    config: EngineConfig,
    state: GameState,
    modifiers: GameModifiers,
    spawning: Spawning,
    generator: LevelGenerator,
    run_seed: u64,
    rng: ChaCha8Rng,
    cosmetic: ChaCha8Rng,
    next_tower_id: u32,
    next_projectile_id: u32,
    wave_prepared: bool,
    events: Vec<Event>,
}

impl Engine {
    /// Creates a run from a validated configuration and a run seed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the configuration violates an
    /// engine invariant.
    pub fn new(config: EngineConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, seed))
    }

    /// Creates a run with the default configuration.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::build(EngineConfig::default(), seed)
    }

    fn build(config: EngineConfig, seed: u64) -> Self {
        let generator = LevelGenerator::new(LevelConfig::from_engine(&config));
        let level = generate_level(&generator, seed, 1);
        let state = GameState::new(&config, level.path, level.obstacles);
        Self {
            state,
            modifiers: GameModifiers::default(),
            spawning: Spawning::new(),
            generator,
            run_seed: seed,
            rng: ChaCha8Rng::seed_from_u64(seeds::derive_labeled_seed(
                seed,
                seeds::RNG_STREAM_GAMEPLAY,
            )),
            cosmetic: ChaCha8Rng::seed_from_u64(seeds::derive_labeled_seed(
                seed,
                seeds::RNG_STREAM_COSMETIC,
            )),
            next_tower_id: 0,
            next_projectile_id: 0,
            wave_prepared: false,
            events: Vec::new(),
            config,
        }
    }

    /// Configuration the run was created with.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Read-only view of the authoritative state.
    #[must_use]
    pub const fn state(&self) -> &GameState {
        &self.state
    }

    /// Run-wide bonuses accumulated so far.
    #[must_use]
    pub const fn modifiers(&self) -> &GameModifiers {
        &self.modifiers
    }

    /// Seed the run was created with.
    #[must_use]
    pub const fn run_seed(&self) -> u64 {
        self.run_seed
    }

    /// Enemies still waiting in the spawn queue.
    #[must_use]
    pub fn pending_spawns(&self) -> usize {
        self.spawning.len()
    }

    /// Removes and returns every event recorded since the previous drain.
    pub fn drain_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    /// Advances the simulation by one tick.
    pub fn update(&mut self) {
        self.decay_timers();
        self.release_spawn();
        self.move_enemies();
        self.fire_towers();
        self.move_projectiles();
        self.advance_particles();
    }

    fn decay_timers(&mut self) {
        self.state.screen_shake *= SCREEN_SHAKE_DECAY;
        if self.state.screen_shake < SCREEN_SHAKE_FLOOR {
            self.state.screen_shake = 0.0;
        }
        self.state.orbital_strike_tick = self.state.orbital_strike_tick.saturating_sub(1);

        if self.state.combo > 0 {
            self.state.combo_timer = self.state.combo_timer.saturating_sub(1);
            if self.state.combo_timer == 0 {
                self.state.combo = 0;
                let centre = Point::new(
                    self.config.grid_w as f32 / 2.0,
                    self.config.grid_h as f32 / 2.0,
                );
                self.float_text(centre, "COMBO LOST", Color::MUTED, 1.0);
                self.events.push(Event::ComboLost);
            }
        }

        self.advance_floating_texts();
    }

    fn release_spawn(&mut self) {
        if let Some(enemy) = self.spawning.tick() {
            debug!("spawned {:?} enemy {}", enemy.kind, enemy.id.get());
            self.events.push(Event::EnemySpawned {
                enemy: enemy.id,
                kind: enemy.kind,
            });
            self.state.enemies.push(enemy);
        }
    }

    /// Builds the spawn queue for `wave`, replacing any pending enemies.
    ///
    /// Returns the number of queued enemies.
    pub fn prepare_wave(&mut self, wave: u32) -> usize {
        let start = self.state.spawn_point();
        let queued = self.spawning.prepare_wave(wave, start, &mut self.rng);
        self.wave_prepared = true;
        self.events.push(Event::WavePrepared {
            wave,
            queued,
            boss: is_boss_wave(wave),
        });
        queued
    }

    /// Prepares the spawn queue for the current wave number.
    pub fn begin_wave(&mut self) -> usize {
        self.prepare_wave(self.state.wave)
    }

    /// Moves the wave counter forward once a wave has been cleared.
    ///
    /// Returns the new wave number.
    pub fn advance_wave(&mut self) -> u32 {
        self.state.wave = self.state.wave.saturating_add(1);
        self.wave_prepared = false;
        self.state.wave
    }

    /// Reports whether the spawn queue and the map are both empty.
    #[must_use]
    pub fn is_wave_complete(&self) -> bool {
        self.spawning.is_empty() && self.state.enemies.is_empty()
    }

    /// Observable phase of the current wave.
    #[must_use]
    pub fn wave_phase(&self) -> WavePhase {
        if !self.wave_prepared {
            WavePhase::Idle
        } else if !self.spawning.is_empty() {
            WavePhase::Spawning
        } else if !self.state.enemies.is_empty() {
            WavePhase::Active
        } else {
            WavePhase::Complete
        }
    }

    /// Reports whether the current wave closes a stage.
    #[must_use]
    pub fn is_stage_complete(&self) -> bool {
        self.state.wave % self.config.waves_per_stage == 0
    }

    /// Reports whether the run has ended.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.state.lives == 0
    }

    /// Draws three distinct upgrade cards from the catalog.
    pub fn upgrade_options(&mut self) -> Vec<UpgradeCard> {
        upgrades::draw_options(&mut self.rng)
    }

    /// Pays the reroll fee and draws a fresh set of cards.
    ///
    /// Returns `None`, leaving the gold untouched, when the fee is unaffordable.
    pub fn reroll_upgrades(&mut self) -> Option<Vec<UpgradeCard>> {
        let fee = self.config.reroll_cost;
        if self.state.money < fee {
            return None;
        }
        self.state.money -= fee;
        Some(self.upgrade_options())
    }

    /// Applies a chosen card to the run.
    pub fn apply_upgrade(&mut self, card: &UpgradeCard) {
        upgrades::apply(card.effect, &mut self.state, &mut self.modifiers);
        info!("applied upgrade {}", card.kind.id());
        self.events.push(Event::UpgradeApplied {
            id: card.kind.id().to_owned(),
        });
    }

    /// Fires the ultimate ability when the energy meter is full.
    ///
    /// Returns `false`, leaving every enemy and the meter untouched, while the
    /// meter is still charging.
    pub fn activate_orbital_strike(&mut self) -> bool {
        if self.state.energy < self.config.max_energy {
            return false;
        }

        self.state.energy = 0;
        self.state.screen_shake = ORBITAL_STRIKE_SHAKE;
        self.state.orbital_strike_tick = ORBITAL_STRIKE_TICKS;

        let damage = self.config.orbital_strike_damage;
        let targets: Vec<_> = self.state.enemies.iter().map(|enemy| enemy.id).collect();
        for &id in &targets {
            let Some(enemy) = self.state.enemies.iter_mut().find(|enemy| enemy.id == id) else {
                continue;
            };
            enemy.hp -= damage;
            enemy.hit_flash = ORBITAL_HIT_FLASH_TICKS;
            let position = enemy.position;
            let dead = enemy.is_dead();

            self.spawn_particles(position, Color::DANGER, 15);
            self.float_damage(position, damage, false);
            if dead {
                self.kill_enemy(id, true);
            }
        }

        info!("orbital strike hit {} enemies", targets.len());
        self.events.push(Event::OrbitalStrike {
            targets: targets.len(),
        });
        true
    }

    /// Sells every tower, clears transient entities and regenerates the map
    /// for the next stage.
    ///
    /// Returns the gold recovered from the sold towers.
    pub fn next_stage(&mut self) -> u32 {
        self.state.projectiles.clear();
        self.state.enemies.clear();
        self.state.floating_texts.clear();
        self.state.particles.clear();
        self.state.combo = 0;
        self.state.combo_timer = 0;
        self.spawning.clear();

        let mut recovered = 0u32;
        for tower in self.state.grid.drain() {
            let refund = self.refund_for(tower.total_invested);
            self.state.money = self.state.money.saturating_add(refund);
            recovered = recovered.saturating_add(refund);
            let position = tower.position();
            self.float_text(position, format!("+${refund}"), Color::GOLD, 1.0);
            self.events.push(Event::TowerSold {
                tower: tower.id,
                refund,
            });
        }

        let stage = self.state.stage.saturating_add(1);
        let level = generate_level(&self.generator, self.run_seed, stage);
        self.state.path = level.path;
        self.state.obstacles = level.obstacles;
        self.state.stage = stage;
        self.wave_prepared = false;

        info!("advanced to stage {stage}, recovered {recovered} gold");
        self.events.push(Event::StageAdvanced { stage, recovered });
        recovered
    }
}

fn generate_level(generator: &LevelGenerator, run_seed: u64, stage: u32) -> Level {
    let mut rng = ChaCha8Rng::seed_from_u64(seeds::derive_stage_seed(run_seed, stage));
    generator.generate(stage, &mut rng)
}

#[cfg(test)]
impl Engine {
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub(crate) fn modifiers_mut(&mut self) -> &mut GameModifiers {
        &mut self.modifiers
    }
}
