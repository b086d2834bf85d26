#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic spawning system responsible for building and releasing waves.

use std::collections::VecDeque;

use log::debug;
use rand::Rng;
use rogue_defence_core::{EnemyId, EnemyKind, Point};
use rogue_defence_world::Enemy;

/// Ticks between two enemies leaving the spawn queue.
pub const SPAWN_INTERVAL_TICKS: u32 = 40;
/// Every wave divisible by this number ends with a boss.
pub const BOSS_WAVE_INTERVAL: u32 = 5;

const BASIC_SPEED: f32 = 0.04;

/// Hit points and speed rolled for one queued enemy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyProfile {
    /// Archetype of the enemy.
    pub kind: EnemyKind,
    /// Hit points at spawn.
    pub hp: f32,
    /// Speed in cells per tick.
    pub speed: f32,
}

/// Number of enemies queued for a wave.
#[must_use]
pub fn wave_size(wave: u32) -> usize {
    5 + (f64::from(wave) * 1.5).floor() as usize
}

/// Hit points of a basic enemy on a wave, before the archetype multiplier.
#[must_use]
pub fn base_hp(wave: u32) -> f32 {
    20.0 * (1.0 + wave as f32 * 0.3)
}

/// Reports whether the wave ends with a boss.
#[must_use]
pub const fn is_boss_wave(wave: u32) -> bool {
    wave % BOSS_WAVE_INTERVAL == 0
}

/// Resolves the archetype of a queued enemy.
///
/// `roll` is a uniform draw in `[0, 1)`. Thresholds are evaluated in the
/// fixed priority tank, fast, swarm; swarms only appear after wave three.
/// The final slot of a boss wave is always a boss, regardless of the roll.
#[must_use]
pub fn roll_profile(wave: u32, slot: usize, count: usize, roll: f64) -> EnemyProfile {
    let hp = base_hp(wave);
    let (kind, hp_multiplier, speed) = if is_boss_wave(wave) && slot + 1 == count {
        (EnemyKind::Boss, 15.0, 0.015)
    } else if roll > 0.9 {
        (EnemyKind::Tank, 3.0, 0.02)
    } else if roll > 0.7 {
        (EnemyKind::Fast, 0.6, 0.07)
    } else if roll > 0.5 && wave > 3 {
        (EnemyKind::Swarm, 0.3, 0.06)
    } else {
        (EnemyKind::Basic, 1.0, BASIC_SPEED)
    };

    EnemyProfile {
        kind,
        hp: hp * hp_multiplier,
        speed,
    }
}

/// Spawn queue releasing one enemy every [`SPAWN_INTERVAL_TICKS`] ticks.
#[derive(Debug, Default)]
pub struct Spawning {
    queue: VecDeque<Enemy>,
    wave_time: u32,
    next_enemy_id: u32,
}

impl Spawning {
    /// Creates an empty spawn queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the queue with the enemies of `wave`, all entering at `start`.
    ///
    /// Returns the number of queued enemies.
    pub fn prepare_wave<R: Rng + ?Sized>(&mut self, wave: u32, start: Point, rng: &mut R) -> usize {
        let count = wave_size(wave);
        self.queue.clear();
        self.queue.reserve(count);

        for slot in 0..count {
            let roll = rng.gen::<f64>();
            let profile = roll_profile(wave, slot, count, roll);
            let id = self.allocate_id();
            self.queue
                .push_back(Enemy::new(id, profile.kind, profile.hp, profile.speed, start));
        }

        self.wave_time = 0;
        debug!("prepared wave {wave} with {count} enemies");
        count
    }

    /// Advances the spawn clock by one tick, releasing the next enemy when
    /// the cadence elapses.
    pub fn tick(&mut self) -> Option<Enemy> {
        self.wave_time = self.wave_time.wrapping_add(1);
        if self.queue.is_empty() || self.wave_time % SPAWN_INTERVAL_TICKS != 0 {
            return None;
        }
        self.queue.pop_front()
    }

    /// Enemies still waiting to spawn, in release order.
    pub fn pending(&self) -> impl Iterator<Item = &Enemy> {
        self.queue.iter()
    }

    /// Number of enemies still waiting to spawn.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Reports whether every queued enemy has spawned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Drops every pending enemy.
    pub fn clear(&mut self) {
        self.queue.clear();
        self.wave_time = 0;
    }

    fn allocate_id(&mut self) -> EnemyId {
        let id = EnemyId::new(self.next_enemy_id);
        self.next_enemy_id = self.next_enemy_id.wrapping_add(1);
        id
    }
}
