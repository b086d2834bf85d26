//! Plain data records for every entity owned by the simulation.

use rogue_defence_core::{
    CellCoord, EnemyId, EnemyKind, Point, ProjectileId, TowerId, TowerKind, TowerStats,
};
use serde::Serialize;

/// Ticks an enemy flashes after being hit.
pub const HIT_FLASH_TICKS: u32 = 5;

/// Display color attached to cosmetic entities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Color {
    red: u8,
    green: u8,
    blue: u8,
}

impl Color {
    /// Gold used for coins and bounties.
    pub const GOLD: Color = Color::from_rgb(0xfb, 0xbf, 0x24);
    /// Warm gold used for critical damage numbers.
    pub const CRIT: Color = Color::from_rgb(0xfa, 0xcc, 0x15);
    /// Red used for explosions, base damage and execute.
    pub const DANGER: Color = Color::from_rgb(0xef, 0x44, 0x44);
    /// Bright red sparks spawned when the base is hit.
    pub const BASE_HIT: Color = Color::from_rgb(0xff, 0x00, 0x00);
    /// Neutral white.
    pub const WHITE: Color = Color::from_rgb(0xff, 0xff, 0xff);
    /// Muted grey for expired streaks.
    pub const MUTED: Color = Color::from_rgb(0x9c, 0xa3, 0xaf);
    /// Pink used for combo milestones.
    pub const COMBO: Color = Color::from_rgb(0xf4, 0x72, 0xb6);
    /// Yellow tint of critical projectiles.
    pub const CRIT_SHOT: Color = Color::from_rgb(0xff, 0xff, 0x00);

    /// Creates a new color from byte RGB components.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Tint associated with shots and impacts of a tower kind.
    #[must_use]
    pub const fn of_tower(kind: TowerKind) -> Self {
        match kind {
            TowerKind::Archer => Self::from_rgb(0x34, 0xd3, 0x99),
            TowerKind::Cannon => Self::from_rgb(0xf8, 0x71, 0x71),
            TowerKind::Mage => Self::from_rgb(0x60, 0xa5, 0xfa),
            TowerKind::Sniper => Self::from_rgb(0xc0, 0x84, 0xfc),
        }
    }
}

/// Enemy travelling along the path.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Enemy {
    /// Unique identifier assigned by the spawn queue.
    pub id: EnemyId,
    /// Continuous position in cells.
    pub position: Point,
    /// Index of the path segment being traversed.
    pub path_index: usize,
    /// Progress along the current segment, in cells.
    pub distance: f32,
    /// Base speed in cells per tick.
    pub speed: f32,
    /// Remaining hit points.
    pub hp: f32,
    /// Hit points at spawn.
    pub max_hp: f32,
    /// Ticks remaining at half speed.
    pub frozen: u32,
    /// Cosmetic ticks remaining of the hit flash.
    pub hit_flash: u32,
    /// Archetype of the enemy.
    pub kind: EnemyKind,
}

impl Enemy {
    /// Creates an enemy standing at the start of the path.
    #[must_use]
    pub fn new(id: EnemyId, kind: EnemyKind, hp: f32, speed: f32, start: Point) -> Self {
        Self {
            id,
            position: start,
            path_index: 0,
            distance: 0.0,
            speed,
            hp,
            max_hp: hp,
            frozen: 0,
            hit_flash: 0,
            kind,
        }
    }

    /// Fraction of hit points remaining.
    #[must_use]
    pub fn health_ratio(&self) -> f32 {
        if self.max_hp <= 0.0 {
            return 0.0;
        }
        self.hp / self.max_hp
    }

    /// Speed for the current tick, halved while frozen.
    #[must_use]
    pub fn effective_speed(&self) -> f32 {
        if self.frozen > 0 {
            self.speed * 0.5
        } else {
            self.speed
        }
    }

    /// Reports whether the enemy has run out of hit points.
    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.hp <= 0.0
    }
}

/// Tower occupying a single grid cell.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Tower {
    /// Identifier allocated by the engine.
    pub id: TowerId,
    /// Cell occupied by the tower.
    pub cell: CellCoord,
    /// Kind of tower.
    pub kind: TowerKind,
    /// Base targeting radius before run-wide bonuses.
    pub range: f32,
    /// Damage per shot at level one.
    pub damage: f32,
    /// Ticks between shots before speed bonuses.
    pub cooldown: u32,
    /// Ticks remaining until the tower may fire again.
    pub last_shot: f32,
    /// Upgrade level, starting at one.
    pub level: u32,
    /// Gold spent on construction and upgrades.
    pub total_invested: u32,
    /// Innate splash radius.
    pub splash: Option<f32>,
    /// Innate freeze duration.
    pub freeze: Option<u32>,
}

impl Tower {
    /// Creates a level-one tower from its base statistics.
    #[must_use]
    pub fn new(id: TowerId, cell: CellCoord, kind: TowerKind, stats: &TowerStats) -> Self {
        Self {
            id,
            cell,
            kind,
            range: stats.range,
            damage: stats.damage,
            cooldown: stats.cooldown,
            last_shot: 0.0,
            level: 1,
            total_invested: stats.cost,
            splash: stats.splash,
            freeze: stats.freeze,
        }
    }

    /// Damage per shot at the current level.
    #[must_use]
    pub fn level_damage(&self, stat_multiplier: f32) -> f32 {
        let exponent = i32::try_from(self.level.saturating_sub(1)).unwrap_or(i32::MAX);
        self.damage * stat_multiplier.powi(exponent)
    }

    /// Continuous position of the tower.
    #[must_use]
    pub fn position(&self) -> Point {
        self.cell.to_point()
    }
}

/// Homing shot fired by a tower.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Projectile {
    /// Identifier allocated by the engine.
    pub id: ProjectileId,
    /// Continuous position in cells.
    pub position: Point,
    /// Enemy being tracked; it may already be dead.
    pub target: EnemyId,
    /// Damage delivered on hit.
    pub damage: f32,
    /// Cells travelled per tick.
    pub speed: f32,
    /// Radius of the impact explosion.
    pub splash_radius: Option<f32>,
    /// Ticks of slow applied on hit.
    pub freeze_duration: Option<u32>,
    /// Whether the projectile follows its target.
    pub homing: bool,
    /// Whether the shot rolled a critical hit.
    pub critical: bool,
    /// Display tint.
    pub color: Color,
}

/// Short-lived cosmetic spark.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Particle {
    /// Continuous position in cells.
    pub position: Point,
    /// Displacement per tick.
    pub velocity: Point,
    /// Ticks remaining.
    pub life: f32,
    /// Display radius in cells.
    pub size: f32,
    /// Display tint.
    pub color: Color,
}

/// Rising text label such as damage numbers.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FloatingText {
    /// Continuous position in cells.
    pub position: Point,
    /// Text displayed.
    pub text: String,
    /// Display tint.
    pub color: Color,
    /// Relative font scale.
    pub size: f32,
    /// Ticks remaining.
    pub life: u32,
    /// Upward drift per tick.
    pub vy: f32,
}
