//! Tower targeting and projectile creation.

use log::trace;
use rand::Rng;
use rogue_defence_core::{ProjectileId, TowerKind};
use rogue_defence_world::{Color, Projectile};

use crate::Engine;

/// Projectile travel per tick in cells.
pub(crate) const PROJECTILE_SPEED: f32 = 0.25;
/// No speed bonus lets a tower fire more often than this.
const MIN_COOLDOWN_TICKS: f32 = 5.0;

impl Engine {
    pub(crate) fn fire_towers(&mut self) {
        let modifiers = self.modifiers;
        let combo_multiplier = 1.0 + self.state.combo as f32 * self.config.combo_damage_scaling;
        let stat_multiplier = self.config.upgrade_stat_multiplier;
        let mut fired = Vec::new();

        for tower in self.state.grid.towers_mut() {
            if tower.last_shot > 0.0 {
                tower.last_shot -= 1.0;
            }
            if tower.last_shot > 0.0 {
                continue;
            }

            let origin = tower.position();
            let reach = tower.range + modifiers.range_add;
            let Some(target) = self
                .state
                .enemies
                .iter()
                .find(|enemy| origin.distance(enemy.position) <= reach)
            else {
                continue;
            };

            let mut damage = tower.level_damage(stat_multiplier) * modifiers.damage_mul * combo_multiplier;
            if tower.kind == TowerKind::Sniper {
                damage *= modifiers.sniper_mul;
            }
            let critical = self.rng.gen::<f32>() < modifiers.crit_chance;
            if critical {
                damage *= modifiers.crit_dmg;
            }

            let id = ProjectileId::new(self.next_projectile_id);
            self.next_projectile_id = self.next_projectile_id.wrapping_add(1);
            trace!(
                "tower {} fired projectile {} at enemy {} for {damage}",
                tower.id.get(),
                id.get(),
                target.id.get()
            );
            fired.push(Projectile {
                id,
                position: origin,
                target: target.id,
                damage,
                speed: PROJECTILE_SPEED,
                splash_radius: tower.splash.map(|radius| radius * modifiers.splash_radius_mul),
                freeze_duration: tower.freeze,
                homing: true,
                critical,
                color: if critical {
                    Color::CRIT_SHOT
                } else {
                    Color::of_tower(tower.kind)
                },
            });

            tower.last_shot = (tower.cooldown as f32 / modifiers.speed_mul).max(MIN_COOLDOWN_TICKS);
        }

        self.state.projectiles.extend(fired);
    }
}
