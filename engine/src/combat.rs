//! Hit resolution, kill rewards and death explosions.

use log::trace;
use rand::Rng;
use rogue_defence_core::{EnemyId, Event, Point};
use rogue_defence_world::{Color, Projectile, HIT_FLASH_TICKS};

use crate::Engine;

const GREED_GOLD: u32 = 2;
const EXECUTE_OVERKILL: f32 = 10.0;
const EXECUTE_SHAKE: f32 = 5.0;
const SPLASH_SHAKE: f32 = 2.0;
const SPLASH_PARTICLES: usize = 8;
const IMPACT_PARTICLES: usize = 3;
const KILL_SCORE: u32 = 10;
const KILL_PARTICLES: usize = 5;
const COMBO_MILESTONE: u32 = 10;
/// Death explosions reach enemies strictly closer than this.
pub(crate) const EXPLOSION_RADIUS: f32 = 1.5;
const EXPLOSION_SHAKE: f32 = 3.0;
const EXPLOSION_PARTICLES: usize = 10;

impl Engine {
    /// Applies an arrived projectile to its target or to every enemy inside
    /// its splash radius.
    pub(crate) fn resolve_hit(&mut self, projectile: &Projectile) {
        let target_position = self
            .state
            .enemy(projectile.target)
            .map(|enemy| enemy.position);

        match projectile.splash_radius {
            Some(radius) => {
                let impact = target_position.unwrap_or(projectile.position);
                self.spawn_particles(impact, projectile.color, SPLASH_PARTICLES);
                self.state.screen_shake = SPLASH_SHAKE;

                let victims: Vec<EnemyId> = self
                    .state
                    .enemies
                    .iter()
                    .filter(|enemy| enemy.position.distance(impact) <= radius)
                    .map(|enemy| enemy.id)
                    .collect();
                for id in victims {
                    self.hit_enemy(id, projectile);
                }
            }
            None => {
                if let Some(position) = target_position {
                    self.hit_enemy(projectile.target, projectile);
                    self.spawn_particles(position, projectile.color, IMPACT_PARTICLES);
                }
            }
        }
    }

    fn hit_enemy(&mut self, id: EnemyId, projectile: &Projectile) {
        // Earlier victims of the same splash may have exploded this one.
        let Some(index) = self.enemy_index(id) else {
            return;
        };
        let position = self.state.enemies[index].position;
        self.state.enemies[index].hit_flash = HIT_FLASH_TICKS;

        let greed = self.modifiers.gold_on_hit_chance;
        if greed > 0.0 && self.rng.gen::<f32>() < greed {
            self.state.money = self.state.money.saturating_add(GREED_GOLD);
            self.float_text(Self::text_above(position), format!("+${GREED_GOLD}"), Color::GOLD, 0.8);
        }

        let mut damage = projectile.damage;
        let enemy = &self.state.enemies[index];
        let threshold = self.modifiers.execute_threshold;
        if threshold > 0.0 && enemy.health_ratio() < threshold && !enemy.kind.is_boss() {
            damage = enemy.hp + EXECUTE_OVERKILL;
            self.state.screen_shake = EXECUTE_SHAKE;
            self.float_text(Self::text_above(position), "EXECUTE", Color::DANGER, 1.0);
        }

        let enemy = &mut self.state.enemies[index];
        enemy.hp -= damage;
        if let Some(duration) = projectile.freeze_duration {
            enemy.frozen = duration;
        }
        let dead = enemy.is_dead();
        trace!("enemy {} took {damage} damage", id.get());

        self.float_damage(position, damage, projectile.critical);
        if dead {
            self.kill_enemy(id, true);
        }
    }

    /// Removes a slain enemy and pays out its rewards.
    ///
    /// Explosions only trigger when `may_explode` is set, so enemies killed
    /// by an explosion never explode in turn.
    pub(crate) fn kill_enemy(&mut self, id: EnemyId, may_explode: bool) {
        let Some(index) = self.enemy_index(id) else {
            return;
        };
        let enemy = self.state.enemies.remove(index);
        let bounty = enemy.kind.bounty();

        self.state.money = self.state.money.saturating_add(bounty);
        self.state.score = self.state.score.saturating_add(KILL_SCORE);
        self.spawn_particles(enemy.position, Color::GOLD, KILL_PARTICLES);

        self.state.combo = self.state.combo.saturating_add(1);
        self.state.combo_timer = self.config.combo_timeout;
        self.state.energy = self
            .state
            .energy
            .saturating_add(self.config.energy_per_kill)
            .min(self.config.max_energy);

        let combo = self.state.combo;
        self.events.push(Event::EnemyKilled {
            enemy: id,
            kind: enemy.kind,
            bounty,
            combo,
        });
        if combo % COMBO_MILESTONE == 0 {
            self.float_text(enemy.position, format!("{combo} COMBO!"), Color::COMBO, 1.5);
            self.events.push(Event::ComboMilestone { combo });
        }

        let explosion = self.modifiers.explode_on_death;
        if may_explode && explosion > 0.0 {
            self.explode(enemy.position, explosion);
        }
    }

    fn explode(&mut self, origin: Point, damage: f32) {
        self.spawn_particles(origin, Color::DANGER, EXPLOSION_PARTICLES);
        self.state.screen_shake = EXPLOSION_SHAKE;

        let caught: Vec<EnemyId> = self
            .state
            .enemies
            .iter()
            .filter(|enemy| enemy.position.distance(origin) < EXPLOSION_RADIUS)
            .map(|enemy| enemy.id)
            .collect();

        for id in caught {
            let Some(index) = self.enemy_index(id) else {
                continue;
            };
            let enemy = &mut self.state.enemies[index];
            enemy.hp -= damage;
            let position = enemy.position;
            let dead = enemy.is_dead();
            self.float_damage(position, damage, false);
            if dead {
                self.kill_enemy(id, false);
            }
        }
    }

    fn enemy_index(&self, id: EnemyId) -> Option<usize> {
        self.state.enemies.iter().position(|enemy| enemy.id == id)
    }
}
