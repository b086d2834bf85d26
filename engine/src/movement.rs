//! Enemy movement along the current path.

use log::debug;
use rogue_defence_core::{CellCoord, EnemyId, Event};
use rogue_defence_world::{Color, Enemy};

use crate::Engine;

/// Degenerate segments are stretched to this length to keep the
/// interpolation factor finite.
const MIN_SEGMENT_LENGTH: f32 = 0.1;
const BASE_HIT_SHAKE: f32 = 10.0;
const BASE_HIT_PARTICLES: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Progress {
    Walking,
    ReachedBase,
}

fn advance(enemy: &mut Enemy, path: &[CellCoord]) -> Progress {
    if enemy.frozen > 0 {
        enemy.frozen -= 1;
    }
    enemy.hit_flash = enemy.hit_flash.saturating_sub(1);
    enemy.distance += enemy.effective_speed();

    let (Some(start), Some(end)) = (
        path.get(enemy.path_index),
        path.get(enemy.path_index + 1),
    ) else {
        return Progress::ReachedBase;
    };
    let (start, end) = (start.to_point(), end.to_point());
    let length = start.distance(end).max(MIN_SEGMENT_LENGTH);

    if enemy.distance >= length {
        enemy.position = end;
        enemy.path_index += 1;
        enemy.distance = 0.0;
        if enemy.path_index + 1 >= path.len() {
            return Progress::ReachedBase;
        }
    } else {
        enemy.position = start.lerp(end, enemy.distance / length);
    }
    Progress::Walking
}

impl Engine {
    pub(crate) fn move_enemies(&mut self) {
        let path = &self.state.path;
        let escaped: Vec<EnemyId> = self
            .state
            .enemies
            .iter_mut()
            .filter_map(|enemy| (advance(enemy, path) == Progress::ReachedBase).then_some(enemy.id))
            .collect();

        for id in escaped {
            self.damage_base(id);
        }
    }

    fn damage_base(&mut self, id: EnemyId) {
        let Some(index) = self.state.enemies.iter().position(|enemy| enemy.id == id) else {
            return;
        };
        let enemy = self.state.enemies.remove(index);

        self.state.lives = self.state.lives.saturating_sub(1);
        self.state.screen_shake = BASE_HIT_SHAKE;
        self.state.combo = 0;
        self.state.combo_timer = 0;
        self.spawn_particles(enemy.position, Color::BASE_HIT, BASE_HIT_PARTICLES);

        debug!("enemy {} reached the base, {} lives left", id.get(), self.state.lives);
        self.events.push(Event::BaseDamaged {
            enemy: id,
            lives: self.state.lives,
        });
    }
}
