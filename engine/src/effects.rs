//! Cosmetic particles and floating texts owned by the engine.
//!
//! Everything here draws from the cosmetic stream so that visual noise never
//! shifts the gameplay stream.

use rand::Rng;
use rogue_defence_core::Point;
use rogue_defence_world::{Color, FloatingText, Particle};

use crate::Engine;

const PARTICLE_SPREAD: f32 = 0.3;
const PARTICLE_BASE_LIFE: f32 = 15.0;
const PARTICLE_SIZE_MIN: f32 = 0.1;
const PARTICLE_SIZE_RANGE: f32 = 0.2;

const TEXT_LIFE_TICKS: u32 = 60;
const TEXT_RISE_PER_TICK: f32 = 0.03;
const DAMAGE_TEXT_JITTER: f32 = 0.2;
const TEXT_LIFT: f32 = 0.5;

impl Engine {
    pub(crate) fn spawn_particles(&mut self, at: Point, color: Color, count: usize) {
        for _ in 0..count {
            let velocity = Point::new(
                (self.cosmetic.gen::<f32>() - 0.5) * PARTICLE_SPREAD,
                (self.cosmetic.gen::<f32>() - 0.5) * PARTICLE_SPREAD,
            );
            let life = PARTICLE_BASE_LIFE + self.cosmetic.gen::<f32>() * PARTICLE_BASE_LIFE;
            let size = self.cosmetic.gen::<f32>() * PARTICLE_SIZE_RANGE + PARTICLE_SIZE_MIN;
            self.state.particles.push(Particle {
                position: at,
                velocity,
                life,
                size,
                color,
            });
        }
    }

    pub(crate) fn float_text(&mut self, at: Point, text: impl Into<String>, color: Color, size: f32) {
        self.state.floating_texts.push(FloatingText {
            position: at,
            text: text.into(),
            color,
            size,
            life: TEXT_LIFE_TICKS,
            vy: TEXT_RISE_PER_TICK,
        });
    }

    /// Damage number above a struck enemy, highlighted for critical shots.
    pub(crate) fn float_damage(&mut self, at: Point, damage: f32, critical: bool) {
        let jitter = (self.cosmetic.gen::<f32>() - 0.5) * DAMAGE_TEXT_JITTER;
        let position = Point::new(at.x + jitter, at.y - TEXT_LIFT);
        let (color, size) = if critical {
            (Color::CRIT, 1.2)
        } else {
            (Color::WHITE, 0.8)
        };
        let amount = damage.max(0.0).floor() as u32;
        self.float_text(position, amount.to_string(), color, size);
    }

    pub(crate) fn advance_floating_texts(&mut self) {
        for text in &mut self.state.floating_texts {
            text.position.y -= text.vy;
            text.life = text.life.saturating_sub(1);
        }
        self.state.floating_texts.retain(|text| text.life > 0);
    }

    pub(crate) fn advance_particles(&mut self) {
        for particle in &mut self.state.particles {
            particle.position.x += particle.velocity.x;
            particle.position.y += particle.velocity.y;
            particle.life -= 1.0;
        }
        self.state.particles.retain(|particle| particle.life > 0.0);
    }

    pub(crate) fn text_above(at: Point) -> Point {
        Point::new(at.x, at.y - TEXT_LIFT)
    }
}
