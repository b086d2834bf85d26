//! Homing projectile flight.

use crate::Engine;

const DISSIPATION_PARTICLES: usize = 2;

impl Engine {
    /// Advances every projectile toward its target and resolves arrivals.
    ///
    /// A homing projectile whose target no longer exists dissipates on the
    /// spot instead of picking another enemy.
    pub(crate) fn move_projectiles(&mut self) {
        let in_flight = std::mem::take(&mut self.state.projectiles);
        let mut remaining = Vec::with_capacity(in_flight.len());

        for mut projectile in in_flight {
            let destination = if projectile.homing {
                match self.state.enemy(projectile.target).map(|target| target.position) {
                    Some(position) => position,
                    None => {
                        self.spawn_particles(
                            projectile.position,
                            projectile.color,
                            DISSIPATION_PARTICLES,
                        );
                        continue;
                    }
                }
            } else {
                projectile.position
            };

            if projectile.position.distance(destination) < projectile.speed {
                self.resolve_hit(&projectile);
            } else {
                projectile.position = projectile.position.step_toward(destination, projectile.speed);
                remaining.push(projectile);
            }
        }

        self.state.projectiles = remaining;
    }
}
