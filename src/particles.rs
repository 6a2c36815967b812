//! A fountain of point-sprite particles.
//!
//! Particles spawn at the origin with a random upward velocity, fall under
//! gravity, bounce off the `y = 0` floor losing a quarter of their speed, and
//! respawn when their life runs out. Each one is drawn as a single
//! [`ParticleVertex`] whose `life` fades from 1 to 0.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Downward acceleration, in units per second squared.
pub const GRAVITY: f32 = 9.8;

/// Fraction of vertical speed kept (and reversed) on a bounce.
pub const BOUNCE: f32 = -0.75;

/// Step the samples advance the simulation by every frame, in seconds.
pub const FRAME_STEP: f32 = 0.005;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Particle {
    pub position: [f32; 3],
    pub velocity: [f32; 3],
    /// Total life in seconds.
    pub lifespan: f32,
    /// Seconds left before respawning.
    pub remaining: f32,
}

impl Particle {
    /// Remaining life as a fraction of the lifespan, 0 for a particle born
    /// with no life.
    pub fn life_fraction(&self) -> f32 {
        if self.lifespan == 0.0 {
            0.0
        } else {
            self.remaining / self.lifespan
        }
    }
}

/// Per-particle vertex for a `GL_POINTS` draw: `(x, y, z, life)`.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ParticleVertex {
    pub position: [f32; 3],
    pub life: f32,
}

/// A fixed-size pool of particles driven by a seeded RNG, so two systems
/// built with the same seed evolve identically.
///
/// ```
/// use glcam::ParticleSystem;
///
/// let mut particles = ParticleSystem::new(1024, 3.0, 7);
/// particles.update(0.005);
/// assert_eq!(particles.vertices().len(), 1024);
/// assert!(particles.particles().iter().all(|p| p.position[1] >= 0.0));
/// ```
#[derive(Clone, Debug)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
    vertices: Vec<ParticleVertex>,
    max_lifespan: f32,
    rng: StdRng,
}

impl ParticleSystem {
    /// Spawns `count` particles with lifespans in `[0, max_lifespan)`.
    pub fn new(count: usize, max_lifespan: f32, seed: u64) -> Self {
        let mut system = Self {
            particles: vec![Particle::default(); count],
            vertices: vec![ParticleVertex::default(); count],
            max_lifespan,
            rng: StdRng::seed_from_u64(seed),
        };
        for i in 0..count {
            system.reset(i);
            system.write_vertex(i);
        }
        system
    }

    fn reset(&mut self, i: usize) {
        let rng = &mut self.rng;
        let velocity = [
            rng.random::<f32>() * 20.0 - 10.0,
            rng.random::<f32>() * 20.0,
            rng.random::<f32>() * 20.0 - 10.0,
        ];
        let lifespan = rng.random::<f32>() * self.max_lifespan;

        self.particles[i] = Particle {
            position: [0.0; 3],
            velocity,
            lifespan,
            remaining: lifespan,
        };
    }

    fn write_vertex(&mut self, i: usize) {
        let p = &self.particles[i];
        self.vertices[i] = ParticleVertex {
            position: p.position,
            life: p.life_fraction(),
        };
    }

    /// Advances every particle by `elapsed` seconds.
    ///
    /// A particle whose life drops to zero respawns first and then moves
    /// for the same step.
    pub fn update(&mut self, elapsed: f32) {
        for i in 0..self.particles.len() {
            self.particles[i].remaining -= elapsed;
            if self.particles[i].remaining <= 0.0 {
                self.reset(i);
            }

            let p = &mut self.particles[i];
            for axis in 0..3 {
                p.position[axis] += p.velocity[axis] * elapsed;
            }

            p.velocity[1] -= GRAVITY * elapsed;
            if p.position[1] < 0.0 {
                p.velocity[1] *= BOUNCE;
                p.position[1] = 0.0;
            }

            self.write_vertex(i);
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Vertex data as of the last update.
    pub fn vertices(&self) -> &[ParticleVertex] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn max_lifespan(&self) -> f32 {
        self.max_lifespan
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_ranges() {
        let system = ParticleSystem::new(512, 3.0, 1);
        for p in system.particles() {
            assert_eq!(p.position, [0.0; 3]);
            assert!((-10.0..10.0).contains(&p.velocity[0]));
            assert!((0.0..20.0).contains(&p.velocity[1]));
            assert!((-10.0..10.0).contains(&p.velocity[2]));
            assert!((0.0..3.0).contains(&p.lifespan));
            assert_eq!(p.remaining, p.lifespan);
        }
    }

    #[test]
    fn fresh_particles_have_full_life() {
        let system = ParticleSystem::new(64, 3.0, 2);
        for (p, v) in system.particles().iter().zip(system.vertices()) {
            if p.lifespan > 0.0 {
                assert_eq!(v.life, 1.0);
            }
        }
    }

    #[test]
    fn same_seed_same_simulation() {
        let mut a = ParticleSystem::new(128, 3.0, 42);
        let mut b = ParticleSystem::new(128, 3.0, 42);
        for _ in 0..100 {
            a.update(FRAME_STEP);
            b.update(FRAME_STEP);
        }
        assert_eq!(a.particles(), b.particles());
    }

    #[test]
    fn particles_never_fall_through_the_floor() {
        let mut system = ParticleSystem::new(256, 3.0, 3);
        for _ in 0..2000 {
            system.update(FRAME_STEP);
            assert!(system.particles().iter().all(|p| p.position[1] >= 0.0));
        }
    }

    #[test]
    fn gravity_slows_rising_particles() {
        let mut system = ParticleSystem::new(1, 1000.0, 4);
        let before = system.particles()[0];
        system.update(FRAME_STEP);
        let after = system.particles()[0];

        assert!((after.velocity[1] - (before.velocity[1] - GRAVITY * FRAME_STEP)).abs() < 1e-5);
        assert!((after.position[1] - before.velocity[1] * FRAME_STEP).abs() < 1e-5);
    }

    #[test]
    fn bounce_reverses_and_damps() {
        let mut system = ParticleSystem::new(1, 1000.0, 5);
        system.particles[0].position = [0.0, 0.01, 0.0];
        system.particles[0].velocity = [0.0, -4.0, 0.0];
        system.update(FRAME_STEP);

        let p = system.particles()[0];
        assert_eq!(p.position[1], 0.0);
        let expected = (-4.0 - GRAVITY * FRAME_STEP) * BOUNCE;
        assert!((p.velocity[1] - expected).abs() < 1e-5);
    }

    #[test]
    fn expired_particles_respawn() {
        let mut system = ParticleSystem::new(1, 3.0, 6);
        system.particles[0].remaining = 0.001;
        system.particles[0].position = [5.0, 5.0, 5.0];
        system.update(FRAME_STEP);

        let p = system.particles()[0];
        assert!(p.position[1] < 1.0);
        assert!(p.position[0].abs() < 1.0);
        assert_eq!(p.remaining, p.lifespan);
    }

    #[test]
    fn zero_lifespan_reports_zero_life() {
        let p = Particle::default();
        assert_eq!(p.life_fraction(), 0.0);
    }
}
