//! Probabilistic spawning of hearts, bombs and particle bursts
//!
//! All randomness in the simulation flows through the spawner's seeded
//! RNG, so a game replayed from the same seed and inputs is identical.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::entity::{FallingEntity, FallingKind, Particle};
use crate::Viewport;
use crate::consts::{
    HEART_HUE_SPREAD, HEART_MIN_HUE, PARTICLE_MAX_SIZE, PARTICLE_MAX_SPEED, PARTICLE_MIN_SIZE,
};
use crate::tuning::Tuning;

/// Monotonic entity ID allocator
#[derive(Debug, Clone)]
pub struct EntityIds {
    next: u32,
}

impl Default for EntityIds {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl EntityIds {
    pub fn next_id(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// Seeded generator for everything that falls or sparkles
#[derive(Debug, Clone)]
pub struct Spawner {
    seed: u64,
    rng: Pcg32,
}

impl Spawner {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Roll for this frame's spawns
    ///
    /// Hearts and bombs are rolled independently, so a frame can yield
    /// zero, one or two new entities.
    pub fn tick(
        &mut self,
        tuning: &Tuning,
        viewport: Viewport,
        ids: &mut EntityIds,
    ) -> Vec<FallingEntity> {
        let mut spawned = Vec::new();
        if self.rng.random_bool(tuning.heart_spawn_chance) {
            spawned.push(self.heart(tuning, viewport, ids.next_id()));
        }
        if self.rng.random_bool(tuning.bomb_spawn_chance) {
            spawned.push(self.bomb(tuning, viewport, ids.next_id()));
        }
        spawned
    }

    /// A heart of random size, speed and hue just above the top edge
    pub fn heart(&mut self, tuning: &Tuning, viewport: Viewport, id: u32) -> FallingEntity {
        let size = self
            .rng
            .random_range(tuning.heart_min_size..tuning.heart_max_size);
        let x = self.spawn_x(viewport, size);
        let speed = self
            .rng
            .random_range(tuning.heart_min_speed..tuning.heart_max_speed);
        let hue = HEART_MIN_HUE + self.rng.random::<f32>() * HEART_HUE_SPREAD;

        FallingEntity {
            id,
            kind: FallingKind::Heart { hue },
            pos: Vec2::new(x, -size),
            size,
            speed,
        }
    }

    /// A bomb with fixed size and speed just above the top edge
    pub fn bomb(&mut self, tuning: &Tuning, viewport: Viewport, id: u32) -> FallingEntity {
        let size = tuning.bomb_size;
        let x = self.spawn_x(viewport, size);
        FallingEntity {
            id,
            kind: FallingKind::Bomb,
            pos: Vec2::new(x, -size),
            size,
            speed: tuning.bomb_speed,
        }
    }

    /// Burst of sparks radiating from a catch point
    pub fn particle_burst(&mut self, at: Vec2, tuning: &Tuning) -> Vec<Particle> {
        (0..tuning.particle_burst)
            .map(|_| Particle {
                pos: at,
                vel: Vec2::new(
                    self.rng
                        .random_range(-PARTICLE_MAX_SPEED..PARTICLE_MAX_SPEED),
                    self.rng
                        .random_range(-PARTICLE_MAX_SPEED..PARTICLE_MAX_SPEED),
                ),
                size: self.rng.random_range(PARTICLE_MIN_SIZE..PARTICLE_MAX_SIZE),
                life: tuning.particle_life,
                max_life: tuning.particle_life,
            })
            .collect()
    }

    /// Uniform x so the entity starts fully inside the viewport
    fn spawn_x(&mut self, viewport: Viewport, size: f32) -> f32 {
        self.rng.random::<f32>() * (viewport.width - size).max(0.0)
    }
}
