//! Heart Catch - catch falling hearts, dodge bombs, unlock the proposal
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (entities, spawning, collisions, phases)
//! - `renderer`: Renderer interface, draw command lists, canvas backend
//! - `tuning`: Data-driven game balance
//! - `ui`: Pure helpers for the screen layer (screens, typed message, decline button)

pub mod renderer;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use tuning::Tuning;

use serde::{Deserialize, Serialize};

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Hearts needed to unlock the proposal
    pub const WIN_SCORE: u32 = 15;

    /// Per-frame spawn probabilities
    pub const HEART_SPAWN_CHANCE: f64 = 0.02;
    pub const BOMB_SPAWN_CHANCE: f64 = 0.008;

    /// Heart size range (pixels, uniform)
    pub const HEART_MIN_SIZE: f32 = 20.0;
    pub const HEART_MAX_SIZE: f32 = 40.0;
    /// Heart fall speed range (pixels per frame, uniform)
    pub const HEART_MIN_SPEED: f32 = 2.0;
    pub const HEART_MAX_SPEED: f32 = 5.0;
    /// Heart hue range (degrees, pinks and reds)
    pub const HEART_MIN_HUE: f32 = 340.0;
    pub const HEART_HUE_SPREAD: f32 = 20.0;

    pub const BOMB_SIZE: f32 = 30.0;
    pub const BOMB_SPEED: f32 = 4.0;

    /// Player basket dimensions
    pub const PLAYER_WIDTH: f32 = 100.0;
    pub const PLAYER_HEIGHT: f32 = 80.0;
    /// Distance from the viewport bottom to the player's top edge
    pub const PLAYER_BOTTOM_OFFSET: f32 = 100.0;

    /// Particle burst emitted on each catch
    pub const PARTICLE_BURST: usize = 6;
    /// Upper bound for tuned bursts
    pub const MAX_PARTICLE_BURST: usize = 64;
    pub const PARTICLE_LIFE: f32 = 100.0;
    pub const PARTICLE_DECAY: f32 = 2.0;
    pub const PARTICLE_MAX_SPEED: f32 = 2.0;
    pub const PARTICLE_MIN_SIZE: f32 = 2.0;
    pub const PARTICLE_MAX_SIZE: f32 = 7.0;

    /// Presentation timings (milliseconds)
    pub const READY_SCREEN_DELAY_MS: u32 = 500;
    pub const TYPE_INTERVAL_MS: u32 = 40;
    pub const BEAT_INTERVAL_MS: u32 = 1000;
    pub const CELEBRATION_VOLUME: f64 = 0.6;

    /// Decline button footprint, used to keep it on screen while it dodges
    pub const DECLINE_BUTTON_WIDTH: f32 = 100.0;
    pub const DECLINE_BUTTON_HEIGHT: f32 = 50.0;
}

/// Current size of the draw surface, re-read every frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}
