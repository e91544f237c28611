//! Data-driven game balance
//!
//! Every gameplay and presentation constant lives here so a page can
//! override them with a JSON blob. Missing fields fall back to [`consts`].

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Default message typed out on the celebration screen
pub const DEFAULT_MESSAGE: &str = "Hey you ❤️\n\
Thank you for being part of my life 🫶\n\
Everything is better when you are around.\n\
Lucky to have you 💕";

/// Tunable constants for one game instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub win_score: u32,

    // === Spawning ===
    pub heart_spawn_chance: f64,
    pub bomb_spawn_chance: f64,
    pub heart_min_size: f32,
    pub heart_max_size: f32,
    pub heart_min_speed: f32,
    pub heart_max_speed: f32,
    pub bomb_size: f32,
    pub bomb_speed: f32,

    // === Player ===
    pub player_width: f32,
    pub player_height: f32,
    pub player_bottom_offset: f32,

    // === Particles ===
    pub particle_burst: usize,
    pub particle_life: f32,
    pub particle_decay: f32,

    // === Presentation ===
    pub ready_delay_ms: u32,
    pub type_interval_ms: u32,
    pub beat_interval_ms: u32,
    pub music_volume: f64,
    pub message: String,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            win_score: WIN_SCORE,

            heart_spawn_chance: HEART_SPAWN_CHANCE,
            bomb_spawn_chance: BOMB_SPAWN_CHANCE,
            heart_min_size: HEART_MIN_SIZE,
            heart_max_size: HEART_MAX_SIZE,
            heart_min_speed: HEART_MIN_SPEED,
            heart_max_speed: HEART_MAX_SPEED,
            bomb_size: BOMB_SIZE,
            bomb_speed: BOMB_SPEED,

            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            player_bottom_offset: PLAYER_BOTTOM_OFFSET,

            particle_burst: PARTICLE_BURST,
            particle_life: PARTICLE_LIFE,
            particle_decay: PARTICLE_DECAY,

            ready_delay_ms: READY_SCREEN_DELAY_MS,
            type_interval_ms: TYPE_INTERVAL_MS,
            beat_interval_ms: BEAT_INTERVAL_MS,
            music_volume: CELEBRATION_VOLUME,
            message: DEFAULT_MESSAGE.to_string(),
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Repair values the simulation cannot work with
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        if self.win_score == 0 {
            log::warn!("win_score must be positive, using {}", defaults.win_score);
            self.win_score = defaults.win_score;
        }

        self.heart_spawn_chance = clamp_chance("heart_spawn_chance", self.heart_spawn_chance);
        self.bomb_spawn_chance = clamp_chance("bomb_spawn_chance", self.bomb_spawn_chance);

        if !valid_range(self.heart_min_size, self.heart_max_size) {
            log::warn!(
                "heart size range {}..{} is invalid, using defaults",
                self.heart_min_size,
                self.heart_max_size
            );
            self.heart_min_size = defaults.heart_min_size;
            self.heart_max_size = defaults.heart_max_size;
        }
        if !valid_range(self.heart_min_speed, self.heart_max_speed) {
            log::warn!(
                "heart speed range {}..{} is invalid, using defaults",
                self.heart_min_speed,
                self.heart_max_speed
            );
            self.heart_min_speed = defaults.heart_min_speed;
            self.heart_max_speed = defaults.heart_max_speed;
        }
        self.bomb_size = positive("bomb_size", self.bomb_size, defaults.bomb_size);
        self.bomb_speed = positive("bomb_speed", self.bomb_speed, defaults.bomb_speed);
        self.player_width = positive("player_width", self.player_width, defaults.player_width);
        self.player_height = positive("player_height", self.player_height, defaults.player_height);
        if !(self.player_bottom_offset.is_finite() && self.player_bottom_offset >= 0.0) {
            log::warn!(
                "player_bottom_offset = {} is invalid, using {}",
                self.player_bottom_offset,
                defaults.player_bottom_offset
            );
            self.player_bottom_offset = defaults.player_bottom_offset;
        }

        if self.particle_burst > MAX_PARTICLE_BURST {
            log::warn!(
                "particle_burst = {} is too large, capping at {}",
                self.particle_burst,
                MAX_PARTICLE_BURST
            );
            self.particle_burst = MAX_PARTICLE_BURST;
        }
        if !(is_positive(self.particle_life) && is_positive(self.particle_decay)) {
            log::warn!(
                "particle life/decay {}/{} is invalid, using defaults",
                self.particle_life,
                self.particle_decay
            );
            self.particle_life = defaults.particle_life;
            self.particle_decay = defaults.particle_decay;
        }

        if !self.music_volume.is_finite() {
            self.music_volume = defaults.music_volume;
        }
        self.music_volume = self.music_volume.clamp(0.0, 1.0);
        if self.type_interval_ms == 0 {
            self.type_interval_ms = defaults.type_interval_ms;
        }
        if self.beat_interval_ms == 0 {
            self.beat_interval_ms = defaults.beat_interval_ms;
        }

        self
    }
}

fn is_positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

/// `min..max` is usable as a sampling range
fn valid_range(min: f32, max: f32) -> bool {
    is_positive(min) && max.is_finite() && min < max
}

fn positive(name: &str, value: f32, default: f32) -> f32 {
    if is_positive(value) {
        value
    } else {
        log::warn!("{} = {} must be positive and finite, using {}", name, value, default);
        default
    }
}

fn clamp_chance(name: &str, chance: f64) -> f64 {
    if chance.is_nan() {
        log::warn!("{} is NaN, disabling", name);
        return 0.0;
    }
    if !(0.0..=1.0).contains(&chance) {
        log::warn!("{} = {} is outside [0, 1], clamping", name, chance);
    }
    chance.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "win_score": 3, "bomb_speed": 6.5 }"#).unwrap();
        assert_eq!(tuning.win_score, 3);
        assert_eq!(tuning.bomb_speed, 6.5);
        assert_eq!(tuning.heart_spawn_chance, HEART_SPAWN_CHANCE);
        assert_eq!(tuning.message, DEFAULT_MESSAGE);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(Tuning::from_json("{ win_score: }").is_err());
        assert!(Tuning::from_json(r#"{ "win_score": "many" }"#).is_err());
    }

    #[test]
    fn test_sanitized_repairs_bad_values() {
        let tuning = Tuning {
            win_score: 0,
            heart_spawn_chance: 3.0,
            bomb_spawn_chance: -1.0,
            heart_min_size: 50.0,
            heart_max_size: 10.0,
            music_volume: 4.0,
            type_interval_ms: 0,
            ..Default::default()
        }
        .sanitized();

        assert_eq!(tuning.win_score, WIN_SCORE);
        assert_eq!(tuning.heart_spawn_chance, 1.0);
        assert_eq!(tuning.bomb_spawn_chance, 0.0);
        assert_eq!(tuning.heart_min_size, HEART_MIN_SIZE);
        assert_eq!(tuning.heart_max_size, HEART_MAX_SIZE);
        assert_eq!(tuning.music_volume, 1.0);
        assert_eq!(tuning.type_interval_ms, TYPE_INTERVAL_MS);
    }

    #[test]
    fn test_overflowing_json_values_fall_back_to_defaults() {
        let tuning = Tuning::from_json(
            r#"{ "heart_max_size": 1e39, "heart_max_speed": 1e39, "bomb_speed": 1e39,
                 "player_width": 1e39, "player_bottom_offset": -1e39,
                 "particle_life": 1e39, "particle_burst": 1000000 }"#,
        )
        .unwrap();
        assert!(tuning.heart_max_size.is_infinite());

        let tuning = tuning.sanitized();
        assert_eq!(tuning.heart_min_size, HEART_MIN_SIZE);
        assert_eq!(tuning.heart_max_size, HEART_MAX_SIZE);
        assert_eq!(tuning.heart_max_speed, HEART_MAX_SPEED);
        assert_eq!(tuning.bomb_speed, BOMB_SPEED);
        assert_eq!(tuning.player_width, PLAYER_WIDTH);
        assert_eq!(tuning.player_bottom_offset, PLAYER_BOTTOM_OFFSET);
        assert_eq!(tuning.particle_life, PARTICLE_LIFE);
        assert_eq!(tuning.particle_burst, MAX_PARTICLE_BURST);
    }

    #[test]
    fn test_default_is_already_sane() {
        assert_eq!(Tuning::default().sanitized(), Tuning::default());
    }
}
