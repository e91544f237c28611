//! Score counter with a win threshold

use serde::{Deserialize, Serialize};

/// Hearts caught this round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreTracker {
    score: u32,
    win_score: u32,
}

impl ScoreTracker {
    pub fn new(win_score: u32) -> Self {
        Self {
            score: 0,
            win_score: win_score.max(1),
        }
    }

    /// Add one point and return the new score
    pub fn increment(&mut self) -> u32 {
        self.score = self.score.saturating_add(1);
        self.score
    }

    pub fn reset(&mut self) {
        self.score = 0;
    }

    pub fn value(&self) -> u32 {
        self.score
    }

    pub fn win_score(&self) -> u32 {
        self.win_score
    }

    pub fn has_won(&self) -> bool {
        self.score >= self.win_score
    }

    /// Progress toward the win threshold, clamped to [0, 1]
    pub fn ratio(&self) -> f32 {
        (self.score as f32 / self.win_score as f32).clamp(0.0, 1.0)
    }
}
