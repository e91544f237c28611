//! Simulation context
//!
//! One `GameState` owns everything a round needs: phase machine, score,
//! player, live entities and the RNG. Nothing is global, so any number of
//! independent games can run side by side.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{FallingEntity, Particle, Player};
use super::machine::{Command, GamePhase, GameStateMachine, Transition, Trigger};
use super::score::ScoreTracker;
use super::spawner::{EntityIds, Spawner};
use crate::Viewport;
use crate::tuning::Tuning;

/// Notifications for the presentation layer, drained once per frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PhaseChanged { from: GamePhase, to: GamePhase },
    /// Score changed (including the reset at round start)
    ScoreChanged { score: u32, ratio: f32 },
    /// A heart was caught at the given position
    HeartCaught { at: Vec2 },
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    /// Current draw surface size
    pub viewport: Viewport,
    pub score: ScoreTracker,
    /// Present from the first start onward
    pub player: Option<Player>,
    /// Live hearts in spawn order
    pub hearts: Vec<FallingEntity>,
    /// Live bombs in spawn order
    pub bombs: Vec<FallingEntity>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    /// Frames simulated in the current round
    pub frame: u64,
    machine: GameStateMachine,
    pub(crate) spawner: Spawner,
    pub(crate) ids: EntityIds,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game sitting on the start screen
    pub fn new(seed: u64, tuning: Tuning, viewport: Viewport) -> Self {
        let tuning = tuning.sanitized();
        Self {
            score: ScoreTracker::new(tuning.win_score),
            tuning,
            viewport,
            player: None,
            hearts: Vec::new(),
            bombs: Vec::new(),
            particles: Vec::new(),
            frame: 0,
            machine: GameStateMachine::new(),
            spawner: Spawner::new(seed),
            ids: EntityIds::default(),
            events: Vec::new(),
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.machine.phase()
    }

    pub fn seed(&self) -> u64 {
        self.spawner.seed()
    }

    /// Apply a UI command
    ///
    /// Commands that make no sense in the current phase are no-ops. Entering
    /// PLAYING (start or retry) resets the round.
    pub fn command(&mut self, command: Command) -> Option<Transition> {
        let transition = self.transition(command.into())?;
        if transition.to == GamePhase::Playing {
            self.reset_round();
            log::info!("Round started (seed {})", self.seed());
        }
        Some(transition)
    }

    /// Fresh round: score 0, no entities, player centered
    pub fn reset_round(&mut self) {
        self.player = Some(Player::new(self.viewport, &self.tuning));
        self.hearts.clear();
        self.bombs.clear();
        self.particles.clear();
        self.frame = 0;
        self.score.reset();
        self.push_score_event();
    }

    /// Pointer moved to `x`; ignored outside PLAYING
    pub fn pointer_moved(&mut self, x: f32) {
        if self.phase() != GamePhase::Playing {
            return;
        }
        if let Some(player) = self.player.as_mut() {
            player.follow_pointer(x);
        }
    }

    /// Draw surface changed size
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Viewport::new(width, height);
        if let Some(player) = self.player.as_mut() {
            player.on_resize(self.viewport);
        }
    }

    /// Take all events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn transition(&mut self, trigger: Trigger) -> Option<Transition> {
        let transition = self.machine.apply(trigger)?;
        log::info!("Phase {:?} -> {:?}", transition.from, transition.to);
        self.events.push(GameEvent::PhaseChanged {
            from: transition.from,
            to: transition.to,
        });
        Some(transition)
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub(crate) fn push_score_event(&mut self) {
        self.events.push(GameEvent::ScoreChanged {
            score: self.score.value(),
            ratio: self.score.ratio(),
        });
    }
}
