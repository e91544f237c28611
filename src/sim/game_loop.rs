//! Frame driver
//!
//! Glues one simulation step to one rendered frame. The host calls
//! [`GameLoop::frame`] from its animation callback and only schedules the
//! next callback while it returns [`LoopControl::Continue`].

use super::machine::{Command, GamePhase, Transition};
use super::state::{GameEvent, GameState};
use super::tick::{TickOutcome, tick};
use crate::renderer::{Renderer, shapes};

/// Whether the host should schedule another frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Stop,
}

/// Owns the simulation context and runs it frame by frame
#[derive(Debug, Clone)]
pub struct GameLoop {
    state: GameState,
}

impl GameLoop {
    pub fn new(state: GameState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase()
    }

    /// Run one frame: clear, simulate, draw
    pub fn frame<R: Renderer>(&mut self, renderer: &mut R) -> LoopControl {
        renderer.clear(self.state.viewport);

        let outcome = tick(&mut self.state);
        if outcome == TickOutcome::Inactive {
            return LoopControl::Stop;
        }

        shapes::draw_scene(&self.state, renderer);

        match outcome {
            TickOutcome::Running => LoopControl::Continue,
            _ => LoopControl::Stop,
        }
    }

    /// Forward a UI command; returns the transition if one happened
    pub fn command(&mut self, command: Command) -> Option<Transition> {
        self.state.command(command)
    }

    pub fn pointer_moved(&mut self, x: f32) {
        self.state.pointer_moved(x);
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.state.resize(width, height);
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }
}
