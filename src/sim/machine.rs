//! Game phase state machine
//!
//! START -> PLAYING -> READY -> PROPOSAL -> CELEBRATION, with FAIL as the
//! only detour (and RETRY the only way back into PLAYING).

use serde::{Deserialize, Serialize};

/// Current phase of the interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for the start button
    #[default]
    Start,
    /// Hearts and bombs are falling
    Playing,
    /// Enough hearts caught, waiting for the player to continue
    Ready,
    /// The question is on screen
    Proposal,
    /// Answer accepted
    Celebration,
    /// Caught a bomb
    Fail,
}

impl GamePhase {
    /// No gameplay transitions leave this phase
    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::Celebration)
    }
}

/// Commands the UI layer can send
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Start,
    /// Dismiss the ready screen
    Acknowledge,
    /// The yes button
    Accept,
    /// The no button. Never goes anywhere.
    Decline,
    Retry,
}

/// Everything that can move the machine, including simulation outcomes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trigger {
    Command(Command),
    /// Score reached the win threshold
    Win,
    /// Player touched a bomb
    BombHit,
}

impl From<Command> for Trigger {
    fn from(command: Command) -> Self {
        Trigger::Command(command)
    }
}

/// A phase change that actually happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub from: GamePhase,
    pub to: GamePhase,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStateMachine {
    phase: GamePhase,
}

impl GameStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Where a trigger leads from the current phase, if anywhere
    pub fn target(&self, trigger: Trigger) -> Option<GamePhase> {
        match (self.phase, trigger) {
            (GamePhase::Start, Trigger::Command(Command::Start)) => Some(GamePhase::Playing),
            (GamePhase::Playing, Trigger::Win) => Some(GamePhase::Ready),
            (GamePhase::Playing, Trigger::BombHit) => Some(GamePhase::Fail),
            (GamePhase::Ready, Trigger::Command(Command::Acknowledge)) => {
                Some(GamePhase::Proposal)
            }
            (GamePhase::Proposal, Trigger::Command(Command::Accept)) => {
                Some(GamePhase::Celebration)
            }
            (GamePhase::Fail, Trigger::Command(Command::Retry)) => Some(GamePhase::Playing),
            _ => None,
        }
    }

    /// Apply a trigger; out-of-phase triggers are ignored
    pub fn apply(&mut self, trigger: impl Into<Trigger>) -> Option<Transition> {
        let trigger = trigger.into();
        match self.target(trigger) {
            Some(to) => {
                let transition = Transition {
                    from: self.phase,
                    to,
                };
                self.phase = to;
                Some(transition)
            }
            None => {
                log::debug!("Ignoring {:?} in phase {:?}", trigger, self.phase);
                None
            }
        }
    }
}
