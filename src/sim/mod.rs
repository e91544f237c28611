//! Frame-driven simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One step per display frame
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies beyond the `Renderer` trait

pub mod autopilot;
pub mod collision;
pub mod entity;
pub mod game_loop;
pub mod machine;
pub mod score;
pub mod spawner;
pub mod state;
pub mod tick;

pub use autopilot::autopilot_target;
pub use collision::overlaps;
pub use entity::{Aabb, FallingEntity, FallingKind, Particle, Player};
pub use game_loop::{GameLoop, LoopControl};
pub use machine::{Command, GamePhase, GameStateMachine, Transition, Trigger};
pub use score::ScoreTracker;
pub use spawner::{EntityIds, Spawner};
pub use state::{GameEvent, GameState};
pub use tick::{TickOutcome, tick};
