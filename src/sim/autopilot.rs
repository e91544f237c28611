//! Idle/demo mode - the computer plays
//!
//! Chases the lowest heart still above the basket and sidesteps bombs that
//! are about to land on it. Produces a pointer x, exactly like a mouse would.

use super::entity::FallingEntity;
use super::machine::GamePhase;
use super::state::GameState;

/// How far above the basket a bomb has to be before it is ignored
const BOMB_DANGER_HEIGHT: f32 = 160.0;
/// Extra clearance when stepping around a bomb
const BOMB_MARGIN: f32 = 12.0;

/// Pointer x the autopilot wants this frame, if playing
pub fn autopilot_target(state: &GameState) -> Option<f32> {
    if state.phase() != GamePhase::Playing {
        return None;
    }
    let player = state.player.as_ref()?;
    let half = player.width / 2.0;

    // Lowest heart that can still be reached
    let mut target = state
        .hearts
        .iter()
        .filter(|h| h.pos.y < player.pos.y + player.height)
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
        .map(entity_center_x)
        .unwrap_or_else(|| player.center_x());

    // Dodge any bomb that would overlap the basket at the target position
    for bomb in &state.bombs {
        let above = player.pos.y - (bomb.pos.y + bomb.size);
        if above > BOMB_DANGER_HEIGHT || bomb.pos.y > player.pos.y + player.height {
            continue;
        }
        let left = target - half;
        let right = target + half;
        if bomb.pos.x + bomb.size > left && bomb.pos.x < right {
            let go_left = bomb.pos.x - half - BOMB_MARGIN;
            let go_right = bomb.pos.x + bomb.size + half + BOMB_MARGIN;
            target = if go_left >= half {
                go_left
            } else {
                go_right
            };
        }
    }

    Some(target.clamp(half, (state.viewport.width - half).max(half)))
}

fn entity_center_x(entity: &FallingEntity) -> f32 {
    entity.pos.x + entity.size / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Viewport;
    use crate::sim::entity::FallingKind;
    use crate::sim::machine::Command;
    use crate::sim::tick::{TickOutcome, tick};
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn started() -> GameState {
        let tuning = Tuning {
            heart_spawn_chance: 0.0,
            bomb_spawn_chance: 0.0,
            ..Default::default()
        };
        let mut state = GameState::new(8, tuning, Viewport::new(800.0, 600.0));
        state.command(Command::Start);
        state
    }

    #[test]
    fn test_idle_before_start() {
        let state = GameState::new(8, Tuning::default(), Viewport::default());
        assert_eq!(autopilot_target(&state), None);
    }

    #[test]
    fn test_chases_lowest_heart() {
        let mut state = started();
        for (id, x, y) in [(1, 100.0, 50.0), (2, 600.0, 300.0)] {
            state.hearts.push(FallingEntity {
                id,
                kind: FallingKind::Heart { hue: 345.0 },
                pos: Vec2::new(x, y),
                size: 20.0,
                speed: 3.0,
            });
        }
        assert_eq!(autopilot_target(&state), Some(610.0));
    }

    #[test]
    fn test_sidesteps_bomb() {
        let mut state = started();
        state.bombs.push(FallingEntity {
            id: 1,
            kind: FallingKind::Bomb,
            pos: Vec2::new(390.0, 420.0),
            size: 30.0,
            speed: 4.0,
        });
        let target = autopilot_target(&state).unwrap();
        assert!(target + 50.0 <= 390.0 || target - 50.0 >= 420.0);
    }

    #[test]
    fn test_demo_game_wins_eventually() {
        let mut state = GameState::new(2024, Tuning::default(), Viewport::new(800.0, 600.0));
        state.command(Command::Start);
        let mut outcome = TickOutcome::Running;
        for _ in 0..60 * 60 * 10 {
            if let Some(x) = autopilot_target(&state) {
                state.pointer_moved(x);
            }
            outcome = tick(&mut state);
            if outcome != TickOutcome::Running {
                break;
            }
        }
        assert_ne!(outcome, TickOutcome::Running);
        assert!(state.phase() == GamePhase::Ready || state.phase() == GamePhase::Fail);
    }
}
