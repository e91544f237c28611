//! Per-frame simulation step
//!
//! Advances the game by exactly one display frame. Speeds are in pixels
//! per frame, so the pace follows the host's frame rate.

use super::collision::overlaps;
use super::entity::FallingEntity;
use super::machine::{GamePhase, Trigger};
use super::state::{GameEvent, GameState};

/// How a frame ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not in PLAYING; nothing was simulated
    Inactive,
    /// Still playing
    Running,
    /// Win threshold reached this frame (now READY)
    Won,
    /// Bomb caught this frame (now FAIL)
    Failed,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState) -> TickOutcome {
    if state.phase() != GamePhase::Playing {
        return TickOutcome::Inactive;
    }

    let viewport = state.viewport;
    let Some(player) = state.player.as_mut() else {
        // PLAYING always has a player; treat a missing one as a paused frame
        log::warn!("Tick in PLAYING without a player");
        return TickOutcome::Inactive;
    };
    player.update(viewport);
    let player_box = player.aabb();

    state.frame += 1;

    let spawned = state.spawner.tick(&state.tuning, viewport, &mut state.ids);
    for entity in spawned {
        if entity.is_heart() {
            state.hearts.push(entity);
        } else {
            state.bombs.push(entity);
        }
    }

    // Hearts: index only advances past kept entities, so removal never skips
    let mut i = 0;
    while i < state.hearts.len() {
        let heart = &mut state.hearts[i];
        heart.advance();

        if overlaps(heart.aabb(), player_box) {
            let heart = state.hearts.remove(i);
            if catch_heart(state, &heart) {
                return TickOutcome::Won;
            }
        } else if heart.is_below(viewport) {
            state.hearts.remove(i);
        } else {
            i += 1;
        }
    }

    let mut i = 0;
    while i < state.bombs.len() {
        let bomb = &mut state.bombs[i];
        bomb.advance();

        if overlaps(bomb.aabb(), player_box) {
            state.transition(Trigger::BombHit);
            return TickOutcome::Failed;
        } else if bomb.is_below(viewport) {
            state.bombs.remove(i);
        } else {
            i += 1;
        }
    }

    let decay = state.tuning.particle_decay;
    for particle in state.particles.iter_mut() {
        particle.advance(decay);
    }
    state.particles.retain(|p| p.is_alive());

    TickOutcome::Running
}

/// Score a caught heart; returns true when it won the round
fn catch_heart(state: &mut GameState, heart: &FallingEntity) -> bool {
    state.score.increment();
    let burst = state.spawner.particle_burst(heart.pos, &state.tuning);
    state.particles.extend(burst);
    state.push_event(GameEvent::HeartCaught { at: heart.pos });
    state.push_score_event();

    if state.score.has_won() {
        state.transition(Trigger::Win);
        return true;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Viewport;
    use crate::sim::entity::FallingKind;
    use crate::sim::machine::Command;
    use crate::tuning::Tuning;
    use glam::Vec2;
    use proptest::prelude::*;

    /// A started game at 800x600 with spawning turned off
    fn quiet_game() -> GameState {
        let tuning = Tuning {
            heart_spawn_chance: 0.0,
            bomb_spawn_chance: 0.0,
            ..Default::default()
        };
        let mut state = GameState::new(12345, tuning, Viewport::new(800.0, 600.0));
        state.command(Command::Start);
        state.drain_events();
        state
    }

    fn heart_at(id: u32, x: f32, y: f32, size: f32) -> FallingEntity {
        FallingEntity {
            id,
            kind: FallingKind::Heart { hue: 350.0 },
            pos: Vec2::new(x, y),
            size,
            speed: 2.0,
        }
    }

    fn bomb_at(id: u32, x: f32, y: f32) -> FallingEntity {
        FallingEntity {
            id,
            kind: FallingKind::Bomb,
            pos: Vec2::new(x, y),
            size: 30.0,
            speed: 4.0,
        }
    }

    #[test]
    fn test_inactive_outside_playing() {
        let mut state = GameState::new(1, Tuning::default(), Viewport::default());
        assert_eq!(tick(&mut state), TickOutcome::Inactive);
        assert_eq!(state.frame, 0);
    }

    #[test]
    fn test_catch_heart_scores_one() {
        let mut state = quiet_game();
        assert_eq!(state.player.as_ref().unwrap().pos.x, 350.0);
        state.hearts.push(heart_at(1, 380.0, 520.0, 30.0));

        assert_eq!(tick(&mut state), TickOutcome::Running);
        assert_eq!(state.score.value(), 1);
        assert!(state.hearts.is_empty());
        assert_eq!(state.particles.len(), 6);

        let events = state.drain_events();
        assert!(events.contains(&GameEvent::HeartCaught {
            at: Vec2::new(380.0, 522.0)
        }));
        assert!(events.contains(&GameEvent::ScoreChanged {
            score: 1,
            ratio: 1.0 / 15.0
        }));
    }

    #[test]
    fn test_fifteenth_heart_wins() {
        let mut state = quiet_game();
        for _ in 0..14 {
            state.score.increment();
        }
        state.hearts.push(heart_at(1, 380.0, 520.0, 30.0));
        // A bomb also overlapping this frame must not be reached
        state.bombs.push(bomb_at(2, 380.0, 520.0));

        assert_eq!(tick(&mut state), TickOutcome::Won);
        assert_eq!(state.score.value(), 15);
        assert_eq!(state.phase(), GamePhase::Ready);

        let phase_changes: Vec<_> = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::PhaseChanged { .. }))
            .collect();
        assert_eq!(
            phase_changes,
            vec![GameEvent::PhaseChanged {
                from: GamePhase::Playing,
                to: GamePhase::Ready
            }]
        );

        // The loop is over until someone retries
        assert_eq!(tick(&mut state), TickOutcome::Inactive);
        assert_eq!(state.phase(), GamePhase::Ready);
    }

    #[test]
    fn test_bomb_fails_at_any_score() {
        for score in [0, 7, 14] {
            let mut state = quiet_game();
            for _ in 0..score {
                state.score.increment();
            }
            state.bombs.push(bomb_at(1, 370.0, 510.0));

            assert_eq!(tick(&mut state), TickOutcome::Failed);
            assert_eq!(state.phase(), GamePhase::Fail);
            assert_eq!(state.score.value(), score);
        }
    }

    #[test]
    fn test_bomb_stops_the_frame() {
        let mut state = quiet_game();
        state.bombs.push(bomb_at(1, 370.0, 510.0));
        state.bombs.push(bomb_at(2, 10.0, 10.0));

        assert_eq!(tick(&mut state), TickOutcome::Failed);
        // The second bomb was never advanced
        assert_eq!(state.bombs[1].pos.y, 10.0);
    }

    #[test]
    fn test_retry_resets_everything() {
        let mut state = quiet_game();
        state.score.increment();
        state.hearts.push(heart_at(1, 10.0, 10.0, 30.0));
        state.pointer_moved(700.0);
        state.bombs.push(bomb_at(2, 670.0, 510.0));
        assert_eq!(tick(&mut state), TickOutcome::Failed);

        state.command(Command::Retry).unwrap();
        assert_eq!(state.phase(), GamePhase::Playing);
        assert_eq!(state.score.value(), 0);
        assert!(state.hearts.is_empty() && state.bombs.is_empty());
        assert_eq!(state.player.as_ref().unwrap().pos.x, 350.0);
    }

    #[test]
    fn test_missed_entities_are_dropped_without_penalty() {
        let mut state = quiet_game();
        state.hearts.push(heart_at(1, 10.0, 599.0, 30.0));
        state.bombs.push(bomb_at(2, 10.0, 597.0));

        assert_eq!(tick(&mut state), TickOutcome::Running);
        assert!(state.hearts.is_empty());
        assert!(state.bombs.is_empty());
        assert_eq!(state.score.value(), 0);
    }

    #[test]
    fn test_adjacent_removals_do_not_skip() {
        let mut state = quiet_game();
        // Two catchable hearts in a row followed by an off-screen one and a
        // falling one; every heart must be advanced exactly once.
        state.hearts.push(heart_at(1, 360.0, 520.0, 30.0));
        state.hearts.push(heart_at(2, 400.0, 520.0, 30.0));
        state.hearts.push(heart_at(3, 10.0, 600.0, 30.0));
        state.hearts.push(heart_at(4, 10.0, 100.0, 30.0));

        tick(&mut state);
        assert_eq!(state.score.value(), 2);
        assert_eq!(state.hearts.len(), 1);
        assert_eq!(state.hearts[0].id, 4);
        assert_eq!(state.hearts[0].pos.y, 102.0);
    }

    #[test]
    fn test_particles_expire() {
        let mut state = quiet_game();
        state.hearts.push(heart_at(1, 380.0, 520.0, 30.0));
        tick(&mut state);
        assert_eq!(state.particles.len(), 6);

        // 100 life, 2 decay per frame, starting with the catch frame
        for _ in 0..48 {
            tick(&mut state);
        }
        assert_eq!(state.particles.len(), 6);
        tick(&mut state);
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_spawns_land_in_the_right_list() {
        let tuning = Tuning {
            heart_spawn_chance: 1.0,
            bomb_spawn_chance: 1.0,
            ..Default::default()
        };
        let mut state = GameState::new(3, tuning, Viewport::new(800.0, 600.0));
        state.command(Command::Start);
        tick(&mut state);
        assert_eq!(state.hearts.len(), 1);
        assert_eq!(state.bombs.len(), 1);
        assert!(state.hearts[0].is_heart());
        assert!(!state.bombs[0].is_heart());
        // Spawned and advanced in the same frame
        assert_eq!(state.bombs[0].pos.y, -26.0);
    }

    #[test]
    fn test_overflowing_tuning_still_spawns() {
        let tuning =
            Tuning::from_json(r#"{ "heart_max_size": 1e39, "heart_spawn_chance": 1.0 }"#).unwrap();
        let mut state = GameState::new(8, tuning, Viewport::new(800.0, 600.0));
        state.command(Command::Start);
        assert_eq!(tick(&mut state), TickOutcome::Running);
        assert_eq!(state.hearts.len(), 1);
        assert!(state.hearts[0].size.is_finite());
    }

    #[test]
    fn test_resize_mid_game_uses_new_bounds() {
        let mut state = quiet_game();
        state.pointer_moved(780.0);
        state.resize(400.0, 300.0);
        tick(&mut state);
        let player = state.player.as_ref().unwrap();
        assert_eq!(player.pos.x, 300.0);
        assert_eq!(player.pos.y, 200.0);
    }

    #[test]
    fn test_determinism() {
        let mut a = GameState::new(99999, Tuning::default(), Viewport::default());
        let mut b = GameState::new(99999, Tuning::default(), Viewport::default());
        a.command(Command::Start);
        b.command(Command::Start);

        for frame in 0..600 {
            let x = (frame as f32 * 3.7) % 800.0;
            a.pointer_moved(x);
            b.pointer_moved(x);
            assert_eq!(tick(&mut a), tick(&mut b));
        }
        assert_eq!(a.score, b.score);
        assert_eq!(a.hearts, b.hearts);
        assert_eq!(a.bombs, b.bombs);
        assert_eq!(a.phase(), b.phase());
    }

    proptest! {
        #[test]
        fn prop_player_stays_on_screen(
            seed in any::<u64>(),
            width in 100.0f32..2000.0,
            moves in proptest::collection::vec(-3000.0f32..3000.0, 1..60),
        ) {
            let mut state = GameState::new(seed, Tuning::default(), Viewport::new(width, 600.0));
            state.command(Command::Start);
            for x in moves {
                state.pointer_moved(x);
                tick(&mut state);
                let player = state.player.as_ref().unwrap();
                prop_assert!(player.pos.x >= 0.0);
                prop_assert!(player.pos.x <= width - player.width + 1e-3);
                if state.phase() != GamePhase::Playing {
                    break;
                }
            }
        }

        #[test]
        fn prop_score_never_decreases_while_playing(
            seed in any::<u64>(),
            moves in proptest::collection::vec(0.0f32..800.0, 1..300),
        ) {
            let mut state = GameState::new(seed, Tuning::default(), Viewport::new(800.0, 600.0));
            state.command(Command::Start);
            let mut last = 0;
            for x in moves {
                state.pointer_moved(x);
                let outcome = tick(&mut state);
                let score = state.score.value();
                prop_assert!(score >= last);
                last = score;
                if outcome != TickOutcome::Running {
                    break;
                }
            }
        }
    }
}
