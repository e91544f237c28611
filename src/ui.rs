//! Pure helpers for the screen layer
//!
//! The DOM glue lives in the binary; everything here is plain data so it
//! can be tested without a browser.

use glam::Vec2;
use rand::Rng;

use crate::Viewport;
use crate::consts::{DECLINE_BUTTON_HEIGHT, DECLINE_BUTTON_WIDTH};
use crate::sim::GamePhase;

/// Full-screen overlays, one per non-playing phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Start,
    Ready,
    Proposal,
    Celebration,
    Fail,
}

impl Screen {
    pub const ALL: [Screen; 5] = [
        Screen::Start,
        Screen::Ready,
        Screen::Proposal,
        Screen::Celebration,
        Screen::Fail,
    ];

    /// Overlay shown for a phase (PLAYING shows only the canvas)
    pub fn for_phase(phase: GamePhase) -> Option<Screen> {
        match phase {
            GamePhase::Start => Some(Screen::Start),
            GamePhase::Playing => None,
            GamePhase::Ready => Some(Screen::Ready),
            GamePhase::Proposal => Some(Screen::Proposal),
            GamePhase::Celebration => Some(Screen::Celebration),
            GamePhase::Fail => Some(Screen::Fail),
        }
    }

    /// DOM element id of the overlay
    pub fn element_id(&self) -> &'static str {
        match self {
            Screen::Start => "start-screen",
            Screen::Ready => "ready-screen",
            Screen::Proposal => "proposal-screen",
            Screen::Celebration => "celebration-screen",
            Screen::Fail => "fail-screen",
        }
    }
}

/// CSS width of the love meter for a score ratio
pub fn meter_width(ratio: f32) -> String {
    format!("{}%", ratio.clamp(0.0, 1.0) * 100.0)
}

/// A message revealed one character per tick
#[derive(Debug, Clone)]
pub struct TypedMessage {
    chars: Vec<char>,
    shown: usize,
}

impl TypedMessage {
    pub fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            shown: 0,
        }
    }

    /// Reveal the next character; `None` once everything is visible
    pub fn tick(&mut self) -> Option<char> {
        let c = *self.chars.get(self.shown)?;
        self.shown += 1;
        Some(c)
    }

    pub fn is_done(&self) -> bool {
        self.shown >= self.chars.len()
    }

    /// Everything revealed so far
    pub fn visible(&self) -> String {
        self.chars[..self.shown].iter().collect()
    }
}

/// Somewhere new for the decline button to run off to
///
/// Keeps the whole button on screen; collapses to the origin on screens too
/// small to hold it.
pub fn dodge_position<R: Rng>(rng: &mut R, viewport: Viewport) -> Vec2 {
    let max_x = (viewport.width - DECLINE_BUTTON_WIDTH).max(0.0);
    let max_y = (viewport.height - DECLINE_BUTTON_HEIGHT).max(0.0);
    Vec2::new(rng.random::<f32>() * max_x, rng.random::<f32>() * max_y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_every_phase_but_playing_has_a_screen() {
        assert_eq!(Screen::for_phase(GamePhase::Playing), None);
        assert_eq!(Screen::for_phase(GamePhase::Fail), Some(Screen::Fail));
        for screen in Screen::ALL {
            assert!(screen.element_id().ends_with("-screen"));
        }
    }

    #[test]
    fn test_meter_width() {
        assert_eq!(meter_width(0.0), "0%");
        assert_eq!(meter_width(0.5), "50%");
        assert_eq!(meter_width(2.0), "100%");
    }

    #[test]
    fn test_typed_message_is_char_wise() {
        let mut msg = TypedMessage::new("hi ❤️");
        let mut typed = String::new();
        while let Some(c) = msg.tick() {
            typed.push(c);
            assert_eq!(msg.visible(), typed);
        }
        assert!(msg.is_done());
        assert_eq!(typed, "hi ❤️");
        assert_eq!(msg.tick(), None);
    }

    #[test]
    fn test_empty_message_is_done() {
        let mut msg = TypedMessage::new("");
        assert!(msg.is_done());
        assert_eq!(msg.tick(), None);
        assert_eq!(msg.visible(), "");
    }

    #[test]
    fn test_tiny_screen_pins_button_to_origin() {
        let mut rng = Pcg32::seed_from_u64(1);
        assert_eq!(dodge_position(&mut rng, Viewport::new(50.0, 20.0)), Vec2::ZERO);
    }

    proptest! {
        #[test]
        fn prop_button_stays_on_screen(seed in any::<u64>(), w in 100.0f32..4000.0, h in 50.0f32..4000.0) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let p = dodge_position(&mut rng, Viewport::new(w, h));
            prop_assert!(p.x >= 0.0 && p.x + DECLINE_BUTTON_WIDTH <= w + 1e-3);
            prop_assert!(p.y >= 0.0 && p.y + DECLINE_BUTTON_HEIGHT <= h + 1e-3);
        }
    }
}
