//! Heart Catch entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        AddEventListenerOptions, CanvasRenderingContext2d, Document, HtmlAudioElement,
        HtmlCanvasElement, HtmlElement, KeyboardEvent, MouseEvent, TouchEvent,
    };

    use heart_catch::Tuning;
    use heart_catch::renderer::CanvasRenderer;
    use heart_catch::sim::{
        Command, GameEvent, GameLoop, GamePhase, GameState, LoopControl, autopilot_target,
    };
    use heart_catch::ui::{Screen, TypedMessage, dodge_position, meter_width};

    /// Game instance holding all state
    struct Game {
        game: GameLoop,
        renderer: CanvasRenderer,
        canvas: HtmlCanvasElement,
        document: Document,
        /// Pending requestAnimationFrame handle while the loop runs
        animation_id: Option<i32>,
        /// Idle/demo mode - autopilot steers the basket
        idle_mode: bool,
        /// RNG for the decline button (kept apart from the simulation's)
        ui_rng: Pcg32,
        beat_interval: Option<i32>,
    }

    impl Game {
        fn tuning(&self) -> &Tuning {
            &self.game.state().tuning
        }

        /// Match the canvas to the window and tell the simulation
        fn sync_viewport(&mut self) {
            let Some(window) = web_sys::window() else { return };
            let width = window
                .inner_width()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(800.0);
            let height = window
                .inner_height()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(600.0);
            self.canvas.set_width(width as u32);
            self.canvas.set_height(height as u32);
            self.game.resize(width as f32, height as f32);
        }

        /// Cancel the scheduled frame, if any
        fn stop_loop(&mut self) {
            if let Some(id) = self.animation_id.take() {
                if let Some(window) = web_sys::window() {
                    let _ = window.cancel_animation_frame(id);
                }
            }
        }

        /// React to everything the simulation queued
        fn apply_events(&mut self) {
            for event in self.game.drain_events() {
                match event {
                    GameEvent::PhaseChanged { from, to } => {
                        if from == GamePhase::Playing {
                            self.stop_loop();
                        }
                        self.show_phase(to);
                    }
                    GameEvent::ScoreChanged { ratio, .. } => self.update_meter(ratio),
                    GameEvent::HeartCaught { at } => {
                        log::debug!("Heart caught at ({:.0}, {:.0})", at.x, at.y);
                    }
                }
            }
        }

        fn update_meter(&self, ratio: f32) {
            if let Some(el) = self.html_element("love-fill") {
                let _ = el.style().set_property("width", &meter_width(ratio));
            }
        }

        /// Show the overlay for a phase and hide the rest
        fn show_phase(&mut self, phase: GamePhase) {
            let target = Screen::for_phase(phase);
            for screen in Screen::ALL {
                if Some(screen) != target {
                    set_overlay(&self.document, screen, false);
                }
            }

            match target {
                Some(Screen::Ready) => {
                    // Give the last catch a moment before covering the canvas
                    let delay = self.tuning().ready_delay_ms;
                    let document = self.document.clone();
                    set_timeout(
                        move || set_overlay(&document, Screen::Ready, true),
                        delay,
                    );
                }
                Some(Screen::Celebration) => {
                    set_overlay(&self.document, Screen::Celebration, true);
                    self.celebrate();
                }
                Some(screen) => set_overlay(&self.document, screen, true),
                None => {}
            }
        }

        /// Music, heartbeat title and the typed message
        fn celebrate(&mut self) {
            let tuning = self.tuning().clone();

            if let (Some(window), Some(id)) = (web_sys::window(), self.beat_interval.take()) {
                window.clear_interval_with_handle(id);
            }

            match self
                .document
                .get_element_by_id("celebration-music")
                .and_then(|el| el.dyn_into::<HtmlAudioElement>().ok())
            {
                Some(music) => {
                    music.set_volume(tuning.music_volume);
                    match music.play() {
                        // Autoplay blocks and missing files reject the promise
                        Ok(promise) => {
                            let on_reject = Closure::<dyn FnMut(JsValue)>::new(|e: JsValue| {
                                log::warn!("Celebration music did not play: {:?}", e);
                            });
                            let _ = promise.catch(&on_reject);
                            on_reject.forget();
                        }
                        Err(e) => log::warn!("Could not start celebration music: {:?}", e),
                    }
                }
                None => log::warn!("No #celebration-music element"),
            }

            if let Some(title) = self
                .document
                .query_selector(&format!("#{} h1", Screen::Celebration.element_id()))
                .ok()
                .flatten()
            {
                self.beat_interval = set_interval(
                    move || {
                        let classes = title.class_list();
                        let _ = classes.remove_1("beat");
                        // Force a reflow so the animation restarts
                        if let Some(el) = title.dyn_ref::<HtmlElement>() {
                            let _ = el.offset_width();
                        }
                        let _ = classes.add_1("beat");
                    },
                    tuning.beat_interval_ms,
                );
            }

            if let Some(el) = self.document.get_element_by_id("typed-message") {
                el.set_text_content(Some(""));
                let message = RefCell::new(TypedMessage::new(&tuning.message));
                let handle = Rc::new(Cell::new(None::<i32>));
                let handle_inner = handle.clone();
                let id = set_interval(
                    move || {
                        let mut message = message.borrow_mut();
                        if message.tick().is_some() {
                            el.set_text_content(Some(&message.visible()));
                        }
                        if message.is_done() {
                            if let (Some(window), Some(id)) = (web_sys::window(), handle_inner.get())
                            {
                                window.clear_interval_with_handle(id);
                            }
                        }
                    },
                    tuning.type_interval_ms,
                );
                handle.set(id);
            }
        }

        fn html_element(&self, id: &str) -> Option<HtmlElement> {
            self.document
                .get_element_by_id(id)
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        }
    }

    fn set_overlay(document: &Document, screen: Screen, visible: bool) {
        let Some(el) = document.get_element_by_id(screen.element_id()) else {
            log::warn!("Missing #{}", screen.element_id());
            return;
        };
        let classes = el.class_list();
        if visible {
            let _ = classes.remove_1("hidden");
            let _ = classes.add_1("active");
        } else {
            let _ = classes.remove_1("active");
            let _ = classes.add_1("hidden");
        }
    }

    fn set_timeout(f: impl FnOnce() + 'static, ms: u32) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(f);
        if let Err(e) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            ms as i32,
        ) {
            log::warn!("setTimeout failed: {:?}", e);
        }
        closure.forget();
    }

    fn set_interval(f: impl FnMut() + 'static, ms: u32) -> Option<i32> {
        let window = web_sys::window()?;
        let closure = Closure::<dyn FnMut()>::new(f);
        let id = window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                ms as i32,
            )
            .map_err(|e| log::warn!("setInterval failed: {:?}", e))
            .ok();
        closure.forget();
        id
    }

    /// Load tuning overrides from `<script id="tuning" type="application/json">`
    fn load_tuning(document: &Document) -> Tuning {
        let Some(json) = document
            .get_element_by_id("tuning")
            .and_then(|el| el.text_content())
        else {
            return Tuning::default();
        };

        match Tuning::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning overrides");
                tuning
            }
            Err(e) => {
                log::warn!("Invalid tuning JSON ({}), using defaults", e);
                Tuning::default()
            }
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger init failed: {}", e).into());
        }

        log::info!("Heart Catch starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or("no #gameCanvas")?
            .dyn_into()?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let seed = js_sys::Date::now() as u64;
        let tuning = load_tuning(&document);
        let state = GameState::new(seed, tuning, heart_catch::Viewport::default());

        let game = Rc::new(RefCell::new(Game {
            game: GameLoop::new(state),
            renderer: CanvasRenderer::new(ctx),
            canvas: canvas.clone(),
            document: document.clone(),
            animation_id: None,
            idle_mode: false,
            ui_rng: Pcg32::seed_from_u64(seed ^ 0x9e37_79b9_7f4a_7c15),
            beat_interval: None,
        }));
        game.borrow_mut().sync_viewport();

        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(game.clone())?;
        setup_buttons(game.clone());

        Ok(())
    }

    /// Send a command and, if it (re)started play, kick off the frame loop
    fn dispatch(game: &Rc<RefCell<Game>>, command: Command) {
        let started = {
            let mut g = game.borrow_mut();
            g.sync_viewport();
            let Some(transition) = g.game.command(command) else {
                return;
            };
            g.apply_events();
            transition.to == GamePhase::Playing
        };
        if started {
            game.borrow_mut().stop_loop();
            request_animation_frame(game.clone());
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let game_inner = game.clone();
        let closure = Closure::once(move |_time: f64| {
            game_loop(game_inner);
        });
        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(id) => game.borrow_mut().animation_id = Some(id),
            Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
        }
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        let control = {
            let mut g = game.borrow_mut();
            g.animation_id = None;

            if g.idle_mode {
                if let Some(x) = autopilot_target(g.game.state()) {
                    g.game.pointer_moved(x);
                }
            }

            let Game {
                game: sim,
                renderer,
                ..
            } = &mut *g;
            let control = sim.frame(renderer);
            g.apply_events();
            control
        };

        if control == LoopControl::Continue {
            request_animation_frame(game);
        }
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        // Resize - dimensions are re-read by the next frame
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().sync_viewport();
            });
            window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Mouse move
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut().game.pointer_moved(event.client_x() as f32);
            });
            window
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Touch move - not passive so the page doesn't scroll while playing
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                let mut g = game.borrow_mut();
                if g.game.phase() != GamePhase::Playing {
                    return;
                }
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    g.game.pointer_moved(touch.client_x() as f32);
                }
            });
            let options = AddEventListenerOptions::new();
            options.set_passive(false);
            window.add_event_listener_with_callback_and_add_event_listener_options(
                "touchmove",
                closure.as_ref().unchecked_ref(),
                &options,
            )?;
            closure.forget();
        }

        // Keyboard
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if matches!(event.key().as_str(), "i" | "I") {
                    let mut g = game.borrow_mut();
                    g.idle_mode = !g.idle_mode;
                    log::info!("Idle mode: {}", g.idle_mode);
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let document = game.borrow().document.clone();

        for (id, command) in [
            ("start-btn", Command::Start),
            ("ready-btn", Command::Acknowledge),
            ("yes-btn", Command::Accept),
            ("no-btn", Command::Decline),
            ("retry-btn", Command::Retry),
        ] {
            let Some(btn) = document.get_element_by_id(id) else {
                log::warn!("Missing #{}", id);
                continue;
            };
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                dispatch(&game, command);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // The no button runs away before it can be pressed
        if let Some(btn) = document
            .get_element_by_id("no-btn")
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        {
            for event_name in ["mouseover", "touchstart"] {
                let game = game.clone();
                let btn_inner = btn.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                    let mut g = game.borrow_mut();
                    let viewport = g.game.state().viewport;
                    let pos = dodge_position(&mut g.ui_rng, viewport);
                    let style = btn_inner.style();
                    let _ = style.set_property("position", "fixed");
                    let _ = style.set_property("left", &format!("{}px", pos.x));
                    let _ = style.set_property("top", &format!("{}px", pos.y));
                });
                let _ = btn
                    .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Frames per simulated second in the headless demo
#[cfg(not(target_arch = "wasm32"))]
const DEMO_FPS: u64 = 60;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use heart_catch::renderer::DrawList;
    use heart_catch::sim::{
        Command, GameEvent, GameLoop, GamePhase, GameState, LoopControl, autopilot_target,
    };
    use heart_catch::ui::TypedMessage;
    use heart_catch::{Tuning, Viewport};

    env_logger::init();
    log::info!("Heart Catch (native) starting...");
    log::info!("Native mode runs a headless autopilot demo - use `trunk serve` for the web version");

    let tuning = match std::env::var("HEART_CATCH_TUNING") {
        Ok(json) => Tuning::from_json(&json).unwrap_or_else(|e| {
            log::warn!("Invalid HEART_CATCH_TUNING ({}), using defaults", e);
            Tuning::default()
        }),
        Err(_) => Tuning::default(),
    };
    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(2024);

    let mut game = GameLoop::new(GameState::new(seed, tuning, Viewport::new(800.0, 600.0)));
    let mut draw = DrawList::new();
    let max_frames = DEMO_FPS * 60 * 5;

    let mut attempts = 0;
    while game.phase() != GamePhase::Ready && attempts < 10 {
        attempts += 1;
        let command = if game.phase() == GamePhase::Fail {
            Command::Retry
        } else {
            Command::Start
        };
        game.command(command);

        let mut frames = 0;
        loop {
            if let Some(x) = autopilot_target(game.state()) {
                game.pointer_moved(x);
            }
            frames += 1;
            if game.frame(&mut draw) == LoopControl::Stop || frames >= max_frames {
                break;
            }
        }

        for event in game.drain_events() {
            if let GameEvent::PhaseChanged { from, to } = event {
                println!("{:?} -> {:?}", from, to);
            }
        }
        println!(
            "Attempt {}: {} hearts in {} frames ({:.1}s), {} draw commands in the last frame",
            attempts,
            game.state().score.value(),
            frames,
            frames as f64 / DEMO_FPS as f64,
            draw.len()
        );
    }

    if game.phase() != GamePhase::Ready {
        println!("The autopilot gave up after {} attempts", attempts);
        return;
    }

    game.command(Command::Acknowledge);
    // Declining never works
    game.command(Command::Decline);
    game.command(Command::Accept);
    println!("Phase: {:?}", game.phase());

    let mut message = TypedMessage::new(&game.state().tuning.message);
    while let Some(c) = message.tick() {
        print!("{}", c);
    }
    println!();
}
