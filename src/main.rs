//! Snack Dash entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlElement, HtmlMediaElement};

    use snack_dash::consts::*;
    use snack_dash::sim::{
        FieldGeometry, GameEvent, GamePhase, GameState, InputDirection, SoundEffect, TickInput,
        tick,
    };
    use snack_dash::{ControlMode, Settings, Tuning, highscore};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        settings: Settings,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
        left_held: bool,
        right_held: bool,
        /// Pointer delta accumulated since the last frame (touch drag)
        pending_drag: f32,
        touch_last_x: f32,
        /// Whether the game was running when the tab went hidden
        was_running_on_hide: bool,
        /// Live DOM nodes for falling objects, keyed by entity id
        object_elements: HashMap<u32, Element>,
    }

    impl Game {
        fn new(seed: u64, geometry: FieldGeometry, settings: Settings, tuning: Tuning) -> Self {
            let high_score = highscore::load();
            Self {
                state: GameState::new(seed, geometry, tuning, settings.controls, high_score),
                settings,
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
                left_held: false,
                right_held: false,
                pending_drag: 0.0,
                touch_last_x: 0.0,
                was_running_on_hide: false,
                object_elements: HashMap::new(),
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            self.input.direction = match (self.left_held, self.right_held) {
                (true, false) => InputDirection::Left,
                (false, true) => InputDirection::Right,
                _ => InputDirection::None,
            };
            if self.pending_drag != 0.0 {
                self.input.pointer_delta = Some(self.pending_drag);
                self.pending_drag = 0.0;
            }

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.input.clone();
                tick(&mut self.state, &input, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot inputs after processing. Both pointer
                // signals are per-frame: a stale absolute position would
                // otherwise re-pin the character and eat later drags.
                self.input.pause = false;
                self.input.start = false;
                self.input.pointer_x = None;
                self.input.pointer_delta = None;
            }
        }

        /// Handle host-facing events (sounds, persistence)
        fn handle_events(&mut self, document: &Document) {
            let hidden = document.visibility_state() == web_sys::VisibilityState::Hidden;
            for event in self.state.drain_events() {
                match event {
                    GameEvent::Sound(effect) => {
                        let id = match effect {
                            SoundEffect::GoodCatch => "good-food-sound",
                            SoundEffect::BadCatch => "bad-food-sound",
                            SoundEffect::GameOver => "game-over-sound",
                        };
                        play_sound(document, id, self.settings.sound_volume(hidden));
                    }
                    GameEvent::HighScore(score) => highscore::save(score),
                }
            }
        }

        /// Position the character and falling-object sprites
        fn sync_sprites(&mut self, document: &Document) {
            if let Some(el) = document.get_element_by_id("character") {
                set_style(&el, "left", &format!("{}px", self.state.character.position));
            }

            let field = document.get_element_by_id("game-area");

            // Create or move a node per live object
            for object in &self.state.objects {
                let el = self.object_elements.entry(object.id).or_insert_with(|| {
                    let el = document
                        .create_element("div")
                        .expect("create food element");
                    el.set_class_name(&format!("food {}", object.kind.sprite_class()));
                    if let Some(field) = &field {
                        let _ = field.append_child(&el);
                    }
                    el
                });
                set_style(el, "left", &format!("{}px", object.x));
                set_style(el, "top", &format!("{}px", object.y));
                set_style(el, "transform", &format!("rotate({}deg)", object.rotation));
            }

            // Drop nodes whose objects were caught or exited
            self.object_elements.retain(|id, el| {
                let live = self.state.objects.iter().any(|o| o.id == *id);
                if !live {
                    el.remove();
                }
                live
            });
        }

        /// Update HUD elements in DOM
        fn update_hud(&self, document: &Document) {
            if let Some(el) = document.get_element_by_id("score") {
                el.set_text_content(Some(&format!("Score: {}", self.state.score)));
            }
            if let Some(el) = document.get_element_by_id("missed-bad") {
                el.set_text_content(Some(&format!(
                    "Rotten eaten: {}/{}",
                    self.state.missed_bad, self.state.tuning.miss_limit
                )));
            }
            if let Some(el) = document.get_element_by_id("high-score") {
                el.set_text_content(Some(&format!("Best: {}", self.state.high_score)));
            }

            show_when(document, "start-overlay", self.state.phase == GamePhase::Idle);
            show_when(document, "pause-menu", self.state.phase == GamePhase::Paused);
            show_when(document, "game-over", self.state.phase == GamePhase::Ended);
        }
    }

    fn set_style(el: &Element, property: &str, value: &str) {
        if let Some(html) = el.dyn_ref::<HtmlElement>() {
            let _ = html.style().set_property(property, value);
        }
    }

    fn show_when(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "overlay" } else { "overlay hidden" });
        }
    }

    fn play_sound(document: &Document, id: &str, volume: f32) {
        if let Some(el) = document.get_element_by_id(id) {
            if let Some(media) = el.dyn_ref::<HtmlMediaElement>() {
                media.set_volume(volume as f64);
                media.set_current_time(0.0);
                let _ = media.play();
            }
        }
    }

    /// Read an optional balance override from LocalStorage. Missing
    /// fields fall back to the shipped defaults.
    fn load_tuning_override() -> Option<Tuning> {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()?;
        let json = storage.get_item("snack_dash_tuning").ok()??;
        log::info!("Applying tuning override from LocalStorage");
        Tuning::from_json(&json)
    }

    /// Measure the play field and sprite sizes from the live layout.
    /// The sim treats these as runtime inputs, never constants.
    fn measure_geometry(document: &Document) -> FieldGeometry {
        let mut geometry = FieldGeometry::default();

        if let Some(field) = document.get_element_by_id("game-area") {
            let w = field.client_width() as f32;
            let h = field.client_height() as f32;
            if w > 0.0 && h > 0.0 {
                geometry.field_width = w;
                geometry.field_height = h;
            }
        }
        if let Some(character) = document.get_element_by_id("character") {
            let w = character.client_width() as f32;
            let h = character.client_height() as f32;
            if w > 0.0 && h > 0.0 {
                geometry.character_width = w;
                geometry.character_height = h;
            }
        }

        geometry
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Snack Dash starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let mut settings = Settings::load();
        // The page can force a control scheme, e.g. on touch-only kiosks
        if let Some(mode) = document
            .get_element_by_id("game-area")
            .and_then(|el| el.get_attribute("data-controls"))
            .and_then(|v| ControlMode::from_str(&v))
        {
            settings.controls = mode;
        }

        let tuning = load_tuning_override().unwrap_or_default();
        let geometry = measure_geometry(&document);
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, geometry, settings, tuning)));

        log::info!(
            "Game initialized with seed {seed}, field {}x{}",
            geometry.field_width,
            geometry.field_height
        );

        setup_input_handlers(game.clone());
        setup_buttons(game.clone());
        setup_auto_pause(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Snack Dash running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Keyboard hold
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" => g.left_held = true,
                    "ArrowRight" => g.right_held = true,
                    // Held keys auto-repeat; the one-shot toggles must
                    // fire once per physical press
                    "Escape" | "p" | "P" if !event.repeat() => g.input.pause = true,
                    " " | "Enter" if !event.repeat() => g.input.start = true,
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" => g.left_held = false,
                    "ArrowRight" => g.right_held = false,
                    _ => {}
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        let Some(field) = document.get_element_by_id("game-area") else {
            log::warn!("No #game-area element - pointer input disabled");
            return;
        };

        // Mouse move - absolute field-relative position
        {
            let game = game.clone();
            let field_clone = field.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::MouseEvent| {
                let rect = field_clone.get_bounding_client_rect();
                let x = event.client_x() as f32 - rect.left() as f32;
                game.borrow_mut().input.pointer_x = Some(x);
            });
            let _ = field
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch drag - relative deltas
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::TouchEvent| {
                if let Some(touch) = event.touches().get(0) {
                    game.borrow_mut().touch_last_x = touch.client_x() as f32;
                }
            });
            let _ = field
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let x = touch.client_x() as f32;
                    let mut g = game.borrow_mut();
                    g.pending_drag += x - g.touch_last_x;
                    g.touch_last_x = x;
                }
            });
            let _ = field
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        for id in ["start-btn", "restart-btn"] {
            if let Some(btn) = document.get_element_by_id(id) {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                    game.borrow_mut().input.start = true;
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }

        if let Some(btn) = document.get_element_by_id("resume-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().input.pause = true; // Toggle back to running
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Control-scheme toggle, persisted across sessions
        if let Some(btn) = document.get_element_by_id("controls-btn") {
            let label = btn.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                let next = match g.settings.controls {
                    ControlMode::Keys => ControlMode::Pointer,
                    ControlMode::Pointer => ControlMode::Keys,
                };
                g.settings.controls = next;
                g.state.controls = next;
                g.settings.save();
                label.set_text_content(Some(&format!("Controls: {}", next.as_str())));
                log::info!("Control mode: {}", next.as_str());
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Tab hidden: pause. Tab visible again: resume only if the hide
        // interrupted an active run.
        let document_clone = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut g = game.borrow_mut();
            if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                g.was_running_on_hide = g.state.phase == GamePhase::Running;
                if g.was_running_on_hide {
                    g.state.pause();
                    log::info!("Auto-paused (tab hidden)");
                }
            } else if g.was_running_on_hide {
                g.state.resume();
                g.was_running_on_hide = false;
                log::info!("Auto-resumed (tab visible)");
            }
        });
        let _ = document
            .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let document = web_sys::window().unwrap().document().unwrap();
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.handle_events(&document);
            g.sync_sprites(&document);
            g.update_hud(&document);
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use snack_dash::consts::SIM_DT;
    use snack_dash::settings::ControlMode;
    use snack_dash::sim::{FieldGeometry, GamePhase, GameState, TickInput, tick};
    use snack_dash::tuning::Tuning;

    env_logger::init();
    log::info!("Snack Dash (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    // Headless smoke run: ten simulated seconds of an idle player
    let mut state = GameState::new(
        42,
        FieldGeometry::default(),
        Tuning::default(),
        ControlMode::Keys,
        0,
    );
    state.start();
    for _ in 0..600 {
        tick(&mut state, &TickInput::default(), SIM_DT);
    }
    log::info!(
        "After 10s: phase {:?}, {} objects live, {} good snacks missed",
        state.phase,
        state.objects.len(),
        state.missed_good
    );
    assert_ne!(state.phase, GamePhase::Idle);
    println!("✓ Headless smoke run complete");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
