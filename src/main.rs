//! Sky Angel entry point
//!
//! Web: wires DOM events to the session and runs the frame loop.
//! Native: runs headless autopilot flights and prints a leaderboard.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlInputElement, KeyboardEvent, MouseEvent, SubmitEvent};

    use sky_angel::consts::MAX_FRAME_MS;
    use sky_angel::platform::{Command, command_for_key, time};
    use sky_angel::renderer::dom::{DomRenderer, ids};
    use sky_angel::score_client::ScoreClient;
    use sky_angel::sim::{GameEvent, TickInput, autopilot};
    use sky_angel::{Session, Settings};

    /// Autopilot presses at most one key per interval
    const AUTOPILOT_INTERVAL_MS: f64 = 100.0;

    /// Game instance holding all state
    struct Game {
        session: Session,
        settings: Settings,
        client: ScoreClient,
        renderer: Option<DomRenderer>,
        input: TickInput,
        last_time: Option<f64>,
        // Demo mode
        autopilot: bool,
        autopilot_wait_ms: f64,
    }

    impl Game {
        fn new(seed: u64, settings: Settings) -> Self {
            Self {
                session: Session::new(seed, settings.tuning()),
                client: ScoreClient::new(settings.ranking_url.clone()),
                settings,
                renderer: None,
                input: TickInput::default(),
                last_time: None,
                autopilot: false,
                autopilot_wait_ms: 0.0,
            }
        }

        /// Apply queued input and advance by the frame delta
        fn update(&mut self, time: f64) {
            let dt = time::frame_delta(self.last_time, time, MAX_FRAME_MS);
            self.last_time = Some(time);

            if self.autopilot {
                self.autopilot_wait_ms -= dt;
                if self.autopilot_wait_ms <= 0.0 {
                    if let Some(direction) = autopilot::steer(&self.session.state) {
                        self.input.moves.push(direction);
                    }
                    self.autopilot_wait_ms = AUTOPILOT_INTERVAL_MS;
                }
            }

            let events = self.session.tick(&self.input, dt);
            self.input.clear();
            for event in events {
                log_event(&event);
            }
        }

        fn render(&mut self) {
            if let Some(ref mut renderer) = self.renderer {
                renderer.render(&self.session);
            }
        }

        /// Claim the submission slot and send the score in the background
        fn submit(game: &Rc<RefCell<Game>>, name: &str) {
            let (client, entry) = {
                let mut g = game.borrow_mut();
                let entry = match g.session.begin_submission(name) {
                    Ok(entry) => entry,
                    Err(e) => {
                        log::warn!("Submission not started: {}", e);
                        return;
                    }
                };
                g.settings.remember_player(&entry.name);
                g.render();
                (g.client.clone(), entry)
            };

            let game = game.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = client.submit(&entry).await;
                let mut g = game.borrow_mut();
                g.session.finish_submission(entry, result);
                g.render();
            });
        }
    }

    fn log_event(event: &GameEvent) {
        match event {
            GameEvent::Spawned { kind, id } => log::trace!("Spawned {} {}", kind.as_str(), id),
            GameEvent::FuelPickup { fuel, .. } => log::debug!("Parachute! Fuel {}", fuel),
            GameEvent::StarCollected { stars, .. } => log::debug!("Star! Total {}", stars),
            GameEvent::DifficultyRaised { difficulty } => log::debug!("Difficulty {}", difficulty),
            other => log::info!("{:?}", other),
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Sky Angel starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let settings = Settings::load();
        let seed = time::seed();
        let last_name = settings.last_player_name.clone();
        let game = Rc::new(RefCell::new(Game::new(seed, settings)));
        log::info!("Game initialized with seed: {}", seed);

        match DomRenderer::new(document.clone()) {
            Some(renderer) => game.borrow_mut().renderer = Some(renderer),
            None => log::error!("Missing #{}; nothing will be drawn", ids::GAME_AREA),
        }

        // Pre-fill the name field
        if let Some(input) = document
            .get_element_by_id(ids::USERNAME)
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        {
            input.set_value(&last_name);
        }

        setup_keyboard(game.clone());
        setup_primary_button(game.clone());
        setup_score_form(game.clone());
        setup_pagination(game.clone());
        setup_auto_pause(game.clone());

        game.borrow_mut().render();
        request_animation_frame(game);

        log::info!("Sky Angel running!");
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            // Typing a name must not steer the plane
            let in_text_field = event
                .target()
                .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
                .is_some();
            if in_text_field {
                return;
            }

            let key = event.key();
            let mut g = game.borrow_mut();
            if let Some(command) = command_for_key(&key) {
                // Keep Space/arrows from scrolling the page
                event.prevent_default();
                command.apply(&mut g.input);
            } else if key == "i" || key == "I" {
                g.autopilot = !g.autopilot;
                log::info!("Autopilot: {}", g.autopilot);
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_primary_button(game: Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();
        let Some(btn) = document.get_element_by_id(ids::PRIMARY_BTN) else {
            log::warn!("Missing #{}", ids::PRIMARY_BTN);
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            let mut g = game.borrow_mut();
            let click = g.session.primary_input();
            if click.start {
                g.input.start = true;
            }
            if click.toggle_pause {
                Command::TogglePause.apply(&mut g.input);
            }
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_score_form(game: Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();
        let Some(form) = document.get_element_by_id(ids::SCORE_FORM) else {
            log::warn!("Missing #{}", ids::SCORE_FORM);
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: SubmitEvent| {
            event.prevent_default();
            let document = web_sys::window().unwrap().document().unwrap();
            let name = document
                .get_element_by_id(ids::USERNAME)
                .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
                .map(|input| input.value())
                .unwrap_or_default();
            Game::submit(&game, &name);
        });
        let _ = form.add_event_listener_with_callback("submit", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_pagination(game: Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        // Previous
        if let Some(btn) = document.get_element_by_id(ids::PREV_BTN) {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                if let Some(board) = g.session.leaderboard.as_mut() {
                    board.previous_page();
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Next
        if let Some(btn) = document.get_element_by_id(ids::NEXT_BTN) {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                if let Some(board) = g.session.leaderboard.as_mut() {
                    board.next_page();
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();
        let document_clone = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                let mut g = game.borrow_mut();
                if g.session.state.is_running() {
                    g.input.toggle_pause = true;
                    log::info!("Auto-paused (tab hidden)");
                }
                // Don't count the hidden time as one giant frame
                g.last_time = None;
            }
        });
        let _ = document.add_event_listener_with_callback(
            "visibilitychange",
            closure.as_ref().unchecked_ref(),
        );
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
            let mut g = game.borrow_mut();
            g.update(time);
            g.render();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Sky Angel (native) starting...");
    log::info!("Native mode flies headless autopilot runs - run with `trunk serve` for the web version");

    let flights = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<u32>().ok())
        .unwrap_or(8);
    let settings = sky_angel::Settings::load();
    let seed = sky_angel::platform::time::seed();

    let entries: Vec<_> = (0..flights)
        .map(|i| headless::fly(&format!("pilot-{}", i + 1), seed.wrapping_add(i as u64), &settings.tuning()))
        .collect();

    let mut board = sky_angel::Leaderboard::new(entries);
    loop {
        println!("\nLeaderboard (page {}/{})", board.page() + 1, board.page_count());
        println!("{:>4}  {:<10} {:>5} {:>6}", "Rank", "Name", "Stars", "Time");
        for entry in board.current_page() {
            println!(
                "{:>4}  {:<10} {:>5} {:>5}s",
                entry.rank, entry.name, entry.stars, entry.time
            );
        }
        if !board.next_page() {
            break;
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use sky_angel::score_client::ScoreEntry;
    use sky_angel::sim::{TickInput, autopilot};
    use sky_angel::{Session, Tuning};

    /// Simulated frame length
    const FRAME_MS: f64 = 50.0;
    /// Frames between autopilot key presses
    const STEER_EVERY: u32 = 2;
    /// Give up on flights that refuse to end
    const MAX_FRAMES: u32 = 20 * 60 * 20;

    /// Fly one autopilot run to game over and return its score
    pub fn fly(name: &str, seed: u64, tuning: &Tuning) -> ScoreEntry {
        let mut session = Session::new(seed, tuning.clone());
        session.tick(
            &TickInput {
                start: true,
                ..Default::default()
            },
            0.0,
        );

        let mut input = TickInput::default();
        for frame in 0..MAX_FRAMES {
            if session.state.is_game_over() {
                break;
            }
            if frame % STEER_EVERY == 0 {
                input.moves.extend(autopilot::steer(&session.state));
            }
            session.tick(&input, FRAME_MS);
            input.clear();
        }

        log::info!(
            "{} finished: {}s, {} stars, {:?}",
            name,
            session.state.elapsed_seconds,
            session.state.stars_collected,
            session.state.game_over_cause
        );

        ScoreEntry {
            name: name.to_string(),
            time: session.state.elapsed_seconds,
            stars: session.state.stars_collected,
        }
    }
}
