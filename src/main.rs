//! Crop Dash entry point
//!
//! Browser build: wires the canvas, DOM buttons, keyboard and the
//! animation-frame loop around the simulation.
//! Native build: loads the config and plays a headless autopilot run.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Document, Response};

    use crop_dash::platform::dom::{Listener, set_text};
    use crop_dash::platform::{FrameClock, KeyTracker};
    use crop_dash::renderer::{CanvasRenderer, Scene};
    use crop_dash::sim::{GameEvent, GameState, StartOutcome, tick};
    use crop_dash::tuning::{Tuning, TuningError};
    use crop_dash::ui;

    const CONFIG_URL: &str = "config.json";
    const HUD_IDS: [&str; 4] = ["score", "time", "goal", "status"];

    /// Game instance holding all state
    struct Game {
        state: GameState,
        renderer: CanvasRenderer,
        document: Document,
        keys: KeyTracker,
        clock: FrameClock,
        /// Start was pressed before the config arrived
        start_pending: bool,
        /// Cleared on teardown; the frame loop stops rescheduling
        running: bool,
    }

    impl Game {
        fn new(seed: u64, document: Document) -> Self {
            for id in HUD_IDS {
                if document.get_element_by_id(id).is_none() {
                    log::error!("#{} not found; that HUD slot will stay blank", id);
                }
            }
            Self {
                state: GameState::new(seed),
                renderer: CanvasRenderer::new(&document, "game"),
                document,
                keys: KeyTracker::new(),
                clock: FrameClock::default(),
                start_pending: false,
                running: true,
            }
        }

        fn start(&mut self) {
            match self.state.start() {
                StartOutcome::Deferred => self.start_pending = true,
                StartOutcome::Started | StartOutcome::Resumed => self.clock.resync(),
                StartOutcome::Ignored => {}
            }
        }

        fn config_loaded(&mut self, tuning: Tuning) {
            self.state.apply_tuning(tuning);
            if std::mem::take(&mut self.start_pending) {
                self.start();
            }
        }

        /// One animation frame: simulate, react to events, draw
        fn frame(&mut self, time: f64) {
            let dt = self.clock.delta(time);
            let input = self.keys.take_input();
            tick(&mut self.state, &input, dt);

            for event in self.state.drain_events() {
                match event {
                    GameEvent::RoundStarted { .. } => self.clock.resync(),
                    GameEvent::LevelAdvanced { level } => log::info!("Level {} started", level),
                    GameEvent::Won => log::info!("You win! Final score {}", self.state.score),
                    GameEvent::TimeUp => log::info!("Time's up at score {}", self.state.score),
                    _ => {}
                }
            }

            self.renderer.render(&Scene::capture(&self.state));
            self.update_hud();
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let hud = ui::hud(&self.state);
            set_text(&self.document, "score", &hud.score);
            set_text(&self.document, "time", &hud.time);
            set_text(&self.document, "goal", &hud.goal);
            set_text(&self.document, "status", &hud.status);
        }
    }

    /// Everything that must be released when the page goes away
    struct App {
        game: Rc<RefCell<Game>>,
        _listeners: Vec<Listener>,
    }

    thread_local! {
        static APP: RefCell<Option<App>> = const { RefCell::new(None) };
    }

    /// Fetch and parse the level table; any failure means defaults
    async fn fetch_tuning(url: &str) -> Tuning {
        match try_fetch_tuning(url).await {
            Ok(tuning) => {
                log::info!("Loaded {} levels from {}", tuning.levels.len(), url);
                tuning
            }
            Err(e) => Tuning::fallback(e),
        }
    }

    async fn try_fetch_tuning(url: &str) -> Result<Tuning, TuningError> {
        let js_err = |e: JsValue| TuningError::Fetch(format!("{:?}", e));
        let window = web_sys::window().ok_or_else(|| TuningError::Fetch("no window".into()))?;
        let resp: Response = JsFuture::from(window.fetch_with_str(url))
            .await
            .map_err(js_err)?
            .dyn_into()
            .map_err(js_err)?;
        if !resp.ok() {
            return Err(TuningError::Fetch(format!("HTTP {}", resp.status())));
        }
        let text = JsFuture::from(resp.text().map_err(js_err)?)
            .await
            .map_err(js_err)?
            .as_string()
            .ok_or_else(|| TuningError::Fetch("response body is not text".into()))?;
        Tuning::from_json(&text)
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Crop Dash starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, document.clone())));
        log::info!("Game initialized with seed: {}", game.borrow().state.seed);

        // One-shot config load; Start is held until it resolves
        {
            let game = game.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let tuning = fetch_tuning(CONFIG_URL).await;
                game.borrow_mut().config_loaded(tuning);
            });
        }

        let mut listeners = Vec::new();
        setup_input_handlers(&window, &game, &mut listeners);
        setup_buttons(&document, &game, &mut listeners);

        game.borrow().update_hud();
        APP.with(|app| {
            *app.borrow_mut() = Some(App {
                game: game.clone(),
                _listeners: listeners,
            })
        });

        // Start game loop
        request_animation_frame(game);

        log::info!("Crop Dash running!");
    }

    fn setup_input_handlers(
        window: &web_sys::Window,
        game: &Rc<RefCell<Game>>,
        listeners: &mut Vec<Listener>,
    ) {
        let target: &web_sys::EventTarget = window.as_ref();

        let g = game.clone();
        listeners.extend(Listener::new(target, "keydown", move |event| {
            if let Some(event) = event.dyn_ref::<web_sys::KeyboardEvent>() {
                let key = event.key();
                if key.starts_with("Arrow") {
                    event.prevent_default();
                }
                g.borrow_mut().keys.key_down(&key);
            }
        }));

        let g = game.clone();
        listeners.extend(Listener::new(target, "keyup", move |event| {
            if let Some(event) = event.dyn_ref::<web_sys::KeyboardEvent>() {
                g.borrow_mut().keys.key_up(&event.key());
            }
        }));

        // Keys released while unfocused never send keyup
        let g = game.clone();
        listeners.extend(Listener::new(target, "blur", move |_| {
            g.borrow_mut().keys.clear();
        }));

        listeners.extend(Listener::new(target, "pagehide", move |_| teardown()));
    }

    fn setup_buttons(
        document: &Document,
        game: &Rc<RefCell<Game>>,
        listeners: &mut Vec<Listener>,
    ) {
        match document.get_element_by_id("btnStart") {
            Some(btn) => {
                let g = game.clone();
                listeners.extend(Listener::new(btn.as_ref(), "click", move |_| {
                    g.borrow_mut().start();
                }));
            }
            None => log::error!("#btnStart not found"),
        }

        match document.get_element_by_id("btnReset") {
            Some(btn) => {
                let g = game.clone();
                listeners.extend(Listener::new(btn.as_ref(), "click", move |_| {
                    let mut g = g.borrow_mut();
                    g.start_pending = false;
                    g.state.reset();
                    g.update_hud();
                }));
            }
            None => log::error!("#btnReset not found"),
        }
    }

    /// Stop the loop and drop every listener
    fn teardown() {
        let app = APP.with(|app| app.borrow_mut().take());
        if let Some(app) = app {
            // Listeners are dropped after this handler returns, outside the borrow
            app.game.borrow_mut().running = false;
            wasm_bindgen_futures::spawn_local(async move {
                drop(app);
            });
            log::info!("Crop Dash stopped");
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            if !g.running {
                return;
            }
            g.frame(time);
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
    use crop_dash::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
    use crop_dash::{Tuning, ui};

    env_logger::init();
    log::info!("Crop Dash (native) starting...");

    // Usage: crop-dash [config.json] [seed]
    let mut args = std::env::args().skip(1);
    let config_path = args.next().unwrap_or_else(|| "config.json".to_string());
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });

    let tuning = Tuning::load_or_default(&config_path);
    let mut state = GameState::with_tuning(seed, tuning);
    state.start();
    log::info!("Headless autopilot run with seed: {}", state.seed);

    let dt = 1.0 / 60.0;
    let input = TickInput {
        autopilot: true,
        ..Default::default()
    };
    while state.phase == GamePhase::Playing {
        tick(&mut state, &input, dt);
        for event in state.drain_events() {
            match event {
                GameEvent::LevelAdvanced { level } => log::info!("Level {} started", level),
                GameEvent::CrowHit { penalty } => log::debug!("Crow hit (-{})", penalty),
                GameEvent::Won | GameEvent::TimeUp => log::info!("{}", state.status),
                _ => {}
            }
        }
    }

    let hud = ui::hud(&state);
    println!(
        "{} | level {} | score {} | goal {} | {} ticks | seed {}",
        hud.status, state.level, hud.score, hud.goal, state.time_ticks, state.seed
    );
}
