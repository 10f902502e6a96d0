//! Balloonacy entry point
//!
//! Web: binds the game to the page's canvas, buttons and score readouts.
//! Native: runs a seeded headless game with an autopilot and prints the score.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, MouseEvent};

    use balloonacy::Settings;
    use balloonacy::platform::FrameToken;
    use balloonacy::platform::web::{CanvasSurface, DomScoreboard, FrameCallback, RafScheduler};
    use balloonacy::platform::ScoreDisplay;
    use balloonacy::sim::{self, GameState, PointerClick};

    /// Everything the page callbacks share
    struct Game {
        state: GameState,
        surface: CanvasSurface,
        scheduler: RafScheduler,
        display: DomScoreboard,
    }

    impl Game {
        fn frame(&mut self, token: FrameToken) {
            sim::on_frame(
                &mut self.state,
                token,
                &mut self.surface,
                &mut self.scheduler,
                &mut self.display,
            );
        }

        fn click(&mut self, event: &MouseEvent) {
            let click = PointerClick {
                client_x: event.client_x() as f32,
                client_y: event.client_y() as f32,
            };
            let view = self.surface.view();
            sim::handle_click(&mut self.state, click, &view, &mut self.display);
        }

        fn start(&mut self) {
            sim::start(&mut self.state, &mut self.scheduler, &mut self.display);
        }

        fn reset(&mut self) {
            sim::reset(
                &mut self.state,
                &mut self.scheduler,
                &mut self.surface,
                &mut self.display,
            );
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let settings = Settings::load();
        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);

        let canvas = document
            .get_element_by_id("gameCanvas")
            .ok_or_else(|| JsValue::from_str("missing #gameCanvas"))?
            .dyn_into::<HtmlCanvasElement>()?;

        let frame_callback: FrameCallback = Rc::new(RefCell::new(None));
        let mut display = DomScoreboard::from_document(&document)?;

        let state = GameState::with_settings(seed, settings);
        display.refresh(&state.scores);
        display.set_running(false);

        let game = Rc::new(RefCell::new(Game {
            state,
            surface: CanvasSurface::new(canvas.clone())?,
            scheduler: RafScheduler::new(window, frame_callback.clone()),
            display,
        }));

        // Frame loop: the pending token is the one this callback was queued with
        {
            let game = game.clone();
            *frame_callback.borrow_mut() = Some(Closure::<dyn FnMut(f64)>::new(move |_time: f64| {
                let mut g = game.borrow_mut();
                if let Some(token) = g.state.frame_token {
                    g.frame(token);
                }
            }));
        }

        setup_input_handlers(&canvas, game.clone());
        setup_button(&document, "startBtn", game.clone(), Game::start);
        setup_button(&document, "resetBtn", game, Game::reset);

        log::info!("🎈 Balloonacy loaded (seed {}). Click Start Game to begin popping balloons!", seed);
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            game.borrow_mut().click(&event);
        });
        let _ = canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_button(
        document: &web_sys::Document,
        id: &str,
        game: Rc<RefCell<Game>>,
        action: fn(&mut Game),
    ) {
        if let Some(btn) = document.get_element_by_id(id) {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                action(&mut game.borrow_mut());
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        } else {
            log::warn!("Button #{} not found", id);
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

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use balloonacy::Settings;
    use balloonacy::platform::{ManualScheduler, ScoreDisplay};
    use balloonacy::renderer::{DrawList, Surface};
    use balloonacy::sim::{self, CanvasView, GameState, PointerClick, ScoreBoard};

    /// Frames between autopilot clicks
    const CLICK_INTERVAL: u64 = 12;
    const DEFAULT_FRAMES: u64 = 3600;
    const DEFAULT_SEED: u64 = 2024;

    /// Logs every score change
    struct LogDisplay;

    impl ScoreDisplay for LogDisplay {
        fn refresh(&mut self, scores: &ScoreBoard) {
            log::debug!(
                "score={} popped={} missed={}",
                scores.score,
                scores.popped,
                scores.missed
            );
        }

        fn set_running(&mut self, running: bool) {
            log::info!("{}", if running { "Game running" } else { "Game stopped" });
        }
    }

    pub fn run(seed: Option<u64>, frames: Option<u64>) {
        let settings = Settings::load();
        let seed = seed.or(settings.seed).unwrap_or(DEFAULT_SEED);
        let frames = frames.unwrap_or(DEFAULT_FRAMES);

        let mut surface = DrawList::new(settings.canvas_width, settings.canvas_height);
        let view = CanvasView::unscaled(settings.canvas_width, settings.canvas_height);
        let mut state = GameState::with_settings(seed, settings);
        let mut scheduler = ManualScheduler::new();
        let mut display = LogDisplay;

        sim::start(&mut state, &mut scheduler, &mut display);

        for frame in 1..=frames {
            let Some(token) = scheduler.fire() else {
                log::warn!("Loop stopped scheduling after {} frames", frame - 1);
                break;
            };
            sim::on_frame(&mut state, token, &mut surface, &mut scheduler, &mut display);

            if frame % CLICK_INTERVAL == 0 {
                if let Some(target) = sim::pick_target(&state, surface.size()) {
                    let click = PointerClick {
                        client_x: target.x,
                        client_y: target.y,
                    };
                    sim::handle_click(&mut state, click, &view, &mut display);
                }
            }
        }

        log::info!(
            "Finished {} frames: {} balloons, {} particles on screen",
            state.frame_count,
            state.balloons.len(),
            state.particles.len()
        );
        match serde_json::to_string(&state.scores) {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Could not serialize scores: {}", e),
        }

        sim::reset(&mut state, &mut scheduler, &mut surface, &mut display);
        debug_assert!(scheduler.pending().is_empty());
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Balloonacy (native) starting...");
    log::info!("Native mode runs headless - run with `trunk serve` for the web version");

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok());
    let frames = args.next().and_then(|s| s.parse().ok());
    headless::run(seed, frames);
}
