//! Browser client for the drop-catching game
//!
//! Binds the page's elements to a [`RoundController`] and drives it from
//! `requestAnimationFrame`. All game rules live in `game_core`.

#![cfg(target_arch = "wasm32")]

mod dom;
mod logger;

use std::cell::RefCell;
use std::rc::Rc;

use dom::DomSurface;
use game_core::*;
use log::{info, warn, LevelFilter};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, MouseEvent};

thread_local! {
    static GAME: RefCell<Option<RoundController<DomSurface>>> = RefCell::new(None);
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Run `f` against the live game, if there is one and it is not already borrowed
pub(crate) fn with_game<R>(f: impl FnOnce(&mut RoundController<DomSurface>) -> R) -> Option<R> {
    GAME.with(|cell| {
        let mut slot = cell.try_borrow_mut().ok()?;
        slot.as_mut().map(f)
    })
}

/// Bind the page and start the frame loop
#[wasm_bindgen]
pub fn start_app() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    logger::init(LevelFilter::Info);

    if GAME.with(|cell| cell.borrow().is_some()) {
        warn!("start_app called twice");
        return Ok(());
    }

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let surface = DomSurface::from_window(window)?;
    let document = surface.document().clone();

    let game = RoundController::new(surface, Config::new(), GameRng::from_entropy());
    GAME.with(|cell| *cell.borrow_mut() = Some(game));

    bind_click(&document, "start-btn", start_round)?;
    bind_click(&document, "reset-btn", reset_round)?;
    start_frame_loop()?;

    info!("app started");
    Ok(())
}

/// Press the start button
#[wasm_bindgen]
pub fn start_round() -> bool {
    with_game(|game| game.start()).unwrap_or(false)
}

/// Press the reset button
#[wasm_bindgen]
pub fn reset_round() {
    with_game(|game| game.reset());
}

/// Current round counters as JSON
#[wasm_bindgen]
pub fn round_snapshot() -> Result<String, JsValue> {
    let state =
        with_game(|game| game.state()).ok_or_else(|| JsValue::from_str("app not started"))?;
    serde_json::to_string(&state).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn bind_click<R: 'static>(
    document: &Document,
    id: &str,
    action: fn() -> R,
) -> Result<(), JsValue> {
    let element = document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing element #{}", id)))?;
    let closure = Closure::wrap(Box::new(move |_event: MouseEvent| {
        action();
    }) as Box<dyn FnMut(MouseEvent)>);
    element.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn request_frame(callback: &Closure<dyn FnMut(f64)>) -> Result<i32, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    window.request_animation_frame(callback.as_ref().unchecked_ref::<js_sys::Function>())
}

fn start_frame_loop() -> Result<(), JsValue> {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    let mut last_frame: Option<f64> = None;

    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |now: f64| {
        let dt_ms = last_frame.map_or(0.0, |prev| now - prev);
        last_frame = Some(now);

        with_game(|game| {
            game.surface_mut().release_spent();
            game.advance(dt_ms);
        });

        if let Some(callback) = f.borrow().as_ref() {
            if let Err(err) = request_frame(callback) {
                warn!("frame loop stopped: {:?}", err);
            }
        }
    }) as Box<dyn FnMut(f64)>));

    let first = g.borrow();
    let callback = first
        .as_ref()
        .ok_or_else(|| JsValue::from_str("frame callback missing"))?;
    request_frame(callback)?;
    Ok(())
}
