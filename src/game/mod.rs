//! Browser glue for the guessing game.
//!
//! This module owns everything wasm-side that the round state machine in
//! [`engine`] must not: the DOM overlays, the single `<audio>` element, the
//! event listeners, and the deferred callbacks (snippet auto-stop, round
//! auto-advance, notification auto-clear). Timers are held as cancellable
//! [`Timeout`] handles in [`GameState`]; dropping a handle cancels it, and
//! every callback additionally re-checks the engine's generation token so a
//! leftover from an abandoned round can never touch the current one.

use std::cell::RefCell;

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    Document, HtmlAudioElement, HtmlButtonElement, HtmlElement, HtmlImageElement,
    HtmlInputElement, window,
};

pub mod engine;
pub mod prefs;
mod net;

use crate::Category;
use engine::{ADVANCE_DELAY_MS, Engine, GuessOutcome, NOTIFICATION_MS};
use prefs::{LocalStorage, PreferenceStore};

// --- Styling ------------------------------------------------------------------

const ROOT_STYLE: &str = "position:fixed; inset:0; overflow:auto; background:#141414; color:#eaeaea; font-family:'Segoe UI', 'Helvetica Neue', sans-serif; display:flex; flex-direction:column; align-items:center; padding:28px 16px; z-index:10;";
const HEADING_STYLE: &str = "font-size:28px; font-weight:700; margin:0 0 18px 0;";
const CATEGORY_ROW_STYLE: &str = "display:flex; gap:8px; margin-bottom:16px;";
const CATEGORY_BTN_STYLE: &str = "padding:8px 16px; border:1px solid #333; border-radius:6px; background:#2a2a2a; color:#eaeaea; font-size:14px; cursor:pointer;";
const CATEGORY_BTN_ACTIVE_STYLE: &str = "padding:8px 16px; border:1px solid #3b82f6; border-radius:6px; background:#3b82f6; color:#fff; font-size:14px; cursor:pointer;";
const SCORE_STYLE: &str = "font-size:20px; margin-bottom:12px; letter-spacing:0.5px;";
const ERROR_STYLE: &str = "color:#f87171; margin-bottom:12px;";
const NOTIFY_STYLE: &str = "background:rgba(59,130,246,0.15); border-left:4px solid #3b82f6; color:#93c5fd; padding:12px 16px; margin-bottom:12px; border-radius:4px;";
const ROUND_STYLE: &str = "display:flex; flex-direction:column; align-items:center; gap:12px;";
const ACTION_BTN_STYLE: &str = "padding:8px 16px; border:none; border-radius:6px; background:#3b82f6; color:#fff; font-size:14px; cursor:pointer; margin:0 4px;";
const ACTION_BTN_DISABLED_STYLE: &str = "padding:8px 16px; border:none; border-radius:6px; background:#555; color:#bbb; font-size:14px; margin:0 4px;";
const INPUT_STYLE: &str = "padding:8px; border:1px solid #333; border-radius:6px; background:#1e1e1e; color:#eaeaea; font-size:14px; margin-right:8px; width:220px;";
const ARTWORK_STYLE: &str = "width:160px; height:160px; object-fit:cover; border-radius:8px; border:1px solid #333;";

// --- Runtime state ------------------------------------------------------------

struct GameState {
    engine: Engine,
    category: Option<Category>,
    prefs: Box<dyn PreferenceStore>,
    audio: HtmlAudioElement,
    score_el: HtmlElement,
    error_el: HtmlElement,
    notify_el: HtmlElement,
    round_el: HtmlElement,
    play_btn: HtmlButtonElement,
    new_btn: HtmlButtonElement,
    guess_input: HtmlInputElement,
    artwork_el: HtmlImageElement,
    category_btns: Vec<(Category, HtmlButtonElement)>,
    // Pending deferred callbacks for the current round. Dropping a handle
    // cancels the underlying setTimeout.
    stop_timer: Option<Timeout>,
    advance_timer: Option<Timeout>,
    notify_timer: Option<Timeout>,
}

thread_local! {
    static GAME_STATE: RefCell<Option<GameState>> = const { RefCell::new(None) };
}

// --- Setup --------------------------------------------------------------------

pub(crate) fn start_guess_mode() -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    // Rebuild from scratch on re-entry so listeners never double up.
    if let Some(existing) = doc.get_element_by_id("tt-root") {
        existing.remove();
    }

    let root: HtmlElement = doc.create_element("div")?.dyn_into()?;
    root.set_id("tt-root");
    root.set_attribute("style", ROOT_STYLE).ok();
    doc.body()
        .ok_or_else(|| JsValue::from_str("no body"))?
        .append_child(&root)?;

    let heading: HtmlElement = doc.create_element("h1")?.dyn_into()?;
    heading.set_text_content(Some("Guess the Song"));
    heading.set_attribute("style", HEADING_STYLE).ok();
    root.append_child(&heading)?;

    let category_row: HtmlElement = doc.create_element("div")?.dyn_into()?;
    category_row.set_id("tt-categories");
    category_row.set_attribute("style", CATEGORY_ROW_STYLE).ok();
    root.append_child(&category_row)?;

    let mut category_btns = Vec::with_capacity(Category::ALL.len());
    for category in Category::ALL {
        let btn: HtmlButtonElement = doc.create_element("button")?.dyn_into()?;
        btn.set_text_content(Some(category.slug()));
        btn.set_attribute("style", CATEGORY_BTN_STYLE).ok();
        category_row.append_child(&btn)?;
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
            select_category(category);
        }) as Box<dyn FnMut(_)>);
        btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
        category_btns.push((category, btn));
    }

    let score_el = overlay_div(&doc, "tt-score", SCORE_STYLE)?;
    score_el.set_text_content(Some("Score: 0"));
    root.append_child(&score_el)?;

    let error_el = overlay_div(&doc, "tt-error", ERROR_STYLE)?;
    apply_style(&error_el, ERROR_STYLE, false);
    root.append_child(&error_el)?;

    let notify_el = overlay_div(&doc, "tt-notify", NOTIFY_STYLE)?;
    apply_style(&notify_el, NOTIFY_STYLE, false);
    root.append_child(&notify_el)?;

    // Round section: hidden until the first track arrives.
    let round_el = overlay_div(&doc, "tt-round", ROUND_STYLE)?;
    apply_style(&round_el, ROUND_STYLE, false);
    root.append_child(&round_el)?;

    let button_row: HtmlElement = doc.create_element("div")?.dyn_into()?;
    round_el.append_child(&button_row)?;

    let play_btn: HtmlButtonElement = doc.create_element("button")?.dyn_into()?;
    play_btn.set_id("tt-play");
    play_btn.set_text_content(Some("Play Snippet (1s)"));
    play_btn.set_attribute("style", ACTION_BTN_STYLE).ok();
    button_row.append_child(&play_btn)?;
    {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
            play_snippet();
        }) as Box<dyn FnMut(_)>);
        play_btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    let new_btn: HtmlButtonElement = doc.create_element("button")?.dyn_into()?;
    new_btn.set_id("tt-new");
    new_btn.set_text_content(Some("Get New Song"));
    new_btn.set_attribute("style", ACTION_BTN_STYLE).ok();
    button_row.append_child(&new_btn)?;
    {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
            request_round();
        }) as Box<dyn FnMut(_)>);
        new_btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    let input_row: HtmlElement = doc.create_element("div")?.dyn_into()?;
    round_el.append_child(&input_row)?;

    let guess_input: HtmlInputElement = doc.create_element("input")?.dyn_into()?;
    guess_input.set_id("tt-guess");
    guess_input.set_type("text");
    guess_input.set_placeholder("Enter song name");
    guess_input.set_attribute("style", INPUT_STYLE).ok();
    input_row.append_child(&guess_input)?;
    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
            if evt.key() == "Enter" {
                submit_guess();
            }
        }) as Box<dyn FnMut(_)>);
        guess_input.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    let submit_btn: HtmlButtonElement = doc.create_element("button")?.dyn_into()?;
    submit_btn.set_id("tt-submit");
    submit_btn.set_text_content(Some("Submit Guess"));
    submit_btn.set_attribute("style", ACTION_BTN_STYLE).ok();
    input_row.append_child(&submit_btn)?;
    {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
            submit_guess();
        }) as Box<dyn FnMut(_)>);
        submit_btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    let artwork_el: HtmlImageElement = doc.create_element("img")?.dyn_into()?;
    artwork_el.set_id("tt-artwork");
    artwork_el.set_alt("Album artwork");
    artwork_el.set_attribute("style", ARTWORK_STYLE).ok();
    round_el.append_child(&artwork_el)?;

    // The one audio handle of the whole game. Only this module starts or
    // stops it; every new round pauses and rewinds it first.
    let audio: HtmlAudioElement = doc.create_element("audio")?.dyn_into()?;
    audio.set_id("tt-audio");
    audio.set_preload("auto");
    round_el.append_child(&audio)?;

    let prefs: Box<dyn PreferenceStore> = Box::new(LocalStorage);
    let stored = prefs.load();

    let state = GameState {
        engine: Engine::new(),
        category: None,
        prefs,
        audio,
        score_el,
        error_el,
        notify_el,
        round_el,
        play_btn,
        new_btn,
        guess_input,
        artwork_el,
        category_btns,
        stop_timer: None,
        advance_timer: None,
        notify_timer: None,
    };
    GAME_STATE.with(|cell| cell.replace(Some(state)));

    // Resume the player's last category, if one was saved.
    if let Some(category) = stored {
        select_category(category);
    }
    Ok(())
}

fn overlay_div(doc: &Document, id: &str, style: &str) -> Result<HtmlElement, JsValue> {
    let el: HtmlElement = doc.create_element("div")?.dyn_into()?;
    el.set_id(id);
    el.set_attribute("style", style).ok();
    Ok(el)
}

// --- Category / round control ---------------------------------------------------

fn select_category(category: Category) {
    GAME_STATE.with(|cell| {
        if let Some(state) = cell.borrow_mut().as_mut() {
            state.category = Some(category);
            state.prefs.store(category);
            state.engine.reset_session();
            // Everything the previous round scheduled dies with it.
            state.stop_timer = None;
            state.advance_timer = None;
            state.notify_timer = None;
            apply_style(&state.notify_el, NOTIFY_STYLE, false);
            let _ = state.audio.pause();
            state.audio.set_current_time(0.0);
            for (cat, btn) in &state.category_btns {
                let style = if *cat == category {
                    CATEGORY_BTN_ACTIVE_STYLE
                } else {
                    CATEGORY_BTN_STYLE
                };
                btn.set_attribute("style", style).ok();
            }
            render(state);
        }
    });
    request_round();
}

/// Kick off a round fetch for the current category. The returned generation
/// token travels with the async completion; anything else that arrives with
/// an older token is ignored.
fn request_round() {
    let pending = GAME_STATE.with(|cell| {
        cell.borrow_mut().as_mut().and_then(|state| {
            let category = state.category?;
            let token = state.engine.begin_fetch();
            state.stop_timer = None;
            state.advance_timer = None;
            Some((category, token))
        })
    });
    let Some((category, token)) = pending else {
        return;
    };

    spawn_local(async move {
        match net::fetch_round(category).await {
            Ok(track) => GAME_STATE.with(|cell| {
                if let Some(state) = cell.borrow_mut().as_mut() {
                    if state.engine.finish_fetch(token, track.clone()) {
                        let _ = state.audio.pause();
                        state.audio.set_src(&track.preview);
                        state.audio.set_current_time(0.0);
                        state.artwork_el.set_src(&track.artwork);
                        state.guess_input.set_value("");
                        render(state);
                    }
                }
            }),
            Err(err) => {
                web_sys::console::error_2(&JsValue::from_str("round fetch failed:"), &err);
                GAME_STATE.with(|cell| {
                    if let Some(state) = cell.borrow_mut().as_mut() {
                        if state.engine.fetch_failed(token) {
                            render(state);
                        }
                    }
                });
            }
        }
    });
}

// --- Guessing -------------------------------------------------------------------

fn submit_guess() {
    GAME_STATE.with(|cell| {
        if let Some(state) = cell.borrow_mut().as_mut() {
            let guess = state.guess_input.value();
            match state.engine.submit_guess(&guess) {
                GuessOutcome::NoTrack => return,
                GuessOutcome::Correct { .. } => {
                    state.guess_input.set_value("");
                    show_notification(state, "Correct!");
                    schedule_advance(state);
                }
                GuessOutcome::Wrong { .. } => {
                    state.guess_input.set_value("");
                }
                GuessOutcome::Reveal { answer } => {
                    state.guess_input.set_value("");
                    show_notification(state, &format!("Wrong. Correct answer was: {answer}"));
                    schedule_advance(state);
                }
            }
            render(state);
        }
    });
}

/// Resolved rounds (correct or revealed) move on after a fixed delay.
fn schedule_advance(state: &mut GameState) {
    let token = state.engine.generation();
    state.advance_timer = Some(Timeout::new(ADVANCE_DELAY_MS, move || {
        let still_current = GAME_STATE.with(|cell| {
            cell.borrow()
                .as_ref()
                .is_some_and(|s| s.engine.generation() == token)
        });
        if still_current {
            request_round();
        }
    }));
}

// --- Snippet playback ------------------------------------------------------------

fn play_snippet() {
    GAME_STATE.with(|cell| {
        if let Some(state) = cell.borrow_mut().as_mut() {
            // The engine refuses while a snippet is playing or no track is
            // loaded; the disabled button is only the visible half of that.
            let Some(window_ms) = state.engine.start_snippet() else {
                return;
            };
            state.audio.set_current_time(0.0);
            let _ = state.audio.play();
            let token = state.engine.generation();
            state.stop_timer = Some(Timeout::new(window_ms, move || {
                stop_snippet(token);
            }));
            render(state);
        }
    });
}

fn stop_snippet(token: u64) {
    GAME_STATE.with(|cell| {
        if let Some(state) = cell.borrow_mut().as_mut() {
            if state.engine.generation() != token {
                return;
            }
            state.engine.stop_snippet();
            let _ = state.audio.pause();
            render(state);
        }
    });
}

// --- Notifications & rendering ----------------------------------------------------

fn show_notification(state: &mut GameState, text: &str) {
    state.notify_el.set_text_content(Some(text));
    apply_style(&state.notify_el, NOTIFY_STYLE, true);
    state.notify_timer = Some(Timeout::new(NOTIFICATION_MS, move || {
        GAME_STATE.with(|cell| {
            if let Some(state) = cell.borrow_mut().as_mut() {
                apply_style(&state.notify_el, NOTIFY_STYLE, false);
            }
        });
    }));
}

fn apply_style(el: &HtmlElement, base: &str, visible: bool) {
    if visible {
        el.set_attribute("style", base).ok();
    } else {
        el.set_attribute("style", &format!("{base} display:none;")).ok();
    }
}

fn render(state: &GameState) {
    state
        .score_el
        .set_text_content(Some(&format!("Score: {}", state.engine.score())));

    match state.engine.error() {
        Some(msg) => {
            state.error_el.set_text_content(Some(msg));
            apply_style(&state.error_el, ERROR_STYLE, true);
        }
        None => apply_style(&state.error_el, ERROR_STYLE, false),
    }

    let has_track = state.engine.track().is_some();
    apply_style(&state.round_el, ROUND_STYLE, has_track);

    let secs = state.engine.snippet_secs();
    if state.engine.playing() {
        state
            .play_btn
            .set_text_content(Some(&format!("Playing... ({secs}s)")));
        state.play_btn.set_disabled(true);
        state.play_btn.set_attribute("style", ACTION_BTN_DISABLED_STYLE).ok();
    } else {
        state
            .play_btn
            .set_text_content(Some(&format!("Play Snippet ({secs}s)")));
        state.play_btn.set_disabled(false);
        state.play_btn.set_attribute("style", ACTION_BTN_STYLE).ok();
    }
    state.new_btn.set_disabled(state.category.is_none());
}
