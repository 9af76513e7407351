//! Tune Teaser core crate.
//!
//! Guess-the-song gameplay: the player picks a decade category, hears a short
//! preview snippet fetched through the catalog proxy, and types the title.
//! Wrong guesses double the snippet window; the fourth miss reveals the
//! answer. `start_game()` wires the whole browser UI; the round state
//! machine, title canonicalization, and category table below are plain Rust
//! and run host-side under `cargo test`.

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

pub mod game;
pub mod title;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

// -----------------------------------------------------------------------------
// Decade categories
// The `recent` bucket is open-ended: its upper bound is the current year,
// supplied by the caller at request time (the proxy samples there).
// -----------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    Seventies,
    Eighties,
    Nineties,
    Aughts,
    TwentyTens,
    Recent,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Seventies,
        Category::Eighties,
        Category::Nineties,
        Category::Aughts,
        Category::TwentyTens,
        Category::Recent,
    ];

    /// Wire / storage / button-label form of the category.
    pub fn slug(self) -> &'static str {
        match self {
            Category::Seventies => "70s",
            Category::Eighties => "80s",
            Category::Nineties => "90s",
            Category::Aughts => "00s",
            Category::TwentyTens => "2010s",
            Category::Recent => "recent",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.slug() == slug)
    }

    /// Inclusive release-year range the category constrains searches to.
    pub fn year_range(self, current_year: i32) -> (i32, i32) {
        match self {
            Category::Seventies => (1970, 1979),
            Category::Eighties => (1980, 1989),
            Category::Nineties => (1990, 1999),
            Category::Aughts => (2000, 2009),
            Category::TwentyTens => (2010, 2019),
            Category::Recent => (2020, current_year),
        }
    }
}

// -----------------------------------------------------------------------------
// Track payload
// Produced by the proxy, consumed by the game. One immutable snapshot per
// round; a new round replaces it wholesale.
// -----------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub title: String,
    pub artist: String,
    /// Preview audio URL; empty when the catalog has none for this track.
    #[serde(default)]
    pub preview: String,
    /// Album artwork URL; empty when the catalog has none for this track.
    #[serde(default)]
    pub artwork: String,
}

// -----------------------------------------------------------------------------
// Unified entrypoint
// -----------------------------------------------------------------------------

#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    game::start_guess_mode()
}
