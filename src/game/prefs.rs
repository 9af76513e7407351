//! Category preference persistence.
//!
//! The last chosen category is the only state that outlives the page
//! session. It sits behind a small injected store so the game glue never
//! reaches for ambient globals and host-side tests can swap in memory.

use crate::Category;

/// `localStorage` key, read once at startup and written on every change.
pub const PREFERENCE_KEY: &str = "selectedCategory";

pub trait PreferenceStore {
    fn load(&self) -> Option<Category>;
    fn store(&self, category: Category);
}

/// Browser store backed by `window.localStorage`. Storage being unavailable
/// (private mode, blocked cookies) degrades to "no preference"; the game
/// simply starts on the category picker.
pub struct LocalStorage;

impl PreferenceStore for LocalStorage {
    fn load(&self) -> Option<Category> {
        let storage = web_sys::window()?.local_storage().ok().flatten()?;
        let slug = storage.get_item(PREFERENCE_KEY).ok().flatten()?;
        Category::from_slug(&slug)
    }

    fn store(&self, category: Category) {
        if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
            let _ = storage.set_item(PREFERENCE_KEY, category.slug());
        }
    }
}

/// In-memory store for host-side tests.
#[derive(Default)]
pub struct MemoryStore(std::cell::Cell<Option<Category>>);

impl PreferenceStore for MemoryStore {
    fn load(&self) -> Option<Category> {
        self.0.get()
    }

    fn store(&self, category: Category) {
        self.0.set(Some(category));
    }
}
