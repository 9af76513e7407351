//! Round fetch against the catalog proxy.

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

use crate::{Category, Track};

/// `GET /random-song?category={slug}` on the serving origin. Any failure —
/// transport, non-2xx status, malformed payload — comes back as a `JsValue`
/// for the console; the user-facing message is uniform either way.
pub async fn fetch_round(category: Category) -> Result<Track, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let url = format!("/random-song?category={}", category.slug());
    let resp: Response = JsFuture::from(window.fetch_with_str(&url)).await?.dyn_into()?;
    if !resp.ok() {
        return Err(JsValue::from_str(&format!(
            "round fetch returned HTTP {}",
            resp.status()
        )));
    }
    let body = JsFuture::from(resp.text()?)
        .await?
        .as_string()
        .ok_or_else(|| JsValue::from_str("round fetch body was not text"))?;
    serde_json::from_str(&body).map_err(|err| JsValue::from_str(&format!("bad track payload: {err}")))
}
