use portfolio_core::LoadError;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

use crate::dom::describe;

/// Fetches a same-origin text resource.
pub async fn fetch_text(path: String) -> Result<String, LoadError> {
    let window = web_sys::window().ok_or_else(|| LoadError::fetch(&path, "no window"))?;

    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::SameOrigin);

    let request = Request::new_with_str_and_init(&path, &opts)
        .map_err(|error| LoadError::fetch(&path, describe(&error)))?;

    let response_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|error| LoadError::fetch(&path, describe(&error)))?;

    let response = response_value
        .dyn_into::<Response>()
        .map_err(|_| LoadError::fetch(&path, "Failed to read response"))?;

    if !response.ok() {
        return Err(LoadError::Status {
            resource: path,
            status: response.status(),
        });
    }

    let body = response
        .text()
        .map_err(|error| LoadError::fetch(&path, describe(&error)))?;
    let text = JsFuture::from(body)
        .await
        .map_err(|error| LoadError::fetch(&path, describe(&error)))?;

    text.as_string()
        .ok_or_else(|| LoadError::fetch(&path, "response body is not text"))
}
