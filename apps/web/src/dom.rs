use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, Window};

#[derive(Debug, Error)]
pub enum DomError {
    #[error("no global window")]
    NoWindow,

    #[error("window has no document")]
    NoDocument,

    #[error("element not found: {0}")]
    Missing(String),

    #[error("DOM call failed: {0}")]
    Js(String),
}

impl From<JsValue> for DomError {
    fn from(value: JsValue) -> Self {
        Self::Js(describe(&value))
    }
}

/// Best-effort text for a thrown JS value.
pub fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

pub fn window() -> Result<Window, DomError> {
    web_sys::window().ok_or(DomError::NoWindow)
}

pub fn document() -> Result<Document, DomError> {
    window()?.document().ok_or(DomError::NoDocument)
}

pub fn create_element(document: &Document, tag: &str, classes: &[&str]) -> Result<Element, DomError> {
    let element = document.create_element(tag)?;
    for class in classes {
        element.class_list().add_1(class)?;
    }
    Ok(element)
}

pub fn query_html(document: &Document, selector: &str) -> Result<HtmlElement, DomError> {
    document
        .query_selector(selector)?
        .and_then(|element| element.dyn_into::<HtmlElement>().ok())
        .ok_or_else(|| DomError::Missing(selector.to_string()))
}

pub fn query_all_html(document: &Document, selector: &str) -> Result<Vec<HtmlElement>, DomError> {
    let nodes = document.query_selector_all(selector)?;
    Ok((0..nodes.length())
        .filter_map(|index| nodes.item(index))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect())
}

/// Elements carrying `class`, in document order.
pub fn elements_by_class(document: &Document, class: &str) -> Vec<Element> {
    let collection = document.get_elements_by_class_name(class);
    (0..collection.length())
        .filter_map(|index| collection.item(index))
        .collect()
}

/// Replaces the `-open`/`-closed` variant of `base` on `element` with `class`.
pub fn swap_state_class(element: &Element, base: &str, class: &str) -> Result<(), DomError> {
    let classes = element.class_list();
    classes.remove_2(&format!("{base}-open"), &format!("{base}-closed"))?;
    classes.add_1(class)?;
    Ok(())
}

pub fn log_error(context: &str, error: &dyn std::fmt::Display) {
    web_sys::console::error_1(&format!("{context}: {error}").into());
}

pub fn log_warning(message: &str) {
    web_sys::console::warn_1(&message.into());
}
