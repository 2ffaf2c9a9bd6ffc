use portfolio_core::SiteConfig;
use wasm_bindgen::JsValue;

use crate::dom::log_warning;

const CONFIG_GLOBAL: &str = "PORTFOLIO_CONFIG";

/// Reads `window.PORTFOLIO_CONFIG` over the defaults, if the page defines it.
pub fn read_config() -> SiteConfig {
    let Some(window) = web_sys::window() else {
        return SiteConfig::default();
    };

    let Ok(value) = js_sys::Reflect::get(&window, &JsValue::from_str(CONFIG_GLOBAL)) else {
        return SiteConfig::default();
    };

    if value.is_undefined() || value.is_null() {
        return SiteConfig::default();
    }

    match serde_wasm_bindgen::from_value::<SiteConfig>(value) {
        Ok(config) => config,
        Err(error) => {
            log_warning(&format!("Ignoring {CONFIG_GLOBAL}: {error}"));
            SiteConfig::default()
        }
    }
}
