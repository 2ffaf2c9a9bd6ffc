mod animation;
mod config;
mod courses;
mod dom;
mod fetch;
mod grid;
mod popup;

use std::rc::Rc;

use portfolio_core::{load_site, SiteConfig};
use wasm_bindgen_futures::spawn_local;

use crate::dom::{log_error, log_warning, DomError};
use crate::popup::PopupController;

fn main() {
    let config = config::read_config();

    if let Ok(json) = serde_json::to_string(&config) {
        web_sys::console::log_1(&format!("Portfolio config: {json}").into());
    }

    spawn_local(async move {
        if let Err(error) = run(config).await {
            log_error("Portfolio page setup failed", &error);
        }
    });
}

/// load -> render courses and projects -> bind the popup.
async fn run(config: SiteConfig) -> Result<(), DomError> {
    let report = load_site(&config, fetch::fetch_text).await;
    for failure in &report.failures {
        log_error("Error loading resource", failure);
    }

    let desynchronized = report.data.projects().desynchronized();
    if !desynchronized.is_empty() {
        log_warning(&format!(
            "Project tables disagree on: {}",
            desynchronized.join(", ")
        ));
    }

    let data = Rc::new(report.data);
    let document = dom::document()?;

    courses::render_courses(&document, data.courses())?;
    let ready = grid::render_project_grid(&document, &data, &config)?;

    // Item click closures keep the controller alive for the page's lifetime.
    PopupController::attach(&document, data, &config, &ready)?;
    Ok(())
}
