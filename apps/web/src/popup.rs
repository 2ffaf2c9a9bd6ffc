//! Click-to-open detail overlay.
//!
//! Visual state comes from the shared [`PopupMachine`]; this module only wires
//! DOM events into it and applies the resulting classes and styles.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use portfolio_core::detail::popup_content;
use portfolio_core::{
    ClickTarget, GridReady, PopupEvent, PopupMachine, PopupState, SiteConfig, SiteData,
};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, MouseEvent, Node};

use crate::animation::{after_delay, wait_for_next_frame};
use crate::dom::{log_error, log_warning, query_all_html, query_html, swap_state_class, DomError};

pub const OVERLAY_SELECTOR: &str = ".popup-overlay";
pub const CONTENT_SELECTOR: &str = ".popup-content";
pub const IMAGE_SELECTOR: &str = ".popup-image-div";
const BACKGROUND_SELECTOR: &str = "body > :not(.popup-overlay)";

struct Inner {
    document: Document,
    overlay: HtmlElement,
    content: HtmlElement,
    background: Vec<HtmlElement>,
    data: Rc<SiteData>,
    close_delay_ms: u32,
    machine: RefCell<PopupMachine>,
    outside_click: Closure<dyn FnMut(MouseEvent)>,
}

pub struct PopupController(Rc<Inner>);

impl PopupController {
    /// Hides the overlay and binds every rendered grid item to it.
    pub fn attach(
        document: &Document,
        data: Rc<SiteData>,
        config: &SiteConfig,
        ready: &GridReady,
    ) -> Result<Self, DomError> {
        let overlay = query_html(document, OVERLAY_SELECTOR)?;
        let content = query_html(document, CONTENT_SELECTOR)?;
        let background = query_all_html(document, BACKGROUND_SELECTOR)?;

        let inner = Rc::new_cyclic(|weak: &Weak<Inner>| {
            let weak = weak.clone();
            let outside_click = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
                if let Some(inner) = weak.upgrade() {
                    inner.on_overlay_click(&event);
                }
            });

            Inner {
                document: document.clone(),
                overlay,
                content,
                background,
                data,
                close_delay_ms: config.close_delay_ms,
                machine: RefCell::new(PopupMachine::new()),
                outside_click,
            }
        });

        inner.overlay.style().set_property("visibility", "hidden")?;
        inner.apply_classes(PopupState::Closed);

        let controller = Self(inner);
        for id in ready.item_ids() {
            controller.bind_item(id)?;
        }
        Ok(controller)
    }

    fn bind_item(&self, id: &str) -> Result<(), DomError> {
        let Some(item) = self.0.document.get_element_by_id(id) else {
            log_warning(&format!("Grid item '{id}' vanished before popup binding"));
            return Ok(());
        };

        let inner = Rc::clone(&self.0);
        let name = id.to_string();
        let on_click = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
            inner.on_item_click(&event, &name);
        });
        item.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();
        Ok(())
    }
}

impl Inner {
    fn process(&self, event: &PopupEvent) -> Option<PopupState> {
        self.machine.borrow_mut().process(event).ok()
    }

    fn on_item_click(self: &Rc<Self>, event: &MouseEvent, name: &str) {
        // Keep the overlay's own handler from seeing the click that opens it.
        event.stop_propagation();

        let Some(state) = self.process(&PopupEvent::ItemClicked(name.to_string())) else {
            return;
        };

        if let Err(error) = self.show(name) {
            log_error("Failed to open popup", &error);
        }
        self.apply_classes(state);

        let settled = Rc::clone(self);
        if let Err(error) = wait_for_next_frame(move || {
            if let Some(state) = settled.process(&PopupEvent::FramesSettled) {
                settled.apply_classes(state);
            }
        }) {
            log_error("Failed to schedule image reveal", &error);
        }
    }

    fn show(&self, name: &str) -> Result<(), DomError> {
        self.overlay.style().set_property("visibility", "visible")?;
        self.overlay
            .add_event_listener_with_callback("click", self.outside_click.as_ref().unchecked_ref())?;

        for element in &self.background {
            element.style().set_property("z-index", "0")?;
        }
        if let Some(body) = self.document.body() {
            body.style().set_property("overflow", "hidden")?;
        }

        self.content.set_scroll_top(0);
        self.content.set_inner_html(&popup_content(&self.data, name));
        Ok(())
    }

    fn on_overlay_click(self: &Rc<Self>, event: &MouseEvent) {
        let target = self.click_target(event);
        let Some(state) = self.process(&PopupEvent::Click(target)) else {
            return;
        };
        if target == ClickTarget::Content {
            return;
        }

        if let Err(error) = self.hide_background_effects() {
            log_error("Failed to restore page after popup", &error);
        }
        self.apply_classes(state);

        let ticket = self.machine.borrow().close_ticket();
        let fading = Rc::clone(self);
        if let Err(error) = after_delay(self.close_delay_ms, move || fading.fade_elapsed(ticket)) {
            log_error("Failed to schedule popup hide", &error);
        }
    }

    fn click_target(&self, event: &MouseEvent) -> ClickTarget {
        let Some(node) = event.target().and_then(|t| t.dyn_into::<Node>().ok()) else {
            return ClickTarget::Content;
        };

        ClickTarget::classify(
            self.overlay.is_same_node(Some(&node)),
            self.content.contains(Some(&node)),
        )
    }

    fn hide_background_effects(&self) -> Result<(), DomError> {
        self.overlay
            .remove_event_listener_with_callback("click", self.outside_click.as_ref().unchecked_ref())?;

        for element in &self.background {
            element.style().remove_property("z-index")?;
        }
        if let Some(body) = self.document.body() {
            body.style().remove_property("overflow")?;
        }
        Ok(())
    }

    fn fade_elapsed(&self, ticket: u64) {
        // A stale ticket means the popup was reopened during the fade.
        let Some(state) = self.process(&PopupEvent::FadeElapsed { ticket }) else {
            return;
        };

        if let Err(error) = self.overlay.style().set_property("visibility", "hidden") {
            log_error("Failed to hide popup", &DomError::from(error));
        }
        self.apply_classes(state);
    }

    fn apply_classes(&self, state: PopupState) {
        let result = swap_state_class(&self.overlay, "popup-overlay", &state.overlay_class())
            .and_then(|()| swap_state_class(&self.content, "popup-content", &state.content_class()))
            .and_then(|()| {
                match self.content.query_selector(IMAGE_SELECTOR)? {
                    Some(image) => swap_state_class(&image, "popup-image-div", &state.image_class()),
                    None => Ok(()),
                }
            });

        if let Err(error) = result {
            log_error("Failed to apply popup state", &error);
        }
    }
}
