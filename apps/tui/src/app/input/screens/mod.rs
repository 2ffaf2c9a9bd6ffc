use crate::app::state::App;
use crossterm::event::KeyCode;

mod help;
mod lists;
mod popup;
mod search;

pub fn dispatch_input(app: &mut App, key: KeyCode) {
    if help::handle_help_toggle(app, key) {
        return;
    }

    // The popup captures every key while it is shown.
    if app.popup.state().is_visible() {
        popup::handle_popup_input(app, key);
        return;
    }

    if app.search_active {
        search::handle_search_input(app, key);
        return;
    }

    lists::handle_list_input(app, key);
}
