use crate::app::state::App;
use crossterm::event::KeyCode;

pub fn handle_search_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Esc => app.clear_search(),
        KeyCode::Enter => {
            // Keep the filter, return to navigation
            app.search_active = false;
        }
        KeyCode::Backspace => {
            app.search_query.pop();
            app.refresh_filter();
        }
        KeyCode::Char(c) => {
            app.search_query.push(c);
            app.selected_project_index = 0;
            app.refresh_filter();
        }
        _ => {}
    }
}
