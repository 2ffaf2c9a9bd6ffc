use crate::app::state::App;
use crossterm::event::KeyCode;

pub fn handle_popup_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace | KeyCode::Char('q') => {
            app.close_popup();
        }
        KeyCode::Up | KeyCode::Char('k') => app.scroll_popup(false),
        KeyCode::Down | KeyCode::Char('j') => app.scroll_popup(true),
        _ => {}
    }
}
