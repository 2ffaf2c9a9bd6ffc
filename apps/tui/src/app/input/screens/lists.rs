use crate::app::input::helpers::{step_clamped, wrap_decrement, wrap_increment};
use crate::app::state::{App, Tab};
use crossterm::event::KeyCode;

const PAGE_ROWS: isize = 5;

pub fn handle_list_input(app: &mut App, key: KeyCode) {
    let total_rows = app.current_len();

    match key {
        KeyCode::Char('q') => {
            app.running = false;
        }
        KeyCode::Esc => {
            if !app.search_query.is_empty() {
                app.clear_search();
            }
        }
        KeyCode::Tab | KeyCode::Right => {
            let next = wrap_increment(app.tab.index(), Tab::ALL.len());
            app.tab = Tab::from_index(next).unwrap_or(app.tab);
        }
        KeyCode::BackTab | KeyCode::Left => {
            let previous = wrap_decrement(app.tab.index(), Tab::ALL.len());
            app.tab = Tab::from_index(previous).unwrap_or(app.tab);
        }
        KeyCode::Char('1') => app.tab = Tab::Courses,
        KeyCode::Char('2') => app.tab = Tab::Projects,
        KeyCode::Char('/') if app.tab == Tab::Projects => {
            app.search_active = true;
        }
        KeyCode::Char('r') => {
            if !app.is_loading() {
                app.start_loading();
            }
        }
        KeyCode::Enter if app.tab == Tab::Projects => app.open_selected(),
        KeyCode::Up => move_selection(app, -1, total_rows),
        KeyCode::Down => move_selection(app, 1, total_rows),
        KeyCode::PageUp => move_selection(app, -PAGE_ROWS, total_rows),
        KeyCode::PageDown => move_selection(app, PAGE_ROWS, total_rows),
        KeyCode::Home => *app.selected_index_mut() = 0,
        KeyCode::End => *app.selected_index_mut() = total_rows.saturating_sub(1),
        _ => {}
    }
}

fn move_selection(app: &mut App, step: isize, total_rows: usize) {
    let index = app.selected_index_mut();
    *index = step_clamped(*index, step, total_rows);
}
