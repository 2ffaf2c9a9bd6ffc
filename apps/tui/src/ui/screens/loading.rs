use crate::app::App;
use crate::ui::widgets::popup::centered_rect;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;
use throbber_widgets_tui::{Throbber, WhichUse, BRAILLE_SIX};

pub fn render_loading(app: &App, f: &mut Frame<'_>, area: Rect) {
    f.render_widget(Block::default().borders(Borders::ALL), area);

    let throbber = Throbber::default()
        .label(format!("Loading {} ...", app.site_dir.display()))
        .style(Style::default().fg(Color::Cyan))
        .throbber_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .throbber_set(BRAILLE_SIX)
        .use_type(WhichUse::Spin);

    // The throbber advances in App::update; rendering works on a copy
    let mut state = app.throbber_state.clone();
    let line = centered_rect(60, 10, area);
    f.render_stateful_widget(throbber, line, &mut state);
}
