use crate::app::App;
use portfolio_core::PopupState;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::Buffer;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Widget, Wrap};
use ratatui::Frame;
use tachyonfx::EffectRenderer;

pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1]);

    horizontal_layout[1]
}

pub struct ClearWidget;

impl Widget for ClearWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        ratatui::widgets::Clear.render(area, buf);
    }
}

/// Draws the detail overlay for the item held by the popup machine.
pub fn render_project_popup(app: &App, f: &mut Frame<'_>) {
    let Some(view) = app.popup_view() else {
        return;
    };
    let state = app.popup.state();

    // Dim the page behind the overlay while it is opening or open
    if state.suppresses_background() {
        let area = f.area();
        f.render_widget(
            Block::default().style(Style::default().fg(Color::DarkGray)),
            area,
        );
    }

    let area = centered_rect(70, 70, f.area());
    f.render_widget(ClearWidget, area);

    let mut lines = vec![TextLine::from(Span::styled(
        view.date.as_str(),
        Style::default().fg(Color::Gray),
    ))];

    // The image is only revealed once layout has settled
    if state == PopupState::Open {
        let image = app
            .site
            .as_ref()
            .map_or("", |site| site.data.projects().image_of(&view.title));
        if !image.is_empty() {
            lines.push(TextLine::from(Span::styled(
                format!("[image: {image}]"),
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    lines.push(TextLine::from(""));
    lines.extend(view.body.lines().map(|line| TextLine::from(line.to_string())));

    if let Some(link) = &view.link {
        lines.push(TextLine::from(""));
        lines.push(TextLine::from(vec![
            Span::styled("Link: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                link.as_str(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::UNDERLINED),
            ),
        ]));
    }

    let popup = Paragraph::new(Text::from(lines))
        .block(
            Block::default()
                .title(format!(" {} ", view.title))
                .title_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )
                .title_bottom(" Esc: close  ↑/↓: scroll ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: true })
        .scroll((app.popup_scroll, 0));

    f.render_widget(popup, area);

    if let Ok(mut effect) = app.popup_fx.lock() {
        if let Some(effect) = effect.as_mut() {
            f.buffer_mut().render_effect(effect, area, app.last_tick);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::centered_rect;
    use ratatui::layout::Rect;

    #[test]
    fn centered_rect_sits_in_the_middle() {
        let area = centered_rect(50, 50, Rect::new(0, 0, 100, 40));
        assert_eq!(area, Rect::new(25, 10, 50, 20));
    }
}
