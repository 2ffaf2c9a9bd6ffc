// UI module for portfolio_tui
// Lays out the frame and delegates to the tab screens and overlays

pub mod screens;
pub mod widgets;

use crate::app::{App, Tab};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Tabs};
use ratatui::Frame;

pub fn ui(app: &App, f: &mut Frame<'_>) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tabs
            Constraint::Min(5),    // Content area
            Constraint::Length(3), // Status area
            Constraint::Length(1), // Shortcuts hint
        ])
        .split(f.area().inner(Margin::new(1, 0)));

    render_tabs(app, f, layout[0]);

    if app.is_loading() && app.site.is_none() {
        screens::loading::render_loading(app, f, layout[1]);
    } else {
        match app.tab {
            Tab::Courses => screens::courses::render_courses(app, f, layout[1]),
            Tab::Projects => screens::projects::render_projects(app, f, layout[1]),
        }
    }

    render_status(app, f, layout[2]);
    render_shortcuts(f, layout[3]);

    if app.popup.state().is_visible() {
        widgets::popup::render_project_popup(app, f);
    }

    if app.show_help {
        screens::help::render_help(f);
    }
}

fn render_tabs(app: &App, f: &mut Frame<'_>, area: Rect) {
    let titles: Vec<TextLine<'_>> = Tab::ALL
        .iter()
        .map(|tab| TextLine::from(format!(" {} {} ", tab.index() + 1, tab.title())))
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.tab.index())
        .block(
            Block::default()
                .title(" Portfolio ")
                .title_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

    f.render_widget(tabs, area);
}

fn render_status(app: &App, f: &mut Frame<'_>, area: Rect) {
    let style = if app.status_message.starts_with("Error") {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Green)
    };

    let status = Paragraph::new(Span::styled(app.status_message.as_str(), style)).block(
        Block::default()
            .title(" Status ")
            .title_style(Style::default().fg(Color::Yellow))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );

    f.render_widget(status, area);
}

fn render_shortcuts(f: &mut Frame<'_>, area: Rect) {
    let key_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let shortcuts = [
        ("Tab", "Switch"),
        ("↑/↓", "Navigate"),
        ("Enter", "Details"),
        ("/", "Search"),
        ("r", "Reload"),
        ("F1", "Help"),
        ("q", "Quit"),
    ];

    let mut spans = Vec::with_capacity(shortcuts.len() * 2);
    for (key, action) in shortcuts {
        spans.push(Span::styled(key, key_style));
        spans.push(Span::raw(format!(": {action}   ")));
    }

    f.render_widget(
        Paragraph::new(TextLine::from(spans)).alignment(Alignment::Center),
        area,
    );
}
