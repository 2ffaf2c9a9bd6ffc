use crate::cli::CliArgs;
use crate::ui::widgets::popup::{centered_rect, ClearWidget};
use ratatui::layout::Alignment;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

const SHORTCUTS: [(&str, &str); 12] = [
    ("F1", "Toggle this help"),
    ("Tab / ← →", "Switch between Courses and Projects"),
    ("1 / 2", "Jump to Courses / Projects"),
    ("↑ / ↓", "Move the selection"),
    ("PgUp / PgDn", "Jump 5 rows"),
    ("Home / End", "First / last row"),
    ("Enter", "Open the project popup"),
    ("Esc", "Close the popup or clear the search"),
    ("↑ / ↓ (popup)", "Scroll the popup"),
    ("/", "Fuzzy search projects"),
    ("r", "Reload the site directory"),
    ("q", "Quit"),
];

pub fn render_help(f: &mut Frame<'_>) {
    let popup_area = centered_rect(70, 80, f.area());
    f.render_widget(ClearWidget, popup_area);

    let key_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let help = Paragraph::new(Text::from(help_lines(key_style)))
        .block(
            Block::default()
                .title("== Help & Keyboard Shortcuts ==")
                .title_style(key_style)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        )
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: false });

    f.render_widget(help, popup_area);
}

fn help_lines(key_style: Style) -> Vec<TextLine<'static>> {
    let mut lines = vec![
        TextLine::from(Span::styled(
            "Portfolio Previewer",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        TextLine::from(""),
        TextLine::from("Browse the courses and projects of a portfolio site directory."),
        TextLine::from(""),
    ];
    lines.extend(SHORTCUTS.iter().map(|(key, action)| {
        TextLine::from(vec![
            Span::styled(format!("  {key:<15}"), key_style),
            Span::raw(*action),
        ])
    }));

    lines.push(TextLine::from(""));
    lines.push(TextLine::from(Span::styled(
        "CLI Options:",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    // clap's usage line and section headers add nothing inside the popup
    lines.extend(
        CliArgs::help_text()
            .lines()
            .filter(|line| {
                !(line.starts_with("Usage") || line.starts_with("Options") || line.trim().is_empty())
            })
            .map(|line| TextLine::from(line.to_string())),
    );

    lines
}
