use crate::app::App;
use crate::ui::widgets::tables::{category_color, header_style, scroll_offset, selected_row_style};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap};
use ratatui::Frame;

pub fn render_projects(app: &App, f: &mut Frame<'_>, area: Rect) {
    let show_search = app.search_active || !app.search_query.is_empty();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(if show_search { 3 } else { 0 }),
            Constraint::Min(3),
        ])
        .split(area);

    if show_search {
        render_search_bar(app, f, chunks[0]);
    }

    if app.filtered_project_indices.is_empty() {
        let message = if app.placements().is_empty() {
            "No projects found."
        } else {
            "No projects match the search."
        };
        let paragraph = Paragraph::new(message)
            .block(
                Block::default()
                    .title("Projects")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            )
            .alignment(Alignment::Center);
        f.render_widget(paragraph, chunks[1]);
        return;
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    render_project_table(app, f, columns[0]);
    render_preview(app, f, columns[1]);
}

fn render_search_bar(app: &App, f: &mut Frame<'_>, area: Rect) {
    let cursor = if app.search_active { "_" } else { "" };
    let border = if app.search_active {
        Color::Yellow
    } else {
        Color::DarkGray
    };

    let search = Paragraph::new(TextLine::from(vec![
        Span::styled("/", Style::default().fg(Color::Yellow)),
        Span::raw(format!("{}{cursor}", app.search_query)),
    ]))
    .block(
        Block::default()
            .title(" Search ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border)),
    );

    f.render_widget(search, area);
}

fn category_style(app: &App, category: &str) -> Style {
    app.site
        .as_ref()
        .and_then(|site| {
            site.data
                .projects()
                .categories()
                .iter()
                .position(|c| *c == category)
        })
        .map_or_else(Style::default, |position| {
            Style::default().fg(category_color(position))
        })
}

fn render_project_table(app: &App, f: &mut Frame<'_>, area: Rect) {
    let header = Row::new(vec![
        Cell::from("Title"),
        Cell::from("Category"),
        Cell::from("Date"),
    ])
    .style(header_style());

    let total_rows = app.filtered_project_indices.len();
    let max_visible_rows = area.height.saturating_sub(3) as usize;
    let offset = scroll_offset(total_rows, max_visible_rows, app.selected_project_index);

    let rows = app
        .visible_projects()
        .enumerate()
        .skip(offset)
        .take(max_visible_rows)
        .map(|(i, placement)| {
            let style = if i == app.selected_project_index {
                selected_row_style()
            } else {
                category_style(app, &placement.container)
            };

            Row::new(vec![
                Cell::from(placement.item.title.clone()),
                Cell::from(placement.container.clone()),
                Cell::from(placement.item.date.clone()),
            ])
            .style(style)
        });

    let widths = [
        Constraint::Min(16),
        Constraint::Length(12),
        Constraint::Length(10),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(format!(
                    "Projects ({} of {})",
                    app.selected_project_index + 1,
                    total_rows
                ))
                .borders(Borders::ALL),
        )
        .column_spacing(1);

    f.render_widget(table, area);
}

fn render_preview(app: &App, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(" Preview ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let Some(placement) = app.selected_project() else {
        f.render_widget(block, area);
        return;
    };
    let item = &placement.item;
    let siblings = app
        .placements()
        .iter()
        .filter(|p| p.container == placement.container)
        .count();

    let lines = vec![
        TextLine::from(Span::styled(
            item.title.as_str(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        TextLine::from(Span::styled(
            item.date.as_str(),
            Style::default().fg(Color::Gray),
        )),
        TextLine::from(vec![
            Span::styled(
                placement.container.as_str(),
                category_style(app, &placement.container),
            ),
            Span::styled(
                format!(" ({siblings} projects)"),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        TextLine::from(""),
        TextLine::from(item.summary.as_str()),
        TextLine::from(""),
        TextLine::from(Span::styled(
            format!("Image: {}", item.image_src),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let preview = Paragraph::new(Text::from(lines))
        .block(block)
        .wrap(Wrap { trim: true });

    f.render_widget(preview, area);
}
