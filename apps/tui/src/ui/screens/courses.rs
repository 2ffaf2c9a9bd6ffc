use crate::app::App;
use crate::ui::widgets::tables::{header_style, scroll_offset, selected_row_style};
use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

pub fn render_courses(app: &App, f: &mut Frame<'_>, area: Rect) {
    let courses = app.courses();

    if courses.is_empty() {
        let block = Block::default()
            .title("Courses")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow));
        let paragraph = Paragraph::new("No courses found.")
            .block(block)
            .alignment(Alignment::Center);
        f.render_widget(paragraph, area);
        return;
    }

    let header = Row::new(vec![
        Cell::from("Name"),
        Cell::from("Grade"),
        Cell::from("ECTS"),
        Cell::from("Semester"),
    ])
    .style(header_style());

    let total_rows = courses.len();
    let max_visible_rows = area.height.saturating_sub(3) as usize;
    let offset = scroll_offset(total_rows, max_visible_rows, app.selected_course_index);

    let rows = courses
        .iter()
        .enumerate()
        .skip(offset)
        .take(max_visible_rows)
        .map(|(i, course)| {
            let style = if i == app.selected_course_index {
                selected_row_style()
            } else {
                Style::default()
            };
            Row::new(course.cells().map(|(_, value)| Cell::from(value.to_string()))).style(style)
        });

    let total_ects: f64 = courses.iter().filter_map(|c| c.ects_points()).sum();

    let widths = [
        Constraint::Min(24),
        Constraint::Length(7),
        Constraint::Length(6),
        Constraint::Length(10),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(format!(
                    "Courses ({} of {}, {total_ects} ECTS)",
                    app.selected_course_index + 1,
                    total_rows
                ))
                .borders(Borders::ALL),
        )
        .column_spacing(1);

    f.render_widget(table, area);
}
