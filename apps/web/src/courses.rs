use portfolio_core::Course;
use web_sys::Document;

use crate::dom::{create_element, log_warning, DomError};

pub const COURSE_GRID_ID: &str = "course-grid";

/// Appends one row per course to `#course-grid`. Returns the number of rows
/// attached.
pub fn render_courses(document: &Document, courses: &[Course]) -> Result<usize, DomError> {
    let Some(grid) = document.get_element_by_id(COURSE_GRID_ID) else {
        if !courses.is_empty() {
            log_warning(&format!("No #{COURSE_GRID_ID} on this page, courses not shown"));
        }
        return Ok(0);
    };

    for course in courses {
        let row = create_element(document, "div", &["course-row", "hover-shadow"])?;
        for (field, value) in course.cells() {
            let cell = create_element(document, "p", &["course-item", field])?;
            cell.set_text_content(Some(value));
            row.append_child(&cell)?;
        }
        grid.append_child(&row)?;
    }

    Ok(courses.len())
}
