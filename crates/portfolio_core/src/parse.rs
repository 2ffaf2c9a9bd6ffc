//! Parsers for the site's static text resources.
//!
//! Tables are line-oriented with `;` between fields and a header row.
//! Popup content is block-oriented: blocks end at a blank line or at a marker
//! line made only of `~`, the first line of a block is its key.

use crate::config::SiteConfig;
use crate::domain::{Course, ProjectRecord};
use crate::error::LoadError;

pub const FIELD_SEPARATOR: char = ';';
pub const BLOCK_MARKER: char = '~';

/// Splits a table into rows of trimmed fields, dropping the header row and any
/// blank rows.
pub fn table_rows<'a>(resource: &str, text: &'a str) -> Result<Vec<Vec<&'a str>>, LoadError> {
    let text = text.trim_start_matches('\u{feff}');
    if text.trim().is_empty() {
        return Err(LoadError::MissingHeader {
            resource: resource.to_string(),
        });
    }

    let rows = text
        .lines()
        .skip(1)
        .filter(|row| !row.trim().is_empty())
        .map(|row| row.split(FIELD_SEPARATOR).map(str::trim).collect())
        .collect();

    Ok(rows)
}

fn field<'a>(row: &[&'a str], index: usize) -> &'a str {
    row.get(index).copied().unwrap_or_default()
}

fn non_empty(value: &str) -> Option<&str> {
    (!value.is_empty()).then_some(value)
}

/// Parses `name;grade;ects;semester` rows.
pub fn parse_courses(resource: &str, text: &str) -> Result<Vec<Course>, LoadError> {
    let courses = table_rows(resource, text)?
        .into_iter()
        .map(|row| Course {
            name: field(&row, 0).to_string(),
            grade: field(&row, 1).to_string(),
            ects: field(&row, 2).to_string(),
            semester: field(&row, 3).to_string(),
        })
        .collect();

    Ok(courses)
}

/// Parses `name;category;date;text;image;icon;link` rows.
///
/// Rows without a name cannot be keyed and are skipped.
pub fn parse_projects(
    resource: &str,
    text: &str,
    config: &SiteConfig,
) -> Result<Vec<ProjectRecord>, LoadError> {
    let mut projects = Vec::new();

    for row in table_rows(resource, text)? {
        let name = field(&row, 0);
        if name.is_empty() {
            tracing::warn!(resource, "skipping project row without a name");
            continue;
        }

        projects.push(ProjectRecord {
            name: name.to_string(),
            category: field(&row, 1).to_string(),
            date: field(&row, 2).to_string(),
            text: field(&row, 3).to_string(),
            image: config.image_path(field(&row, 4)),
            icon: non_empty(field(&row, 5)).map(|icon| config.icon_path(icon)),
            link: non_empty(field(&row, 6)).map(str::to_string),
        });
    }

    Ok(projects)
}

fn is_block_boundary(line: &str) -> bool {
    let line = line.trim();
    line.is_empty() || line.chars().all(|c| c == BLOCK_MARKER)
}

/// Parses popup content blocks into `(name, html)` pairs in file order.
pub fn parse_blocks(text: &str) -> Vec<(String, String)> {
    let mut blocks = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in text.trim_start_matches('\u{feff}').lines() {
        if is_block_boundary(line) {
            push_block(&mut blocks, &mut current);
        } else {
            current.push(line);
        }
    }
    push_block(&mut blocks, &mut current);

    blocks
}

fn push_block(blocks: &mut Vec<(String, String)>, current: &mut Vec<&str>) {
    if let Some((key, body)) = current.split_first() {
        blocks.push((key.trim().to_string(), body.join("\n")));
    }
    current.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn course_row_maps_fields_in_order() -> Result<(), LoadError> {
        let text = "Name;Grade;ECTS;Semester\nIntro to Systems;7;5;F23\n";
        let courses = parse_courses("courses", text)?;

        assert_eq!(
            courses,
            vec![Course {
                name: "Intro to Systems".to_string(),
                grade: "7".to_string(),
                ects: "5".to_string(),
                semester: "F23".to_string(),
            }]
        );
        Ok(())
    }

    #[test]
    fn trailing_and_crlf_rows_are_tolerated() -> Result<(), LoadError> {
        let text = "Name;Grade;ECTS;Semester\r\nCalculus;10;5;E22\r\nPhysics;12;10;F23\r\n\r\n\n";
        let courses = parse_courses("courses", text)?;

        assert_eq!(courses.len(), 2);
        assert_eq!(courses[1].name, "Physics");
        assert_eq!(courses[1].semester, "F23");
        Ok(())
    }

    #[test]
    fn short_rows_yield_blank_fields() -> Result<(), LoadError> {
        let courses = parse_courses("courses", "h\nThesis;;30\n")?;

        assert_eq!(courses[0].grade, "");
        assert_eq!(courses[0].ects, "30");
        assert_eq!(courses[0].semester, "");
        Ok(())
    }

    #[test]
    fn empty_resource_reports_missing_header() {
        let result = parse_courses("DTU_Grades.csv", "  \n");

        assert!(matches!(
            result,
            Err(LoadError::MissingHeader { resource }) if resource == "DTU_Grades.csv"
        ));
    }

    #[test]
    fn project_paths_are_resolved() -> Result<(), LoadError> {
        let text = "name;category;date;text;image;icon;link\n\
                    Robot Arm;hardware;2023;Six axis arm;arm.jpg;github;https://example.com/arm\n\
                    Notes;software;2022;Plain notes;notes.png;;\n";
        let projects = parse_projects("projects", text, &SiteConfig::default())?;

        assert_eq!(projects[0].image, "images/arm.jpg");
        assert_eq!(projects[0].icon.as_deref(), Some("images/github.png"));
        assert_eq!(projects[0].link.as_deref(), Some("https://example.com/arm"));
        assert_eq!(projects[1].icon, None);
        assert_eq!(projects[1].link, None);
        Ok(())
    }

    #[test]
    fn nameless_project_rows_are_skipped() -> Result<(), LoadError> {
        let text = "header\n;software;2022\nKept;software;2022\n";
        let projects = parse_projects("projects", text, &SiteConfig::default())?;

        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].name, "Kept");
        Ok(())
    }

    #[test]
    fn blocks_split_on_blank_lines_and_markers() {
        let text = "Robot Arm\r\n<p>Six axis</p>\r\n<p>Servo driven</p>\r\n\r\n\
                    Notes\n<p>Plain</p>\n~~~\nEmpty\n";
        let blocks = parse_blocks(text);

        assert_eq!(
            blocks,
            vec![
                (
                    "Robot Arm".to_string(),
                    "<p>Six axis</p>\n<p>Servo driven</p>".to_string()
                ),
                ("Notes".to_string(), "<p>Plain</p>".to_string()),
                ("Empty".to_string(), String::new()),
            ]
        );
    }

    #[test]
    fn repeated_boundaries_do_not_create_empty_blocks() {
        let blocks = parse_blocks("\n\n~\n\nA\nbody\n\n\n~~\n");

        assert_eq!(blocks, vec![("A".to_string(), "body".to_string())]);
    }
}
