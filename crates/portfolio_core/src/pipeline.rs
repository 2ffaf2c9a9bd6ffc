//! The load stage: fetch every resource, parse what arrived and build the
//! dictionaries.

use std::future::Future;

use crate::config::SiteConfig;
use crate::dictionary::{DictionaryBuilder, SiteData};
use crate::error::LoadError;
use crate::parse::{parse_blocks, parse_courses, parse_projects};

/// Raw text of each resource, or why it could not be read.
#[derive(Debug)]
pub struct Resources {
    pub courses: Result<String, LoadError>,
    pub projects: Result<String, LoadError>,
    pub popup_html: Result<String, LoadError>,
}

/// Loaded data plus every failure met on the way. A failed resource only
/// leaves its own section empty.
#[derive(Debug)]
pub struct LoadReport {
    pub data: SiteData,
    pub failures: Vec<LoadError>,
}

pub fn build_site(resources: Resources, config: &SiteConfig) -> LoadReport {
    let mut builder = DictionaryBuilder::new();
    let mut failures = Vec::new();

    match resources
        .courses
        .and_then(|text| parse_courses(&config.courses_path, &text))
    {
        Ok(courses) => {
            builder.add_courses(courses);
        }
        Err(error) => failures.push(error),
    }

    match resources
        .projects
        .and_then(|text| parse_projects(&config.projects_path, &text, config))
    {
        Ok(projects) => {
            builder.extend_projects(projects);
        }
        Err(error) => failures.push(error),
    }

    match resources.popup_html {
        Ok(text) => {
            builder.add_popup_html(parse_blocks(&text));
        }
        Err(error) => failures.push(error),
    }

    for error in &failures {
        tracing::warn!(resource = error.resource(), %error, "resource not loaded");
    }

    LoadReport {
        data: builder.finish(),
        failures,
    }
}

/// Fetches the three resources in order with `fetch` and builds the site.
pub async fn load_site<F, Fut>(config: &SiteConfig, fetch: F) -> LoadReport
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<String, LoadError>>,
{
    let resources = Resources {
        courses: fetch(config.courses_path.clone()).await,
        projects: fetch(config.projects_path.clone()).await,
        popup_html: fetch(config.popup_html_path.clone()).await,
    };

    build_site(resources, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    const COURSES: &str = "Name;Grade;ECTS;Semester\nIntro to Systems;7;5;F23\n";
    const PROJECTS: &str = "name;category;date;text;image;icon;link\n\
                            Robot Arm;hardware;2023;Six axis;arm.jpg;github;https://example.com\n";
    const POPUPS: &str = "Robot Arm\n<p>detail</p>\n";

    async fn fake_fetch(path: String) -> Result<String, LoadError> {
        match path.as_str() {
            "DTU_Grades.csv" => Ok(COURSES.to_string()),
            "ProjectsHTML.csv" => Ok(PROJECTS.to_string()),
            "popup_html.txt" => Ok(POPUPS.to_string()),
            other => Err(LoadError::fetch(other, "not found")),
        }
    }

    #[tokio::test]
    async fn every_resource_lands_in_site_data() {
        let report = load_site(&SiteConfig::default(), fake_fetch).await;

        assert!(report.failures.is_empty());
        assert_eq!(report.data.courses.len(), 1);
        assert_eq!(report.data.projects.category_of("Robot Arm"), "hardware");
        assert_eq!(report.data.popup_html_of("Robot Arm"), Some("<p>detail</p>"));
    }

    #[tokio::test]
    async fn a_failed_resource_only_empties_its_section() {
        let config = SiteConfig {
            projects_path: "missing.csv".to_string(),
            ..SiteConfig::default()
        };
        let report = load_site(&config, fake_fetch).await;

        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].resource(), "missing.csv");
        assert!(report.data.projects.is_empty());
        assert_eq!(report.data.courses.len(), 1);
    }

    #[test]
    fn empty_table_is_reported_as_a_failure() {
        let report = build_site(
            Resources {
                courses: Ok(String::new()),
                projects: Ok(PROJECTS.to_string()),
                popup_html: Ok(String::new()),
            },
            &SiteConfig::default(),
        );

        assert!(matches!(
            report.failures.as_slice(),
            [LoadError::MissingHeader { .. }]
        ));
        assert_eq!(report.data.popup_count(), 0);
        assert_eq!(report.data.projects.len(), 1);
    }
}
