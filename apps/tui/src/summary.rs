use crate::config::AppConfig;
use crate::loader::load_from_dir;
use color_eyre::Result;
use portfolio_core::{LoadReport, SiteData};

#[derive(Debug, serde::Serialize)]
pub struct SiteSummary {
    pub site_dir: String,
    pub courses: usize,
    pub total_ects: f64,
    pub projects: usize,
    pub by_category: Vec<(String, usize)>,
    pub prepared_popups: usize,
    pub composed_popups: Vec<String>,
    pub desynchronized: Vec<String>,
    pub failures: Vec<String>,
}

impl SiteSummary {
    pub fn from_report(site_dir: &str, report: &LoadReport) -> Self {
        let data = &report.data;
        let projects = data.projects();

        Self {
            site_dir: site_dir.to_string(),
            courses: data.courses().len(),
            total_ects: data.courses().iter().filter_map(|c| c.ects_points()).sum(),
            projects: projects.len(),
            by_category: category_counts(data),
            prepared_popups: projects
                .names()
                .filter(|name| data.popup_html_of(name).is_some())
                .count(),
            composed_popups: projects
                .names()
                .filter(|name| data.popup_html_of(name).is_none())
                .map(str::to_string)
                .collect(),
            desynchronized: projects.desynchronized(),
            failures: report.failures.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Projects per category, in first-appearance order.
pub fn category_counts(data: &SiteData) -> Vec<(String, usize)> {
    let projects = data.projects();
    projects
        .categories()
        .into_iter()
        .map(|category| {
            let count = projects
                .names()
                .filter(|name| projects.category_of(name) == category)
                .count();
            (category.to_string(), count)
        })
        .collect()
}

/// Load the site and print its summary without starting the UI
pub async fn run_headless(config: &AppConfig, json: bool) -> Result<()> {
    let report = load_from_dir(&config.site_dir, &config.site).await;
    let summary = SiteSummary::from_report(&config.site_dir.display().to_string(), &report);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", render_text(&summary));
    }

    Ok(())
}

pub fn render_text(summary: &SiteSummary) -> String {
    let mut lines = vec![
        String::new(),
        format!("Portfolio Site: {}", summary.site_dir),
        "=================".to_string(),
        format!("Courses: {} ({} ECTS)", summary.courses, summary.total_ects),
        format!("Projects: {}", summary.projects),
        format!(
            "Popups: {} prepared, {} composed",
            summary.prepared_popups,
            summary.composed_popups.len()
        ),
        String::new(),
        "Projects by Category:".to_string(),
    ];

    for (category, count) in &summary.by_category {
        let label = if category.is_empty() { "(none)" } else { category };
        lines.push(format!("- {label}: {count}"));
    }

    if !summary.desynchronized.is_empty() {
        lines.push(String::new());
        lines.push("Incomplete project entries:".to_string());
        lines.extend(summary.desynchronized.iter().map(|name| format!("- {name}")));
    }

    if !summary.failures.is_empty() {
        lines.push(String::new());
        lines.push("Load failures:".to_string());
        lines.extend(summary.failures.iter().map(|failure| format!("- {failure}")));
    }

    let mut text = lines.join("\n");
    text.push('\n');
    text
}
