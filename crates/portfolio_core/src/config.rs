use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Where the site's static resources live and how they are presented.
///
/// Every field has a default, so a partial override (a `.env` file, CLI flags
/// or a `PORTFOLIO_CONFIG` object on the host page) only needs to name the
/// values it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub courses_path: String,
    pub projects_path: String,
    pub popup_html_path: String,
    pub image_dir: String,
    pub icon_extension: String,
    pub summary_budget: usize,
    pub close_delay_ms: u32,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            courses_path: "DTU_Grades.csv".to_string(),
            projects_path: "ProjectsHTML.csv".to_string(),
            popup_html_path: "popup_html.txt".to_string(),
            image_dir: "images/".to_string(),
            icon_extension: "png".to_string(),
            summary_budget: 180,
            close_delay_ms: 400,
        }
    }
}

impl SiteConfig {
    /// Delay between starting the close transition and hiding the overlay.
    pub fn close_delay(&self) -> Duration {
        Duration::from_millis(u64::from(self.close_delay_ms))
    }

    pub fn image_path(&self, file: &str) -> String {
        if file.is_empty() {
            return String::new();
        }
        format!("{}{file}", self.image_dir)
    }

    pub fn icon_path(&self, icon: &str) -> String {
        format!("{}{icon}.{}", self.image_dir, self.icon_extension)
    }
}

#[cfg(test)]
mod tests {
    use super::SiteConfig;
    use std::time::Duration;

    #[test]
    fn partial_json_keeps_remaining_defaults() -> Result<(), serde_json::Error> {
        let config: SiteConfig = serde_json::from_str(r#"{"image_dir": "assets/"}"#)?;

        assert_eq!(config.image_dir, "assets/");
        assert_eq!(config.projects_path, "ProjectsHTML.csv");
        assert_eq!(config.close_delay(), Duration::from_millis(400));
        Ok(())
    }

    #[test]
    fn paths_are_resolved_under_the_image_dir() {
        let config = SiteConfig::default();

        assert_eq!(config.image_path("robot.jpg"), "images/robot.jpg");
        assert_eq!(config.image_path(""), "");
        assert_eq!(config.icon_path("github"), "images/github.png");
    }
}
