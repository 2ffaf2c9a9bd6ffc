use dotenv::dotenv;
use portfolio_core::SiteConfig;
use std::env;
use std::path::PathBuf;

/// Settings for one run of the companion, resolved from `.env`, the process
/// environment and CLI overrides (applied to the environment beforehand).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub site_dir: PathBuf,
    pub site: SiteConfig,
    pub log_file: PathBuf,
    pub scrape_dir: PathBuf,
    pub debug: bool,
}

/// Initializes the application configuration
pub fn init_app_config() -> AppConfig {
    // Load environment variables from .env file
    dotenv().ok();

    AppConfig {
        site_dir: get_site_dir(),
        site: site_config_from(|key| env::var(key).ok()),
        log_file: get_log_file(),
        scrape_dir: get_scrape_dir(),
        debug: env::var("DEBUG").is_ok_and(|value| !value.is_empty() && value != "0"),
    }
}

/// Builds the resource settings from a variable lookup, keeping defaults for
/// anything unset or unparsable.
pub fn site_config_from(lookup: impl Fn(&str) -> Option<String>) -> SiteConfig {
    let mut config = SiteConfig::default();

    if let Some(path) = lookup("PORTFOLIO_COURSES") {
        config.courses_path = path;
    }
    if let Some(path) = lookup("PORTFOLIO_PROJECTS") {
        config.projects_path = path;
    }
    if let Some(path) = lookup("PORTFOLIO_POPUPS") {
        config.popup_html_path = path;
    }
    if let Some(dir) = lookup("PORTFOLIO_IMAGE_DIR") {
        config.image_dir = dir;
    }
    if let Some(budget) = lookup("PORTFOLIO_SUMMARY_BUDGET").and_then(|v| v.trim().parse().ok()) {
        config.summary_budget = budget;
    }
    if let Some(delay) = lookup("PORTFOLIO_CLOSE_DELAY_MS").and_then(|v| v.trim().parse().ok()) {
        config.close_delay_ms = delay;
    }

    config
}

/// Gets the directory the site's resources are read from
pub fn get_site_dir() -> PathBuf {
    env::var("PORTFOLIO_SITE_DIR").map_or_else(|_| PathBuf::from("."), PathBuf::from)
}

/// Gets the log file path
pub fn get_log_file() -> PathBuf {
    env::var("PORTFOLIO_LOG_FILE")
        .map_or_else(|_| PathBuf::from("logs/portfolio_tui.log"), PathBuf::from)
}

/// Gets the directory scraped pages are saved to
pub fn get_scrape_dir() -> PathBuf {
    env::var("PORTFOLIO_SCRAPE_DIR").map_or_else(|_| PathBuf::from("scraped_pages"), PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::site_config_from;
    use portfolio_core::SiteConfig;
    use std::collections::HashMap;

    #[test]
    fn unset_variables_keep_defaults() {
        assert_eq!(site_config_from(|_| None), SiteConfig::default());
    }

    #[test]
    fn variables_override_resource_settings() {
        let vars = HashMap::from([
            ("PORTFOLIO_PROJECTS", "data/projects.csv"),
            ("PORTFOLIO_SUMMARY_BUDGET", " 60 "),
            ("PORTFOLIO_CLOSE_DELAY_MS", "not a number"),
        ]);
        let config = site_config_from(|key| vars.get(key).map(|v| (*v).to_string()));

        assert_eq!(config.projects_path, "data/projects.csv");
        assert_eq!(config.summary_budget, 60);
        assert_eq!(config.close_delay_ms, 400);
    }
}
