use portfolio_core::{load_site, LoadError, LoadReport, SiteConfig};
use std::path::{Path, PathBuf};
use tokio::sync::oneshot;

/// Reads the site's resources from `site_dir` and builds the dictionaries.
pub async fn load_from_dir(site_dir: &Path, config: &SiteConfig) -> LoadReport {
    load_site(config, |resource| read_resource(site_dir.join(&resource), resource)).await
}

async fn read_resource(file: PathBuf, resource: String) -> Result<String, LoadError> {
    tracing::debug!(path = %file.display(), "reading resource");
    tokio::fs::read_to_string(&file)
        .await
        .map_err(|source| LoadError::Io { resource, source })
}

/// Loads on a background task; the receiver yields the report once.
pub fn spawn_load(site_dir: PathBuf, config: SiteConfig) -> oneshot::Receiver<LoadReport> {
    let (sender, receiver) = oneshot::channel();
    tokio::spawn(async move {
        let report = load_from_dir(&site_dir, &config).await;
        if sender.send(report).is_err() {
            tracing::debug!("load finished after the UI stopped waiting");
        }
    });
    receiver
}
