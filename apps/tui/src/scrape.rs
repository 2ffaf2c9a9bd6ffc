//! Saves web pages (HTML, PDF, ...) to disk, one file per URL.

use chrono::{DateTime, Utc};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                              (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_FILENAME_LEN: usize = 200;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrapeStatus {
    Success,
    Failed,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScrapeOutcome {
    pub url: String,
    pub status: ScrapeStatus,
    pub path: Option<PathBuf>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScrapeReport {
    pub success: usize,
    pub failed: usize,
    pub details: Vec<ScrapeOutcome>,
    pub finished_at: DateTime<Utc>,
}

/// Adds `https://` to URLs without a scheme.
pub fn normalize_url(url: &str) -> String {
    let url = url.trim();
    if url.starts_with("http://") || url.starts_with("https://") || url.starts_with("file://") {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}

/// Host and path of a URL, without scheme, query or fragment.
fn split_url(url: &str) -> (&str, &str) {
    let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
    let rest = rest.split(['?', '#']).next().unwrap_or_default();
    rest.split_once('/').unwrap_or((rest, ""))
}

/// Turns a URL into a safe file name: host and path joined with `_`, every
/// other unsafe character replaced by `_`, runs of `_` collapsed.
pub fn sanitize_filename(url: &str) -> String {
    let (host, path) = split_url(url);
    let path = path.trim_matches('/');
    let raw = if path.is_empty() {
        host.to_string()
    } else {
        format!("{host}_{path}")
    };

    let mut filename = String::with_capacity(raw.len());
    for c in raw.chars() {
        let safe = c.is_alphanumeric() || matches!(c, '_' | '-' | '.');
        let c = if safe { c } else { '_' };
        if c == '_' && filename.ends_with('_') {
            continue;
        }
        filename.push(c);
    }

    filename
        .trim_matches('_')
        .chars()
        .take(MAX_FILENAME_LEN)
        .collect()
}

/// File extension for a response, from its content type first and the URL
/// path second. Pages default to `html`.
pub fn detect_content_type(url: &str, content_type: Option<&str>) -> &'static str {
    let content_type = content_type.unwrap_or_default().to_lowercase();
    let by_header = [
        ("application/pdf", "pdf"),
        ("text/html", "html"),
        ("text/plain", "txt"),
        ("application/json", "json"),
        ("application/xml", "xml"),
        ("text/xml", "xml"),
    ];
    if let Some((_, ext)) = by_header.iter().find(|(mime, _)| content_type.contains(mime)) {
        return *ext;
    }

    let path = split_url(url).1.to_lowercase();
    let by_extension = [
        (".pdf", "pdf"),
        (".html", "html"),
        (".htm", "html"),
        (".txt", "txt"),
        (".json", "json"),
        (".xml", "xml"),
    ];
    by_extension
        .iter()
        .find(|(suffix, _)| path.ends_with(suffix))
        .map_or("html", |(_, ext)| *ext)
}

fn build_client() -> Result<Client, ScrapeError> {
    Ok(Client::builder()
        .user_agent(USER_AGENT)
        .timeout(REQUEST_TIMEOUT)
        .build()?)
}

async fn fetch(client: &Client, url: &str) -> Result<(Vec<u8>, Option<String>), ScrapeError> {
    if let Some(local) = url.strip_prefix("file://") {
        return Ok((tokio::fs::read(local).await?, None));
    }

    let response = client.get(url).send().await?.error_for_status()?;
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let body = response.bytes().await?;

    Ok((body.to_vec(), content_type))
}

async fn scrape_one(client: &Client, url: &str, output_dir: &Path) -> Result<PathBuf, ScrapeError> {
    tracing::info!(url, "scraping");
    let (body, content_type) = fetch(client, url).await?;

    let extension = detect_content_type(url, content_type.as_deref());
    let path = output_dir.join(format!("{}.{extension}", sanitize_filename(url)));

    tokio::fs::create_dir_all(output_dir).await?;
    tokio::fs::write(&path, body).await?;

    tracing::info!(url, path = %path.display(), "saved");
    Ok(path)
}

/// Scrapes every URL in turn. A failure is recorded and the rest continue.
pub async fn scrape_pages(urls: &[String], output_dir: &Path) -> ScrapeReport {
    let mut report = ScrapeReport {
        success: 0,
        failed: 0,
        details: Vec::with_capacity(urls.len()),
        finished_at: Utc::now(),
    };

    if urls.is_empty() {
        tracing::warn!("no URLs provided");
        return report;
    }

    let client = match build_client() {
        Ok(client) => Some(client),
        Err(error) => {
            tracing::error!(%error, "could not build HTTP client");
            None
        }
    };

    for url in urls {
        let url = normalize_url(url);
        let result = match &client {
            Some(client) => scrape_one(client, &url, output_dir).await,
            None => Err(ScrapeError::Io(std::io::Error::other("HTTP client unavailable"))),
        };

        let outcome = match result {
            Ok(path) => {
                report.success += 1;
                ScrapeOutcome {
                    url,
                    status: ScrapeStatus::Success,
                    path: Some(path),
                    error: None,
                }
            }
            Err(error) => {
                tracing::error!(url = %url, %error, "scrape failed");
                report.failed += 1;
                ScrapeOutcome {
                    url,
                    status: ScrapeStatus::Failed,
                    path: None,
                    error: Some(error.to_string()),
                }
            }
        };
        report.details.push(outcome);
    }

    report.finished_at = Utc::now();
    tracing::info!(success = report.success, failed = report.failed, "scraping complete");
    report
}

pub fn render_report(report: &ScrapeReport) -> String {
    let mut lines = vec![
        "Results:".to_string(),
        format!("Successfully scraped: {}", report.success),
        format!("Failed to scrape: {}", report.failed),
        format!(
            "Finished at: {}",
            report.finished_at.format("%Y-%m-%d %H:%M:%S UTC")
        ),
    ];

    if !report.details.is_empty() {
        lines.push(String::new());
        lines.push("Details:".to_string());
        for detail in &report.details {
            let status = match detail.status {
                ScrapeStatus::Success => "success",
                ScrapeStatus::Failed => "failed",
            };
            match &detail.error {
                Some(error) => lines.push(format!("  {}: {status} ({error})", detail.url)),
                None => lines.push(format!("  {}: {status}", detail.url)),
            }
        }
    }

    lines.join("\n")
}

/// The report as pretty JSON, for `--json`.
pub fn render_report_json(report: &ScrapeReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn sanitize_filename_keeps_host_and_path() {
        assert_eq!(sanitize_filename("https://example.com"), "example.com");
        assert_eq!(
            sanitize_filename("https://example.com/path/to/page"),
            "example.com_path_to_page"
        );
        assert_eq!(
            sanitize_filename("https://sub.example.com/page?param=value"),
            "sub.example.com_page"
        );
        assert_eq!(
            sanitize_filename("https://example.com/path with spaces"),
            "example.com_path_with_spaces"
        );
        assert_eq!(
            sanitize_filename("https://example.com/<invalid>chars"),
            "example.com_invalid_chars"
        );
    }

    #[test]
    fn sanitize_filename_caps_length() {
        let url = format!("https://example.com/{}", "a".repeat(400));
        assert_eq!(sanitize_filename(&url).chars().count(), 200);
    }

    #[test]
    fn content_type_header_wins_over_extension() {
        assert_eq!(detect_content_type("https://example.com/file.pdf", Some("application/pdf")), "pdf");
        assert_eq!(
            detect_content_type("https://example.com/page", Some("text/html; charset=utf-8")),
            "html"
        );
        assert_eq!(detect_content_type("https://example.com/data.txt", Some("application/json")), "json");
    }

    #[test]
    fn extension_and_default_fallbacks() {
        assert_eq!(detect_content_type("https://example.com/cv.PDF?dl=1", None), "pdf");
        assert_eq!(detect_content_type("https://example.com/feed.xml", Some("")), "xml");
        assert_eq!(detect_content_type("https://example.com/unknown", None), "html");
    }

    #[test]
    fn scheme_is_added_only_when_missing() {
        assert_eq!(normalize_url("example.com"), "https://example.com");
        assert_eq!(normalize_url("http://example.com"), "http://example.com");
        assert_eq!(normalize_url("file:///tmp/page.html"), "file:///tmp/page.html");
    }

    #[tokio::test]
    async fn saves_pages_and_records_failures() -> Result<(), Box<dyn std::error::Error>> {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cv"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "application/pdf")
                    .set_body_bytes(b"%PDF-1.4".to_vec()),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let out = tempfile::tempdir()?;
        let urls = vec![format!("{}/cv", server.uri()), format!("{}/missing", server.uri())];
        let report = scrape_pages(&urls, out.path()).await;

        assert_eq!(report.success, 1);
        assert_eq!(report.failed, 1);
        let saved = report.details[0].path.clone().ok_or("no path recorded")?;
        assert_eq!(saved.extension().and_then(|e| e.to_str()), Some("pdf"));
        assert_eq!(std::fs::read(saved)?, b"%PDF-1.4");
        assert_eq!(report.details[1].status, ScrapeStatus::Failed);
        Ok(())
    }

    #[tokio::test]
    async fn file_urls_are_copied_from_disk() -> Result<(), Box<dyn std::error::Error>> {
        let source = tempfile::tempdir()?;
        let page = source.path().join("page.html");
        std::fs::write(&page, "<h1>Test Content</h1>")?;

        let out = tempfile::tempdir()?;
        let urls = vec![format!("file://{}", page.display())];
        let report = scrape_pages(&urls, out.path()).await;

        assert_eq!(report.success, 1);
        let saved = report.details[0].path.clone().ok_or("no path recorded")?;
        assert_eq!(std::fs::read_to_string(saved)?, "<h1>Test Content</h1>");
        Ok(())
    }

    #[test]
    fn report_lists_each_url() {
        let report = ScrapeReport {
            success: 1,
            failed: 0,
            details: vec![ScrapeOutcome {
                url: "https://example.com".to_string(),
                status: ScrapeStatus::Success,
                path: None,
                error: None,
            }],
            finished_at: Utc::now(),
        };

        let text = render_report(&report);
        assert!(text.contains("Successfully scraped: 1"));
        assert!(text.contains("  https://example.com: success"));
    }

    fn finished_report() -> ScrapeReport {
        ScrapeReport {
            success: 0,
            failed: 1,
            details: vec![ScrapeOutcome {
                url: "https://example.com/missing".to_string(),
                status: ScrapeStatus::Failed,
                path: None,
                error: Some("HTTP 404".to_string()),
            }],
            finished_at: DateTime::from_timestamp(1_714_566_600, 0).unwrap_or_default(),
        }
    }

    #[test]
    fn report_shows_finish_time_and_failure_reason() {
        let text = render_report(&finished_report());

        assert!(text.contains("Finished at: 2024-05-01 12:30:00 UTC"));
        assert!(text.contains("  https://example.com/missing: failed (HTTP 404)"));
    }

    #[test]
    fn json_report_carries_status_and_timestamp() -> serde_json::Result<()> {
        let json: serde_json::Value = serde_json::from_str(&render_report_json(&finished_report())?)?;

        assert_eq!(json["failed"], 1);
        assert_eq!(json["details"][0]["status"], "failed");
        assert_eq!(json["details"][0]["error"], "HTTP 404");
        assert_eq!(json["finished_at"], "2024-05-01T12:30:00Z");
        Ok(())
    }
}
