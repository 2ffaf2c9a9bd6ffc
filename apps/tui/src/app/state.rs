use crate::config::AppConfig;
use crate::loader::spawn_load;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use portfolio_core::detail::{popup_content, strip_tags};
use portfolio_core::{
    ClickTarget, Course, GridLayout, LoadReport, Placement, PopupEvent, PopupMachine, PopupState,
    SiteConfig, SiteData,
};
use ratatui::style::Color;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tachyonfx::{fx, Effect, Interpolation};
use throbber_widgets_tui::ThrobberState;
use tokio::sync::oneshot::{self, error::TryRecvError};

/// Redraws the popup waits before revealing it, standing in for the two
/// animation frames a browser needs to settle layout.
const SETTLE_FRAMES: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Courses,
    Projects,
}

impl Tab {
    pub const ALL: [Self; 2] = [Self::Courses, Self::Projects];

    pub const fn title(self) -> &'static str {
        match self {
            Self::Courses => "Courses",
            Self::Projects => "Projects",
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::Courses => 0,
            Self::Projects => 1,
        }
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Courses),
            1 => Some(Self::Projects),
            _ => None,
        }
    }
}

/// Title and plain-text body of the open popup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupView {
    pub title: String,
    pub date: String,
    pub body: String,
    pub link: Option<String>,
}

/// One finished load cycle and the layout built from it.
#[derive(Debug)]
pub struct LoadedSite {
    pub data: SiteData,
    pub layout: GridLayout,
}

pub struct App {
    pub running: bool,
    pub tab: Tab,
    pub site_dir: PathBuf,
    pub site_config: SiteConfig,
    pub loading: Option<oneshot::Receiver<LoadReport>>,
    /// `None` until the first load cycle finishes.
    pub site: Option<LoadedSite>,
    pub failures: Vec<String>,
    pub status_message: String,
    pub selected_course_index: usize,
    pub selected_project_index: usize,
    pub search_active: bool,
    pub search_query: String,
    pub filtered_project_indices: Vec<usize>,
    pub popup: PopupMachine,
    pub popup_scroll: u16,
    pub popup_fx: Mutex<Option<Effect>>,
    pub opening_frames: u8,
    pub close_deadline: Option<(Instant, u64)>,
    pub throbber_state: ThrobberState,
    pub show_help: bool,
    pub last_frame: Instant,
    pub last_tick: Duration,
}

impl App {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            running: true,
            tab: Tab::Projects,
            site_dir: config.site_dir.clone(),
            site_config: config.site.clone(),
            loading: None,
            site: None,
            failures: Vec::new(),
            status_message: String::new(),
            selected_course_index: 0,
            selected_project_index: 0,
            search_active: false,
            search_query: String::new(),
            filtered_project_indices: Vec::new(),
            popup: PopupMachine::new(),
            popup_scroll: 0,
            popup_fx: Mutex::new(None),
            opening_frames: 0,
            close_deadline: None,
            throbber_state: ThrobberState::default(),
            show_help: false,
            last_frame: Instant::now(),
            last_tick: Duration::ZERO,
        }
    }

    /// Starts reading the site directory on a background task.
    pub fn start_loading(&mut self) {
        tracing::info!(site_dir = %self.site_dir.display(), "loading site");
        self.loading = Some(spawn_load(self.site_dir.clone(), self.site_config.clone()));
        self.status_message = "Loading site...".to_string();
    }

    pub const fn is_loading(&self) -> bool {
        self.loading.is_some()
    }

    pub fn update(&mut self) {
        let now = Instant::now();
        self.last_tick = now.duration_since(self.last_frame);
        self.last_frame = now;

        if self.is_loading() {
            self.throbber_state.calc_next();
        }

        self.poll_loader();
        self.advance_popup(now);
    }

    fn poll_loader(&mut self) {
        let Some(receiver) = self.loading.as_mut() else {
            return;
        };

        match receiver.try_recv() {
            Ok(report) => {
                self.loading = None;
                self.apply_report(report);
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Closed) => {
                self.loading = None;
                tracing::error!("site loader stopped without a result");
                self.status_message = "Error: site loader stopped".to_string();
            }
        }
    }

    /// Replaces the current site with a freshly loaded one.
    pub fn apply_report(&mut self, report: LoadReport) {
        for failure in &report.failures {
            tracing::warn!(%failure, "resource unavailable");
        }

        let desynchronized = report.data.projects().desynchronized();
        if !desynchronized.is_empty() {
            tracing::warn!(?desynchronized, "projects missing fields");
        }

        self.failures = report.failures.iter().map(ToString::to_string).collect();

        // The companion has one container per category, so nothing is orphaned.
        let containers = report.data.projects().categories();
        let layout = GridLayout::build(
            &report.data,
            containers.as_slice(),
            self.site_config.summary_budget,
        );
        self.site = Some(LoadedSite {
            data: report.data,
            layout,
        });

        self.selected_course_index = 0;
        self.selected_project_index = 0;
        self.refresh_filter();

        self.status_message = if self.failures.is_empty() {
            format!(
                "Loaded {} courses and {} projects",
                self.courses().len(),
                self.placements().len()
            )
        } else {
            format!("Error: {}", self.failures.join("; "))
        };
    }

    /// Recomputes the visible projects from the search query, best match
    /// first. An empty query shows every project in grid order.
    pub fn refresh_filter(&mut self) {
        let query = self.search_query.trim();
        if query.is_empty() {
            self.filtered_project_indices = (0..self.placements().len()).collect();
        } else {
            let matcher = SkimMatcherV2::default();
            let mut scored: Vec<(i64, usize)> = self
                .placements()
                .iter()
                .enumerate()
                .filter_map(|(index, placement)| {
                    let haystack = format!("{} {}", placement.item.title, placement.container);
                    matcher
                        .fuzzy_match(&haystack, query)
                        .map(|score| (score, index))
                })
                .collect();
            scored.sort_by(|a, b| b.0.cmp(&a.0));
            self.filtered_project_indices = scored.into_iter().map(|(_, index)| index).collect();
        }

        if self.selected_project_index >= self.filtered_project_indices.len() {
            self.selected_project_index = self.filtered_project_indices.len().saturating_sub(1);
        }
    }

    pub fn clear_search(&mut self) {
        self.search_active = false;
        self.search_query.clear();
        self.refresh_filter();
    }

    /// Courses of the loaded site, empty before the first load.
    pub fn courses(&self) -> &[Course] {
        self.site
            .as_ref()
            .map(|site| site.data.courses())
            .unwrap_or_default()
    }

    /// Every placed project in grid order, empty before the first load.
    pub fn placements(&self) -> &[Placement] {
        self.site
            .as_ref()
            .map(|site| site.layout.placements())
            .unwrap_or_default()
    }

    pub fn visible_projects(&self) -> impl Iterator<Item = &Placement> {
        let placements = self.placements();
        self.filtered_project_indices
            .iter()
            .filter_map(move |&index| placements.get(index))
    }

    pub fn selected_project(&self) -> Option<&Placement> {
        self.filtered_project_indices
            .get(self.selected_project_index)
            .and_then(|&index| self.placements().get(index))
    }

    /// Number of rows in the list on the current tab.
    pub fn current_len(&self) -> usize {
        match self.tab {
            Tab::Courses => self.courses().len(),
            Tab::Projects => self.filtered_project_indices.len(),
        }
    }

    pub fn selected_index_mut(&mut self) -> &mut usize {
        match self.tab {
            Tab::Courses => &mut self.selected_course_index,
            Tab::Projects => &mut self.selected_project_index,
        }
    }

    fn process_popup(&mut self, event: &PopupEvent) -> Option<PopupState> {
        match self.popup.process(event) {
            Ok(state) => {
                tracing::debug!(%event, %state, "popup transition");
                Some(state)
            }
            Err(error) => {
                tracing::debug!(%error, "popup event ignored");
                None
            }
        }
    }

    /// Opens the popup for the selected project.
    pub fn open_selected(&mut self) {
        let Some(name) = self.selected_project().map(|p| p.item.id.clone()) else {
            return;
        };

        if self.process_popup(&PopupEvent::ItemClicked(name)).is_some() {
            self.opening_frames = 0;
            self.popup_scroll = 0;
            self.close_deadline = None;
            self.set_popup_fx(fx::fade_from_fg(
                Color::Black,
                (self.site_config.close_delay_ms, Interpolation::QuadOut),
            ));
        }
    }

    /// Starts the closing fade; the popup hides once the close delay passes.
    pub fn close_popup(&mut self) {
        if self.process_popup(&PopupEvent::Click(ClickTarget::Overlay)).is_some() {
            let deadline = Instant::now() + self.site_config.close_delay();
            self.close_deadline = Some((deadline, self.popup.close_ticket()));
            self.set_popup_fx(fx::fade_to_fg(
                Color::Black,
                (self.site_config.close_delay_ms, Interpolation::QuadIn),
            ));
        }
    }

    /// Interaction inside the popup panel; it stays open.
    pub fn scroll_popup(&mut self, down: bool) {
        if self.process_popup(&PopupEvent::Click(ClickTarget::Content)).is_some() {
            self.popup_scroll = if down {
                self.popup_scroll.saturating_add(1)
            } else {
                self.popup_scroll.saturating_sub(1)
            };
        }
    }

    fn advance_popup(&mut self, now: Instant) {
        if self.popup.state() == PopupState::Opening {
            self.opening_frames = self.opening_frames.saturating_add(1);
            if self.opening_frames >= SETTLE_FRAMES {
                self.process_popup(&PopupEvent::FramesSettled);
            }
        }

        if let Some((deadline, ticket)) = self.close_deadline {
            if now >= deadline {
                self.close_deadline = None;
                if self.process_popup(&PopupEvent::FadeElapsed { ticket }).is_some() {
                    self.clear_popup_fx();
                }
            }
        }
    }

    fn set_popup_fx(&self, effect: Effect) {
        if let Ok(mut slot) = self.popup_fx.lock() {
            *slot = Some(effect);
        }
    }

    fn clear_popup_fx(&self) {
        if let Ok(mut slot) = self.popup_fx.lock() {
            *slot = None;
        }
    }

    /// Plain-text rendition of the popup for the current item.
    pub fn popup_view(&self) -> Option<PopupView> {
        if !self.popup.state().is_visible() {
            return None;
        }
        let name = self.popup.item()?;
        let data = &self.site.as_ref()?.data;
        let projects = data.projects();

        let body = strip_tags(&popup_content(data, name))
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n");

        Some(PopupView {
            title: name.to_string(),
            date: projects.date_of(name).to_string(),
            body,
            link: projects.link_of(name).map(str::to_string),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use portfolio_core::{build_site, Resources};

    fn config() -> AppConfig {
        AppConfig {
            site_dir: PathBuf::from("."),
            site: SiteConfig {
                close_delay_ms: 0,
                ..SiteConfig::default()
            },
            log_file: PathBuf::from("portfolio_tui.log"),
            scrape_dir: PathBuf::from("scraped_pages"),
            debug: false,
        }
    }

    fn report() -> LoadReport {
        build_site(
            Resources {
                courses: Ok("Name;Grade;ECTS;Semester\nIntro to Systems;7;5;F23\n".to_string()),
                projects: Ok(concat!(
                    "name;category;date;text;image;icon;link\n",
                    "Robot Arm;hardware;2023;Six axis arm;arm.jpg;;https://example.com/arm\n",
                    "Web Shop;software;2022;Online store;shop.jpg;;\n",
                    "Drone;hardware;2024;Quadcopter;drone.jpg;;\n",
                )
                .to_string()),
                popup_html: Ok("Drone\n<h2>Drone</h2>\n<p>Flies &amp; hovers</p>\n".to_string()),
            },
            &SiteConfig::default(),
        )
    }

    fn loaded_app() -> App {
        let mut app = App::new(&config());
        app.apply_report(report());
        app
    }

    #[test]
    fn apply_report_places_every_project() {
        let app = loaded_app();

        let site = app.site.as_ref().unwrap();
        assert_eq!(site.layout.len(), 3);
        assert!(site.layout.orphans().is_empty());
        assert_eq!(app.filtered_project_indices, vec![0, 1, 2]);
        assert_eq!(app.status_message, "Loaded 1 courses and 3 projects");
    }

    #[test]
    fn search_narrows_and_clear_restores() {
        let mut app = loaded_app();
        app.search_query = "drone".to_string();
        app.refresh_filter();

        let titles: Vec<_> = app.visible_projects().map(|p| p.item.title.as_str()).collect();
        assert_eq!(titles, ["Drone"]);

        app.clear_search();
        assert_eq!(app.visible_projects().count(), 3);
    }

    #[test]
    fn popup_opens_after_settling_and_closes_after_delay() {
        let mut app = loaded_app();
        app.selected_project_index = 2;

        app.open_selected();
        assert_eq!(app.popup.state(), PopupState::Opening);

        app.update();
        app.update();
        assert_eq!(app.popup.state(), PopupState::Open);

        let view = app.popup_view().unwrap();
        assert_eq!(view.title, "Drone");
        assert_eq!(view.body, "Drone\nFlies & hovers");

        app.close_popup();
        assert_eq!(app.popup.state(), PopupState::Closing);
        assert!(app.popup_view().is_some());

        app.update();
        assert_eq!(app.popup.state(), PopupState::Closed);
        assert!(app.popup_view().is_none());
    }

    #[test]
    fn reopening_during_fade_ignores_the_stale_close() {
        let mut app = loaded_app();
        app.open_selected();
        app.close_popup();

        app.selected_project_index = 1;
        app.open_selected();
        app.update();
        app.update();

        assert_eq!(app.popup.state(), PopupState::Open);
        assert_eq!(app.popup.item(), Some("Web Shop"));
    }

    #[test]
    fn composed_popup_is_used_without_prepared_markup() {
        let mut app = loaded_app();
        app.open_selected();

        let view = app.popup_view().unwrap();
        assert_eq!(view.title, "Robot Arm");
        assert!(view.body.contains("Six axis arm"));
        assert_eq!(view.link.as_deref(), Some("https://example.com/arm"));
    }

    #[test]
    fn failures_are_reported_in_status() {
        let mut app = App::new(&config());
        app.apply_report(build_site(
            Resources {
                courses: Err(portfolio_core::LoadError::fetch("DTU_Grades.csv", "gone")),
                projects: Ok(String::new()),
                popup_html: Ok(String::new()),
            },
            &SiteConfig::default(),
        ));

        assert!(app.status_message.starts_with("Error: "));
        assert!(app.status_message.contains("DTU_Grades.csv"));
    }

    #[tokio::test]
    async fn loader_result_is_picked_up_on_update() {
        let mut app = App::new(&config());
        let (sender, receiver) = oneshot::channel();
        app.loading = Some(receiver);
        sender.send(report()).ok();

        app.update();

        assert!(!app.is_loading());
        assert_eq!(app.placements().len(), 3);
    }

    #[test]
    fn nothing_is_shown_before_the_first_load() {
        let mut app = App::new(&config());

        assert!(app.site.is_none());
        assert!(app.courses().is_empty());
        assert_eq!(app.visible_projects().count(), 0);
        assert_eq!(app.current_len(), 0);

        app.open_selected();
        assert_eq!(app.popup.state(), PopupState::Closed);
        assert!(app.popup_view().is_none());
    }
}
