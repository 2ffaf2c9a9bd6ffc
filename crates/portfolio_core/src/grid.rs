//! Placement of project items into category containers.

use crate::dictionary::SiteData;
use crate::truncate::truncate;

/// Everything needed to draw one project tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridItem {
    pub id: String,
    pub title: String,
    pub image_src: String,
    pub image_alt: String,
    pub summary: String,
    pub date: String,
}

impl GridItem {
    pub fn from_data(data: &SiteData, name: &str, summary_budget: usize) -> Self {
        let projects = &data.projects;
        Self {
            id: name.to_string(),
            title: name.to_string(),
            image_src: projects.image_of(name).to_string(),
            image_alt: name.to_string(),
            summary: truncate(projects.text_of(name), summary_budget),
            date: projects.date_of(name).to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub container: String,
    pub item: GridItem,
}

/// Items grouped onto containers, plus names whose category has no container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridLayout {
    placements: Vec<Placement>,
    orphans: Vec<String>,
}

impl GridLayout {
    /// Lays out every known project against the containers present on the page.
    pub fn build<S: AsRef<str>>(data: &SiteData, containers: &[S], summary_budget: usize) -> Self {
        let mut layout = Self {
            placements: Vec::new(),
            orphans: Vec::new(),
        };

        for name in data.projects.names() {
            let category = data.projects.category_of(name);
            let Some(container) = containers.iter().find(|c| c.as_ref() == category) else {
                tracing::warn!(name, category, "no container for category, item not placed");
                layout.orphans.push(name.to_string());
                continue;
            };

            layout.placements.push(Placement {
                container: container.as_ref().to_string(),
                item: GridItem::from_data(data, name, summary_budget),
            });
        }

        layout
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Names whose category matched no container.
    pub fn orphans(&self) -> &[String] {
        &self.orphans
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Items placed into one container, in render order.
    pub fn in_container<'a>(&'a self, container: &'a str) -> impl Iterator<Item = &'a GridItem> + 'a {
        self.placements
            .iter()
            .filter(move |placement| placement.container == container)
            .map(|placement| &placement.item)
    }

    /// Finishes the render stage.
    pub fn ready(&self) -> GridReady {
        GridReady {
            item_ids: self
                .placements
                .iter()
                .map(|placement| placement.item.id.clone())
                .collect(),
        }
    }
}

/// Produced once the grid is attached; the popup controller binds to these ids.
/// Only [`GridLayout::ready`] constructs it.
///
/// ```compile_fail
/// let ready = portfolio_core::GridReady { item_ids: Vec::new() };
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridReady {
    item_ids: Vec<String>,
}

impl GridReady {
    pub fn item_ids(&self) -> &[String] {
        &self.item_ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::DictionaryBuilder;
    use crate::domain::ProjectRecord;

    fn record(name: &str, category: &str) -> ProjectRecord {
        ProjectRecord {
            name: name.to_string(),
            category: category.to_string(),
            date: "2023".to_string(),
            text: "A fairly long description of the project".to_string(),
            image: format!("images/{name}.png"),
            icon: None,
            link: None,
        }
    }

    fn data(records: Vec<ProjectRecord>) -> SiteData {
        let mut builder = DictionaryBuilder::new();
        builder.extend_projects(records);
        builder.finish()
    }

    #[test]
    fn item_count_matches_unique_names() {
        let data = data(vec![
            record("A", "software"),
            record("B", "hardware"),
            record("A", "software"),
            record("C", "software"),
        ]);
        let layout = GridLayout::build(&data, &["software", "hardware"], 180);

        assert_eq!(layout.len(), 3);
        assert!(layout.orphans.is_empty());
        let software: Vec<_> = layout.in_container("software").map(|i| i.id.as_str()).collect();
        assert_eq!(software, ["A", "C"]);
    }

    #[test]
    fn missing_container_leaves_item_unplaced() {
        let data = data(vec![record("A", "software"), record("B", "robotics")]);
        let layout = GridLayout::build(&data, &["software"], 180);

        assert_eq!(layout.len(), 1);
        assert_eq!(layout.orphans, vec!["B".to_string()]);
    }

    #[test]
    fn summary_is_truncated_to_the_budget() {
        let data = data(vec![record("A", "software")]);
        let layout = GridLayout::build(&data, &["software"], 10);

        assert_eq!(layout.placements[0].item.summary, "A fairly l…");
    }

    #[test]
    fn missing_image_renders_blank_reference() {
        let mut data = data(vec![record("A", "software")]);
        data.projects.image.shift_remove("A");
        let layout = GridLayout::build(&data, &["software"], 180);

        assert_eq!(layout.placements[0].item.image_src, "");
        assert_eq!(layout.placements[0].item.image_alt, "A");
    }

    #[test]
    fn ready_lists_placed_ids_only() {
        let data = data(vec![record("A", "software"), record("B", "robotics")]);
        let ready = GridLayout::build(&data, &["software"], 180).ready();

        assert_eq!(ready.item_ids(), ["A".to_string()]);
    }

    #[test]
    fn layout_exposes_placements_and_orphans_read_only() {
        let data = data(vec![record("A", "software"), record("B", "robotics")]);
        let layout = GridLayout::build(&data, &["software"], 180);

        let placed: Vec<_> = layout.placements().iter().map(|p| p.container.as_str()).collect();
        assert_eq!(placed, ["software"]);
        assert_eq!(layout.orphans(), ["B".to_string()]);
    }
}
