//! Name-keyed lookup tables built from parsed records.
//!
//! Every project field lives in its own [`Dictionary`], all keyed by project
//! name. Insertion order is kept, so a repeated name stays where it first
//! appeared while its values are overwritten by the later row.

use indexmap::{IndexMap, IndexSet};

use crate::domain::{Course, ProjectRecord};

pub type Dictionary = IndexMap<String, String>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectDictionaries {
    pub(crate) category: Dictionary,
    pub(crate) date: Dictionary,
    pub(crate) text: Dictionary,
    pub(crate) image: Dictionary,
    pub(crate) icon: Dictionary,
    pub(crate) link: Dictionary,
}

impl ProjectDictionaries {
    /// Project names in render order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.category.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.category.len()
    }

    pub fn is_empty(&self) -> bool {
        self.category.is_empty()
    }

    /// Distinct categories in first-appearance order.
    pub fn categories(&self) -> Vec<&str> {
        let categories: IndexSet<&str> = self.category.values().map(String::as_str).collect();
        categories.into_iter().collect()
    }

    /// Looks a field up, treating a missing entry as blank.
    pub fn lookup<'a>(dictionary: &'a Dictionary, name: &str) -> &'a str {
        dictionary.get(name).map_or("", String::as_str)
    }

    pub fn category_of(&self, name: &str) -> &str {
        Self::lookup(&self.category, name)
    }

    pub fn date_of(&self, name: &str) -> &str {
        Self::lookup(&self.date, name)
    }

    pub fn text_of(&self, name: &str) -> &str {
        Self::lookup(&self.text, name)
    }

    pub fn image_of(&self, name: &str) -> &str {
        Self::lookup(&self.image, name)
    }

    pub fn icon_of(&self, name: &str) -> Option<&str> {
        self.icon.get(name).map(String::as_str)
    }

    pub fn link_of(&self, name: &str) -> Option<&str> {
        self.link.get(name).map(String::as_str)
    }

    /// Names present in some required table but missing from another.
    ///
    /// Icon and link are optional per record and are not checked.
    pub fn desynchronized(&self) -> Vec<String> {
        let required = [&self.category, &self.date, &self.text, &self.image];

        let names: IndexSet<&str> = required
            .iter()
            .flat_map(|dictionary| dictionary.keys().map(String::as_str))
            .collect();

        names
            .into_iter()
            .filter(|name| required.iter().any(|d| !d.contains_key(*name)))
            .map(str::to_string)
            .collect()
    }
}

/// The immutable result of one load cycle.
///
/// Only [`DictionaryBuilder::finish`] produces it, so holding a `SiteData` is
/// proof that every record has been processed.
///
/// ```compile_fail
/// let data = portfolio_core::SiteData::default();
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteData {
    pub(crate) courses: Vec<Course>,
    pub(crate) projects: ProjectDictionaries,
    pub(crate) popup_html: Dictionary,
}

impl SiteData {
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn projects(&self) -> &ProjectDictionaries {
        &self.projects
    }

    /// Number of prepared popup blocks.
    pub fn popup_count(&self) -> usize {
        self.popup_html.len()
    }

    pub fn popup_html_of(&self, name: &str) -> Option<&str> {
        self.popup_html.get(name).map(String::as_str)
    }
}

#[derive(Debug, Default)]
pub struct DictionaryBuilder {
    courses: Vec<Course>,
    projects: ProjectDictionaries,
    popup_html: Dictionary,
}

impl DictionaryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_courses(&mut self, courses: impl IntoIterator<Item = Course>) -> &mut Self {
        self.courses.extend(courses);
        self
    }

    /// Files every field of the record under its name, replacing an earlier
    /// record with the same name.
    pub fn insert(&mut self, record: ProjectRecord) -> &mut Self {
        let ProjectRecord {
            name,
            category,
            date,
            text,
            image,
            icon,
            link,
        } = record;

        let projects = &mut self.projects;
        projects.category.insert(name.clone(), category);
        projects.date.insert(name.clone(), date);
        projects.text.insert(name.clone(), text);
        projects.image.insert(name.clone(), image);
        match icon {
            Some(icon) => projects.icon.insert(name.clone(), icon),
            None => projects.icon.shift_remove(&name),
        };
        match link {
            Some(link) => projects.link.insert(name, link),
            None => projects.link.shift_remove(&name),
        };
        self
    }

    pub fn extend_projects(&mut self, records: impl IntoIterator<Item = ProjectRecord>) -> &mut Self {
        for record in records {
            self.insert(record);
        }
        self
    }

    pub fn add_popup_html(&mut self, blocks: impl IntoIterator<Item = (String, String)>) -> &mut Self {
        self.popup_html.extend(blocks);
        self
    }

    /// Ends the load cycle.
    pub fn finish(self) -> SiteData {
        let data = SiteData {
            courses: self.courses,
            projects: self.projects,
            popup_html: self.popup_html,
        };
        tracing::debug!(
            courses = data.courses.len(),
            projects = data.projects.len(),
            popups = data.popup_count(),
            "dictionaries ready"
        );
        data
    }
}
