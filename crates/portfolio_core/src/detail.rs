//! Popup detail content for one project.

use std::borrow::Cow;
use std::fmt::Write as _;

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::dictionary::SiteData;

/// The per-field view of one project, as shown in the popup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detail<'a> {
    pub name: &'a str,
    pub image: &'a str,
    pub date: &'a str,
    pub text: &'a str,
    pub icon: Option<&'a str>,
    pub link: Option<&'a str>,
}

impl<'a> Detail<'a> {
    pub fn lookup(data: &'a SiteData, name: &'a str) -> Self {
        let projects = &data.projects;
        Self {
            name,
            image: projects.image_of(name),
            date: projects.date_of(name),
            text: projects.text_of(name),
            icon: projects.icon_of(name),
            link: projects.link_of(name),
        }
    }

    /// Renders the fallback popup template. Every value is escaped.
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        let name_attr = encode_double_quoted_attribute(self.name);

        let _ = writeln!(
            html,
            r#"<div class="popup-image-div"><img src="{}" alt="{name_attr}"></div>"#,
            encode_double_quoted_attribute(self.image),
        );
        let _ = writeln!(html, r#"<h2 class="popup-title">{}</h2>"#, encode_text(self.name));
        let _ = writeln!(html, r#"<span class="date-text">{}</span>"#, encode_text(self.date));

        if let Some(link) = self.link {
            let icon = self.icon.map_or_else(String::new, |icon| {
                format!(
                    r#"<img class="popup-icon" src="{}" alt="">"#,
                    encode_double_quoted_attribute(icon)
                )
            });
            let _ = writeln!(
                html,
                r#"<a class="popup-link" href="{}">{icon}</a>"#,
                encode_double_quoted_attribute(link),
            );
        }

        let _ = write!(html, r#"<p class="popup-text">{}</p>"#, encode_text(self.text));
        html
    }
}

/// Popup markup for `name`: the prepared block when one exists, otherwise the
/// composed template.
pub fn popup_content<'a>(data: &'a SiteData, name: &'a str) -> Cow<'a, str> {
    data.popup_html_of(name).map_or_else(
        || Cow::Owned(Detail::lookup(data, name).to_html()),
        Cow::Borrowed,
    )
}

/// Drops markup from prepared popup blocks for plain-text display.
pub fn strip_tags(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;

    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }

    html_escape::decode_html_entities(&text).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::DictionaryBuilder;
    use crate::domain::ProjectRecord;

    fn data_with(link: Option<&str>, icon: Option<&str>) -> SiteData {
        let mut builder = DictionaryBuilder::new();
        builder.insert(ProjectRecord {
            name: "Robot <Arm>".to_string(),
            category: "hardware".to_string(),
            date: "2023".to_string(),
            text: "Servo & steppers".to_string(),
            image: "images/arm.jpg".to_string(),
            icon: icon.map(str::to_string),
            link: link.map(str::to_string),
        });
        builder.finish()
    }

    #[test]
    fn composed_template_escapes_values() {
        let data = data_with(None, None);
        let html = popup_content(&data, "Robot <Arm>");

        assert!(html.contains(r#"<h2 class="popup-title">Robot &lt;Arm&gt;</h2>"#));
        assert!(html.contains("Servo &amp; steppers"));
        assert!(html.contains(r#"src="images/arm.jpg""#));
        assert!(!html.contains("popup-link"));
    }

    #[test]
    fn link_and_icon_are_included_when_present() {
        let data = data_with(Some("https://example.com/arm"), Some("images/github.png"));
        let html = popup_content(&data, "Robot <Arm>");

        assert!(html.contains(r#"<a class="popup-link" href="https://example.com/arm">"#));
        assert!(html.contains(r#"<img class="popup-icon" src="images/github.png" alt="">"#));
    }

    #[test]
    fn prepared_block_wins_over_template() {
        let mut data = data_with(None, None);
        data.popup_html
            .insert("Robot <Arm>".to_string(), "<p>custom</p>".to_string());

        assert_eq!(popup_content(&data, "Robot <Arm>"), "<p>custom</p>");
    }

    #[test]
    fn unknown_name_composes_blank_fields() {
        let data = DictionaryBuilder::new().finish();
        let html = popup_content(&data, "Ghost");

        assert!(html.contains(r#"<img src="" alt="Ghost">"#));
        assert!(html.contains(r#"<span class="date-text"></span>"#));
    }

    #[test]
    fn strip_tags_keeps_text_and_decodes_entities() {
        assert_eq!(strip_tags("<p>Servo &amp; <b>steppers</b></p>"), "Servo & steppers");
    }
}
