use portfolio_core::{GridItem, GridLayout, GridReady, SiteConfig, SiteData};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlImageElement};

use crate::dom::{create_element, elements_by_class, log_warning, DomError};

pub const CONTAINER_CLASS: &str = "projects-grid-container";

/// Builds every project tile into the container named by its category and
/// reports which items made it onto the page.
pub fn render_project_grid(
    document: &Document,
    data: &SiteData,
    config: &SiteConfig,
) -> Result<GridReady, DomError> {
    let containers = elements_by_class(document, CONTAINER_CLASS);
    let ids: Vec<String> = containers.iter().map(Element::id).collect();
    let layout = GridLayout::build(data, ids.as_slice(), config.summary_budget);

    for name in layout.orphans() {
        log_warning(&format!(
            "Project '{name}' has category '{}' but no matching container",
            data.projects().category_of(name)
        ));
    }

    for placement in layout.placements() {
        let Some(container) =
            container_position(&ids, &placement.container).and_then(|index| containers.get(index))
        else {
            continue;
        };
        let item = build_item(document, &placement.item)?;
        container.append_child(&item)?;
    }

    Ok(layout.ready())
}

/// First container whose id matches; duplicate ids on the page resolve to
/// the earliest one, as `getElementById` would.
fn container_position(ids: &[String], container: &str) -> Option<usize> {
    ids.iter().position(|id| id == container)
}

fn build_item(document: &Document, item: &GridItem) -> Result<Element, DomError> {
    let project_item = create_element(document, "div", &["project-item"])?;
    project_item.set_id(&item.id);

    let image_container = create_element(document, "div", &["project-image-container"])?;
    let title = create_element(document, "h2", &["project-item-title"])?;
    title.set_text_content(Some(&item.title));

    let image = document
        .create_element("img")?
        .dyn_into::<HtmlImageElement>()
        .map_err(|_| DomError::Js("img is not an HtmlImageElement".to_string()))?;
    image.set_src(&item.image_src);
    image.set_alt(&item.image_alt);

    let text_container = create_element(document, "div", &["project-text-container"])?;
    let lower_title = document.create_element("h2")?;
    lower_title.set_text_content(Some(&item.title));

    let date = create_element(document, "span", &["date-text"])?;
    date.set_text_content(Some(&item.date));

    let summary = document.create_element("p")?;
    summary.set_text_content(Some(&item.summary));

    image_container.append_child(&title)?;
    image_container.append_child(&image)?;
    project_item.append_child(&image_container)?;
    text_container.append_child(&lower_title)?;
    text_container.append_child(&date)?;
    text_container.append_child(&summary)?;
    project_item.append_child(&text_container)?;

    Ok(project_item)
}

#[cfg(test)]
mod tests {
    use super::container_position;

    fn ids(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| (*name).to_string()).collect()
    }

    #[test]
    fn placement_finds_its_container() {
        let ids = ids(&["software", "hardware"]);
        assert_eq!(container_position(&ids, "hardware"), Some(1));
    }

    #[test]
    fn unknown_container_is_skipped() {
        assert_eq!(container_position(&ids(&["software"]), "art"), None);
    }

    #[test]
    fn duplicate_ids_resolve_to_the_first() {
        let ids = ids(&["software", "software"]);
        assert_eq!(container_position(&ids, "software"), Some(0));
    }
}
