use crate::domain::a001_resource_catalog::ui::directory::ResourceDirectory;
use crate::domain::a001_resource_catalog::ui::home_cards::HomeResourceCards;
use crate::shared::dom::{self, ContainerMissingError, DirectoryConfig};
use leptos::prelude::*;
use web_sys::HtmlElement;

/// Which enhanced page the static HTML is.
pub enum Page {
    Directory(HtmlElement),
    Home(HtmlElement),
}

/// The directory container wins; a page with neither container is a
/// broken page shell.
pub fn detect_page() -> Result<Page, ContainerMissingError> {
    if let Some(container) = dom::html_element_by_id(dom::CONTENT_CONTAINER_ID) {
        return Ok(Page::Directory(container));
    }
    if let Some(container) = dom::html_element_by_id(dom::HOME_CONTAINER_ID) {
        return Ok(Page::Home(container));
    }
    dom::require_element(dom::CONTENT_CONTAINER_ID).map(Page::Directory)
}

/// Mount the page's component into its container.
pub fn mount_page() -> Result<(), ContainerMissingError> {
    match detect_page()? {
        Page::Directory(container) => {
            let config = DirectoryConfig::from_container(&container);
            log::info!("Mounting resource directory ({})", config.catalog_url);
            container.set_inner_html("");
            leptos::mount::mount_to(container, move || view! { <ResourceDirectory config=config /> })
                .forget();
        }
        Page::Home(container) => {
            let config = DirectoryConfig::from_container(&container);
            log::info!("Mounting home resource cards ({})", config.catalog_url);
            container.set_inner_html("");
            leptos::mount::mount_to(container, move || view! { <HomeResourceCards config=config /> })
                .forget();
        }
    }
    Ok(())
}
