//! Home page summary: one card per category with quick links into the
//! directory page.

use super::icon_view::IconView;
use super::loader::{CatalogLoader, LoadState};
use crate::shared::components::placeholder::{LoadErrorPanel, LoadingIndicator};
use crate::shared::dom::{fragment_url, DirectoryConfig};
use crate::shared::icons::icon;
use contracts::domain::a001_resource_catalog::{Category, IconContext};
use leptos::prelude::*;

pub const DIRECTORY_PAGE_PATH: &str = "/resource.html";
const QUICK_LINK_COUNT: usize = 3;

/// Label of the "more" link under each card.
pub fn more_text(category_id: &str) -> &'static str {
    match category_id {
        "toolbox" => "查看更多工具",
        "bookmark" => "查看全部收藏",
        "site" => "更多站点",
        "ai" => "AI工具集",
        _ => "查看更多",
    }
}

pub fn directory_link(category_id: &str) -> String {
    format!("{}{}", DIRECTORY_PAGE_PATH, fragment_url(category_id))
}

#[component]
pub fn HomeResourceCards(config: DirectoryConfig) -> impl IntoView {
    let loader = CatalogLoader::new(config.catalog_url);
    let reload = Callback::new(move |_: ()| loader.load(Callback::new(|_| {})));
    reload.run(());

    move || match loader.state.get() {
        LoadState::Loading => view! {
            <div class="col-span-full">
                <LoadingIndicator />
            </div>
        }
        .into_any(),
        LoadState::Failed(error) => view! {
            <LoadErrorPanel error=error on_retry=reload class="col-span-full bg-gray-50 rounded-xl" />
        }
        .into_any(),
        LoadState::Ready(catalog) => {
            let cards = catalog
                .categories()
                .iter()
                .map(|category| view! { <HomeCard category=category.clone() /> })
                .collect_view();
            cards.into_any()
        }
    }
}

#[component]
fn HomeCard(category: Category) -> impl IntoView {
    let color = category.color.as_str();
    let quick_links = category
        .resources
        .iter()
        .take(QUICK_LINK_COUNT)
        .map(|resource| {
            view! {
                <a
                    href=resource.url.clone()
                    target="_blank"
                    rel="noopener"
                    class=format!("px-2 py-1 bg-{0}-50 text-{0}-600 text-xs rounded hover:bg-{0}-100 transition-colors", color)
                >
                    {resource.name.clone()}
                </a>
            }
        })
        .collect_view();

    view! {
        <div class="resource-card group bg-white rounded-xl shadow-sm border border-gray-100 overflow-hidden transition-all duration-300 hover:-translate-y-2 hover:shadow-lg">
            <IconView
                descriptor=category.icon.clone()
                color=category.color
                context=IconContext::category()
                class=format!("w-16 h-16 bg-{0}-50 rounded-xl flex items-center justify-center mb-5 ml-5 mt-5 group-hover:bg-{0}-100 transition-colors", color)
            />
            <div class="p-5 md:p-6">
                <h3 class="text-lg font-semibold mb-3 text-gray-800">{category.name.clone()}</h3>
                <p class="text-gray-600 text-sm mb-4 line-clamp-2">{category.description_text().to_string()}</p>
                <div class="flex flex-wrap gap-2 mb-5">{quick_links}</div>
                <a
                    href=directory_link(&category.id)
                    class=format!("inline-flex items-center text-{0}-500 font-medium text-sm hover:text-{0}-600", color)
                >
                    {more_text(&category.id)}
                    {icon("arrow-right", "ml-1 text-xs")}
                </a>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_more_text() {
        assert_eq!(more_text("toolbox"), "查看更多工具");
        assert_eq!(more_text("bookmark"), "查看全部收藏");
        assert_eq!(more_text("site"), "更多站点");
        assert_eq!(more_text("ai"), "AI工具集");
        assert_eq!(more_text("music"), "查看更多");
    }

    #[test]
    fn test_directory_link() {
        assert_eq!(directory_link("ai"), "/resource.html#ai");
    }
}
