use super::icon_view::IconView;
use crate::shared::dom::fragment_url;
use contracts::domain::a001_resource_catalog::{BrowserSession, Catalog, IconContext};
use leptos::prelude::*;
use std::sync::Arc;

pub fn sidebar_item_class(active: bool) -> &'static str {
    if active {
        "category-item active flex items-center gap-3 px-3 py-2.5 rounded-lg hover:bg-gray-100 transition-colors bg-primary/5 text-primary"
    } else {
        "category-item flex items-center gap-3 px-3 py-2.5 rounded-lg hover:bg-gray-100 transition-colors"
    }
}

/// `<li>` entries for the page's category list.
#[component]
pub fn CategorySidebar(
    catalog: Arc<Catalog>,
    session: RwSignal<BrowserSession>,
    #[prop(into)] on_select: Callback<String>,
) -> impl IntoView {
    let active_id = Memo::new(move |_| session.with(|s| s.active_category_id().to_string()));

    let items = catalog
        .categories()
        .iter()
        .map(|category| {
            let id = category.id.clone();
            let is_active = {
                let id = id.clone();
                move || active_id.with(|active| *active == id)
            };
            let on_click = {
                let id = id.clone();
                move |ev: leptos::ev::MouseEvent| {
                    ev.prevent_default();
                    on_select.run(id.clone());
                }
            };

            view! {
                <li>
                    <a
                        href=fragment_url(&id)
                        class=move || sidebar_item_class(is_active())
                        data-category=id.clone()
                        on:click=on_click
                    >
                        <IconView
                            descriptor=category.icon.clone()
                            color=category.color
                            context=IconContext::category().with_size(IconContext::SIDEBAR_PX)
                            class="w-5 text-center"
                        />
                        <span class="flex-1">{category.name.clone()}</span>
                        <span class="bg-gray-100 text-gray-600 text-xs px-2 py-0.5 rounded-full">
                            {category.total}
                        </span>
                    </a>
                </li>
            }
        })
        .collect_view();
    items
}
