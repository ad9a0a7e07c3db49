use super::icon_view::IconView;
use super::resource_card::ResourceCard;
use crate::shared::components::placeholder::EmptyState;
use crate::shared::icons::icon;
use contracts::domain::a001_resource_catalog::filter::matches_tag;
use contracts::domain::a001_resource_catalog::{
    BrowserSession, Catalog, Category, IconContext, Resource, TagDefinition, ThemeColor,
};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::sync::Arc;

const FADE_IN_DELAY_MS: u32 = 100;

pub fn tag_button_class(active: bool, selectable: bool) -> &'static str {
    match (active, selectable) {
        (true, _) => "tag-filter active flex items-center gap-1 px-3 py-1.5 rounded-full transition-all bg-primary text-white shadow-sm",
        (false, true) => "tag-filter flex items-center gap-1 px-3 py-1.5 rounded-full transition-all bg-gray-100 text-gray-700 hover:bg-gray-200 hover:shadow-sm",
        (false, false) => "tag-filter flex items-center gap-1 px-3 py-1.5 rounded-full transition-all bg-gray-100 text-gray-700 opacity-50 cursor-not-allowed",
    }
}

/// One category: header, tag filter bar and the card grid.
///
/// Tag clicks only toggle card visibility; the view itself is rebuilt only
/// when the active category changes.
#[component]
pub fn CategoryView(
    category: Category,
    catalog: Arc<Catalog>,
    session: RwSignal<BrowserSession>,
) -> impl IntoView {
    let category_id = category.id.clone();
    let active_tag = Memo::new({
        let category_id = category_id.clone();
        move |_| session.with(|s| s.active_tag(&category_id).to_string())
    });

    let tag_buttons = category
        .tags
        .iter()
        .map(|tag| {
            view! {
                <TagButton
                    tag=tag.clone()
                    category_id=category_id.clone()
                    catalog=catalog.clone()
                    session=session
                    active_tag=active_tag
                />
            }
        })
        .collect_view();

    let cards = category
        .resources
        .iter()
        .map(|resource| view! { <FilteredCard resource=resource.clone() color=category.color active_tag=active_tag /> })
        .collect_view();

    let empty = (category.total == 0).then(|| {
        view! { <EmptyState icon_name="folder-open" message="当前分类暂无资源" hint="我们将持续更新，敬请期待" /> }
    });

    view! {
        <div class="resource-section" id=category.id.clone()>
            <div class="flex flex-col md:flex-row md:items-center justify-between mb-6">
                <div>
                    <h2 class="text-2xl font-bold mb-2 flex items-center gap-2">
                        <IconView
                            descriptor=category.icon.clone()
                            color=category.color
                            context=IconContext::category().with_size(IconContext::HEADER_PX)
                        />
                        <span>{category.name.clone()}</span>
                    </h2>
                    <p class="text-gray-600 text-sm">{category.description_text().to_string()}</p>
                </div>
                <span class="text-gray-500 text-sm mt-2 md:mt-0 flex items-center gap-1">
                    {icon("database", "")}
                    {format!(" 共 {} 个全量资源", category.total)}
                </span>
            </div>

            <div class="flex flex-wrap gap-2 mb-6">{tag_buttons}</div>

            <div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-3 gap-6">{cards}</div>

            {empty}
        </div>
    }
}

#[component]
fn TagButton(
    tag: TagDefinition,
    category_id: String,
    catalog: Arc<Catalog>,
    session: RwSignal<BrowserSession>,
    active_tag: Memo<String>,
) -> impl IntoView {
    let selectable = tag.is_selectable();
    let tag_id = tag.id.clone();
    let is_active = {
        let tag_id = tag_id.clone();
        move || active_tag.with(|active| *active == tag_id)
    };

    let on_click = move |_| {
        if !selectable {
            return;
        }
        session.maybe_update(|s| s.select_tag(&catalog, &category_id, &tag_id));
    };

    view! {
        <button
            class=move || tag_button_class(is_active(), selectable)
            data-tag=tag.id.clone()
            disabled=!selectable
            on:click=on_click
        >
            {tag.name.clone()}
            <span class="text-xs opacity-80">{format!("({})", tag.count)}</span>
        </button>
    }
}

/// Card that hides when the active tag excludes it and fades back in.
#[component]
fn FilteredCard(resource: Resource, color: ThemeColor, active_tag: Memo<String>) -> impl IntoView {
    let visible = Memo::new({
        let resource = resource.clone();
        move |_| active_tag.with(|tag| matches_tag(&resource, tag))
    });
    let opacity = RwSignal::new(1.0_f64);

    Effect::new(move |previous: Option<bool>| {
        let now = visible.get();
        if now && previous == Some(false) {
            opacity.set(0.0);
            spawn_local(async move {
                TimeoutFuture::new(FADE_IN_DELAY_MS).await;
                opacity.set(1.0);
            });
        }
        now
    });

    view! {
        <div
            class="resource-card bg-white rounded-xl border border-gray-100 overflow-hidden shadow-sm hover:shadow-md transition-all duration-300 hover:-translate-y-1"
            class:hidden=move || !visible.get()
            style:opacity=move || opacity.get().to_string()
            data-resource-id=resource.key().to_string()
        >
            <ResourceCard resource=resource.clone() color=color />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_button_class() {
        assert!(tag_button_class(true, true).contains("bg-primary"));
        assert!(tag_button_class(false, false).contains("opacity-50 cursor-not-allowed"));
        assert!(!tag_button_class(false, true).contains("cursor-not-allowed"));
    }
}
