//! Resource directory page: category sidebar, tag filters, live search and
//! the statistics box, all driven by one `BrowserSession` signal.

use super::category_view::CategoryView;
use super::loader::{CatalogLoader, LoadState};
use super::search_results::{PatternErrorView, SearchResultsView};
use super::sidebar::CategorySidebar;
use super::stats_panel::StatsPanel;
use crate::shared::components::placeholder::{EmptyState, LoadErrorPanel, LoadingIndicator};
use crate::shared::dom::{self, DirectoryConfig};
use contracts::domain::a001_resource_catalog::search::search;
use contracts::domain::a001_resource_catalog::{
    aggregate_stats, BrowserSession, Catalog, ContentKey, QueryChange, Transition,
};
use gloo_timers::future::TimeoutFuture;
use leptos::portal::Portal;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::sync::Arc;

// Let the new section render before measuring it.
const SCROLL_DELAY_MS: u32 = 200;

#[component]
pub fn ResourceDirectory(config: DirectoryConfig) -> impl IntoView {
    let loader = CatalogLoader::new(config.catalog_url.clone());
    let search_options = config.search;
    let session = RwSignal::new(BrowserSession::resolve(&Catalog::default(), None));

    let on_ready = Callback::new(move |catalog: Arc<Catalog>| {
        let mut next = BrowserSession::resolve(&catalog, dom::current_fragment().as_deref())
            .with_search_options(search_options);
        // Text typed while the catalog was loading still applies.
        if let Some(input) = dom::search_input() {
            if let Err(err) = next.set_query(&input.value()) {
                log::warn!("{}", err);
            }
        }
        log::debug!("Active category: {}", next.active_category_id());
        session.set(next);
    });
    let reload = Callback::new(move |_: ()| loader.load(on_ready));

    let select_category = Callback::new(move |id: String| {
        let mut transition = Transition::Unchanged;
        session.maybe_update(|s| {
            transition = s.select_category(&id);
            transition == Transition::Rerender
        });
        if transition == Transition::Rerender {
            after_category_change(id);
        }
    });

    let _ = window_event_listener(leptos::ev::hashchange, move |_| {
        let LoadState::Ready(catalog) = loader.state.get_untracked() else {
            return;
        };
        let Some(fragment) = dom::current_fragment() else {
            return;
        };
        let mut transition = Transition::Unchanged;
        session.maybe_update(|s| {
            transition = s.follow_fragment(&catalog, &fragment);
            transition == Transition::Rerender
        });
        if transition == Transition::Rerender {
            dom::reset_search_input();
        }
    });

    if let Some(input) = dom::search_input() {
        let target = input.clone();
        dom::listen(&input, "input", move |_| {
            if !matches!(loader.state.get_untracked(), LoadState::Ready(_)) {
                return;
            }
            let value = target.value();
            let mut outcome = Ok(QueryChange::Cleared);
            session.update(|s| outcome = s.set_query(&value));
            if let Err(err) = outcome {
                log::warn!("{}", err);
            }
        });
    }

    reload.run(());

    let content_key = Memo::new(move |_| session.with(|s| s.content_key()));

    move || match loader.state.get() {
        LoadState::Loading => view! { <LoadingIndicator /> }.into_any(),
        LoadState::Failed(error) => view! { <LoadErrorPanel error=error on_retry=reload /> }.into_any(),
        LoadState::Ready(catalog) => view! {
            <DirectoryContent
                catalog=catalog
                session=session
                content_key=content_key
                on_select=select_category
            />
        }
        .into_any(),
    }
}

/// URL, search box, mobile overlay and scroll follow a category switch.
fn after_category_change(category_id: String) {
    dom::replace_fragment(&category_id);
    dom::reset_search_input();
    dom::collapse_mobile_sidebar();
    spawn_local(async move {
        TimeoutFuture::new(SCROLL_DELAY_MS).await;
        dom::scroll_to_section(&category_id);
    });
}

#[component]
fn DirectoryContent(
    catalog: Arc<Catalog>,
    session: RwSignal<BrowserSession>,
    content_key: Memo<ContentKey>,
    on_select: Callback<String>,
) -> impl IntoView {
    let results = Memo::new({
        let catalog = catalog.clone();
        move |_| match content_key.get() {
            ContentKey::Search(query) => Some(search(&catalog, &query)),
            _ => None,
        }
    });

    Effect::new(move |_| {
        let label = results.with(|r| r.as_ref().map(|r| r.count_label()));
        dom::set_search_count(label.as_deref());
    });

    let sidebar = dom::child_of(dom::SIDEBAR_ID, "ul").map(|list| {
        list.set_inner_html("");
        let mount: web_sys::Element = list.into();
        let catalog = catalog.clone();
        view! {
            <Portal mount=mount>
                <CategorySidebar catalog=catalog.clone() session=session on_select=on_select />
            </Portal>
        }
    });

    let stats = dom::child_of(dom::STATS_ID, "div.space-y-2").map(|panel| {
        panel.set_inner_html("");
        let mount: web_sys::Element = panel.into();
        let stats = aggregate_stats(&catalog);
        view! {
            <Portal mount=mount>
                <StatsPanel stats=stats.clone() />
            </Portal>
        }
    });

    let content = move || match content_key.get() {
        ContentKey::Category(id) => match catalog.category(&id) {
            Some(category) => view! {
                <CategoryView category=category.clone() catalog=catalog.clone() session=session />
            }
            .into_any(),
            None => view! { <EmptyState icon_name="folder-open" message="当前分类不存在" /> }.into_any(),
        },
        ContentKey::Search(query) => {
            let results = results.get_untracked().unwrap_or_default();
            view! { <SearchResultsView results=results query=query /> }.into_any()
        }
        ContentKey::PatternError(error) => view! { <PatternErrorView error=error /> }.into_any(),
    };

    view! {
        {sidebar}
        {stats}
        {content}
    }
}
