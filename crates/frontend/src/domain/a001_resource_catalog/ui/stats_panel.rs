use contracts::domain::a001_resource_catalog::stats::{CategoryShare, TagUsage};
use contracts::domain::a001_resource_catalog::CatalogStats;
use leptos::prelude::*;

const HOT_TAG_LIMIT: usize = 5;

/// Fills the page's statistics box: total, per-category share, hot tags.
#[component]
pub fn StatsPanel(stats: CatalogStats) -> impl IntoView {
    let hot_tags = stats.top_tags(HOT_TAG_LIMIT);

    view! {
        <div class="pb-4 border-b border-gray-100">
            <div class="flex justify-between items-center mb-1">
                <span class="text-gray-600">"总资源数"</span>
                <span class="font-medium text-gray-800">{format!("{} 个", stats.total_resources)}</span>
            </div>
            <div class="w-full h-2 bg-gray-100 rounded-full overflow-hidden">
                <div class="h-full bg-primary rounded-full" style="width: 100%"></div>
            </div>
        </div>

        <div class="pt-4 pb-4 border-b border-gray-100 space-y-2">
            {stats.per_category.into_iter().map(|share| view! { <CategoryShareRow share=share /> }).collect_view()}
        </div>

        <div class="pt-4">
            <p class="text-gray-600 mb-2 text-sm font-medium">"热门标签"</p>
            <div class="flex flex-wrap gap-1.5">
                {hot_tags.into_iter().map(|tag| view! { <HotTag tag=tag /> }).collect_view()}
            </div>
        </div>
    }
}

#[component]
fn CategoryShareRow(share: CategoryShare) -> impl IntoView {
    let bar_class = format!("h-full rounded-full bg-{}-500", share.color.as_str());
    view! {
        <div>
            <div class="flex justify-between items-center mb-1 text-sm">
                <span class="text-gray-600">{share.name}</span>
                <span class="text-gray-500">{format!("{} 个 · {}", share.count, share.percentage)}</span>
            </div>
            <div class="w-full h-1.5 bg-gray-100 rounded-full overflow-hidden">
                <div class=bar_class style=format!("width: {}", share.percentage)></div>
            </div>
        </div>
    }
}

#[component]
fn HotTag(tag: TagUsage) -> impl IntoView {
    let color = tag.color.as_str();
    view! {
        <span class=format!("px-2 py-0.5 bg-{0}-50 text-{0}-600 text-xs rounded-full flex items-center gap-1", color)>
            <span class=format!("w-1.5 h-1.5 rounded-full bg-{}-500", color)></span>
            {format!("{} ({})", tag.name, tag.count)}
        </span>
    }
}
