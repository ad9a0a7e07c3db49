use super::icon_view::IconView;
use super::resource_card::ResourceCard;
use crate::shared::components::placeholder::EmptyState;
use contracts::domain::a001_resource_catalog::search::SearchGroup;
use contracts::domain::a001_resource_catalog::{IconContext, SearchPatternError, SearchQuery, SearchResults};
use leptos::prelude::*;

pub fn no_results_message(query: &SearchQuery) -> String {
    format!("未找到与“ {} ” 相关的资源", query.as_str())
}

/// Cross-category results; replaces the category view while searching.
#[component]
pub fn SearchResultsView(results: SearchResults, query: SearchQuery) -> impl IntoView {
    if results.is_empty() {
        return view! {
            <EmptyState
                icon_name="search"
                message=no_results_message(&query)
                hint="建议尝试其他关键词或查看全部分类"
            />
        }
        .into_any();
    }

    results
        .groups
        .into_iter()
        .map(|group| view! { <SearchGroupView group=group query=query.clone() /> })
        .collect_view()
        .into_any()
}

#[component]
fn SearchGroupView(group: SearchGroup, query: SearchQuery) -> impl IntoView {
    let title = format!("{}{}", group.category_name, group.match_label());
    let color = group.color;
    let cards = group
        .matches
        .into_iter()
        .map(|resource| {
            view! {
                <div class="resource-card bg-white rounded-xl border border-gray-100 overflow-hidden shadow-sm hover:shadow-md transition-all duration-300 hover:-translate-y-1">
                    <ResourceCard resource=resource color=color query=query.clone() />
                </div>
            }
        })
        .collect_view();

    view! {
        <div class="resource-section mb-10">
            <h3 class="text-lg font-semibold mb-4 flex items-center gap-2">
                <IconView
                    descriptor=group.icon
                    color=color
                    context=IconContext::category().with_size(IconContext::CARD_PX)
                />
                <span>{title}</span>
            </h3>
            <div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-3 gap-6">{cards}</div>
        </div>
    }
}

/// Raw pattern mode only: the query did not compile.
#[component]
pub fn PatternErrorView(error: SearchPatternError) -> impl IntoView {
    view! {
        <EmptyState icon_name="alert" message=error.to_string() hint="请检查搜索表达式的语法" />
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_resource_catalog::SearchOptions;

    #[test]
    fn test_no_results_message() {
        let query = SearchQuery::parse(" Rust ", SearchOptions::default()).unwrap().unwrap();
        assert_eq!(no_results_message(&query), "未找到与“ rust ” 相关的资源");
    }
}
