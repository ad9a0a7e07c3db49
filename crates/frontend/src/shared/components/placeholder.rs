//! Content-container states shared by the directory and home pages.

use crate::shared::icons::icon;
use contracts::domain::a001_resource_catalog::LoadError;
use leptos::prelude::*;

#[component]
pub fn LoadingIndicator() -> impl IntoView {
    view! {
        <div class="flex justify-center py-16">
            <div class="loader"></div>
        </div>
    }
}

/// "资源数据加载失败" panel with the error reason and a retry button.
#[component]
pub fn LoadErrorPanel(
    error: LoadError,
    #[prop(into)] on_retry: Callback<()>,
    /// Extra classes for the panel root (grid pages need `col-span-full`)
    #[prop(optional, into)]
    class: String,
) -> impl IntoView {
    view! {
        <div class=format!("py-16 text-center {}", class)>
            {icon("alert", "text-5xl text-red-500 mb-4")}
            <p class="text-gray-600">"资源数据加载失败"</p>
            <p class="text-gray-500 text-sm mb-4">{error.to_string()}</p>
            <button
                class="mt-4 px-4 py-2 bg-primary text-white rounded-lg hover:bg-primary/90 transition-colors"
                on:click=move |_| on_retry.run(())
            >
                "重试加载"
            </button>
        </div>
    }
}

/// Muted placeholder: big icon, message, optional hint line.
#[component]
pub fn EmptyState(
    icon_name: &'static str,
    #[prop(into)] message: String,
    #[prop(optional, into)] hint: Option<String>,
) -> impl IntoView {
    view! {
        <div class="text-center py-16 bg-gray-50 rounded-xl border border-gray-100">
            {icon(icon_name, "text-5xl text-gray-200 mb-4")}
            <p class="text-gray-500 mb-2">{message}</p>
            {hint.map(|hint| view! { <p class="text-gray-400 text-sm">{hint}</p> })}
        </div>
    }
}
