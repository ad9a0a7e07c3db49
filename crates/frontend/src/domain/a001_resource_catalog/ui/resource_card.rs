use super::icon_view::IconView;
use crate::shared::clipboard::copy_text;
use crate::shared::components::ui::badge::{tag_tone, Badge};
use crate::shared::dom;
use crate::shared::icons::icon;
use contracts::domain::a001_resource_catalog::search::highlight;
use contracts::domain::a001_resource_catalog::{IconContext, Resource, SearchQuery, ThemeColor};
use gloo_timers::future::TimeoutFuture;
use leptos::portal::Portal;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// How long the check icon and the tooltip stay after a copy.
pub const COPY_FEEDBACK_MS: u32 = 1500;
pub const COPY_FAILED_MESSAGE: &str = "复制失败，请手动复制链接";

const HIGHLIGHT_CLASS: &str = "search-highlight bg-yellow-100 text-yellow-800 px-0.5 rounded-md";

/// Text with every match of `query` wrapped in the highlight span.
pub fn highlighted_text(text: &str, query: Option<&SearchQuery>) -> AnyView {
    let Some(query) = query else {
        return text.to_string().into_any();
    };
    highlight(text, query)
        .into_iter()
        .map(|segment| {
            if segment.highlighted {
                view! { <span class=HIGHLIGHT_CLASS>{segment.text}</span> }.into_any()
            } else {
                segment.text.into_any()
            }
        })
        .collect_view()
        .into_any()
}

#[component]
pub fn ResourceCard(
    resource: Resource,
    /// Color of the owning category
    color: ThemeColor,
    /// Set in search mode: matches get highlighted
    #[prop(optional)]
    query: Option<SearchQuery>,
) -> impl IntoView {
    let query = query.as_ref();
    let name = highlighted_text(&resource.name, query);
    // the placeholder is not searchable, so it is never highlighted
    let description = match resource.authored_description() {
        Some(text) => highlighted_text(text, query),
        None => resource.description_text().to_string().into_any(),
    };
    let tags = resource
        .tags
        .iter()
        .map(|tag| {
            let label = highlighted_text(tag, query);
            view! { <Badge tone=tag_tone(tag, color)>{label}</Badge> }
        })
        .collect_view();

    view! {
        <div class="p-5">
            <div class="flex items-center gap-3 mb-3">
                <IconView
                    descriptor=resource.icon.clone()
                    color=resource.icon_color(color)
                    context=IconContext::resource().with_size(IconContext::CARD_PX)
                    class=format!("w-10 h-10 rounded-lg {} flex items-center justify-center", color.soft_bg_class())
                />
                <h3 class="font-semibold text-base text-gray-800">{name}</h3>
            </div>
            <p class="text-gray-600 text-sm mb-4 line-clamp-2 leading-relaxed">{description}</p>
            <div class="flex flex-wrap gap-1.5 mb-4">{tags}</div>
            <div class="flex justify-between items-center pt-2 border-t border-gray-50">
                <a
                    href=resource.url.clone()
                    target="_blank"
                    rel="noopener"
                    class="text-primary text-sm font-medium hover:text-primary/80 hover:underline flex items-center gap-1"
                >
                    <span>"立即访问"</span>
                    {icon("external-link", "text-xs")}
                </a>
                <CopyButton url=resource.url.clone() tip=resource.copy_tip_text().to_string() />
            </div>
        </div>
    }
}

/// Copies the resource link; on success shows a check icon and a floating
/// tip for [`COPY_FEEDBACK_MS`].
#[component]
pub fn CopyButton(url: String, tip: String) -> impl IntoView {
    let copied = RwSignal::new(false);
    let tip = StoredValue::new(tip);
    let tip_position = RwSignal::new((0.0_f64, 0.0_f64));
    // Clicks during the feedback window restart it.
    let clicks = StoredValue::new(0u32);
    let button_ref = NodeRef::<leptos::html::Button>::new();

    let on_click = move |_| {
        let url = url.clone();
        spawn_local(async move {
            match copy_text(&url).await {
                Ok(()) => {
                    if let Some(button) = button_ref.get_untracked() {
                        let rect = button.get_bounding_client_rect();
                        tip_position.set((rect.top() - 30.0, rect.left() + rect.width() / 2.0));
                    }
                    let mut ticket = 0;
                    clicks.update_value(|n| {
                        *n += 1;
                        ticket = *n;
                    });
                    copied.set(true);

                    TimeoutFuture::new(COPY_FEEDBACK_MS).await;
                    if clicks.get_value() == ticket {
                        copied.set(false);
                    }
                }
                Err(err) => {
                    log::error!("复制失败: {}", err);
                    dom::alert(COPY_FAILED_MESSAGE);
                }
            }
        });
    };

    view! {
        <button
            node_ref=button_ref
            class="copy-link text-gray-400 hover:text-primary transition-colors p-1.5 rounded-full hover:bg-gray-50"
            title="复制链接"
            on:click=on_click
        >
            {move || {
                if copied.get() {
                    icon("check", "text-green-500")
                } else {
                    icon("copy", "")
                }
            }}
        </button>
        <Show when=move || copied.get()>
            <Portal>
                <span
                    class="fixed z-50 bg-black/80 text-white px-3 py-1 rounded-md text-xs whitespace-nowrap pointer-events-none"
                    style=move || {
                        let (top, left) = tip_position.get();
                        format!("top: {}px; left: {}px; transform: translateX(-50%);", top, left)
                    }
                >
                    {move || tip.get_value()}
                </span>
            </Portal>
        </Show>
    }
}
