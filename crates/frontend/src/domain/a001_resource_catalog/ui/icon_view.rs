use contracts::domain::a001_resource_catalog::{normalize, IconContext, IconDescriptor, ThemeColor};
use leptos::prelude::*;

/// Catalog icon rendered from its normalized markup.
#[component]
pub fn IconView(
    descriptor: IconDescriptor,
    color: ThemeColor,
    context: IconContext,
    #[prop(optional, into)] class: String,
) -> impl IntoView {
    let markup = normalize(&descriptor, color, context).into_string();
    view! { <div class=class inner_html=markup></div> }
}
