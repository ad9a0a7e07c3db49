use super::aggregate::{Category, Resource, ALL_TAG_ID};

/// Whether a card stays visible under the given tag filter.
pub fn matches_tag(resource: &Resource, tag_id: &str) -> bool {
    tag_id == ALL_TAG_ID || resource.has_tag(tag_id)
}

/// Keys of the cards shown in `category` while `tag_id` is active, in
/// resource order.
pub fn visible_resource_keys<'a>(category: &'a Category, tag_id: &str) -> Vec<&'a str> {
    category
        .resources
        .iter()
        .filter(|resource| matches_tag(resource, tag_id))
        .map(Resource::key)
        .collect()
}

/// `all` always; other tags only when declared and carried by a resource.
pub fn is_tag_selectable(category: &Category, tag_id: &str) -> bool {
    if tag_id == ALL_TAG_ID {
        return true;
    }
    category
        .tag(tag_id)
        .map(|tag| tag.is_selectable())
        .unwrap_or(false)
}
