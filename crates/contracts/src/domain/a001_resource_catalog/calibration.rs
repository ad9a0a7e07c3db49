use super::aggregate::{Catalog, Category, TagDefinition};

/// Recompute every derived count from the resource lists.
///
/// Counts shipped in the JSON document go stale whenever someone edits the
/// resources by hand, so they are never read. Per category:
/// - `total` is the number of resources;
/// - the `all` sentinel is inserted at the front if missing and counts `total`;
/// - every other tag counts the resources carrying it (zero-count tags stay).
pub fn calibrate(categories: Vec<Category>) -> Catalog {
    let categories = categories.into_iter().map(calibrate_category).collect();
    Catalog { categories }
}

fn calibrate_category(mut category: Category) -> Category {
    category.total = category.resources.len();

    if !category.tags.iter().any(TagDefinition::is_all) {
        category.tags.insert(0, TagDefinition::all());
    }

    for tag in category.tags.iter_mut() {
        tag.count = if tag.is_all() {
            category.total
        } else {
            category
                .resources
                .iter()
                .filter(|resource| resource.has_tag(&tag.id))
                .count()
        };
    }

    category
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_resource_catalog::aggregate::{Resource, ALL_TAG_ID};

    fn resource(name: &str, tags: &[&str]) -> Resource {
        Resource {
            name: name.to_string(),
            url: format!("https://example.com/{name}"),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            ..Default::default()
        }
    }

    fn category(tags: &[&str], resources: Vec<Resource>) -> Category {
        Category {
            id: "site".to_string(),
            name: "热门站点".to_string(),
            tags: tags.iter().map(|t| TagDefinition::new(*t, *t)).collect(),
            resources,
            total: 42,
            ..Default::default()
        }
    }

    #[test]
    fn test_total_ignores_document_value() {
        let catalog = calibrate(vec![category(
            &["all"],
            vec![resource("a", &[]), resource("b", &[])],
        )]);
        assert_eq!(catalog.categories()[0].total, 2);
    }

    #[test]
    fn test_tag_counts() {
        let catalog = calibrate(vec![category(
            &["all", "免费", "付费", "开源"],
            vec![
                resource("a", &["免费"]),
                resource("b", &["免费", "开源"]),
                resource("c", &["付费"]),
                // duplicate tag on one resource still counts once
                resource("d", &["开源", "开源"]),
            ],
        )]);
        let site = &catalog.categories()[0];
        let count = |id: &str| site.tag(id).unwrap().count;
        assert_eq!(count(ALL_TAG_ID), 4);
        assert_eq!(count("免费"), 2);
        assert_eq!(count("付费"), 1);
        assert_eq!(count("开源"), 2);
    }

    #[test]
    fn test_zero_count_tags_are_kept() {
        let catalog = calibrate(vec![category(&["all", "付费"], vec![resource("a", &["免费"])])]);
        let site = &catalog.categories()[0];
        let paid = site.tag("付费").unwrap();
        assert_eq!(paid.count, 0);
        assert!(!paid.is_selectable());
        assert!(site.tag(ALL_TAG_ID).unwrap().is_selectable());
    }

    #[test]
    fn test_missing_sentinel_is_inserted_first() {
        let catalog = calibrate(vec![category(&["免费"], vec![resource("a", &["免费"])])]);
        let site = &catalog.categories()[0];
        assert_eq!(site.tags[0].id, ALL_TAG_ID);
        assert_eq!(site.tags[0].count, 1);
        assert_eq!(site.tags.len(), 2);
    }

    #[test]
    fn test_empty_category_sentinel_counts_zero() {
        let catalog = calibrate(vec![category(&["all"], vec![])]);
        let site = &catalog.categories()[0];
        assert_eq!(site.total, 0);
        assert_eq!(site.tag(ALL_TAG_ID).unwrap().count, 0);
        assert!(site.tag(ALL_TAG_ID).unwrap().is_selectable());
    }
}
