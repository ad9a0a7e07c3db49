use super::aggregate::{Catalog, ALL_TAG_ID};
use super::palette::ThemeColor;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryShare {
    pub id: String,
    pub name: String,
    pub count: usize,
    /// `"12.5%"`, one decimal.
    pub percentage: String,
    pub color: ThemeColor,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagUsage {
    pub name: String,
    pub count: usize,
    pub color: ThemeColor,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CatalogStats {
    pub total_resources: usize,
    pub per_category: Vec<CategoryShare>,
    /// First-seen order.
    pub per_tag: Vec<TagUsage>,
}

impl CatalogStats {
    /// Most used tags, count descending; ties keep first-seen order.
    pub fn top_tags(&self, n: usize) -> Vec<TagUsage> {
        let mut tags = self.per_tag.clone();
        tags.sort_by(|a, b| b.count.cmp(&a.count));
        tags.truncate(n);
        tags
    }
}

pub fn aggregate_stats(catalog: &Catalog) -> CatalogStats {
    let total_resources = catalog.total_resources();

    let per_category = catalog
        .categories()
        .iter()
        .map(|category| CategoryShare {
            id: category.id.clone(),
            name: category.name.clone(),
            count: category.total,
            percentage: percentage(category.total, total_resources),
            color: category.color,
        })
        .collect();

    // tag -> set of (category id, resource key)
    let mut seen: Vec<(String, HashSet<(&str, &str)>)> = Vec::new();
    for category in catalog.categories() {
        for resource in &category.resources {
            for tag in resource.tags.iter().filter(|t| t.as_str() != ALL_TAG_ID) {
                let identity = (category.id.as_str(), resource.key());
                match seen.iter_mut().find(|(name, _)| name == tag) {
                    Some((_, members)) => {
                        members.insert(identity);
                    }
                    None => seen.push((tag.clone(), HashSet::from([identity]))),
                }
            }
        }
    }

    let per_tag = seen
        .into_iter()
        .map(|(name, members)| TagUsage {
            color: tag_color(&name),
            count: members.len(),
            name,
        })
        .collect();

    CatalogStats {
        total_resources,
        per_category,
        per_tag,
    }
}

/// `count / total * 100` with one decimal; `"0.0%"` for an empty catalog.
pub fn percentage(count: usize, total: usize) -> String {
    if total == 0 {
        return "0.0%".to_string();
    }
    // tenths of a percent, ties rounded up
    let tenths = (count * 1000 + total / 2) / total;
    format!("{}.{}%", tenths / 10, tenths % 10)
}

pub fn tag_color(tag: &str) -> ThemeColor {
    match tag {
        "免费" => ThemeColor::Green,
        "付费" => ThemeColor::Orange,
        "代码生成" => ThemeColor::Blue,
        "文档总结" => ThemeColor::Purple,
        _ => ThemeColor::Gray,
    }
}
