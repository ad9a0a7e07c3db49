//! Startup check of the catalog document served under `/data`.
//!
//! The page recomputes every count itself, so a stale document still renders
//! correctly; the warnings here are for whoever edits the JSON by hand.

use contracts::domain::a001_resource_catalog::aggregate::{CategoryDto, ResourceDto};
use contracts::domain::a001_resource_catalog::{
    Catalog, CatalogDocument, LoadError, ThemeColor, ALL_TAG_ID,
};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogWarning {
    StaleTotal {
        category: String,
        declared: u64,
        actual: usize,
    },
    StaleTagCount {
        category: String,
        tag: String,
        declared: u64,
        actual: usize,
    },
    DuplicateResourceKey {
        category: String,
        key: String,
    },
    UnknownColor {
        category: String,
        resource: Option<String>,
        value: String,
    },
    UndeclaredTag {
        category: String,
        resource: String,
        tag: String,
    },
}

impl fmt::Display for CatalogWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogWarning::StaleTotal {
                category,
                declared,
                actual,
            } => write!(
                f,
                "[{}] total is {} in the document, {} resources listed",
                category, declared, actual
            ),
            CatalogWarning::StaleTagCount {
                category,
                tag,
                declared,
                actual,
            } => write!(
                f,
                "[{}] tag '{}' count is {} in the document, {} resources carry it",
                category, tag, declared, actual
            ),
            CatalogWarning::DuplicateResourceKey { category, key } => {
                write!(f, "[{}] duplicate resource key '{}'", category, key)
            }
            CatalogWarning::UnknownColor {
                category,
                resource: Some(resource),
                value,
            } => write!(
                f,
                "[{}] resource '{}' has unknown color '{}', category color is used",
                category, resource, value
            ),
            CatalogWarning::UnknownColor {
                category,
                resource: None,
                value,
            } => write!(
                f,
                "[{}] unknown color '{}', falling back to blue",
                category, value
            ),
            CatalogWarning::UndeclaredTag {
                category,
                resource,
                tag,
            } => write!(
                f,
                "[{}] resource '{}' uses undeclared tag '{}'",
                category, resource, tag
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CatalogReport {
    pub categories: usize,
    pub resources: usize,
    pub warnings: Vec<CatalogWarning>,
}

/// Parse the document the same way the page does and collect authoring
/// problems.
pub fn check_catalog(body: &str) -> Result<CatalogReport, LoadError> {
    let document = CatalogDocument::parse(body)?;

    let warnings = document
        .categories
        .iter()
        .enumerate()
        .flat_map(|(index, category)| check_category(index, category))
        .collect();

    let catalog = Catalog::from_document(document);
    Ok(CatalogReport {
        categories: catalog.categories().len(),
        resources: catalog.total_resources(),
        warnings,
    })
}

fn check_category(index: usize, category: &CategoryDto) -> Vec<CatalogWarning> {
    let mut warnings = Vec::new();
    let id = category
        .id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("category-{index}"));

    let resources: &[ResourceDto] = category.resources.as_deref().unwrap_or_default();
    let tags = category.tags.as_deref().unwrap_or_default();

    if let Some(declared) = category.total {
        if declared != resources.len() as u64 {
            warnings.push(CatalogWarning::StaleTotal {
                category: id.clone(),
                declared,
                actual: resources.len(),
            });
        }
    }

    if let Some(value) = category.color.as_deref() {
        if ThemeColor::parse(value).is_none() {
            warnings.push(CatalogWarning::UnknownColor {
                category: id.clone(),
                resource: None,
                value: value.to_string(),
            });
        }
    }

    let mut declared_tags: HashSet<&str> = HashSet::new();
    for tag in tags {
        // blank ids are dropped when the catalog is built
        let Some(tag_id) = tag.id.as_deref().filter(|id| !id.trim().is_empty()) else {
            continue;
        };
        declared_tags.insert(tag_id);

        let actual = if tag_id == ALL_TAG_ID {
            resources.len()
        } else {
            resources.iter().filter(|r| carries(r, tag_id)).count()
        };
        if let Some(declared) = tag.count {
            if declared != actual as u64 {
                warnings.push(CatalogWarning::StaleTagCount {
                    category: id.clone(),
                    tag: tag_id.to_string(),
                    declared,
                    actual,
                });
            }
        }
    }

    let mut seen_keys: HashSet<String> = HashSet::new();
    for resource in resources {
        let key = resource_key(resource);
        if !seen_keys.insert(key.clone()) {
            warnings.push(CatalogWarning::DuplicateResourceKey {
                category: id.clone(),
                key: key.clone(),
            });
        }

        if let Some(value) = resource.color.as_deref() {
            if ThemeColor::parse(value).is_none() {
                warnings.push(CatalogWarning::UnknownColor {
                    category: id.clone(),
                    resource: Some(key.clone()),
                    value: value.to_string(),
                });
            }
        }

        let mut reported: HashSet<&str> = HashSet::new();
        for tag in resource.tags.as_deref().unwrap_or_default() {
            if tag != ALL_TAG_ID && !declared_tags.contains(tag.as_str()) && reported.insert(tag.as_str()) {
                warnings.push(CatalogWarning::UndeclaredTag {
                    category: id.clone(),
                    resource: key.clone(),
                    tag: tag.clone(),
                });
            }
        }
    }

    warnings
}

fn resource_key(resource: &ResourceDto) -> String {
    resource
        .id
        .as_deref()
        .filter(|id| !id.trim().is_empty())
        .or(resource.name.as_deref())
        .unwrap_or_default()
        .to_string()
}

fn carries(resource: &ResourceDto, tag_id: &str) -> bool {
    resource
        .tags
        .as_deref()
        .unwrap_or_default()
        .iter()
        .any(|t| t == tag_id)
}

/// Read the catalog at `path` and log the report. A broken catalog is an
/// error in the log only: the page shows its own error panel.
pub fn log_catalog_report(path: &Path) {
    let body = match std::fs::read_to_string(path) {
        Ok(body) => body,
        Err(e) => {
            tracing::error!("Cannot read catalog {}: {}", path.display(), e);
            return;
        }
    };

    match check_catalog(&body) {
        Ok(report) => {
            tracing::info!(
                "Catalog {}: {} categories, {} resources, {} warnings",
                path.display(),
                report.categories,
                report.resources,
                report.warnings.len()
            );
            for warning in &report.warnings {
                tracing::warn!("Catalog: {}", warning);
            }
        }
        Err(e) => {
            tracing::error!("Catalog {} is invalid: {} ({})", path.display(), e, e.cause());
        }
    }
}
