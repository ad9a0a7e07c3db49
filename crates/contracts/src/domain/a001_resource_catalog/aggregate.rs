use super::calibration::calibrate;
use super::error::LoadError;
use super::icon::IconDescriptor;
use super::palette::ThemeColor;
use serde::{Deserialize, Serialize};

/// Sentinel tag id meaning "no filter".
pub const ALL_TAG_ID: &str = "all";
pub const ALL_TAG_NAME: &str = "全部";
/// Category shown when the catalog is empty or the fragment is unusable.
pub const DEFAULT_CATEGORY_ID: &str = "toolbox";
pub const DEFAULT_RESOURCE_DESCRIPTION: &str = "暂无描述";
pub const DEFAULT_CATEGORY_DESCRIPTION: &str = "提供丰富的相关资源，满足您的使用需求";
pub const DEFAULT_COPY_TIP: &str = "链接已复制";

// ============================================================================
// Wire format (/data/resource-categories.json)
// ============================================================================

/// Root of the catalog JSON document. Only `categories` is required.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogDocument {
    pub categories: Vec<CategoryDto>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryDto {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub tags: Option<Vec<TagDto>>,
    pub resources: Option<Vec<ResourceDto>>,
    /// Author-supplied count; never trusted, see [`calibrate`].
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TagDto {
    pub id: Option<String>,
    pub name: Option<String>,
    pub count: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResourceDto {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub copy_tip: Option<String>,
    pub tags: Option<Vec<String>>,
    pub icon: Option<String>,
    pub color: Option<String>,
}

impl CatalogDocument {
    /// Parse and shape-check a response body.
    pub fn parse(body: &str) -> Result<Self, LoadError> {
        let value: serde_json::Value = serde_json::from_str(body)
            .map_err(|e| LoadError::schema("响应内容不是有效的JSON", e))?;

        match value.get("categories") {
            None => {
                return Err(LoadError::schema(
                    "无categories字段",
                    "missing field `categories`",
                ))
            }
            Some(categories) if !categories.is_array() => {
                return Err(LoadError::schema(
                    "categories字段不是数组",
                    format!("expected an array, found {}", json_kind(categories)),
                ))
            }
            Some(_) => {}
        }

        serde_json::from_value(value).map_err(|e| LoadError::schema("字段类型不正确", e))
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

// ============================================================================
// Catalog model
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagDefinition {
    pub id: String,
    pub name: String,
    /// Derived at calibration.
    pub count: usize,
}

impl TagDefinition {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            count: 0,
        }
    }

    pub fn all() -> Self {
        Self::new(ALL_TAG_ID, ALL_TAG_NAME)
    }

    pub fn is_all(&self) -> bool {
        self.id == ALL_TAG_ID
    }

    /// Tags without resources are kept (rendered disabled) but cannot be
    /// selected; the sentinel always can.
    pub fn is_selectable(&self) -> bool {
        self.is_all() || self.count > 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Resource {
    pub id: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub url: String,
    pub copy_tip: Option<String>,
    pub tags: Vec<String>,
    pub icon: IconDescriptor,
    /// Overrides the category color for icon tinting.
    pub color: Option<ThemeColor>,
}

impl Resource {
    /// Identity used to correlate cards with data: `id`, else `name`.
    pub fn key(&self) -> &str {
        self.id.as_deref().filter(|id| !id.is_empty()).unwrap_or(&self.name)
    }

    /// Description as written in the document; `None` when absent or blank.
    pub fn authored_description(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.trim().is_empty())
    }

    pub fn description_text(&self) -> &str {
        self.authored_description()
            .unwrap_or(DEFAULT_RESOURCE_DESCRIPTION)
    }

    pub fn copy_tip_text(&self) -> &str {
        self.copy_tip
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(DEFAULT_COPY_TIP)
    }

    pub fn has_tag(&self, tag_id: &str) -> bool {
        self.tags.iter().any(|t| t == tag_id)
    }

    pub fn icon_color(&self, category_color: ThemeColor) -> ThemeColor {
        self.color.unwrap_or(category_color)
    }

    fn from_dto(dto: ResourceDto) -> Self {
        Self {
            id: dto.id.filter(|id| !id.trim().is_empty()),
            name: dto.name.unwrap_or_default(),
            description: dto.description,
            url: dto.url.unwrap_or_default(),
            copy_tip: dto.copy_tip,
            tags: dto.tags.unwrap_or_default(),
            icon: IconDescriptor::classify(dto.icon.as_deref()),
            color: dto.color.as_deref().and_then(ThemeColor::parse),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub color: ThemeColor,
    pub icon: IconDescriptor,
    pub tags: Vec<TagDefinition>,
    pub resources: Vec<Resource>,
    /// Derived at calibration.
    pub total: usize,
}

impl Category {
    pub fn description_text(&self) -> &str {
        self.description
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or(DEFAULT_CATEGORY_DESCRIPTION)
    }

    pub fn tag(&self, tag_id: &str) -> Option<&TagDefinition> {
        self.tags.iter().find(|t| t.id == tag_id)
    }

    pub fn resource(&self, key: &str) -> Option<&Resource> {
        self.resources.iter().find(|r| r.key() == key)
    }

    fn from_dto(dto: CategoryDto, index: usize) -> Self {
        let id = dto
            .id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| format!("category-{index}"));

        let tags = dto
            .tags
            .unwrap_or_default()
            .into_iter()
            .filter_map(|tag| {
                let id = tag.id.filter(|id| !id.trim().is_empty())?;
                let name = tag.name.unwrap_or_else(|| id.clone());
                Some(TagDefinition::new(id, name))
            })
            .collect();

        Self {
            id,
            name: dto.name.unwrap_or_default(),
            description: dto.description,
            color: ThemeColor::parse_or_default(dto.color.as_deref()),
            icon: IconDescriptor::classify(dto.icon.as_deref()),
            tags,
            resources: dto
                .resources
                .unwrap_or_default()
                .into_iter()
                .map(Resource::from_dto)
                .collect(),
            total: 0,
        }
    }
}

/// Calibrated catalog: icons classified, every count derived from the
/// resource lists.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Catalog {
    pub(super) categories: Vec<Category>,
}

impl Catalog {
    pub fn from_document(document: CatalogDocument) -> Self {
        let categories = document
            .categories
            .into_iter()
            .enumerate()
            .map(|(index, dto)| Category::from_dto(dto, index))
            .collect();
        calibrate(categories)
    }

    /// `parse` + `from_document`.
    pub fn from_json(body: &str) -> Result<Self, LoadError> {
        CatalogDocument::parse(body).map(Self::from_document)
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.category(id).is_some()
    }

    pub fn first(&self) -> Option<&Category> {
        self.categories.first()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn total_resources(&self) -> usize {
        self.categories.iter().map(|c| c.total).sum()
    }
}
