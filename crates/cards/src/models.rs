use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub fill_color: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Raw input struct for deserialization (since CreateCardRequest has private fields)
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RawCreateCardRequest {
    #[validate(required, length(min = 1))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(required, length(min = 1))]
    pub fill_color: Option<String>,
}

/// A create payload that has passed validation: title and fill color are
/// present and non-empty, and an empty description has been folded into `None`.
#[derive(Debug)]
pub struct CreateCardRequest {
    title: String,
    description: Option<String>,
    fill_color: String,
}

impl CreateCardRequest {
    pub fn new(raw: RawCreateCardRequest) -> Result<Self, String> {
        const REQUIRED: &str = "Title and fill color are required";

        raw.validate().map_err(|_| REQUIRED.to_string())?;

        match (raw.title, raw.fill_color) {
            (Some(title), Some(fill_color)) => Ok(Self {
                title,
                description: raw.description.filter(|d| !d.is_empty()),
                fill_color,
            }),
            _ => Err(REQUIRED.to_string()),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn fill_color(&self) -> &str {
        &self.fill_color
    }
}

/// Body of `PUT /api/cards/{id}`.
///
/// `description` is doubly optional: the outer `None` means the key was absent,
/// `Some(None)` means it was sent as `null`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCardRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub fill_color: Option<String>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, PartialEq)]
pub enum DescriptionPatch {
    Keep,
    Clear,
    Set(String),
}

/// Partial update: only the fields that are `Some` (or not `Keep`) are written.
/// Empty strings count as present.
#[derive(Debug, Clone, PartialEq)]
pub struct CardPatch {
    title: Option<String>,
    description: DescriptionPatch,
    fill_color: Option<String>,
}

impl CardPatch {
    pub fn new(raw: UpdateCardRequest) -> Result<Self, String> {
        if raw.title.is_none() && raw.description.is_none() && raw.fill_color.is_none() {
            return Err("At least one field is required".to_string());
        }

        let description = match raw.description {
            None => DescriptionPatch::Keep,
            Some(None) => DescriptionPatch::Clear,
            Some(Some(d)) if d.is_empty() => DescriptionPatch::Clear,
            Some(Some(d)) => DescriptionPatch::Set(d),
        };

        Ok(Self {
            title: raw.title,
            description,
            fill_color: raw.fill_color,
        })
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn description(&self) -> &DescriptionPatch {
        &self.description
    }

    pub fn fill_color(&self) -> Option<&str> {
        self.fill_color.as_deref()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Title,
    Description,
}

impl SortField {
    pub fn as_str(self) -> &'static str {
        match self {
            SortField::Title => "title",
            SortField::Description => "description",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "title" => Some(SortField::Title),
            "description" => Some(SortField::Description),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    /// Anything other than `asc` sorts descending.
    pub fn parse(value: &str) -> Self {
        if value == "asc" { SortOrder::Asc } else { SortOrder::Desc }
    }
}

/// Query string of `GET /api/cards`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawListCardsQuery {
    pub fill_color: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardFilters {
    fill_color: Option<String>,
    sort: Option<(SortField, SortOrder)>,
}

impl CardFilters {
    pub fn new(raw: RawListCardsQuery) -> Result<Self, String> {
        let non_empty = |v: Option<String>| v.filter(|s| !s.is_empty());

        let sort = match non_empty(raw.sort_by) {
            None => None,
            Some(field) => {
                let field = SortField::parse(&field)
                    .ok_or_else(|| format!("Unsupported sort field: {}", field))?;
                let order = non_empty(raw.sort_order)
                    .map(|o| SortOrder::parse(&o))
                    .unwrap_or(SortOrder::Desc);
                Some((field, order))
            }
        };

        Ok(Self {
            fill_color: non_empty(raw.fill_color),
            sort,
        })
    }

    /// Filters from already-typed selections.
    pub fn with(fill_color: Option<String>, sort: Option<(SortField, SortOrder)>) -> Self {
        Self {
            fill_color: fill_color.filter(|c| !c.is_empty()),
            sort,
        }
    }

    pub fn fill_color(&self) -> Option<&str> {
        self.fill_color.as_deref()
    }

    pub fn sort(&self) -> Option<(SortField, SortOrder)> {
        self.sort
    }
}
