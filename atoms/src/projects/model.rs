use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const COMMERCIAL: &str = "Commercial";
pub const RESIDENTIAL: &str = "Residential";
pub const INDUSTRIAL: &str = "Industrial";

/// Cover image a new project starts with until its own photos are uploaded
pub const DEFAULT_COVER_URL: &str = "https://images.unsplash.com/photo-1486406146926-c627a92ad1ab";

/// Project domain model - a unit of work with its photo collection
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: u32,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub image_url: String,
    pub photo_count: u32,
    pub last_updated: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectPayload {
    pub title: String,
    pub address: Option<String>,
    pub category: Option<String>,
    pub image_url: String,
}

impl CreateProjectPayload {
    /// Blank new-project form: commercial, with the default cover image
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            address: None,
            category: Some(COMMERCIAL.to_string()),
            image_url: DEFAULT_COVER_URL.to_string(),
        }
    }
}

/// Partial update. `id` and `last_updated` are not part of it: ids are stable
/// and the store stamps `last_updated` itself.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectPayload {
    pub title: Option<String>,
    pub address: Option<String>,
    pub image_url: Option<String>,
    pub photo_count: Option<u32>,
    pub category: Option<String>,
}

impl UpdateProjectPayload {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    pub fn photo_count(count: u32) -> Self {
        Self {
            photo_count: Some(count),
            ..Default::default()
        }
    }
}

/// Dashboard category filter. "All" is only ever a filter, never a category.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    pub const ALL: &'static str = "All";

    /// Entries of the dashboard filter menu, in display order
    pub const OPTIONS: [&'static str; 4] = [Self::ALL, COMMERCIAL, RESIDENTIAL, INDUSTRIAL];

    pub fn parse(value: &str) -> Self {
        if value == Self::ALL {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(value.to_string())
        }
    }

    pub fn admits(&self, category: Option<&str>) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => category == Some(wanted.as_str()),
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str(Self::ALL),
            CategoryFilter::Only(category) => f.write_str(category),
        }
    }
}
