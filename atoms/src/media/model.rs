use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Photo domain model - an image attached to a project album
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Photo {
    pub id: i64,
    /// Remote reference, or an inline `data:` URL for uploaded files
    pub url: String,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Outcome of one file in an upload batch that did not produce a photo
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct UploadFailure {
    pub source: String,
    pub error: String,
}

#[derive(Debug, Serialize, Clone, Default)]
pub struct UploadSummary {
    /// Ids of appended photos, in completion order
    pub added: Vec<i64>,
    pub failed: Vec<UploadFailure>,
}
