use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct User {
    pub id: u32,
    pub name: String,
    pub email: String,
    /// Avatar image reference (remote URL)
    pub avatar: String,
    pub role: String, // e.g. "Project Manager"
    pub company: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct UpdateUserPayload {
    pub name: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<String>,
    pub role: Option<String>,
    pub company: Option<String>,
}
