use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Filesystem-safe unique identifier, also the repository directory name.
    pub identifier: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_subproject: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_on: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMember {
    pub login: String,
    pub first_name: String,
    pub last_name: String,
    pub mail: String,
    pub project_identifier: String,
    pub role_id: i64,
    pub is_admin: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login_on: Option<DateTime<Utc>>,
}
