mod roles;
mod sqlite;

pub use roles::render_roles_table;
pub use sqlite::SqliteStore;

use std::collections::BTreeMap;

use crate::error::Result;
use crate::types::{Project, ProjectMember};

/// DataSource defines the read-only project database interface.
pub trait DataSource: Send + Sync {
    /// All roles, keyed by id.
    fn list_roles(&self) -> Result<BTreeMap<i64, String>>;

    /// All projects.
    fn list_projects(&self) -> Result<Vec<Project>>;

    /// Members of one project, or of all projects when `project_identifier`
    /// is `None`.
    fn list_members(&self, project_identifier: Option<&str>) -> Result<Vec<ProjectMember>>;
}
