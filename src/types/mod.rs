mod access;
mod models;
mod repo_state;

pub use access::{AccessTier, RolePolicy, TieBreak};
pub use models::{Project, ProjectMember};
pub use repo_state::{RepoClass, RepoPathState};
