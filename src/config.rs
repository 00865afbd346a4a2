use std::path::PathBuf;

use crate::types::RolePolicy;

/// Validated options for one synchronization run, assembled by the CLI
/// before any database access happens.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Path to the Redmine SQLite database.
    pub database: PathBuf,
    /// Root directory holding one repository per project identifier.
    pub svn_root: PathBuf,
    /// Where the generated AuthZ file is written.
    pub output_file: PathBuf,
    pub policy: RolePolicy,
    /// When false, missing repositories are left missing and simply get no
    /// access section.
    pub create_missing: bool,
    pub verbose: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            database: PathBuf::from("redmine.db"),
            svn_root: PathBuf::from("/svn"),
            output_file: PathBuf::from("/svn/access.authZ"),
            policy: RolePolicy::new(Vec::new(), Vec::new()),
            create_missing: false,
            verbose: false,
        }
    }
}
