//! End-to-end synchronization run: query projects, reconcile repository
//! paths, create what is missing, then generate and persist the AuthZ file.

use chrono::Utc;
use tracing::info;

use crate::config::RunConfig;
use crate::error::Result;
use crate::store::DataSource;
use crate::svn::SvnAdmin;
use crate::{authz, reconcile};

/// What one run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncReport {
    pub projects: usize,
    /// Repositories with access sections in the generated document.
    pub existing: usize,
    pub created: usize,
    pub blocked: usize,
}

/// Runs the full pipeline. Data-source failures abort the run; per-path
/// verify and create failures are logged and skipped.
pub fn run(config: &RunConfig, source: &dyn DataSource, admin: &dyn SvnAdmin) -> Result<SyncReport> {
    let projects = source.list_projects()?;
    info!("checking {} projects for missing repositories", projects.len());

    let mut states = reconcile::check_existing_repositories(&projects, &config.svn_root, admin);

    let created = if config.create_missing {
        reconcile::create_missing_repositories(&mut states, admin)
    } else {
        0
    };

    let document = authz::generate(&states, source, &config.policy, Utc::now())?;
    authz::write_authz_file(&config.output_file, &document)?;

    let existing = states.values().filter(|s| s.class.exists()).count();
    let blocked = states.values().filter(|s| !s.class.is_valid()).count();

    Ok(SyncReport {
        projects: projects.len(),
        existing,
        created,
        blocked,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::fs;
    use std::path::Path;

    use super::*;
    use crate::types::{Project, ProjectMember, RolePolicy};

    struct FakeSource {
        projects: Vec<Project>,
        members: BTreeMap<String, Vec<ProjectMember>>,
    }

    impl DataSource for FakeSource {
        fn list_roles(&self) -> Result<BTreeMap<i64, String>> {
            Ok(BTreeMap::new())
        }

        fn list_projects(&self) -> Result<Vec<Project>> {
            Ok(self.projects.clone())
        }

        fn list_members(&self, project_identifier: Option<&str>) -> Result<Vec<ProjectMember>> {
            let identifier = project_identifier.unwrap_or_default();
            Ok(self.members.get(identifier).cloned().unwrap_or_default())
        }
    }

    /// Treats any directory as a valid repository and creates directories.
    struct DirAdmin;

    impl SvnAdmin for DirAdmin {
        fn verify(&self, path: &Path) -> bool {
            path.is_dir()
        }

        fn create(&self, path: &Path, _extra_flags: &[&str]) -> Result<()> {
            fs::create_dir_all(path).map_err(Into::into)
        }
    }

    fn project(identifier: &str) -> Project {
        Project {
            identifier: identifier.to_string(),
            name: identifier.to_uppercase(),
            description: None,
            is_subproject: false,
            updated_on: None,
        }
    }

    fn member(login: &str, project: &str, role_id: i64) -> ProjectMember {
        ProjectMember {
            login: login.to_string(),
            first_name: login.to_string(),
            last_name: "Example".to_string(),
            mail: format!("{login}@example.org"),
            project_identifier: project.to_string(),
            role_id,
            is_admin: false,
            last_login_on: None,
        }
    }

    fn config(root: &Path, create_missing: bool) -> RunConfig {
        RunConfig {
            database: root.join("unused.db"),
            svn_root: root.join("svn"),
            output_file: root.join("access.authZ"),
            policy: RolePolicy::new(vec![1], vec![2]),
            create_missing,
            verbose: false,
        }
    }

    #[test]
    fn creates_missing_repositories_and_emits_their_sections() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("svn")).unwrap();

        let source = FakeSource {
            projects: vec![project("alpha")],
            members: BTreeMap::from([(
                "alpha".to_string(),
                vec![member("Alice", "alpha", 1), member("Bob", "alpha", 2)],
            )]),
        };

        let report = run(&config(dir.path(), true), &source, &DirAdmin).unwrap();

        assert_eq!(report.projects, 1);
        assert_eq!(report.created, 1);
        assert_eq!(report.existing, 1);
        assert_eq!(report.blocked, 0);
        assert!(dir.path().join("svn/alpha").is_dir());

        let document = fs::read_to_string(dir.path().join("access.authZ")).unwrap();
        assert!(document.contains("alpha-r = Alice"));
        assert!(document.contains("alpha-rw = Bob"));
        assert!(document.contains("[alpha:/]"));
    }

    #[test]
    fn disabled_creation_leaves_missing_projects_out_of_the_document() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("svn")).unwrap();

        let source = FakeSource {
            projects: vec![project("alpha")],
            members: BTreeMap::new(),
        };

        let report = run(&config(dir.path(), false), &source, &DirAdmin).unwrap();

        assert_eq!(report.created, 0);
        assert_eq!(report.existing, 0);
        assert!(!dir.path().join("svn/alpha").exists());

        let document = fs::read_to_string(dir.path().join("access.authZ")).unwrap();
        assert!(!document.contains("alpha"));
        assert!(document.contains("[/]\n* = \n"));
    }

    #[test]
    fn blocked_paths_are_counted_and_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("svn")).unwrap();
        fs::write(dir.path().join("svn/alpha"), b"in the way").unwrap();

        let source = FakeSource {
            projects: vec![project("alpha"), project("beta")],
            members: BTreeMap::new(),
        };

        let report = run(&config(dir.path(), true), &source, &DirAdmin).unwrap();

        assert_eq!(report.blocked, 1);
        assert_eq!(report.created, 1);
        assert_eq!(report.existing, 1);

        let document = fs::read_to_string(dir.path().join("access.authZ")).unwrap();
        assert!(!document.contains("[alpha:/]"));
        assert!(document.contains("[beta:/]"));
    }
}
