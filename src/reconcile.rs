//! Repository reconciliation: classifies every project path on disk and
//! creates the repositories that are missing.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::{info, warn};

use crate::svn::SvnAdmin;
use crate::types::{Project, RepoClass, RepoPathState};

/// Flags passed to repository creation. `--pre-1.5-compatible` keeps new
/// repositories usable by SVN 1.4 clients.
pub const SVN_COMPAT_FLAGS: &[&str] = &["--pre-1.5-compatible"];

/// Classifies every project's repository path under `svn_root`, returning an
/// immutable per-identifier map consumed by creation and generation.
///
/// Per-path verify failures degrade to a blocked classification and never
/// abort processing of the remaining projects.
pub fn check_existing_repositories(
    projects: &[Project],
    svn_root: &Path,
    admin: &dyn SvnAdmin,
) -> BTreeMap<String, RepoPathState> {
    let mut states = BTreeMap::new();

    for project in projects {
        let joined = svn_root.join(&project.identifier);
        let path = std::path::absolute(&joined).unwrap_or(joined);
        let class = classify(&path, admin);

        match class {
            RepoClass::ValidExisting => {
                info!("project \"{}\": EXISTS at {}", project.identifier, path.display());
            }
            RepoClass::ValidCreatable => {
                info!("project \"{}\": MISSING at {}", project.identifier, path.display());
            }
            RepoClass::BlockedByNonSvnDir => {
                warn!(
                    "project \"{}\": a non-SVN directory already exists at {}",
                    project.identifier,
                    path.display()
                );
            }
            RepoClass::BlockedByFile => {
                warn!(
                    "project \"{}\": a file already exists at {}",
                    project.identifier,
                    path.display()
                );
            }
        }

        states.insert(project.identifier.clone(), RepoPathState { path, class });
    }

    states
}

fn classify(path: &Path, admin: &dyn SvnAdmin) -> RepoClass {
    if !path.exists() {
        return RepoClass::ValidCreatable;
    }

    if path.is_dir() {
        if admin.verify(path) {
            RepoClass::ValidExisting
        } else {
            RepoClass::BlockedByNonSvnDir
        }
    } else {
        RepoClass::BlockedByFile
    }
}

/// Creates a repository for every creatable path, promoting it to existing
/// on success. Per-path failures are logged and skipped; already existing
/// repositories are never re-created. Returns the number created.
pub fn create_missing_repositories(
    states: &mut BTreeMap<String, RepoPathState>,
    admin: &dyn SvnAdmin,
) -> usize {
    let mut created = 0;

    for (identifier, state) in states.iter_mut() {
        if state.class != RepoClass::ValidCreatable {
            continue;
        }

        match admin.create(&state.path, SVN_COMPAT_FLAGS) {
            Ok(()) => {
                info!("created repository for \"{identifier}\" at {}", state.path.display());
                state.class = RepoClass::ValidExisting;
                created += 1;
            }
            Err(e) => {
                warn!(
                    "failed to create repository for \"{identifier}\" at {}: {e}",
                    state.path.display()
                );
            }
        }
    }

    if created == 0 {
        info!("no repositories to create");
    }

    created
}
