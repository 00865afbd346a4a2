use std::path::PathBuf;

/// Classification of a project's repository path on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoClass {
    /// A valid repository already lives at the path.
    ValidExisting,
    /// Nothing at the path; a repository can be created there.
    ValidCreatable,
    /// A directory is in the way but it is not a recognized repository.
    BlockedByNonSvnDir,
    /// A regular file is in the way.
    BlockedByFile,
}

impl RepoClass {
    /// Valid paths either hold a repository or are free to receive one.
    #[must_use]
    pub fn is_valid(self) -> bool {
        matches!(self, Self::ValidExisting | Self::ValidCreatable)
    }

    /// Only existing repositories may receive access rules.
    #[must_use]
    pub fn exists(self) -> bool {
        matches!(self, Self::ValidExisting)
    }
}

/// Resolved repository state for one project, built once during
/// reconciliation and handed by argument to creation and generation.
#[derive(Debug, Clone)]
pub struct RepoPathState {
    /// Absolute repository path, `<svn-root>/<identifier>`.
    pub path: PathBuf,
    pub class: RepoClass,
}
