mod command;

pub use command::CommandSvnAdmin;

use std::path::Path;

use crate::error::Result;

/// The narrow slice of `svnadmin` used by reconciliation and creation,
/// as a trait so both can be exercised with a fake in tests.
pub trait SvnAdmin: Send + Sync {
    /// Returns true iff `path` holds a repository the admin tool accepts.
    /// Any execution error counts as "not a valid repository".
    fn verify(&self, path: &Path) -> bool;

    /// Creates a repository at `path`. On failure the error carries the
    /// captured stdout and stderr of the command.
    fn create(&self, path: &Path, extra_flags: &[&str]) -> Result<()>;
}
