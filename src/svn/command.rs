use std::path::Path;
use std::process::Command;

use tracing::warn;

use super::SvnAdmin;
use crate::error::{Error, Result};

/// Driver for the local `svnadmin` command-line tool.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandSvnAdmin;

impl SvnAdmin for CommandSvnAdmin {
    fn verify(&self, path: &Path) -> bool {
        match Command::new("svnadmin")
            .arg("verify")
            .arg("-q")
            .arg(path)
            .output()
        {
            Ok(output) => output.status.success(),
            Err(e) => {
                warn!("svnadmin verify could not run for {}: {e}", path.display());
                false
            }
        }
    }

    fn create(&self, path: &Path, extra_flags: &[&str]) -> Result<()> {
        let mut cmd = Command::new("svnadmin");
        cmd.arg("create");
        cmd.args(extra_flags);
        cmd.arg(path);

        let output = cmd.output()?;
        if !output.status.success() {
            return Err(Error::Subprocess {
                command: format!("svnadmin create {}", path.display()),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(())
    }
}
