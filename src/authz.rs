//! AuthZ document generation: renders the path-based access-control file
//! from reconciled repository states and per-project member lists.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::error::{Error, Result};
use crate::store::DataSource;
use crate::types::{AccessTier, RepoPathState, RolePolicy};

pub const TOOL_NAME: &str = "svnsteward";
pub const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Renders the complete AuthZ document for every existing repository.
///
/// Document order: header comment block, `[groups]` definitions, the global
/// `[/]` deny section, then one section per repository in identifier order.
/// `generated_at` is a parameter so output is byte-deterministic under test.
pub fn generate(
    states: &BTreeMap<String, RepoPathState>,
    source: &dyn DataSource,
    policy: &RolePolicy,
    generated_at: DateTime<Utc>,
) -> Result<String> {
    let mut groups = String::from("[groups]\n");
    let mut sections = String::new();

    for (identifier, state) in states {
        if !state.class.exists() {
            continue;
        }

        let members = source.list_members(Some(identifier))?;

        let mut read_users: Vec<&str> = Vec::new();
        let mut read_write_users: Vec<&str> = Vec::new();
        for member in &members {
            match policy.resolve(member.role_id) {
                AccessTier::None => {}
                AccessTier::Read => read_users.push(&member.login),
                AccessTier::ReadWrite => read_write_users.push(&member.login),
            }
        }

        sections.push_str(&format!(
            "# Permissions for repos at {}\n",
            state.path.display()
        ));
        sections.push_str(&format!("[{identifier}:/]\n* = \n"));

        if read_users.is_empty() {
            sections.push_str(&format!(
                "# No read-only users for project \"{identifier}\"\n"
            ));
        } else {
            groups.push_str(&format!("{identifier}-r = {}\n", read_users.join(", ")));
            sections.push_str(&format!("@{identifier}-r = r\n"));
        }

        if read_write_users.is_empty() {
            sections.push_str(&format!(
                "# No read-write users for project \"{identifier}\"\n"
            ));
        } else {
            groups.push_str(&format!(
                "{identifier}-rw = {}\n",
                read_write_users.join(", ")
            ));
            sections.push_str(&format!("@{identifier}-rw = rw\n"));
        }

        groups.push('\n');
        sections.push('\n');
    }

    let mut document = String::new();
    document.push_str("#\n# AUTOMATICALLY GENERATED AUTHZ FILE\n");
    document.push_str(&format!("# By {TOOL_NAME} {TOOL_VERSION}\n"));
    document.push_str("# *** DO NOT MODIFY BY HAND ***\n");
    document.push_str("# Contact system administrator !\n");
    document.push_str(&format!(
        "# File generated on: {}\n\n",
        generated_at.to_rfc2822()
    ));
    document.push_str(&groups);
    document.push_str("# Default policy is no access\n[/]\n* = \n\n");
    document.push_str(&sections);

    Ok(document)
}

/// Persists the document atomically: written to a temp file next to the
/// target, then renamed over it, so a failed write never truncates a
/// previously generated file.
pub fn write_authz_file(output: &Path, document: &str) -> Result<()> {
    let dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(Error::Persist)?;
    tmp.write_all(document.as_bytes()).map_err(Error::Persist)?;
    tmp.persist(output).map_err(|e| Error::Persist(e.error))?;

    info!("saved authorization file: {}", output.display());
    Ok(())
}
