use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rusqlite::{Connection, Row, params};

use super::DataSource;
use crate::error::Result;
use crate::types::{Project, ProjectMember};

const MEMBER_COLUMNS: &str = "p.identifier, u.login, u.firstname, u.lastname, \
     u.mail, u.admin, u.last_login_on, m.role_id";

/// Redmine database access through a single shared connection. Opened once
/// and reused for every query in the run.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn open<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let conn = Connection::open(db_path)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Returns a guard to the underlying database connection.
    /// This allows consuming applications to execute custom SQL.
    pub fn connection(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn()
    }
}

fn parse_datetime(value: Option<String>) -> Option<DateTime<Utc>> {
    let s = value?;
    DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            // Handle SQLite's default datetime format: "YYYY-MM-DD HH:MM:SS"
            chrono::NaiveDateTime::parse_from_str(&s, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc())
        })
        .map_err(|e| {
            tracing::warn!("Invalid datetime in database: '{}' - {}", s, e);
            e
        })
        .ok()
}

fn member_from_row(row: &Row<'_>) -> rusqlite::Result<ProjectMember> {
    Ok(ProjectMember {
        project_identifier: row.get(0)?,
        login: row.get(1)?,
        first_name: row.get(2)?,
        last_name: row.get(3)?,
        mail: row.get(4)?,
        is_admin: row.get(5)?,
        last_login_on: parse_datetime(row.get(6)?),
        role_id: row.get(7)?,
    })
}

impl DataSource for SqliteStore {
    fn list_roles(&self) -> Result<BTreeMap<i64, String>> {
        let conn = self.conn();
        let mut stmt = conn.prepare("SELECT id, name FROM roles")?;

        let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;

        let mut roles = BTreeMap::new();
        for row in rows {
            let (id, name): (i64, String) = row?;
            roles.insert(id, name);
        }
        Ok(roles)
    }

    fn list_projects(&self) -> Result<Vec<Project>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT identifier, name, description, parent_id, updated_on
             FROM projects ORDER BY identifier",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(Project {
                identifier: row.get(0)?,
                name: row.get(1)?,
                description: row.get(2)?,
                is_subproject: row.get::<_, Option<i64>>(3)?.is_some_and(|id| id > 0),
                updated_on: parse_datetime(row.get(4)?),
            })
        })?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Into::into)
    }

    fn list_members(&self, project_identifier: Option<&str>) -> Result<Vec<ProjectMember>> {
        let conn = self.conn();

        let members = match project_identifier {
            Some(identifier) => {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {MEMBER_COLUMNS}
                     FROM members m
                     JOIN projects p ON m.project_id = p.id
                     JOIN users u ON u.id = m.user_id
                     WHERE p.identifier = ?1
                     ORDER BY p.identifier, m.role_id"
                ))?;
                let rows = stmt.query_map(params![identifier], member_from_row)?;
                rows.collect::<std::result::Result<Vec<_>, _>>()?
            }
            None => {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {MEMBER_COLUMNS}
                     FROM members m
                     JOIN projects p ON m.project_id = p.id
                     JOIN users u ON u.id = m.user_id
                     ORDER BY p.identifier, m.role_id"
                ))?;
                let rows = stmt.query_map([], member_from_row)?;
                rows.collect::<std::result::Result<Vec<_>, _>>()?
            }
        };

        Ok(members)
    }
}
