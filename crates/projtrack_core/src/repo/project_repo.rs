//! Project repository contract and slot-store implementations.
//!
//! # Responsibility
//! - Own the persisted Project Set as one serialized blob in a named slot.
//! - Normalize missing/corrupt slot data to an empty set on load.
//!
//! # Invariants
//! - The whole set is replaced on every write; no per-record updates exist.
//! - A blob that fails to parse as the record-array shape is never propagated
//!   downstream; it reads as empty.

use crate::db::DbError;
use crate::model::project::Project;
use log::warn;
use rusqlite::{params, Connection};
use std::cell::{Cell, RefCell};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

/// Slot key the original application stored its project list under.
pub const PROJECTS_SLOT_KEY: &str = "gerador-projetos";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for project-set persistence operations.
#[derive(Debug)]
pub enum RepoError {
    Storage(DbError),
    Serialize(serde_json::Error),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "failed to serialize project set: {err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection is not migrated: expected schema version {expected_version}, found {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Serialize(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Storage(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Storage(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// Durable-storage contract for the full project set.
pub trait ProjectRepository {
    /// Reads the persisted set. Missing or corrupt slot data reads as empty.
    fn load(&self) -> Vec<Project>;
    /// Serializes the full set and overwrites the slot in one atomic write.
    fn replace_all(&self, projects: &[Project]) -> RepoResult<()>;
}

/// SQLite-backed project repository over a single named slot.
pub struct SqliteProjectRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProjectRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl ProjectRepository for SqliteProjectRepository<'_> {
    fn load(&self) -> Vec<Project> {
        let blob: Option<String> = match self.conn.query_row(
            "SELECT value FROM kv_slots WHERE key = ?1;",
            [PROJECTS_SLOT_KEY],
            |row| row.get(0),
        ) {
            Ok(value) => Some(value),
            Err(rusqlite::Error::QueryReturnedNoRows) => None,
            Err(err) => {
                warn!(
                    "event=slot_load module=repo status=error slot={PROJECTS_SLOT_KEY} error={err}"
                );
                None
            }
        };

        match blob {
            Some(blob) => parse_project_blob(&blob),
            None => Vec::new(),
        }
    }

    fn replace_all(&self, projects: &[Project]) -> RepoResult<()> {
        let blob = serde_json::to_string(projects)?;
        self.conn.execute(
            "INSERT INTO kv_slots (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value;",
            params![PROJECTS_SLOT_KEY, blob],
        )?;
        Ok(())
    }
}

/// Parses the slot blob as the strict record-array shape.
///
/// Anything that does not match reads as an empty set. Corruption favors
/// availability over strict integrity; callers never see malformed records.
fn parse_project_blob(blob: &str) -> Vec<Project> {
    match serde_json::from_str::<Vec<Project>>(blob) {
        Ok(projects) => projects,
        Err(err) => {
            warn!(
                "event=slot_load module=repo status=corrupt slot={PROJECTS_SLOT_KEY} error={err}"
            );
            Vec::new()
        }
    }
}

/// In-memory project repository for tests and embedding previews.
///
/// Clones share one underlying set, so a test can hold a handle while the
/// service owns another. `fail_next_replace` poisons the next write to
/// exercise storage-failure paths.
#[derive(Clone, Default)]
pub struct MemoryProjectRepository {
    state: Rc<MemoryState>,
}

#[derive(Default)]
struct MemoryState {
    projects: RefCell<Vec<Project>>,
    fail_next_replace: Cell<bool>,
}

impl MemoryProjectRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next `replace_all` fail as if the medium rejected the write.
    pub fn fail_next_replace(&self) {
        self.state.fail_next_replace.set(true);
    }
}

impl ProjectRepository for MemoryProjectRepository {
    fn load(&self) -> Vec<Project> {
        self.state.projects.borrow().clone()
    }

    fn replace_all(&self, projects: &[Project]) -> RepoResult<()> {
        if self.state.fail_next_replace.take() {
            return Err(RepoError::Storage(DbError::Sqlite(
                rusqlite::Error::SqliteFailure(
                    rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_FULL),
                    Some("simulated slot write rejection".to_string()),
                ),
            )));
        }
        *self.state.projects.borrow_mut() = projects.to_vec();
        Ok(())
    }
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = crate::db::migrations::latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, "kv_slots")? {
        return Err(RepoError::MissingRequiredTable("kv_slots"));
    }

    for column in ["key", "value"] {
        if !table_has_column(conn, "kv_slots", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "kv_slots",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
