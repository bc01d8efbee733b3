//! Task repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over the canonical `tasks` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - `create` never writes a row for an empty trimmed title.
//! - `list` always returns rows ordered by `id` descending.
//! - Mutations targeting an unknown id complete without error or effect.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::task::{NewTask, Task, TaskId, DEFAULT_PRIORITY};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const TASKS_TABLE: &str = "tasks";

const REQUIRED_COLUMNS: &[&str] = &[
    "id",
    "title",
    "impact",
    "micro_task",
    "completed",
    "priority",
];

const TASK_SELECT_SQL: &str = "SELECT
    id,
    title,
    impact,
    micro_task,
    completed,
    priority
FROM tasks";

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for task persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidData(String),
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
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted task data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} has no migrations applied (expected {expected_version})"
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
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for task CRUD operations.
pub trait TaskRepository {
    /// Persists a new task.
    ///
    /// Returns `Ok(None)` without writing when the trimmed title is empty.
    fn create(&self, payload: &NewTask) -> RepoResult<Option<TaskId>>;

    /// Lists all tasks ordered by `id` descending.
    fn list(&self) -> RepoResult<Vec<Task>>;

    /// Sets the completion flag; unknown ids are a no-op.
    fn set_completed(&self, id: TaskId, completed: bool) -> RepoResult<()>;

    /// Deletes a task; unknown ids are a no-op.
    fn delete(&self, id: TaskId) -> RepoResult<()>;
}

/// SQLite-backed task repository.
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    /// Wraps a bootstrapped connection after verifying the schema.
    ///
    /// # Errors
    /// - `UninitializedConnection` when no migrations have been applied.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` when the `tasks`
    ///   schema does not match what this binary expects.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let actual_version =
            conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
        if actual_version == 0 {
            return Err(RepoError::UninitializedConnection {
                expected_version: latest_version(),
                actual_version,
            });
        }

        let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1);")?;
        let mut rows = stmt.query([TASKS_TABLE])?;
        let mut columns = Vec::new();
        while let Some(row) = rows.next()? {
            columns.push(row.get::<_, String>(0)?);
        }

        if columns.is_empty() {
            return Err(RepoError::MissingRequiredTable(TASKS_TABLE));
        }
        for column in REQUIRED_COLUMNS {
            if !columns.iter().any(|name| name == column) {
                return Err(RepoError::MissingRequiredColumn {
                    table: TASKS_TABLE,
                    column,
                });
            }
        }

        Ok(Self { conn })
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn create(&self, payload: &NewTask) -> RepoResult<Option<TaskId>> {
        let Some(title) = payload.normalized_title() else {
            return Ok(None);
        };

        self.conn.execute(
            "INSERT INTO tasks (title, impact, micro_task, completed, priority)
             VALUES (?1, ?2, ?3, 0, ?4);",
            params![
                title,
                payload.impact,
                payload.normalized_micro_task(),
                payload.effective_priority(),
            ],
        )?;

        Ok(Some(self.conn.last_insert_rowid()))
    }

    fn list(&self) -> RepoResult<Vec<Task>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TASK_SELECT_SQL} ORDER BY id DESC;"))?;

        let mut rows = stmt.query([])?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }

        Ok(tasks)
    }

    fn set_completed(&self, id: TaskId, completed: bool) -> RepoResult<()> {
        // Zero rows changed means the id does not exist; that is a no-op.
        self.conn.execute(
            "UPDATE tasks SET completed = ?1 WHERE id = ?2;",
            params![bool_to_int(completed), id],
        )?;

        Ok(())
    }

    fn delete(&self, id: TaskId) -> RepoResult<()> {
        self.conn
            .execute("DELETE FROM tasks WHERE id = ?1;", [id])?;

        Ok(())
    }
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<Task> {
    // Legacy rows may hold NULL in columns that only carry a DEFAULT;
    // read them with the same fallbacks the schema defaults imply.
    let completed = match row.get::<_, Option<i64>>("completed")? {
        None | Some(0) => false,
        Some(1) => true,
        Some(other) => {
            return Err(RepoError::InvalidData(format!(
                "invalid completed value `{other}` in tasks.completed"
            )));
        }
    };

    Ok(Task {
        id: row.get("id")?,
        title: row.get("title")?,
        impact: row.get("impact")?,
        micro_task: row.get("micro_task")?,
        completed,
        priority: row
            .get::<_, Option<i64>>("priority")?
            .unwrap_or(DEFAULT_PRIORITY),
    })
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
