mod schema;

use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::types::Value;
use rusqlite::{Connection, ErrorCode, params, params_from_iter};
use thiserror::Error;

use crate::models::Note;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("note with id `{0}` already exists")]
    DuplicateId(String),
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub struct Repository {
    db_path: PathBuf,
}

impl Repository {
    /// Remembers the database location, creating its directory if absent.
    pub fn new(db_path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }

        Ok(Self {
            db_path: db_path.to_path_buf(),
        })
    }

    pub fn init_schema(&self) -> Result<(), StoreError> {
        let conn = self.connect()?;

        for statement in schema::all_schema_statements() {
            conn.execute(statement, [])?;
        }

        Ok(())
    }

    // One connection per operation, dropped on every exit path. SQLite runs
    // in autocommit mode, so each statement commits on its own.
    fn connect(&self) -> Result<Connection, StoreError> {
        Ok(Connection::open(&self.db_path)?)
    }

    pub fn notes_for_date(&self, date_key: &str) -> Result<Vec<Note>, StoreError> {
        let conn = self.connect()?;

        let mut stmt = conn.prepare(
            "SELECT id, date_key, title, content, created_at, updated_at
             FROM notes WHERE date_key = ?1 ORDER BY created_at DESC",
        )?;
        let rows = stmt.query_map(params![date_key], |row| {
            Ok(Note {
                id: row.get("id")?,
                date_key: row.get("date_key")?,
                title: row.get("title")?,
                content: row.get("content")?,
                created_at: row.get("created_at")?,
                updated_at: row.get("updated_at")?,
            })
        })?;

        let mut notes = Vec::new();
        for note in rows {
            notes.push(note?);
        }

        Ok(notes)
    }

    pub fn dates_with_notes(&self) -> Result<Vec<String>, StoreError> {
        let conn = self.connect()?;

        let mut stmt =
            conn.prepare("SELECT DISTINCT date_key FROM notes ORDER BY date_key DESC")?;
        let rows = stmt.query_map([], |row| row.get(0))?;

        let mut dates = Vec::new();
        for date in rows {
            dates.push(date?);
        }

        Ok(dates)
    }

    pub fn create_note(&self, note: &Note) -> Result<(), StoreError> {
        let conn = self.connect()?;

        let inserted = conn.execute(
            "INSERT INTO notes (id, date_key, title, content, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                note.id,
                note.date_key,
                note.title,
                note.content,
                note.created_at,
                note.updated_at
            ],
        );

        match inserted {
            Ok(_) => Ok(()),
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == ErrorCode::ConstraintViolation =>
            {
                Err(StoreError::DuplicateId(note.id.clone()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Touches only the supplied fields; `updated_at` is always refreshed.
    /// Returns `false` when no row matched the id.
    pub fn update_note(
        &self,
        id: &str,
        title: Option<&str>,
        content: Option<&str>,
        updated_at: &str,
    ) -> Result<bool, StoreError> {
        let mut assignments: Vec<&str> = Vec::new();
        let mut values: Vec<Value> = Vec::new();

        if let Some(title) = title {
            assignments.push("title = ?");
            values.push(Value::Text(title.to_string()));
        }
        if let Some(content) = content {
            assignments.push("content = ?");
            values.push(Value::Text(content.to_string()));
        }
        assignments.push("updated_at = ?");
        values.push(Value::Text(updated_at.to_string()));
        values.push(Value::Text(id.to_string()));

        // The column list varies per call; every value stays a bound parameter.
        let sql = format!("UPDATE notes SET {} WHERE id = ?", assignments.join(", "));

        let conn = self.connect()?;
        let affected = conn.execute(&sql, params_from_iter(values))?;

        Ok(affected > 0)
    }

    /// Returns `false` when no row matched the id.
    pub fn delete_note(&self, id: &str) -> Result<bool, StoreError> {
        let conn = self.connect()?;
        let affected = conn.execute("DELETE FROM notes WHERE id = ?1", params![id])?;

        Ok(affected > 0)
    }
}
