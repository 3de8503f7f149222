//! Database schema definitions

/// SQL to create the notes table
pub const CREATE_NOTES_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS notes (
    id TEXT PRIMARY KEY,
    date_key TEXT NOT NULL,
    title TEXT NOT NULL DEFAULT '',
    content TEXT NOT NULL DEFAULT '',
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
)
";

/// SQL to create the date lookup index
pub const CREATE_DATE_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_notes_date ON notes(date_key)";

/// All schema creation statements, applied idempotently at startup
pub fn all_schema_statements() -> Vec<&'static str> {
    vec![CREATE_NOTES_TABLE, CREATE_DATE_INDEX]
}
