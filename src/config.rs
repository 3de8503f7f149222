use std::{env, path::PathBuf};

/// Process configuration, resolved once at startup and passed down explicitly.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite database file. Its parent directory is created if absent.
    pub db_path: PathBuf,
    /// Root directory of the static front-end.
    pub static_dir: PathBuf,
    /// Address the HTTP server listens on.
    pub bind_addr: String,
}

impl Config {
    /// Every setting has a default, so a bare environment still boots.
    pub fn from_env() -> Self {
        let db_path = env::var("WEBNOTES_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/var/opt/webnotes/notes.db"));

        let static_dir = env::var("WEBNOTES_STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));

        let bind_addr = env::var("WEBNOTES_BIND").unwrap_or_else(|_| "0.0.0.0:8888".to_string());

        Self {
            db_path,
            static_dir,
            bind_addr,
        }
    }
}
