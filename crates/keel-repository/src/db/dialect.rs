//! SQL dialects supported by the storage layer.

use keel_core::{KeelError, KeelResult};
use std::fmt;

/// Relational engine behind a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    Postgres,
    MySql,
    Sqlite,
}

impl Dialect {
    /// Detects the dialect from a connection URL scheme.
    pub fn from_url(url: &str) -> KeelResult<Self> {
        let scheme = url.split(':').next().unwrap_or_default().to_ascii_lowercase();
        match scheme.as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "mysql" | "mariadb" => Ok(Self::MySql),
            "sqlite" => Ok(Self::Sqlite),
            _ => Err(KeelError::configuration(format!(
                "unsupported database scheme '{}'",
                scheme
            ))),
        }
    }

    /// Maps the backend name reported by the sqlx `Any` driver.
    pub fn from_backend_name(name: &str) -> KeelResult<Self> {
        match name {
            "PostgreSQL" => Ok(Self::Postgres),
            "MySQL" => Ok(Self::MySql),
            "SQLite" => Ok(Self::Sqlite),
            other => Err(KeelError::configuration(format!("unsupported database backend '{}'", other))),
        }
    }

    /// Whether an `INSERT` can hand back the generated key with `RETURNING`.
    #[must_use]
    pub const fn supports_returning(self) -> bool {
        matches!(self, Self::Postgres)
    }

    /// Positional placeholder for the 1-based argument `index`.
    #[must_use]
    pub fn placeholder(self, index: usize) -> String {
        match self {
            Self::Postgres => format!("${}", index),
            Self::MySql | Self::Sqlite => "?".to_string(),
        }
    }

    /// Statement that marks an open transaction as read-only, if the engine
    /// supports doing so after `BEGIN`.
    #[must_use]
    pub const fn read_only_statement(self) -> Option<&'static str> {
        match self {
            Self::Postgres => Some("SET TRANSACTION READ ONLY"),
            Self::MySql | Self::Sqlite => None,
        }
    }

    /// Query returning the key generated by the last insert on the current
    /// connection, for drivers that do not report it with the result.
    #[must_use]
    pub const fn last_insert_id_query(self) -> Option<&'static str> {
        match self {
            Self::Sqlite => Some("SELECT last_insert_rowid()"),
            Self::MySql => Some("SELECT LAST_INSERT_ID()"),
            Self::Postgres => None,
        }
    }

    /// Whether writers must be serialized inside the process.
    ///
    /// SQLite allows a single writer per database file.
    #[must_use]
    pub const fn requires_write_lock(self) -> bool {
        matches!(self, Self::Sqlite)
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Postgres => write!(f, "postgres"),
            Self::MySql => write!(f, "mysql"),
            Self::Sqlite => write!(f, "sqlite"),
        }
    }
}
