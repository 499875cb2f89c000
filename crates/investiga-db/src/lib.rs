//! Investiga DB - Investigation history for the Investiga OSINT aggregator.
//!
//! Saved searches live in a local `SQLite` file managed through `SQLx`, with
//! the schema embedded as migrations. Subject, results and cross groups are
//! stored as JSON text so a saved investigation reloads exactly as it was
//! exported.
//!
//! # Example
//!
//! ```rust,no_run
//! use investiga_core::{ResultSet, Subject, SubjectField};
//! use investiga_db::{investigations, Database};
//!
//! # async fn example() -> investiga_db::Result<()> {
//! let db = Database::open("investiga.db").await?;
//! let subject = Subject::default().with(SubjectField::Cpf, "123.456.789-09");
//! let id = investigations::save_investigation(
//!     db.pool(),
//!     &subject,
//!     &ResultSet::new(),
//!     &[],
//!     Some("triagem"),
//! )
//! .await?;
//! let saved = investigations::get_investigation(db.pool(), &id).await?;
//! assert_eq!(saved.subject, subject);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod error;
pub mod investigations;
pub mod migrations;

// Re-export commonly used types
pub use error::{DatabaseError, Result};
pub use investigations::{Investigation, InvestigationSummary};

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::path::Path;
use std::str::FromStr;

const IN_MEMORY: &str = ":memory:";

/// Connection pool for the history database.
#[derive(Debug, Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Open the database at `path`, creating it and its parent directory if
    /// needed, and apply pending migrations.
    ///
    /// # Errors
    /// Returns `DatabaseError` if the directory cannot be created, the file
    /// cannot be opened or a migration fails.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let db = Self::connect(path).await?;
        db.run_migrations().await?;
        Ok(db)
    }

    /// Fresh in-memory database with the schema applied.
    ///
    /// # Errors
    /// Returns `DatabaseError` if the pool cannot be created or a migration
    /// fails.
    pub async fn in_memory() -> Result<Self> {
        let db = Self::connect(IN_MEMORY).await?;
        db.run_migrations().await?;
        Ok(db)
    }

    /// Connect without running migrations.
    ///
    /// `:memory:` gets a single-connection pool so every query sees the same
    /// database.
    ///
    /// # Errors
    /// Returns `DatabaseError::Open` if the path is not valid UTF-8 or the
    /// pool cannot be created.
    pub async fn connect(path: impl AsRef<Path>) -> Result<Self> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            DatabaseError::Open("invalid database path: not valid UTF-8".to_string())
        })?;

        let connect_options = SqliteConnectOptions::from_str(path_str)
            .map_err(|e| DatabaseError::Open(format!("invalid connection string: {e}")))?
            .create_if_missing(true);

        let max_connections = if path_str == IN_MEMORY { 1 } else { 5 };
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(connect_options)
            .await
            .map_err(|e| DatabaseError::Open(format!("failed to open {path_str}: {e}")))?;

        tracing::debug!("Database pool created at {}", path_str);

        Ok(Self { pool })
    }

    /// Apply pending migrations.
    ///
    /// # Errors
    /// Returns `DatabaseError::Migration` if any migration fails.
    pub async fn run_migrations(&self) -> Result<()> {
        migrations::run_migrations(&self.pool).await
    }

    /// Underlying `SQLx` pool.
    #[must_use]
    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Close all connections.
    pub async fn close(self) {
        self.pool.close().await;
    }
}
