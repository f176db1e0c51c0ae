//! Database pool component.

use crate::db::{Database, Dialect};
use async_trait::async_trait;
use keel_config::DatabaseConfig;
use keel_core::{Interface, KeelResult};
use shaku::Component;
use std::sync::Arc;

/// Interface for database pool operations.
///
/// This trait abstracts the pool for dependency injection; stores reach the
/// transaction manager through [`inner`](Self::inner).
#[async_trait]
pub trait DatabasePoolInterface: Interface + Send + Sync {
    /// Returns the transaction manager backing this pool.
    fn inner(&self) -> &Database;

    /// Returns the SQL dialect of the pool.
    fn dialect(&self) -> Dialect {
        self.inner().dialect()
    }

    /// Checks if the database connection is healthy.
    async fn health_check(&self) -> KeelResult<()>;

    /// Closes the database pool.
    async fn close(&self);
}

/// Database pool wrapper.
#[derive(Component)]
#[shaku(interface = DatabasePoolInterface)]
pub struct DatabasePool {
    db: Database,
}

impl DatabasePool {
    /// Creates a new database pool from configuration.
    ///
    /// Alias: [`connect`](Self::connect)
    pub async fn new(config: &DatabaseConfig) -> KeelResult<Self> {
        let db = Database::connect(config).await?;
        Ok(Self { db })
    }

    /// Creates a new database pool from configuration.
    ///
    /// This is an alias for [`new`](Self::new).
    pub async fn connect(config: &DatabaseConfig) -> KeelResult<Self> {
        Self::new(config).await
    }

    /// Creates a DatabasePool around an existing [`Database`].
    #[must_use]
    pub fn with_database(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DatabasePoolInterface for DatabasePool {
    fn inner(&self) -> &Database {
        &self.db
    }

    async fn health_check(&self) -> KeelResult<()> {
        self.db.health_check().await
    }

    async fn close(&self) {
        self.db.close().await;
    }
}

impl std::ops::Deref for DatabasePool {
    type Target = Database;

    fn deref(&self) -> &Self::Target {
        &self.db
    }
}

impl std::fmt::Debug for DatabasePool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabasePool").field("db", &self.db).finish()
    }
}

/// Creates a shared database pool.
pub async fn create_pool(config: &DatabaseConfig) -> KeelResult<Arc<DatabasePool>> {
    let pool = DatabasePool::new(config).await?;
    Ok(Arc::new(pool))
}
