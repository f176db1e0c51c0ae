//! Transaction-scoped database access.
//!
//! [`Database`] owns the connection pool and decides how a unit of work is
//! wrapped in a transaction. Callers hand it a closure; the closure receives
//! a connection bound to the open transaction plus the statement [`Binder`]
//! for the pool's dialect. The transaction commits when the closure succeeds
//! and rolls back when it fails, panics or is dropped mid-flight.
//!
//! ```ignore
//! let cards = db
//!     .view(|conn, binder| Box::pin(find_by_build(conn, binder, 7)))
//!     .await?;
//! ```

mod binder;
mod dialect;
mod params;

pub use binder::Binder;
pub use dialect::Dialect;
pub use params::{Params, Value};

use keel_config::DatabaseConfig;
use keel_core::{BoxFuture, KeelResult};
use sqlx::any::AnyPoolOptions;
use sqlx::{AnyConnection, AnyPool, Executor};
use tokio::sync::RwLock;
use tracing::{info, warn};

/// Connection pool plus the transaction discipline for its dialect.
pub struct Database {
    pool: AnyPool,
    dialect: Dialect,
    binder: Binder,
    /// Serializes writers for engines that allow only one at a time.
    lock: Option<RwLock<()>>,
}

impl Database {
    /// Wraps an existing pool whose dialect is already known.
    #[must_use]
    pub fn new(pool: AnyPool, dialect: Dialect) -> Self {
        Self {
            pool,
            dialect,
            binder: Binder::new(dialect),
            lock: dialect.requires_write_lock().then(|| RwLock::new(())),
        }
    }

    /// Wraps an existing pool, asking the driver which engine it talks to.
    pub async fn from_pool(pool: AnyPool) -> KeelResult<Self> {
        let dialect = {
            let conn = pool.acquire().await?;
            Dialect::from_backend_name(conn.backend_name())?
        };
        Ok(Self::new(pool, dialect))
    }

    /// Opens a pool from configuration.
    ///
    /// An in-memory SQLite database only exists for the lifetime of its
    /// connection, so such URLs get a single connection that is never
    /// recycled.
    pub async fn connect(config: &DatabaseConfig) -> KeelResult<Self> {
        sqlx::any::install_default_drivers();

        let dialect = Dialect::from_url(&config.url)?;
        info!(dialect = %dialect, "Connecting to database...");

        let mut options = AnyPoolOptions::new()
            .min_connections(config.min_connections)
            .max_connections(config.max_connections)
            .acquire_timeout(config.connect_timeout())
            .idle_timeout(Some(config.idle_timeout()));

        if dialect == Dialect::Sqlite && config.url.contains(":memory:") {
            options = options
                .min_connections(1)
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }

        let pool = options.connect(&config.url).await.map_err(|e| {
            warn!("Failed to connect to database: {}", e);
            e
        })?;

        info!(dialect = %dialect, "Database connection pool established");
        Ok(Self::new(pool, dialect))
    }

    #[must_use]
    pub const fn dialect(&self) -> Dialect {
        self.dialect
    }

    #[must_use]
    pub const fn binder(&self) -> &Binder {
        &self.binder
    }

    #[must_use]
    pub const fn pool(&self) -> &AnyPool {
        &self.pool
    }

    /// Runs `f` inside a read-only transaction.
    pub async fn view<T, F>(&self, f: F) -> KeelResult<T>
    where
        T: Send,
        F: for<'c> FnOnce(&'c mut AnyConnection, &'c Binder) -> BoxFuture<'c, T> + Send,
    {
        let _guard = match &self.lock {
            Some(lock) => Some(lock.read().await),
            None => None,
        };
        self.run(true, f).await
    }

    /// Runs `f` inside a read-write transaction, holding the writer lock
    /// where the dialect needs one.
    pub async fn lock<T, F>(&self, f: F) -> KeelResult<T>
    where
        T: Send,
        F: for<'c> FnOnce(&'c mut AnyConnection, &'c Binder) -> BoxFuture<'c, T> + Send,
    {
        let _guard = match &self.lock {
            Some(lock) => Some(lock.write().await),
            None => None,
        };
        self.run(false, f).await
    }

    async fn run<T, F>(&self, read_only: bool, f: F) -> KeelResult<T>
    where
        T: Send,
        F: for<'c> FnOnce(&'c mut AnyConnection, &'c Binder) -> BoxFuture<'c, T> + Send,
    {
        let mut tx = self.pool.begin().await?;

        if read_only {
            if let Some(stmt) = self.dialect.read_only_statement() {
                (&mut *tx).execute(stmt).await?;
            }
        }

        let result = f(&mut *tx, &self.binder).await;
        match result {
            Ok(value) => {
                tx.commit().await?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    warn!("Transaction rollback failed: {}", rollback_err);
                }
                Err(err)
            }
        }
    }

    /// Checks if the database connection is healthy.
    pub async fn health_check(&self) -> KeelResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Closes the pool, waiting for checked-out connections to return.
    pub async fn close(&self) {
        info!("Closing database connection pool...");
        self.pool.close().await;
        info!("Database connection pool closed");
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("dialect", &self.dialect)
            .field("size", &self.pool.size())
            .field("num_idle", &self.pool.num_idle())
            .finish()
    }
}
