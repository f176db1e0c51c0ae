//! Dependency injection module using Shaku.

use crate::db::Database;
use crate::{CardStore, DatabasePool, DatabasePoolInterface, DatabasePoolParameters, SqlCardStore};
use keel_config::DatabaseConfig;
use keel_core::KeelResult;
use shaku::{module, HasComponent};
use std::sync::Arc;

// Card storage module: the pool and the store that runs its transactions.
module! {
    pub CardStoreModule {
        components = [
            DatabasePool,
            SqlCardStore,
        ],
        providers = [],
    }
}

/// Builds the card store module around an open [`Database`].
#[must_use]
pub fn build_card_store_module(db: Database) -> Arc<CardStoreModule> {
    let module = CardStoreModule::builder()
        .with_component_parameters::<DatabasePool>(DatabasePoolParameters { db })
        .build();

    Arc::new(module)
}

/// Connects to the configured database and builds the card store module.
pub async fn connect_card_store_module(config: &DatabaseConfig) -> KeelResult<Arc<CardStoreModule>> {
    let db = Database::connect(config).await?;
    Ok(build_card_store_module(db))
}

/// Resolves storage components from a module.
pub trait StoreResolver {
    /// Resolves the database pool from the module.
    fn database_pool(&self) -> Arc<dyn DatabasePoolInterface>;

    /// Resolves the card store from the module.
    fn card_store(&self) -> Arc<dyn CardStore>;
}

impl StoreResolver for CardStoreModule {
    fn database_pool(&self) -> Arc<dyn DatabasePoolInterface> {
        self.resolve()
    }

    fn card_store(&self) -> Arc<dyn CardStore> {
        self.resolve()
    }
}
