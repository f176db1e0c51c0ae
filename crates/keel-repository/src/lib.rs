//! # Keel Repository
//!
//! Persistence for CI cards: per-step metadata plus an opaque payload.
//!
//! ```text
//! Caller
//!   ↓  Arc<dyn CardStore>              (store interface)
//! SqlCardStore                         (statements, row mapping)
//!   ↓  Arc<dyn DatabasePoolInterface>  (pool interface)
//! Database                             (view / lock transactions, Binder)
//!   ↓
//! PostgreSQL | MySQL | SQLite
//! ```
//!
//! ## Structure
//!
//! ```text
//! src/
//!   traits.rs        ← CardStore trait
//!   card/            ← SqlCardStore, queries, row mapping
//!   db/              ← Database, Dialect, Binder, Params
//!   pool.rs          ← DatabasePool component
//!   di.rs            ← CardStoreModule
//! ```

pub mod card;
pub mod db;
pub mod di;
pub mod pool;
pub mod traits;

pub use card::SqlCardStore;
pub use db::{Binder, Database, Dialect, Params, Value};
pub use di::*;
pub use pool::*;
pub use traits::*;
