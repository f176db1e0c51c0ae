//! # Keel Domain
//!
//! Records persisted by the storage layer.

pub mod card;

pub use card::*;
