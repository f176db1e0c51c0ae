//! # Keel Core
//!
//! Core types and error definitions shared by the Keel storage crates.

pub mod domain;
pub mod error;
pub mod result;
pub mod telemetry;

pub use domain::*;
pub use error::*;
pub use result::*;
pub use telemetry::*;

// Re-export shaku for dependency injection
pub use shaku::{module, HasComponent, Interface};
