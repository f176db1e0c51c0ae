//! Card records.
//!
//! A card describes the output artifact of one pipeline step. Its metadata
//! and its payload live in the same row but are always read separately.

use serde::{Deserialize, Serialize};

/// Card metadata, without the payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Database generated identifier.
    pub id: i64,
    /// Owning build.
    pub build: i64,
    /// Owning stage within the build.
    pub stage: i64,
    /// Owning step within the stage.
    pub step: i64,
    /// Shape or version of the payload.
    pub schema: String,
}

/// Card payload, fetched on its own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardData {
    pub data: Vec<u8>,
}

impl CardData {
    /// Consumes the payload, returning the raw bytes.
    #[must_use]
    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }
}

/// Write-side card input.
///
/// `id` is filled in by the store once the row has been inserted and is
/// otherwise left at zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCard {
    pub id: i64,
    pub build: i64,
    pub stage: i64,
    pub step: i64,
    pub schema: String,
    pub data: Vec<u8>,
}

impl CreateCard {
    /// Creates a new, not yet persisted card.
    #[must_use]
    pub fn new(build: i64, stage: i64, step: i64, schema: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            id: 0,
            build,
            stage,
            step,
            schema: schema.into(),
            data,
        }
    }

    /// Returns `true` once the store has assigned an identifier.
    #[must_use]
    pub const fn is_persisted(&self) -> bool {
        self.id != 0
    }

    /// Returns the metadata half of this card.
    #[must_use]
    pub fn to_card(&self) -> Card {
        Card {
            id: self.id,
            build: self.build,
            stage: self.stage,
            step: self.step,
            schema: self.schema.clone(),
        }
    }
}
