//! Store trait definitions.

use async_trait::async_trait;
use keel_core::{Card, CreateCard, Interface, KeelResult};
use tokio::io::AsyncRead;

/// Readable card payload.
pub type CardReader = Box<dyn AsyncRead + Send + Unpin>;

/// Card store trait.
///
/// Every method runs as its own transaction: reads in a read-only one,
/// writes in a write-locked one. Errors from the driver are returned as-is;
/// single-row lookups that match nothing return [`KeelError::NotFound`].
///
/// [`KeelError::NotFound`]: keel_core::KeelError::NotFound
#[async_trait]
pub trait CardStore: Interface + Send + Sync {
    /// Finds the metadata of every card of a build, in no particular order.
    async fn find_cards_by_build(&self, build: i64) -> KeelResult<Vec<Card>>;

    /// Finds the card of a step.
    async fn find_card(&self, step: i64) -> KeelResult<Card>;

    /// Returns a reader over the payload of a card.
    async fn find_card_data(&self, id: i64) -> KeelResult<CardReader>;

    /// Persists a new card and stores its generated id in `card.id`.
    async fn create_card(&self, card: &mut CreateCard) -> KeelResult<()>;

    /// Deletes a card by id. Deleting a missing card is not an error.
    async fn delete_card(&self, id: i64) -> KeelResult<()>;
}
