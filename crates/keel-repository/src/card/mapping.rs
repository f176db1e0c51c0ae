//! Conversions between card records, parameter sets and result rows.

use crate::db::Params;
use keel_core::{Card, CardData, CreateCard, KeelResult};
use sqlx::any::AnyRow;
use sqlx::Row;

/// Parameters for lookups keyed by step.
pub fn to_params(step: i64) -> Params {
    Params::new().with("card_step", step)
}

/// Parameters for the insert statements.
pub fn to_save_card_params(card: &CreateCard) -> Params {
    Params::new()
        .with("card_build", card.build)
        .with("card_stage", card.stage)
        .with("card_step", card.step)
        .with("card_schema", card.schema.as_str())
        .with("card_data", card.data.as_slice())
}

/// Scans one metadata row.
pub fn scan_row(row: &AnyRow) -> KeelResult<Card> {
    Ok(Card {
        id: row.try_get("card_id")?,
        build: row.try_get("card_build")?,
        stage: row.try_get("card_stage")?,
        step: row.try_get("card_step")?,
        schema: row.try_get("card_schema")?,
    })
}

/// Scans a set of metadata rows.
pub fn scan_rows(rows: &[AnyRow]) -> KeelResult<Vec<Card>> {
    rows.iter().map(scan_row).collect()
}

/// Scans a payload-only row.
pub fn scan_row_card_data_only(row: &AnyRow) -> KeelResult<CardData> {
    Ok(CardData {
        data: row.try_get("card_data")?,
    })
}
