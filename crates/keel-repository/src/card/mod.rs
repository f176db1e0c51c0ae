//! SQL card store.
//!
//! One implementation serves every supported dialect. The only place the
//! dialect matters is [`CardStore::create_card`], which picks between an
//! `INSERT ... RETURNING` and a plain `INSERT` followed by the driver's
//! last-insert-id.

mod mapping;
mod queries;

pub use mapping::*;
pub use queries::*;

use crate::db::{Binder, Database, Params};
use crate::{CardReader, CardStore, DatabasePoolInterface};
use async_trait::async_trait;
use keel_core::{Card, CardData, CreateCard, KeelError, KeelResult};
use shaku::Component;
use sqlx::AnyConnection;
use sqlx::Row;
use std::io::Cursor;
use std::sync::Arc;
use tracing::debug;

/// Card store backed by the `cards` table.
#[derive(Component, Clone)]
#[shaku(interface = CardStore)]
pub struct SqlCardStore {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl SqlCardStore {
    /// Creates a new card store.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }

    fn db(&self) -> &Database {
        self.pool.inner()
    }
}

#[async_trait]
impl CardStore for SqlCardStore {
    async fn find_cards_by_build(&self, build: i64) -> KeelResult<Vec<Card>> {
        debug!("Finding cards by build: {}", build);
        self.db()
            .view(move |conn, binder| Box::pin(query_by_build(conn, binder, build)))
            .await
    }

    async fn find_card(&self, step: i64) -> KeelResult<Card> {
        debug!("Finding card by step: {}", step);
        self.db()
            .view(move |conn, binder| Box::pin(query_by_step(conn, binder, step)))
            .await
    }

    async fn find_card_data(&self, id: i64) -> KeelResult<CardReader> {
        debug!("Finding card data: {}", id);
        let out = self
            .db()
            .view(move |conn, binder| Box::pin(query_card_data(conn, binder, id)))
            .await?;
        Ok(Box::new(Cursor::new(out.data)))
    }

    async fn create_card(&self, card: &mut CreateCard) -> KeelResult<()> {
        debug!("Creating card for step: {}", card.step);
        let params = to_save_card_params(card);

        let id = if self.db().dialect().supports_returning() {
            self.db()
                .lock(move |conn, binder| Box::pin(insert_returning(conn, binder, params)))
                .await?
        } else {
            self.db()
                .lock(move |conn, binder| Box::pin(insert(conn, binder, params)))
                .await?
        };

        card.id = id;
        Ok(())
    }

    async fn delete_card(&self, id: i64) -> KeelResult<()> {
        debug!("Deleting card: {}", id);
        self.db()
            .lock(move |conn, binder| Box::pin(delete(conn, binder, id)))
            .await
    }
}

async fn query_by_build(conn: &mut AnyConnection, binder: &Binder, build: i64) -> KeelResult<Vec<Card>> {
    let params = Params::new().with("card_build", build);
    let (stmt, args) = binder.bind_named(QUERY_BY_BUILD, &params)?;
    let rows = sqlx::query_with(&stmt, args).fetch_all(&mut *conn).await?;
    scan_rows(&rows)
}

async fn query_by_step(conn: &mut AnyConnection, binder: &Binder, step: i64) -> KeelResult<Card> {
    let (stmt, args) = binder.bind_named(QUERY_BY_STEP, &to_params(step))?;
    let row = sqlx::query_with(&stmt, args)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| KeelError::not_found("card", format!("step {}", step)))?;
    scan_row(&row)
}

async fn query_card_data(conn: &mut AnyConnection, binder: &Binder, id: i64) -> KeelResult<CardData> {
    let params = Params::new().with("card_id", id);
    let (stmt, args) = binder.bind_named(QUERY_KEY, &params)?;
    let row = sqlx::query_with(&stmt, args)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| KeelError::not_found("card", id))?;
    scan_row_card_data_only(&row)
}

async fn insert(conn: &mut AnyConnection, binder: &Binder, params: Params) -> KeelResult<i64> {
    let (stmt, args) = binder.bind_named(STMT_INSERT, &params)?;
    let res = sqlx::query_with(&stmt, args).execute(&mut *conn).await?;
    if let Some(id) = res.last_insert_id() {
        return Ok(id);
    }

    // the sqlite bridge of the Any driver never fills in the id
    let query = binder
        .dialect()
        .last_insert_id_query()
        .ok_or_else(|| KeelError::internal("driver did not report the inserted card id"))?;
    let row = sqlx::query(query).fetch_one(&mut *conn).await?;
    Ok(row.try_get::<i64, _>(0)?)
}

async fn insert_returning(conn: &mut AnyConnection, binder: &Binder, params: Params) -> KeelResult<i64> {
    let (stmt, args) = binder.bind_named(STMT_INSERT_RETURNING, &params)?;
    let row = sqlx::query_with(&stmt, args).fetch_one(&mut *conn).await?;
    Ok(row.try_get("card_id")?)
}

async fn delete(conn: &mut AnyConnection, binder: &Binder, id: i64) -> KeelResult<()> {
    let params = Params::new().with("card_id", id);
    let (stmt, args) = binder.bind_named(STMT_DELETE, &params)?;
    sqlx::query_with(&stmt, args).execute(&mut *conn).await?;
    Ok(())
}

impl std::fmt::Debug for SqlCardStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqlCardStore").finish_non_exhaustive()
    }
}
