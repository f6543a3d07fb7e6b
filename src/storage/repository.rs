//! Item repository
//!
//! Single-row CRUD operations over the `items` table. The repository borrows
//! any sea-orm connection, so the same code runs against the pool directly or
//! inside a request-scoped [`StoreSession`](super::StoreSession).

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, UpdateMany,
};

use crate::schema::{Item, ItemInput, Page};

use super::errors::{StoreError, StoreResult};
use super::item;

/// CRUD access to items through a borrowed connection
pub struct ItemRepository<'c, C> {
    conn: &'c C,
}

impl<'c, C: ConnectionTrait> ItemRepository<'c, C> {
    pub fn new(conn: &'c C) -> Self {
        Self { conn }
    }

    /// Stores a new item. The id is assigned by the database.
    pub async fn create(&self, input: ItemInput) -> StoreResult<Item> {
        let model = item::ActiveModel {
            title: Set(input.title),
            description: Set(input.description),
            done: Set(input.done),
            ..Default::default()
        }
        .insert(self.conn)
        .await?;

        Ok(model.into())
    }

    /// Lists items in insertion order.
    pub async fn list(&self, page: Page) -> StoreResult<Vec<Item>> {
        let models = item::Entity::find()
            .order_by_asc(item::Column::Id)
            .offset(page.offset)
            .limit(page.limit)
            .all(self.conn)
            .await?;

        Ok(models.into_iter().map(Item::from).collect())
    }

    pub async fn get(&self, id: i64) -> StoreResult<Item> {
        self.find_model(id).await.map(Item::from)
    }

    /// Replaces title, description and done of an existing item.
    pub async fn update(&self, id: i64, input: ItemInput) -> StoreResult<Item> {
        let stmt = item::Entity::update_many()
            .col_expr(item::Column::Title, Expr::value(input.title))
            .col_expr(item::Column::Description, Expr::value(input.description))
            .col_expr(item::Column::Done, Expr::value(input.done));

        self.write_then_read(id, stmt).await
    }

    /// Sets `done` to true, leaving every other field untouched.
    ///
    /// Marking an already finished item is not an error.
    pub async fn mark_done(&self, id: i64) -> StoreResult<Item> {
        let stmt = item::Entity::update_many().col_expr(item::Column::Done, Expr::value(true));

        self.write_then_read(id, stmt).await
    }

    pub async fn delete(&self, id: i64) -> StoreResult<()> {
        let result = item::Entity::delete_by_id(id).exec(self.conn).await?;
        if result.rows_affected == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    async fn find_model(&self, id: i64) -> StoreResult<item::Model> {
        item::Entity::find_by_id(id)
            .one(self.conn)
            .await?
            .ok_or(StoreError::NotFound(id))
    }

    /// Runs a single-row update and re-reads the row.
    ///
    /// The write is the first statement of the surrounding transaction, so
    /// SQLite takes the write lock before any read snapshot exists.
    async fn write_then_read(
        &self,
        id: i64,
        stmt: UpdateMany<item::Entity>,
    ) -> StoreResult<Item> {
        let result = stmt
            .filter(item::Column::Id.eq(id))
            .exec(self.conn)
            .await?;
        if result.rows_affected == 0 {
            return Err(StoreError::NotFound(id));
        }

        self.get(id).await
    }
}
