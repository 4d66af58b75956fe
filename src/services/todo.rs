//! CRUD over todo items.
//!
//! No ownership check happens here: any authenticated caller can see and change any item.

use sqlx::SqlitePool;
use validator::Validate;

use crate::error::AppError;
use crate::models::{Item, ItemInput};

pub struct TodoService<'a> {
    pool: &'a SqlitePool,
}

impl<'a> TodoService<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// All items, in id order.
    pub async fn list(&self) -> Result<Vec<Item>, AppError> {
        let items = sqlx::query_as::<_, Item>("SELECT id, title, description, done FROM items ORDER BY id")
            .fetch_all(self.pool)
            .await?;

        Ok(items)
    }

    /// Validates and stores a new item. Any `id` in the input is ignored.
    pub async fn create(&self, input: ItemInput) -> Result<Item, AppError> {
        input.validate()?;

        let item = sqlx::query_as::<_, Item>(
            "INSERT INTO items (title, description, done) VALUES (?, ?, ?)
             RETURNING id, title, description, done",
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.done)
        .fetch_one(self.pool)
        .await?;

        log::info!("created item {}", item.id);
        Ok(item)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Item, AppError> {
        sqlx::query_as::<_, Item>("SELECT id, title, description, done FROM items WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Overwrites title, description and done of item `id`.
    ///
    /// The body id must equal `id`; a mismatch is rejected before the store is touched.
    pub async fn update(&self, id: i64, input: ItemInput) -> Result<Item, AppError> {
        if input.id != id {
            return Err(AppError::BadRequest(format!(
                "Item id {} does not match the id {} in the request path",
                input.id, id
            )));
        }
        input.validate()?;

        let item = sqlx::query_as::<_, Item>(
            "UPDATE items SET title = ?, description = ?, done = ? WHERE id = ?
             RETURNING id, title, description, done",
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.done)
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| not_found(id))?;

        log::info!("updated item {}", item.id);
        Ok(item)
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM items WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        log::info!("deleted item {}", id);
        Ok(())
    }
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Item {} not found", id))
}
