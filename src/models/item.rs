use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A todo item as stored in the `items` table and returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Item {
    /// Server-assigned, monotonically increasing.
    pub id: i64,
    pub title: String,
    pub description: String,
    pub done: bool,
}

/// Request body for creating or updating an item.
///
/// `id` is ignored on create. On update it must equal the id in the path;
/// an absent id reads as 0, which never matches a stored item.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ItemInput {
    #[serde(default)]
    pub id: i64,
    #[validate(length(
        min = 1,
        max = 200,
        message = "The Title field must be between 1 and 200 characters."
    ))]
    pub title: String,
    #[validate(length(
        max = 1000,
        message = "The Description field must be at most 1000 characters."
    ))]
    pub description: String,
    #[serde(default)]
    pub done: bool,
}
