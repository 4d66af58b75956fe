//! Todo item endpoints. Mounted under `/api/Todo` behind `AuthMiddleware`.

use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::ItemInput,
    services::TodoService,
};
use actix_web::{delete, get, http::header, post, put, web, HttpResponse, Responder};
use sqlx::SqlitePool;

/// Lists every item.
///
/// ## Responses:
/// - `200 OK`: JSON array of `Item` objects, in id order.
/// - `401 Unauthorized`: missing, invalid or expired bearer token.
#[get("")]
pub async fn get_items(
    pool: web::Data<SqlitePool>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let items = TodoService::new(pool.get_ref()).list().await?;
    log::debug!("{} listed {} items", user.email(), items.len());

    Ok(HttpResponse::Ok().json(items))
}

/// Creates an item.
///
/// ## Request Body:
/// `{"title": "...", "description": "...", "done": false}`; `done` defaults to false.
///
/// ## Responses:
/// - `201 Created`: the stored `Item`, with `Location: /api/Todo/{id}`.
/// - `400 Bad Request`: missing fields, title not 1-200 characters, description over 1000.
/// - `401 Unauthorized`: missing, invalid or expired bearer token.
#[post("")]
pub async fn create_item(
    pool: web::Data<SqlitePool>,
    item_data: web::Json<ItemInput>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let item = TodoService::new(pool.get_ref())
        .create(item_data.into_inner())
        .await?;
    log::info!("item {} created by {}", item.id, user.email());

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/api/Todo/{}", item.id)))
        .json(item))
}

/// Fetches one item.
///
/// ## Responses:
/// - `200 OK`: the `Item`.
/// - `404 Not Found`: no item with that id.
#[get("/{id}")]
pub async fn get_item(
    pool: web::Data<SqlitePool>,
    item_id: web::Path<i64>,
    _user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let item = TodoService::new(pool.get_ref())
        .get_by_id(item_id.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(item))
}

/// Replaces title, description and done of an item.
///
/// ## Responses:
/// - `204 No Content`: updated.
/// - `400 Bad Request`: body id differs from the path id (checked first), or invalid fields.
/// - `404 Not Found`: no item with that id.
#[put("/{id}")]
pub async fn update_item(
    pool: web::Data<SqlitePool>,
    item_id: web::Path<i64>,
    item_data: web::Json<ItemInput>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let item = TodoService::new(pool.get_ref())
        .update(item_id.into_inner(), item_data.into_inner())
        .await?;
    log::info!("item {} updated by {}", item.id, user.email());

    Ok(HttpResponse::NoContent().finish())
}

/// Deletes an item.
///
/// ## Responses:
/// - `204 No Content`: deleted.
/// - `400 Bad Request`: no item with that id.
#[delete("/{id}")]
pub async fn delete_item(
    pool: web::Data<SqlitePool>,
    item_id: web::Path<i64>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let id = item_id.into_inner();
    TodoService::new(pool.get_ref())
        .delete(id)
        .await
        .map_err(|err| match err {
            AppError::NotFound(msg) => AppError::BadRequest(msg),
            other => other,
        })?;
    log::info!("item {} deleted by {}", id, user.email());

    Ok(HttpResponse::NoContent().finish())
}
