use actix_web::{get, web, HttpResponse, Responder};
use chrono::Utc;
use serde_json::json;
use sqlx::SqlitePool;

/// Health check endpoint
///
/// Reports whether the database answers. Not behind authentication.
#[get("/health")]
pub async fn health(pool: web::Data<SqlitePool>) -> impl Responder {
    let database = sqlx::query("SELECT 1").execute(pool.get_ref()).await.is_ok();

    let mut response = if database {
        HttpResponse::Ok()
    } else {
        HttpResponse::ServiceUnavailable()
    };
    response.json(json!({
        "status": if database { "ok" } else { "degraded" },
        "database": database,
        "timestamp": Utc::now()
    }))
}
