pub mod auth;
pub mod health;
pub mod todo;

use actix_web::{error, web, HttpRequest};

use crate::auth::AuthMiddleware;
use crate::error::{AppError, INVALID_PAYLOAD};

/// Registers every route plus the body and path extractor configuration.
///
/// Expects `web::Data<SqlitePool>`, `web::Data<TokenService>` and
/// `web::Data<PasswordHasher>` to be registered on the `App`.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(path_config())
        .service(health::health)
        .service(
            web::scope("/api/AuthManagement")
                .service(auth::register)
                .service(auth::login),
        )
        .service(
            web::scope("/api/Todo")
                .wrap(AuthMiddleware)
                .service(todo::get_items)
                .service(todo::create_item)
                .service(todo::get_item)
                .service(todo::update_item)
                .service(todo::delete_item),
        );
}

/// Unparseable or incomplete JSON bodies become a 400 with the generic payload message.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: error::JsonPayloadError, req: &HttpRequest| {
        log::debug!("rejected body for {}: {}", req.path(), err);
        AppError::validation(INVALID_PAYLOAD).into()
    })
}

/// Non-numeric ids in the path are a 400, not a 404.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err: error::PathError, req: &HttpRequest| {
        log::debug!("rejected path {}: {}", req.path(), err);
        AppError::validation(INVALID_PAYLOAD).into()
    })
}
