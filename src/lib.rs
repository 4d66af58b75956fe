#![doc = "The `todo_api` library crate."]
#![doc = ""]
#![doc = "Todo-list HTTP API with JWT bearer authentication: registration and login"]
#![doc = "issue short-lived HS256 tokens, and every `/api/Todo` route requires one."]
#![doc = "The binary (`main.rs`) wires these modules into an actix-web server."]

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

pub use crate::config::Config;
pub use crate::error::AppError;
