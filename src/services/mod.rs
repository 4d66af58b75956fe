//! Business operations behind the HTTP handlers.
//!
//! Services borrow the connection pool for the duration of one request and
//! perform at most one read-then-write against the store.

pub mod auth;
pub mod todo;

pub use auth::AuthService;
pub use todo::TodoService;
