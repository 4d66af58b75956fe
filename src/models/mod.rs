pub mod item;
pub mod user;

pub use item::{Item, ItemInput};
pub use user::{NewUser, User};
