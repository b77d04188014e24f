//! User domain entities.

pub mod model;
pub mod user_type;

pub use model::{CreateUser, User};
pub use user_type::UserType;
