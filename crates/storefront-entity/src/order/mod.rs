//! Orders, as seen by the authorization layer.

pub mod model;

pub use model::Order;
