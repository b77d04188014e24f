//! Authorization decisions for protected routes.

pub mod enforcer;

pub use enforcer::{AuthorizationGate, Resource};
