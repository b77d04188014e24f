//! Custom Axum extractors.

pub mod caller;
pub mod client;
pub mod path;

pub use caller::Caller;
pub use client::ClientInfo;
pub use path::IdParam;
