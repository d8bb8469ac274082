mod app;
mod config;
mod error;
mod relay;
mod room;
mod signaling;

pub use app::{router, serve, serve_with_listener, spawn_relay};
pub use config::RelayConfig;
pub use error::RelayError;
pub use relay::*;
pub use room::*;
pub use signaling::*;
