//! Request handlers.

mod http;
mod websocket;

pub use http::{health_check, list_users, root};
pub use websocket::websocket_handler;
