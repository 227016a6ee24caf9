//! Terminal chat client for the Tsudoi presence relay.

mod command;
mod error;
mod formatter;
mod policy;
mod runner;
mod session;
mod ui;

pub use error::ClientError;
pub use runner::run_client;
