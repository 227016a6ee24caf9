//! Presence relay server.
//!
//! Tracks which WebSocket connections have joined with a display name and fans
//! chat, typing and presence events out to every joined client.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin tsudoi-server
//! cargo run --bin tsudoi-server -- --host 0.0.0.0 --port 3002
//! ```

use std::sync::Arc;

use clap::Parser;
use tsudoi_server::{
    config::{
        DEFAULT_CORS_ORIGIN, DEFAULT_HOST, DEFAULT_IDLE_TIMEOUT_SECS, DEFAULT_OUTBOUND_BUFFER,
        DEFAULT_PORT, DEFAULT_WRITE_TIMEOUT_SECS, RelayConfig,
    },
    ui::Server,
};
use tsudoi_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "tsudoi-server")]
#[command(about = "WebSocket presence relay for real-time chat", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "TSUDOI_HOST", default_value = DEFAULT_HOST)]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Origin allowed by CORS
    #[arg(long, env = "TSUDOI_CORS_ORIGIN", default_value = DEFAULT_CORS_ORIGIN)]
    cors_origin: String,

    /// Capacity of each connection's outbound queue
    #[arg(long, env = "TSUDOI_OUTBOUND_BUFFER", default_value_t = DEFAULT_OUTBOUND_BUFFER)]
    outbound_buffer: usize,

    /// Close connections idle for this many seconds (0 disables)
    #[arg(long, env = "TSUDOI_IDLE_TIMEOUT_SECS", default_value_t = DEFAULT_IDLE_TIMEOUT_SECS)]
    idle_timeout_secs: u64,

    /// Close connections whose socket write stalls for this many seconds
    #[arg(long, env = "TSUDOI_WRITE_TIMEOUT_SECS", default_value_t = DEFAULT_WRITE_TIMEOUT_SECS)]
    write_timeout_secs: u64,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    let config = RelayConfig::from_secs(
        args.cors_origin,
        args.outbound_buffer,
        args.idle_timeout_secs,
        args.write_timeout_secs,
    );
    tracing::debug!("Relay config: {:?}", config);

    let server = Server::in_memory(config, Arc::new(SystemClock));
    if let Err(e) = server.run(&args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
